use serde::{Deserialize, Serialize};

/// An example sentence attached to a word, optionally with its own
/// pronunciation and Korean translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
  pub sentence: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pronunciation: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub translation: Option<String>,
}

/// One vocabulary entry. Immutable reference data; `id` is unique
/// within a single collection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
  pub id: i64,
  /// The Chinese word or character(s)
  pub text: String,
  /// Pinyin with tone diacritics
  pub pronunciation: String,
  /// Korean gloss
  pub meaning: String,
  #[serde(default)]
  pub examples: Vec<Example>,
}

/// Raw word entry as found in the collection JSON files.
///
/// Two on-disk formats exist: the current one (`word`/`pinyin`/
/// `meaning_ko` plus optional example fields) and the legacy grade-list
/// one (`char`/`pinyin`/`korean`). The legacy `type` and `level` fields
/// carry no meaning here and are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawWord {
  Entry {
    #[serde(default)]
    id: Option<i64>,
    word: String,
    pinyin: String,
    meaning_ko: String,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    example_pinyin: Option<String>,
    #[serde(default)]
    example_korean: Option<String>,
  },
  Legacy {
    #[serde(default)]
    id: Option<i64>,
    #[serde(rename = "char")]
    character: String,
    pinyin: String,
    korean: String,
  },
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.trim().is_empty())
}

impl RawWord {
  /// Normalize into a `Word`, falling back to a positional id
  /// (index + 1) when the entry carries none.
  pub fn into_word(self, index: usize) -> Word {
    let fallback_id = (index + 1) as i64;
    match self {
      RawWord::Entry {
        id,
        word,
        pinyin,
        meaning_ko,
        example,
        example_pinyin,
        example_korean,
      } => {
        let examples = non_empty(example)
          .map(|sentence| Example {
            sentence,
            pronunciation: non_empty(example_pinyin),
            translation: non_empty(example_korean),
          })
          .into_iter()
          .collect();
        Word {
          id: id.unwrap_or(fallback_id),
          text: word,
          pronunciation: pinyin,
          meaning: meaning_ko,
          examples,
        }
      }
      RawWord::Legacy {
        id,
        character,
        pinyin,
        korean,
      } => Word {
        id: id.unwrap_or(fallback_id),
        text: character,
        pronunciation: pinyin,
        meaning: korean,
        examples: Vec::new(),
      },
    }
  }
}

/// Normalize a flattened list of raw entries, assigning positional ids
/// where missing.
pub fn normalize_words(raw: Vec<RawWord>) -> Vec<Word> {
  raw
    .into_iter()
    .enumerate()
    .map(|(index, entry)| entry.into_word(index))
    .collect()
}
