//! Pinyin tone-mark handling for quiz answers.
//!
//! Quiz answers are typed without diacritics, so expected answers are
//! converted to the numbered form: the tone digit follows the vowel
//! that carried the mark ("nǐ hǎo" -> "ni3 ha3o") and ü is written v
//! ("lǜ" -> "lv4").

use unicode_normalization::UnicodeNormalization;

const MACRON: char = '\u{0304}';
const ACUTE: char = '\u{0301}';
const CARON: char = '\u{030C}';
const GRAVE: char = '\u{0300}';
const DIAERESIS: char = '\u{0308}';

/// Convert diacritic-marked pinyin to the numbered-tone form.
pub fn to_number_tones(pinyin: &str) -> String {
  let lowered = pinyin.to_lowercase();
  let mut out = String::with_capacity(lowered.len());

  for c in lowered.nfd() {
    match c {
      MACRON => out.push('1'),
      ACUTE => out.push('2'),
      CARON => out.push('3'),
      GRAVE => out.push('4'),
      DIAERESIS => {
        if out.ends_with('u') {
          out.pop();
          out.push('v');
        }
        // Any other diaeresis carrier is not pinyin; drop the mark
      }
      _ => out.push(c),
    }
  }

  out
}

/// Lowercase and collapse runs of whitespace.
pub fn normalize_answer(answer: &str) -> String {
  answer
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

/// Compare a typed answer against the expected numbered-tone form.
/// Learners may type ü where the expected form uses v.
pub fn matches(answer: &str, expected: &str) -> bool {
  let answer = normalize_answer(answer);
  let expected = normalize_answer(expected);
  answer == expected || answer == expected.replace('v', "ü")
}
