//! Free-form quiz generation over a word collection.
//!
//! Two modes, both checked locally: `pinyin` shows the characters and
//! expects the numbered-tone transcription; `production` shows the
//! Korean gloss and expects the characters.

pub mod pinyin;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::domain::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
  Pinyin,
  Production,
}

impl QuizMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      QuizMode::Pinyin => "pinyin",
      QuizMode::Production => "production",
    }
  }
}

impl std::fmt::Display for QuizMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
  pub mode: QuizMode,
  pub word_id: i64,
  pub question: String,
  pub answer: String,
  pub explanation: String,
}

fn explanation(summary: String, word: &Word) -> String {
  match word.examples.first() {
    Some(example) => format!("{}\n예문: {}", summary, example.sentence),
    None => summary,
  }
}

fn question_for(word: &Word, mode: QuizMode) -> QuizQuestion {
  match mode {
    QuizMode::Pinyin => QuizQuestion {
      mode,
      word_id: word.id,
      question: word.text.clone(),
      answer: pinyin::to_number_tones(&word.pronunciation),
      explanation: explanation(format!("{} ({})", word.pronunciation, word.meaning), word),
    },
    QuizMode::Production => QuizQuestion {
      mode,
      word_id: word.id,
      question: word.meaning.clone(),
      answer: word.text.clone(),
      explanation: explanation(format!("{} ({})", word.text, word.pronunciation), word),
    },
  }
}

/// Build `count` questions over a random selection from the pool.
/// Fewer questions come back when the pool is smaller than `count`.
pub fn generate_quiz(pool: &[Word], mode: QuizMode, count: usize) -> Vec<QuizQuestion> {
  let mut words: Vec<&Word> = pool.iter().collect();
  words.shuffle(&mut rand::rng());
  words.truncate(count);
  words.into_iter().map(|word| question_for(word, mode)).collect()
}

/// Check a typed answer against the expected one for the given mode.
pub fn check_answer(mode: QuizMode, expected: &str, answer: &str) -> bool {
  match mode {
    QuizMode::Pinyin => pinyin::matches(answer, expected),
    QuizMode::Production => answer.trim() == expected.trim(),
  }
}
