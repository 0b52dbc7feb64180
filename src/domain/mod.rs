pub mod progress;
pub mod word;

pub use progress::{ProgressMap, ProgressRecord, ReviewQuality};
pub use word::{normalize_words, Example, RawWord, Word};
