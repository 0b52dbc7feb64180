//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `PORT`: Override the server port (see config.rs)

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<PathBuf> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR_VALUE.get_or_init(|| {
        PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
    })
}

/// Directory holding the basic word list files (*.json)
pub fn words_dir() -> PathBuf {
    data_dir().join("words")
}

/// Directory holding the textbook word list files
pub fn textbook_dir() -> PathBuf {
    words_dir().join("textbook")
}

/// Directory holding one JSON file per song vocabulary set
pub fn song_dir() -> PathBuf {
    words_dir().join("song")
}

/// Persisted learner progress (flat JSON map per collection)
pub fn progress_path() -> PathBuf {
    data_dir().join("progress.json")
}

/// Persisted study settings
pub fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}
