//! Word collection loading.
//!
//! Three collection families live under the data directory:
//!
//! - basic: every `*.json` file directly under `words/`
//! - textbook: every `*.json` file under `words/textbook/`
//! - song: one file per song under `words/song/`, named after the song
//!
//! Collections are loaded once at startup into an immutable [`Library`].
//! Unreadable files are skipped with a warning; a missing directory is
//! an empty collection, never a startup failure.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{normalize_words, RawWord, Word};
use crate::paths;

/// Which word collection a request is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Basic,
    Textbook,
    Song,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Basic => "basic",
            CollectionKind::Textbook => "textbook",
            CollectionKind::Song => "song",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(CollectionKind::Basic),
            "textbook" => Ok(CollectionKind::Textbook),
            "song" => Ok(CollectionKind::Song),
            _ => Err(format!("Invalid collection kind: {}", s)),
        }
    }
}

/// Vocabulary extracted from one song's lyrics.
#[derive(Debug, Clone, Serialize)]
pub struct SongSet {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub words: Vec<Word>,
}

/// Word loading errors.
#[derive(Debug)]
pub enum WordLoadError {
    Io(String, String),
    Parse(String, String),
}

impl std::fmt::Display for WordLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordLoadError::Io(path, err) => write!(f, "IO error reading {}: {}", path, err),
            WordLoadError::Parse(path, err) => write!(f, "Parse error in {}: {}", path, err),
        }
    }
}

impl std::error::Error for WordLoadError {}

/// Read one word list file into its raw entries.
fn read_words_file(path: &Path) -> Result<Vec<RawWord>, WordLoadError> {
    let content = fs::read_to_string(path)
        .map_err(|e| WordLoadError::Io(path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|e| WordLoadError::Parse(path.display().to_string(), e.to_string()))
}

/// All `*.json` files directly under `dir`, sorted by file name.
fn json_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Collection directory {} not readable: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// Load and flatten a directory of word list files, assigning
/// positional ids across the flattened list where entries carry none.
fn load_collection(dir: &Path) -> Vec<Word> {
    let mut raw = Vec::new();
    for path in json_files(dir) {
        match read_words_file(&path) {
            Ok(mut entries) => raw.append(&mut entries),
            Err(e) => tracing::warn!("Skipping word file: {}", e),
        }
    }
    normalize_words(raw)
}

/// Song file names are URL-encoded titles.
fn song_title(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    urlencoding::decode(&stem)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(stem)
}

fn load_songs(dir: &Path) -> Vec<SongSet> {
    let mut songs: Vec<SongSet> = Vec::new();
    for path in json_files(dir) {
        match read_words_file(&path) {
            Ok(raw) => {
                let title = song_title(&path);
                songs.push(SongSet {
                    slug: title.clone(),
                    description: format!("{} 가사 기반 어휘 학습", title),
                    title,
                    words: normalize_words(raw),
                });
            }
            Err(e) => tracing::warn!("Skipping song file: {}", e),
        }
    }
    songs.sort_by(|a, b| a.title.cmp(&b.title));
    songs
}

/// Every word collection, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Library {
    basic: Vec<Word>,
    textbook: Vec<Word>,
    songs: Vec<SongSet>,
}

impl Library {
    /// Load from the configured data directory.
    pub fn load() -> Self {
        Self::load_from(&paths::words_dir())
    }

    /// Load from an explicit words directory (tests point this at a
    /// temporary tree).
    pub fn load_from(words_dir: &Path) -> Self {
        let library = Self {
            basic: load_collection(words_dir),
            textbook: load_collection(&words_dir.join("textbook")),
            songs: load_songs(&words_dir.join("song")),
        };
        tracing::info!(
            "Loaded {} basic, {} textbook words and {} song sets",
            library.basic.len(),
            library.textbook.len(),
            library.songs.len()
        );
        library
    }

    pub fn basic(&self) -> &[Word] {
        &self.basic
    }

    pub fn textbook(&self) -> &[Word] {
        &self.textbook
    }

    pub fn songs(&self) -> &[SongSet] {
        &self.songs
    }

    /// Look up a song set by slug; accepts raw or URL-encoded slugs.
    pub fn song(&self, slug: &str) -> Option<&SongSet> {
        let decoded = urlencoding::decode(slug)
            .map(|d| d.into_owned())
            .unwrap_or_else(|_| slug.to_string());
        self.songs.iter().find(|set| set.slug == decoded)
    }

    /// Every pool with its progress-store key.
    pub fn pools(&self) -> Vec<(String, &[Word])> {
        let mut pools: Vec<(String, &[Word])> = vec![
            ("basic".to_string(), self.basic.as_slice()),
            ("textbook".to_string(), self.textbook.as_slice()),
        ];
        for set in &self.songs {
            pools.push((format!("song:{}", set.slug), set.words.as_slice()));
        }
        pools
    }

    pub fn total_words(&self) -> usize {
        self.pools().iter().map(|(_, words)| words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn sample_entries(words: &[(&str, &str, &str)]) -> String {
        let entries: Vec<String> = words
            .iter()
            .map(|(word, pinyin, meaning)| {
                format!(
                    r#"{{"word": "{}", "pinyin": "{}", "meaning_ko": "{}"}}"#,
                    word, pinyin, meaning
                )
            })
            .collect();
        format!("[{}]", entries.join(","))
    }

    #[test]
    fn test_collection_kind_roundtrip() {
        for kind in [
            CollectionKind::Basic,
            CollectionKind::Textbook,
            CollectionKind::Song,
        ] {
            assert_eq!(CollectionKind::from_str(kind.as_str()), Ok(kind));
        }
        assert!(CollectionKind::from_str("grammar").is_err());
    }

    #[test]
    fn test_load_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let library = Library::load_from(&temp.path().join("nowhere"));

        assert!(library.basic().is_empty());
        assert!(library.textbook().is_empty());
        assert!(library.songs().is_empty());
        assert_eq!(library.total_words(), 0);
    }

    #[test]
    fn test_basic_flattens_files_in_name_order() {
        let temp = TempDir::new().unwrap();
        write_file(
            temp.path(),
            "b_grade2.json",
            &sample_entries(&[("猫", "māo", "고양이")]),
        );
        write_file(
            temp.path(),
            "a_grade1.json",
            &sample_entries(&[("一", "yī", "하나"), ("二", "èr", "둘")]),
        );

        let library = Library::load_from(temp.path());
        let basic = library.basic();

        assert_eq!(basic.len(), 3);
        // a_grade1.json sorts first; positional ids follow the flattened order
        assert_eq!(basic[0].text, "一");
        assert_eq!(basic[0].id, 1);
        assert_eq!(basic[2].text, "猫");
        assert_eq!(basic[2].id, 3);
    }

    #[test]
    fn test_subdirectories_not_mixed_into_basic() {
        let temp = TempDir::new().unwrap();
        write_file(
            temp.path(),
            "grade1.json",
            &sample_entries(&[("一", "yī", "하나")]),
        );
        write_file(
            &temp.path().join("textbook"),
            "unit1.json",
            &sample_entries(&[("学", "xué", "배우다")]),
        );

        let library = Library::load_from(temp.path());
        assert_eq!(library.basic().len(), 1);
        assert_eq!(library.textbook().len(), 1);
        assert_eq!(library.textbook()[0].text, "学");
    }

    #[test]
    fn test_malformed_file_skipped() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "bad.json", "{broken");
        write_file(
            temp.path(),
            "good.json",
            &sample_entries(&[("水", "shuǐ", "물")]),
        );

        let library = Library::load_from(temp.path());
        assert_eq!(library.basic().len(), 1);
    }

    #[test]
    fn test_songs_sorted_and_described() {
        let temp = TempDir::new().unwrap();
        let songs = temp.path().join("song");
        write_file(&songs, "月亮代表我的心.json", &sample_entries(&[("月亮", "yuè liang", "달")]));
        write_file(&songs, "童年.json", &sample_entries(&[("童年", "tóng nián", "어린 시절")]));

        let library = Library::load_from(temp.path());
        let titles: Vec<&str> = library.songs().iter().map(|s| s.title.as_str()).collect();

        assert_eq!(titles, vec!["月亮代表我的心", "童年"]);
        assert_eq!(
            library.songs()[1].description,
            "童年 가사 기반 어휘 학습"
        );
    }

    #[test]
    fn test_song_lookup_accepts_encoded_slug() {
        let temp = TempDir::new().unwrap();
        write_file(
            &temp.path().join("song"),
            "童年.json",
            &sample_entries(&[("童年", "tóng nián", "어린 시절")]),
        );

        let library = Library::load_from(temp.path());
        assert!(library.song("童年").is_some());
        assert!(library.song("%E7%AB%A5%E5%B9%B4").is_some());
        assert!(library.song("missing").is_none());
    }

    #[test]
    fn test_url_encoded_song_file_name_decoded() {
        let temp = TempDir::new().unwrap();
        write_file(
            &temp.path().join("song"),
            "%E7%AB%A5%E5%B9%B4.json",
            &sample_entries(&[("童年", "tóng nián", "어린 시절")]),
        );

        let library = Library::load_from(temp.path());
        assert_eq!(library.songs()[0].title, "童年");
    }

    #[test]
    fn test_pools_include_song_keys() {
        let temp = TempDir::new().unwrap();
        write_file(
            temp.path(),
            "grade1.json",
            &sample_entries(&[("一", "yī", "하나")]),
        );
        write_file(
            &temp.path().join("song"),
            "童年.json",
            &sample_entries(&[("童年", "tóng nián", "어린 시절")]),
        );

        let library = Library::load_from(temp.path());
        let keys: Vec<String> = library.pools().into_iter().map(|(key, _)| key).collect();

        assert!(keys.contains(&"basic".to_string()));
        assert!(keys.contains(&"textbook".to_string()));
        assert!(keys.contains(&"song:童年".to_string()));
        assert_eq!(library.total_words(), 2);
    }
}
