pub mod collections;

pub use collections::{CollectionKind, Library, SongSet, WordLoadError};
