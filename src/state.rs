//! Application state shared across handlers.

use std::sync::{Arc, Mutex};

use crate::content::Library;
use crate::srs::StudySession;
use crate::store::{ProgressPool, ProgressStore, SettingsPool, SettingsStore};

/// The study session currently in flight, tied to the collection whose
/// progress it writes back to. Ephemeral: replaced on the next session
/// start, gone on restart.
#[derive(Debug, Clone)]
pub struct ActiveSession {
  /// Progress-store key of the pool this session was composed from
  pub collection: String,
  pub session: StudySession,
}

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// Word collections, loaded once at startup
  pub library: Arc<Library>,
  pub progress: ProgressPool,
  pub settings: SettingsPool,
  pub session: Arc<Mutex<Option<ActiveSession>>>,
}

impl AppState {
  pub fn new(library: Library, progress: ProgressStore, settings: SettingsStore) -> Self {
    Self {
      library: Arc::new(library),
      progress: Arc::new(Mutex::new(progress)),
      settings: Arc::new(Mutex::new(settings)),
      session: Arc::new(Mutex::new(None)),
    }
  }
}
