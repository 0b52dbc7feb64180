use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-word learner state, keyed by word id in the persisted map.
///
/// Created on first review; mutated on every subsequent review; removed
/// only by an explicit bulk reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
  /// How easy the learner finds this word; floor 1.3, larger means
  /// longer future intervals.
  pub ease_factor: f64,
  /// Days until the next scheduled review. May be fractional.
  pub interval_days: f64,
  /// Consecutive successful recalls since the last failure.
  pub repetitions: i64,
  pub last_studied_at: DateTime<Utc>,
  pub next_review_at: DateTime<Utc>,
}

impl ProgressRecord {
  /// State assumed for a word that has never been reviewed.
  pub fn fresh(now: DateTime<Utc>) -> Self {
    Self {
      ease_factor: 2.5,
      interval_days: 0.0,
      repetitions: 0,
      last_studied_at: now,
      next_review_at: now,
    }
  }

  /// Due when the scheduled review time has passed.
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review_at <= now
  }
}

/// Flat mapping from word id to learner state, as persisted on disk.
pub type ProgressMap = HashMap<i64, ProgressRecord>;

/// Learner-facing recall judgment, mapped onto the 0-5 quality scale
/// the scheduler consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewQuality {
  Again = 0,
  Hard = 3,
  Easy = 5,
}

impl ReviewQuality {
  /// Exact match on the values the UI emits.
  pub fn from_u8(value: u8) -> Option<Self> {
    match value {
      0 => Some(Self::Again),
      3 => Some(Self::Hard),
      5 => Some(Self::Easy),
      _ => None,
    }
  }

  /// Bucket an arbitrary 0-5 quality score into the nearest judgment.
  pub fn classify(quality: u8) -> Self {
    match quality {
      0..=2 => Self::Again,
      3..=4 => Self::Hard,
      _ => Self::Easy,
    }
  }

  pub fn as_u8(&self) -> u8 {
    *self as u8
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Again => "again",
      Self::Hard => "hard",
      Self::Easy => "easy",
    }
  }

  pub fn is_correct(&self) -> bool {
    matches!(self, Self::Hard | Self::Easy)
  }
}
