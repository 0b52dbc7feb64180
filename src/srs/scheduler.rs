use chrono::{DateTime, Duration, Utc};

use crate::domain::ProgressRecord;

pub const MIN_EASE_FACTOR: f64 = 1.3;

/// A complete blackout (quality 0) is re-queued within the same
/// sitting rather than waiting for the computed interval.
const RELEARN_DELAY_MINUTES: i64 = 10;

/// Sub-day intervals never schedule closer than this many hours.
const MIN_SUB_DAY_HOURS: f64 = 1.0;

/// Compute the next scheduling state for one word after a review.
///
/// `quality` is the 0-5 recall score (the UI emits 0, 3 or 5; anything
/// above 5 is clamped). `previous` is the word's prior state, or
/// `ProgressRecord::fresh` for a first review.
pub fn schedule(quality: u8, previous: &ProgressRecord, now: DateTime<Utc>) -> ProgressRecord {
  let quality = quality.min(5);
  let q = f64::from(quality);

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  // Applied on success and failure alike; failure softens easiness but
  // never resets it.
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let ease_factor = (previous.ease_factor + ease_delta).max(MIN_EASE_FACTOR);

  let (interval_days, repetitions) = if quality < 3 {
    // Failed recall: back to a one-day interval
    (1.0, 0)
  } else {
    let interval = match previous.repetitions {
      0 => 1.0,
      1 => 6.0,
      // Interval grows from the pre-review easiness
      _ => (previous.interval_days * previous.ease_factor).round(),
    };
    (interval, previous.repetitions + 1)
  };

  let next_review_at = if quality == 0 {
    now + Duration::minutes(RELEARN_DELAY_MINUTES)
  } else if interval_days < 1.0 {
    let hours = (interval_days * 24.0).max(MIN_SUB_DAY_HOURS);
    now + Duration::seconds((hours * 3600.0).round() as i64)
  } else {
    now + Duration::seconds((interval_days * 86_400.0).round() as i64)
  };

  ProgressRecord {
    ease_factor,
    interval_days,
    repetitions,
    last_studied_at: now,
    next_review_at,
  }
}
