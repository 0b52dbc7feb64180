//! Session composition: pick and order the words for the next sitting.
//!
//! Overdue reviews get priority, capped so a backlog cannot crowd out
//! new words entirely; leftover slots are backfilled from whichever
//! side still has candidates.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;

use crate::domain::{ProgressMap, Word};

/// Share of a session reserved for overdue reviews before new words
/// fill the remaining slots.
const DUE_SLOT_RATIO: f64 = 0.7;

/// Build the word list for the next study session.
///
/// Words with a record scheduled in the future are excluded outright.
/// Overdue words are taken most-overdue-first up to
/// `ceil(target * 0.7)` slots, never-studied words fill the rest in
/// pool order, and any still-empty slots fall back to the remaining
/// overdue tail. The final selection is shuffled uniformly. Returns an
/// empty list when nothing is due and nothing is new; a zero
/// `target_size` is treated as 1.
pub fn compose_session(
  pool: &[Word],
  progress: &ProgressMap,
  now: DateTime<Utc>,
  target_size: usize,
) -> Vec<Word> {
  let target = target_size.max(1);

  let mut due: Vec<(&Word, DateTime<Utc>)> = Vec::new();
  let mut unseen: Vec<&Word> = Vec::new();

  for word in pool {
    match progress.get(&word.id) {
      Some(record) if record.next_review_at <= now => due.push((word, record.next_review_at)),
      Some(_) => {} // scheduled in the future, not part of this session
      None => unseen.push(word),
    }
  }

  // Most overdue first
  due.sort_by_key(|(_, next_review_at)| *next_review_at);

  let due_quota = ((target as f64) * DUE_SLOT_RATIO).ceil() as usize;
  let reserved = due_quota.min(due.len()).min(target);

  let mut selected: Vec<&Word> = due[..reserved].iter().map(|(word, _)| *word).collect();

  for word in unseen {
    if selected.len() >= target {
      break;
    }
    selected.push(word);
  }

  for (word, _) in &due[reserved..] {
    if selected.len() >= target {
      break;
    }
    selected.push(*word);
  }

  let mut session: Vec<Word> = selected.into_iter().cloned().collect();
  session.shuffle(&mut rand::rng());
  session
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ProgressRecord;
  use chrono::Duration;
  use std::collections::HashSet;

  fn word(id: i64) -> Word {
    Word {
      id,
      text: format!("字{id}"),
      pronunciation: "zì".to_string(),
      meaning: "글자".to_string(),
      examples: Vec::new(),
    }
  }

  fn pool(count: i64) -> Vec<Word> {
    (1..=count).map(word).collect()
  }

  fn record_due_at(now: DateTime<Utc>, offset_hours: i64) -> ProgressRecord {
    let mut record = ProgressRecord::fresh(now);
    record.repetitions = 1;
    record.next_review_at = now + Duration::hours(offset_hours);
    record
  }

  fn ids(session: &[Word]) -> HashSet<i64> {
    session.iter().map(|w| w.id).collect()
  }

  #[test]
  fn test_session_size_bound() {
    let now = Utc::now();
    let session = compose_session(&pool(50), &ProgressMap::new(), now, 5);
    assert_eq!(session.len(), 5);
  }

  #[test]
  fn test_all_new_when_no_progress() {
    let now = Utc::now();
    let words = pool(10);
    let session = compose_session(&words, &ProgressMap::new(), now, 5);

    assert_eq!(session.len(), 5);
    // Pool-order fill: the first five words
    assert_eq!(ids(&session), HashSet::from([1, 2, 3, 4, 5]));
  }

  #[test]
  fn test_future_scheduled_words_excluded() {
    let now = Utc::now();
    let words = pool(3);
    let mut progress = ProgressMap::new();
    progress.insert(1, record_due_at(now, 24));
    progress.insert(2, record_due_at(now, -1));

    let session = compose_session(&words, &progress, now, 3);

    assert!(!ids(&session).contains(&1));
    assert_eq!(ids(&session), HashSet::from([2, 3]));
  }

  #[test]
  fn test_most_overdue_selected_first() {
    let now = Utc::now();
    let words = pool(3);
    let mut progress = ProgressMap::new();
    progress.insert(1, record_due_at(now, -1));
    progress.insert(2, record_due_at(now, -48));
    progress.insert(3, record_due_at(now, -24));

    // ceil(1 * 0.7) = 1 slot: the most overdue word wins
    let session = compose_session(&words, &progress, now, 1);
    assert_eq!(ids(&session), HashSet::from([2]));
  }

  #[test]
  fn test_due_quota_leaves_room_for_new() {
    let now = Utc::now();
    let words = pool(20);
    let mut progress = ProgressMap::new();
    for id in 1..=10 {
      progress.insert(id, record_due_at(now, -id));
    }

    let session = compose_session(&words, &progress, now, 10);
    assert_eq!(session.len(), 10);

    // ceil(10 * 0.7) = 7 due slots, 3 new slots
    let selected = ids(&session);
    let due_selected = selected.iter().filter(|id| **id <= 10).count();
    let new_selected = selected.iter().filter(|id| **id > 10).count();
    assert_eq!(due_selected, 7);
    assert_eq!(new_selected, 3);

    // Most-overdue-first means ids 4..=10 (offsets -4..-10) make the cut
    for id in 4..=10 {
      assert!(selected.contains(&id));
    }
  }

  #[test]
  fn test_backfill_from_due_tail_when_new_exhausted() {
    let now = Utc::now();
    let words = pool(10);
    let mut progress = ProgressMap::new();
    for id in 1..=10 {
      progress.insert(id, record_due_at(now, -id));
    }

    // No unseen words at all: due words fill every slot
    let session = compose_session(&words, &progress, now, 10);
    assert_eq!(session.len(), 10);
    assert_eq!(ids(&session).len(), 10);
  }

  #[test]
  fn test_partial_backfill() {
    let now = Utc::now();
    let words = pool(6);
    let mut progress = ProgressMap::new();
    for id in 1..=5 {
      progress.insert(id, record_due_at(now, -id));
    }

    // target 4: quota ceil(2.8) = 3 due + 1 new (word 6), tail unused
    let session = compose_session(&words, &progress, now, 4);
    assert_eq!(session.len(), 4);
    assert!(ids(&session).contains(&6));
  }

  #[test]
  fn test_empty_pool_returns_empty_session() {
    let now = Utc::now();
    assert!(compose_session(&[], &ProgressMap::new(), now, 5).is_empty());
  }

  #[test]
  fn test_everything_scheduled_returns_empty_session() {
    let now = Utc::now();
    let words = pool(4);
    let mut progress = ProgressMap::new();
    for id in 1..=4 {
      progress.insert(id, record_due_at(now, 12));
    }

    assert!(compose_session(&words, &progress, now, 5).is_empty());
  }

  #[test]
  fn test_zero_target_clamped_to_one() {
    let now = Utc::now();
    let session = compose_session(&pool(5), &ProgressMap::new(), now, 0);
    assert_eq!(session.len(), 1);
  }

  #[test]
  fn test_reshuffle_preserves_multiset() {
    let now = Utc::now();
    let words = pool(15);
    let mut progress = ProgressMap::new();
    for id in 1..=6 {
      progress.insert(id, record_due_at(now, -id));
    }

    let first = compose_session(&words, &progress, now, 8);
    let second = compose_session(&words, &progress, now, 8);

    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.len(), second.len());
  }

  #[test]
  fn test_small_pool_smaller_than_target() {
    let now = Utc::now();
    let session = compose_session(&pool(3), &ProgressMap::new(), now, 10);
    assert_eq!(session.len(), 3);
  }
}
