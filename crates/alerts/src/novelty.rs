//! Per-poller novelty detection.
//!
//! The tracker remembers the id set of the previous successful poll so a
//! monitor announces each alert once, when its id first appears, instead
//! of on every tick. Each monitor owns its own tracker; booking and
//! stock novelty state is never shared.

use std::collections::HashSet;

use xstation_core::types::DbId;

/// Result of comparing one poll tick against the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickNovelty {
    /// True when the previous id set was empty and this tick has items:
    /// the first successful tick since construction, a reset, or an
    /// all-clear tick. Monitors apply their first-load policy here.
    pub first_tick: bool,
    /// Ids present this tick but absent last tick, in input order.
    pub new_ids: Vec<DbId>,
}

impl TickNovelty {
    /// Whether this tick produced anything to announce.
    pub fn is_empty(&self) -> bool {
        self.new_ids.is_empty()
    }
}

/// Remembers the previous tick's id set for one alert type.
#[derive(Debug, Default)]
pub struct NoveltyTracker {
    previous: HashSet<DbId>,
}

impl NoveltyTracker {
    /// Create a tracker with no history (the next tick is a first tick).
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `current_ids` against the previous tick.
    ///
    /// Always replaces the stored id set with `current_ids` afterwards,
    /// whether or not anything new was found — including replacing it
    /// with the empty set when a tick comes back clear.
    pub fn observe(&mut self, current_ids: &[DbId]) -> TickNovelty {
        let first_tick = self.previous.is_empty() && !current_ids.is_empty();

        let new_ids = current_ids
            .iter()
            .copied()
            .filter(|id| !self.previous.contains(id))
            .collect();

        self.previous = current_ids.iter().copied().collect();

        TickNovelty {
            first_tick,
            new_ids,
        }
    }

    /// Forget all history; the next non-empty tick is a first tick again.
    pub fn reset(&mut self) {
        self.previous.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_reports_all_items_as_new() {
        let mut tracker = NoveltyTracker::new();
        let novelty = tracker.observe(&[5, 9, 12]);

        assert!(novelty.first_tick);
        assert_eq!(novelty.new_ids, vec![5, 9, 12]);
    }

    #[test]
    fn identical_id_set_is_not_novel() {
        // Field changes on known ids never re-announce.
        let mut tracker = NoveltyTracker::new();
        tracker.observe(&[1, 2]);

        let novelty = tracker.observe(&[1, 2]);
        assert!(!novelty.first_tick);
        assert!(novelty.is_empty());
    }

    #[test]
    fn only_unseen_ids_are_novel() {
        let mut tracker = NoveltyTracker::new();
        tracker.observe(&[5]);

        let novelty = tracker.observe(&[5, 9]);
        assert!(!novelty.first_tick);
        assert_eq!(novelty.new_ids, vec![9]);
    }

    #[test]
    fn state_is_replaced_even_when_nothing_is_new() {
        let mut tracker = NoveltyTracker::new();
        tracker.observe(&[1, 2, 3]);
        tracker.observe(&[1]);

        // 2 and 3 were dropped from the tracked set, so they are novel
        // again when they come back.
        let novelty = tracker.observe(&[1, 2, 3]);
        assert_eq!(novelty.new_ids, vec![2, 3]);
    }

    #[test]
    fn empty_tick_makes_the_next_one_a_first_tick() {
        let mut tracker = NoveltyTracker::new();
        tracker.observe(&[1]);
        tracker.observe(&[]);

        let novelty = tracker.observe(&[7]);
        assert!(novelty.first_tick);
        assert_eq!(novelty.new_ids, vec![7]);
    }

    #[test]
    fn empty_current_set_is_never_a_first_tick() {
        let mut tracker = NoveltyTracker::new();
        let novelty = tracker.observe(&[]);
        assert!(!novelty.first_tick);
        assert!(novelty.is_empty());
    }

    #[test]
    fn reset_forgets_history() {
        let mut tracker = NoveltyTracker::new();
        tracker.observe(&[1, 2]);
        tracker.reset();

        let novelty = tracker.observe(&[1, 2]);
        assert!(novelty.first_tick);
        assert_eq!(novelty.new_ids, vec![1, 2]);
    }
}
