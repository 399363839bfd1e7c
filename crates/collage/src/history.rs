//! Snapshot-based undo/redo.
//!
//! Each recorded step stores the complete item list as it was before the
//! change. `past` is oldest-first and capped at [`MAX_HISTORY`]; `future`
//! is nearest-redo-first.

use crate::Item;
use std::collections::VecDeque;

/// Deepest undo stack kept; older snapshots are dropped.
pub const MAX_HISTORY: usize = 50;

pub type Snapshot = Vec<Item>;

#[derive(Clone, Debug, Default)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: VecDeque<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state a new change is about to replace.
    ///
    /// Trims the oldest snapshot past the cap and invalidates redo.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        if self.past.len() > MAX_HISTORY {
            self.past.pop_front();
            log::trace!("history full, dropped oldest snapshot");
        }
        self.future.clear();
    }

    /// Step back: returns the snapshot to restore, stashing `current` for redo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop_back()?;
        self.future.push_front(current);
        Some(previous)
    }

    /// Step forward: returns the snapshot to restore, stashing `current` for undo.
    ///
    /// The undo stack is not trimmed here; redo only ever returns snapshots
    /// that undo took off it.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop_front()?;
        self.past.push_back(current);
        Some(next)
    }

    /// Drop every redo step without recording anything.
    pub fn discard_redo(&mut self) {
        self.future.clear();
    }

    pub fn past(&self) -> &VecDeque<Snapshot> {
        &self.past
    }

    pub fn future(&self) -> &VecDeque<Snapshot> {
        &self.future
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemId;
    use crate::coords::{CanvasPoint, CanvasSize};

    fn snapshot(ids: &[u128]) -> Snapshot {
        ids.iter()
            .map(|id| {
                Item::sticker("s", CanvasPoint::default(), CanvasSize::new(1.0, 1.0))
                    .with_id(ItemId::from_u128(*id))
            })
            .collect()
    }

    #[test]
    fn record_caps_past_and_drops_oldest() {
        let mut history = History::new();
        for i in 0..60 {
            history.record(snapshot(&[i]));
        }
        assert_eq!(history.past_len(), MAX_HISTORY);
        assert_eq!(history.past()[0], snapshot(&[10]));
    }

    #[test]
    fn undo_and_redo_shuttle_snapshots() {
        let mut history = History::new();
        history.record(snapshot(&[]));
        history.record(snapshot(&[1]));

        let restored = history.undo(snapshot(&[1, 2])).unwrap();
        assert_eq!(restored, snapshot(&[1]));
        assert_eq!(history.future_len(), 1);

        let restored = history.redo(snapshot(&[1])).unwrap();
        assert_eq!(restored, snapshot(&[1, 2]));
        assert_eq!(history.future_len(), 0);
        assert_eq!(history.past_len(), 2);
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut history = History::new();
        assert!(history.undo(snapshot(&[1])).is_none());
        assert!(history.redo(snapshot(&[1])).is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn recording_clears_future() {
        let mut history = History::new();
        history.record(snapshot(&[]));
        history.undo(snapshot(&[1]));
        assert!(history.can_redo());

        history.record(snapshot(&[]));
        assert!(!history.can_redo());
    }
}
