//! Undo/redo history as a linear list of element snapshots
//!
//! Every entry is a full copy of the element array. A cursor points at the
//! entry that matches the live store; pushing after an undo drops every
//! entry past the cursor, so redo states are lost on a fresh edit.

use template_model::Element;

/// An immutable copy of the element store at one point in time
pub type Snapshot = Vec<Element>;

/// Linear snapshot history with a cursor.
///
/// Invariant: `0 <= index < entries.len()`; the list is never empty.
#[derive(Debug, Clone)]
pub struct History {
    /// Snapshots, oldest first
    entries: Vec<Snapshot>,
    /// Position of the snapshot matching the live store
    index: usize,
    /// Maximum number of entries kept, if bounded
    max_entries: Option<usize>,
}

impl History {
    /// Create a history whose only entry is `initial`
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            max_entries: None,
        }
    }

    /// Create a bounded history. Limits below 2 are raised to 2 so that a
    /// single undo always remains possible.
    pub fn with_limit(initial: Snapshot, max_entries: Option<usize>) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            max_entries: max_entries.map(|n| n.max(2)),
        }
    }

    /// Record a new snapshot after the cursor
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);

        if let Some(max) = self.max_entries {
            if self.entries.len() > max {
                let excess = self.entries.len() - max;
                self.entries.drain(..excess);
            }
        }

        self.index = self.entries.len() - 1;
    }

    /// Step back one entry. Returns the snapshot to restore, or `None` when
    /// already at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward one entry. Returns the snapshot to restore, or `None`
    /// when already at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.index]
    }

    /// Drop all history and start again from `initial`
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.index = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use template_model::{ElementKind, Point};

    fn snapshot_with(n: usize) -> Snapshot {
        (0..n)
            .map(|i| Element::new(ElementKind::Rectangle, Point::new(i as f64, 0.0), 1))
            .collect()
    }

    #[test]
    fn test_starts_with_single_entry() {
        let history = History::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut history = History::default();
        assert!(history.undo().is_none());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_redo_at_end_is_noop() {
        let mut history = History::default();
        history.push(snapshot_with(1));
        assert!(history.redo().is_none());
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_push_after_undo_truncates_future() {
        let mut history = History::default();
        history.push(snapshot_with(1));
        history.push(snapshot_with(2));
        history.undo();
        assert!(history.can_redo());

        history.push(snapshot_with(5));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().len(), 5);
    }

    #[test]
    fn test_limit_drops_oldest_entries() {
        let mut history = History::with_limit(Vec::new(), Some(3));
        for n in 1..=5 {
            history.push(snapshot_with(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current().len(), 5);

        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(history.current().len(), 3);
    }

    #[test]
    fn test_reset() {
        let mut history = History::default();
        history.push(snapshot_with(1));
        history.reset(snapshot_with(4));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().len(), 4);
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_in_bounds(ops in proptest::collection::vec(0u8..3, 0..64)) {
            let mut history = History::default();
            for (i, op) in ops.iter().enumerate() {
                match op {
                    0 => history.push(snapshot_with(i % 4)),
                    1 => { history.undo(); }
                    _ => { history.redo(); }
                }
                prop_assert!(history.index() < history.len());
            }
        }

        #[test]
        fn prop_n_pushes_put_cursor_at_n(n in 0usize..50) {
            let mut history = History::default();
            for i in 0..n {
                history.push(snapshot_with(i % 3));
            }
            prop_assert_eq!(history.index(), n);
            prop_assert_eq!(history.len(), n + 1);
        }
    }
}
