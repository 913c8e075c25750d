//! Bounded undo/redo log of design snapshots.
//!
//! Every commit boundary pushes a full snapshot of the element list and
//! background. A pointer marks the live position; undo and redo move the
//! pointer and hand back the snapshot to restore. Pushing after an undo
//! discards the redo branch.
//!
//! Gestures mutate the live store between commits without touching the log,
//! so one drag or resize is exactly one undo step.

use crate::{Element, ElementId};

/// Default maximum number of snapshots retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A full copy of the undoable design state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Elements in z-order.
    pub elements: Vec<Element>,
    /// Canvas background color.
    pub background_color: String,
    /// Selection at the moment this state was left.
    pub selection: Vec<ElementId>,
}

/// Bounded snapshot log with a movable pointer.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    /// Index of the snapshot matching the live state.
    pointer: usize,
    /// Maximum number of snapshots kept (oldest evicted first).
    limit: usize,
}

impl History {
    /// Start a log whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: Snapshot, limit: usize) -> Self {
        let limit = limit.max(1);
        let mut entries = Vec::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT));
        entries.push(initial);
        Self {
            entries,
            pointer: 0,
            limit,
        }
    }

    /// Record a commit. Discards the redo branch and evicts the oldest
    /// snapshot once the limit is exceeded.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.pointer + 1);
        self.entries.push(snapshot);
        if self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.pointer = self.entries.len() - 1;
    }

    /// Overwrite the selection remembered for the current snapshot.
    ///
    /// Called right before the pointer leaves the current entry so that
    /// returning to it restores the selection as it was when it was left.
    pub fn record_selection(&mut self, selection: &[ElementId]) {
        if let Some(entry) = self.entries.get_mut(self.pointer) {
            entry.selection = selection.to_vec();
        }
    }

    /// Step back one snapshot. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.pointer -= 1;
        self.entries.get(self.pointer)
    }

    /// Step forward one snapshot. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.pointer += 1;
        self.entries.get(self.pointer)
    }

    /// Whether an older snapshot exists.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    /// Whether a newer snapshot exists.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    /// Drop every entry and start over from `snapshot`.
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.entries.clear();
        self.entries.push(snapshot);
        self.pointer = 0;
    }

    /// Number of snapshots retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the log holds at least the initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the live snapshot.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pointer
    }

    /// Maximum number of snapshots retained.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(background: &str) -> Snapshot {
        Snapshot {
            elements: Vec::new(),
            background_color: background.to_string(),
            selection: Vec::new(),
        }
    }

    #[test]
    fn test_fresh_history_has_no_steps() {
        let history = History::new(snap("#FFFFFF"), 10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = History::new(snap("#000"), 10);
        history.push(snap("#111"));
        history.push(snap("#222"));

        assert_eq!(history.undo().map(|s| s.background_color.clone()).as_deref(), Some("#111"));
        assert_eq!(history.undo().map(|s| s.background_color.clone()).as_deref(), Some("#000"));
        assert!(history.undo().is_none());
        assert_eq!(history.redo().map(|s| s.background_color.clone()).as_deref(), Some("#111"));
        assert!(history.can_redo());
    }

    #[test]
    fn test_push_after_undo_discards_redo_branch() {
        let mut history = History::new(snap("#000"), 10);
        history.push(snap("#111"));
        history.push(snap("#222"));
        history.undo();
        history.push(snap("#333"));

        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo().map(|s| s.background_color.clone()).as_deref(), Some("#111"));
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::new(snap("#000"), 3);
        for color in ["#111", "#222", "#333", "#444"] {
            history.push(snap(color));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.position(), 2);
        history.undo();
        let oldest = history.undo().map(|s| s.background_color.clone());
        assert!(!history.can_undo());
        assert_eq!(oldest.as_deref(), Some("#222"));
    }

    #[test]
    fn test_record_selection_targets_current_entry() {
        let id = ElementId::new();
        let mut history = History::new(snap("#000"), 10);
        history.push(snap("#111"));
        history.record_selection(&[id]);
        history.undo();
        let restored = history.redo().expect("redo");
        assert_eq!(restored.selection, vec![id]);
    }
}
