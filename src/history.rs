//! Bounded undo/redo history over schema snapshots.
//!
//! Snapshots are copied on the way in (`push`) and on the way out (`undo`,
//! `redo`, `current`), so the caller's working copy never aliases an archived
//! state.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::schema::Table;

/// Number of snapshots kept unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 50;

/// An archived schema.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    pub tables: Vec<Table>,
    pub timestamp: DateTime<Utc>,
}

/// Undo/redo availability, published to observers after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryFlags {
    pub can_undo: bool,
    pub can_redo: bool,
}

type Observer = Box<dyn FnMut(HistoryFlags) + Send>;

/// Snapshot history for one editing session.
pub struct HistoryManager {
    states: Vec<HistoryState>,
    /// Index of the current snapshot, `None` before the first push.
    cursor: Option<usize>,
    capacity: usize,
    observers: Vec<Observer>,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryManager")
            .field("len", &self.states.len())
            .field("cursor", &self.cursor)
            .field("capacity", &self.capacity)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a history keeping at most `capacity` snapshots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
            observers: Vec::new(),
        }
    }

    /// Register a callback invoked with the new flags after each change.
    pub fn subscribe(&mut self, observer: impl FnMut(HistoryFlags) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Archive a copy of `tables` as the newest snapshot.
    ///
    /// Anything after the cursor is discarded first. When the history is
    /// full the oldest snapshot is evicted.
    pub fn push(&mut self, tables: &[Table]) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.states.truncate(keep);

        self.states.push(HistoryState {
            tables: tables.to_vec(),
            timestamp: Utc::now(),
        });

        if self.states.len() > self.capacity {
            let excess = self.states.len() - self.capacity;
            self.states.drain(..excess);
        }

        self.cursor = Some(self.states.len() - 1);
        tracing::debug!(
            "History push: {} snapshot(s), cursor at {}",
            self.states.len(),
            self.states.len() - 1
        );
        self.publish();
    }

    /// Step back one snapshot and return a copy of it.
    pub fn undo(&mut self) -> Option<Vec<Table>> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor? - 1;
        self.cursor = Some(cursor);
        self.publish();
        Some(self.states[cursor].tables.clone())
    }

    /// Step forward one snapshot and return a copy of it.
    pub fn redo(&mut self) -> Option<Vec<Table>> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(cursor);
        self.publish();
        Some(self.states[cursor].tables.clone())
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.states.clear();
        self.cursor = None;
        self.publish();
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(c) => c + 1 < self.states.len(),
            None => !self.states.is_empty(),
        }
    }

    pub fn flags(&self) -> HistoryFlags {
        HistoryFlags {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Copy of the snapshot at the cursor.
    pub fn current(&self) -> Option<Vec<Table>> {
        self.cursor.map(|c| self.states[c].tables.clone())
    }

    /// Archived snapshots, oldest first.
    pub fn states(&self) -> &[HistoryState] {
        &self.states
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn publish(&mut self) {
        let flags = self.flags();
        for observer in &mut self.observers {
            observer(flags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn snapshot(name: &str) -> Vec<Table> {
        vec![Table::new(name)]
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryManager::new();
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
        assert!(history.is_empty());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.flags(), HistoryFlags::default());
    }

    #[test]
    fn test_single_push_has_nothing_to_undo() {
        let mut history = HistoryManager::new();
        history.push(&snapshot("a"));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(snapshot("a")));
    }

    #[test]
    fn test_capacity_two_example() {
        let mut history = HistoryManager::with_capacity(2);
        history.push(&snapshot("A"));
        history.push(&snapshot("B"));
        history.push(&snapshot("C"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.states()[0].tables, snapshot("B"));
        assert_eq!(history.cursor(), Some(1));

        assert_eq!(history.undo(), Some(snapshot("B")));
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = HistoryManager::with_capacity(0);
        history.push(&snapshot("a"));
        history.push(&snapshot("b"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(snapshot("b")));
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryManager::new();
        history.push(&snapshot("a"));
        history.push(&snapshot("b"));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo() && !history.can_redo());
        assert_eq!(history.current(), None);
    }

    #[test]
    fn test_observers_see_every_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut history = HistoryManager::new();
        history.subscribe(move |flags| sink.lock().unwrap().push(flags));

        history.push(&snapshot("a"));
        history.push(&snapshot("b"));
        history.undo();
        history.clear();

        let seen = seen.lock().unwrap();
        let undo_only = HistoryFlags { can_undo: true, can_redo: false };
        let redo_only = HistoryFlags { can_undo: false, can_redo: true };
        assert_eq!(
            *seen,
            vec![HistoryFlags::default(), undo_only, redo_only, HistoryFlags::default()]
        );
    }
}
