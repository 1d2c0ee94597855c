//! Bounded, cursor-based undo/redo history.

use tracing::debug;

use tinto_core::pixel_buf::{Adjustments, PixelBuf};

/// One committed edit state: the derived buffer plus the slider vector
/// that produced it. Snapshots are immutable once stored.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub buffer: PixelBuf,
    pub adjustments: Adjustments,
}

/// Default number of retained snapshots.
pub const DEFAULT_CAPACITY: usize = 20;

/// An ordered log of snapshots with a movable cursor.
///
/// - Committing while the cursor is behind the tail discards every
///   snapshot after it first (the redo branch).
/// - The log is capped: overflow evicts the oldest entry, and since a
///   commit always lands the cursor on the tail, the cursor keeps
///   pointing at the same logical snapshot.
/// - Undo/redo at a boundary return `None` ("unavailable"), never an
///   error.
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: Option<usize>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            snapshots: Vec::new(),
            cursor: None,
            capacity,
        }
    }

    /// Append a snapshot at the cursor, discarding any redo branch.
    pub fn commit(&mut self, snapshot: Snapshot) {
        if let Some(cursor) = self.cursor {
            self.snapshots.truncate(cursor + 1);
        }

        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
        self.cursor = Some(self.snapshots.len() - 1);

        debug!(
            len = self.snapshots.len(),
            cursor = self.snapshots.len() - 1,
            "history commit"
        );
    }

    /// Step the cursor back and return the snapshot it lands on.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        debug!(cursor = cursor - 1, "undo");
        self.snapshots.get(cursor - 1)
    }

    /// Step the cursor forward and return the snapshot it lands on.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        debug!(cursor = cursor + 1, "redo");
        self.snapshots.get(cursor + 1)
    }

    /// Drop all snapshots.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
        debug!("history reset");
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    /// Snapshot under the cursor, if any.
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.cursor?)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
