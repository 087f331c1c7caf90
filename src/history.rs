use std::collections::VecDeque;
use std::sync::Arc;

use crate::buffer::PixelBuffer;

/// Default number of retained snapshots.
///
/// Memory budget: one snapshot costs `width * height * 4` bytes, so a 256x256
/// canvas at depth 32 stays under 9 MiB. Callers opening larger canvases
/// should bound the depth inversely to the canvas area via
/// [`HistoryManager::with_depth`].
pub const DEFAULT_HISTORY_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordingState {
    Idle,
    Recording,
}

/// Snapshot-based undo/redo around discrete edit transactions.
///
/// A transaction spans one stroke: `begin_transaction` at pointer-down clones
/// the buffer as the "undo-to" state, `commit_transaction` at pointer-up keeps
/// or discards it depending on whether anything changed. Snapshots are
/// `Arc`-shared so undo/redo moves between the two stacks are pointer moves,
/// not copies.
pub struct HistoryManager {
    undo_stack: VecDeque<Arc<PixelBuffer>>,
    redo_stack: Vec<Arc<PixelBuffer>>,
    max_depth: usize,
    state: RecordingState,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }

    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            state: RecordingState::Idle,
        }
    }

    /// Capture the pre-edit state of the buffer. Any new transaction after an
    /// undo invalidates the redo stack. A begin while already recording is
    /// ignored (stray double pointer-down).
    pub fn begin_transaction(&mut self, buffer: &PixelBuffer) {
        if self.state == RecordingState::Recording {
            log::warn!("begin_transaction while recording; ignoring");
            return;
        }
        self.state = RecordingState::Recording;
        self.redo_stack.clear();
        self.undo_stack.push_back(Arc::new(buffer.clone()));
        if self.undo_stack.len() > self.max_depth {
            // Oldest edit falls off; memory-bounded, not time-bounded.
            self.undo_stack.pop_front();
        }
    }

    /// Close the transaction. When nothing changed, the snapshot taken at
    /// begin is discarded so no-op strokes do not consume an undo slot.
    pub fn commit_transaction(&mut self, changed: bool) {
        if self.state != RecordingState::Recording {
            return;
        }
        self.state = RecordingState::Idle;
        if !changed {
            self.undo_stack.pop_back();
        }
    }

    /// Exchange the current buffer for the last snapshot. Returns `None` on an
    /// empty stack (benign no-op). Refused while a transaction is recording:
    /// the top snapshot belongs to the in-flight edit, not to a finished one.
    pub fn undo(&mut self, current: &PixelBuffer) -> Option<Arc<PixelBuffer>> {
        if self.state == RecordingState::Recording {
            log::warn!("undo while recording; ignoring");
            return None;
        }
        let restored = self.undo_stack.pop_back()?;
        self.redo_stack.push(Arc::new(current.clone()));
        Some(restored)
    }

    /// Mirror of [`HistoryManager::undo`].
    pub fn redo(&mut self, current: &PixelBuffer) -> Option<Arc<PixelBuffer>> {
        if self.state == RecordingState::Recording {
            log::warn!("redo while recording; ignoring");
            return None;
        }
        let restored = self.redo_stack.pop()?;
        self.undo_stack.push_back(Arc::new(current.clone()));
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.state = RecordingState::Idle;
    }
}
