//! Linear undo/redo log of recorded operations.

use tracing::debug;

use crate::operation::Operation;

/// Whether applied operations are appended to history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Recording,
    Replaying,
}

/// Holds `Mode::Replaying` for its lifetime and restores the previous mode on
/// drop, whichever way the scope is left.
#[derive(Debug)]
pub struct ModeGuard<'a> {
    mode: &'a mut Mode,
    previous: Mode,
}

impl<'a> ModeGuard<'a> {
    pub fn replaying(mode: &'a mut Mode) -> Self {
        let previous = *mode;
        *mode = Mode::Replaying;
        Self { mode, previous }
    }

    pub fn mode(&self) -> Mode {
        *self.mode
    }
}

impl Drop for ModeGuard<'_> {
    fn drop(&mut self) {
        *self.mode = self.previous;
    }
}

/// Undo and redo stacks, oldest first, plus the unsaved-changes flag.
#[derive(Clone, Debug, Default)]
pub struct History {
    undo: Vec<Operation>,
    redo: Vec<Operation>,
    modified: bool,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a confirmed operation. Any redo entries are discarded.
    pub fn record(&mut self, op: Operation) {
        if !self.redo.is_empty() {
            debug!(discarded = self.redo.len(), "Redo stack invalidated");
            self.redo.clear();
        }
        self.undo.push(op);
        self.modified = true;
    }

    /// Operations that stay applied once the most recent one is undone.
    pub fn ops_after_undo(&self) -> Option<&[Operation]> {
        let (_, rest) = self.undo.split_last()?;
        Some(rest)
    }

    /// Move the most recent operation onto the redo stack.
    pub fn commit_undo(&mut self) -> Option<&Operation> {
        let op = self.undo.pop()?;
        self.redo.push(op);
        self.redo.last()
    }

    /// The operation `commit_redo` would move back, if any.
    pub fn next_redo(&self) -> Option<&Operation> {
        self.redo.last()
    }

    /// Move the most recently undone operation back onto the undo stack.
    pub fn commit_redo(&mut self) -> Option<&Operation> {
        let op = self.redo.pop()?;
        self.undo.push(op);
        self.undo.last()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.modified = false;
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// True iff something is recorded and nothing was saved since the last record.
    pub fn is_dirty(&self) -> bool {
        self.modified && !self.undo.is_empty()
    }

    pub fn applied(&self) -> &[Operation] {
        &self.undo
    }

    pub fn undone(&self) -> &[Operation] {
        &self.redo
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_recording_on_drop() {
        let mut mode = Mode::Recording;
        {
            let guard = ModeGuard::replaying(&mut mode);
            assert_eq!(guard.mode(), Mode::Replaying);
        }
        assert_eq!(mode, Mode::Recording);
    }

    #[test]
    fn guard_restores_on_early_return() {
        fn bail(mode: &mut Mode) -> Result<(), ()> {
            let _guard = ModeGuard::replaying(mode);
            let step: Result<(), ()> = Err(());
            step?;
            Ok(())
        }
        let mut mode = Mode::Recording;
        assert!(bail(&mut mode).is_err());
        assert_eq!(mode, Mode::Recording);
    }

    #[test]
    fn record_clears_redo() {
        let mut history = History::new();
        history.record(Operation::ZoomIn);
        history.record(Operation::ZoomOut);
        history.commit_undo();
        assert!(history.can_redo());

        history.record(Operation::NormalSize);
        assert!(!history.can_redo());
        assert_eq!(history.applied(), &[Operation::ZoomIn, Operation::NormalSize]);
    }

    #[test]
    fn dirty_follows_save_and_record() {
        let mut history = History::new();
        assert!(!history.is_dirty());
        history.record(Operation::ZoomIn);
        assert!(history.is_dirty());
        history.mark_saved();
        assert!(!history.is_dirty());
        history.record(Operation::ZoomOut);
        assert!(history.is_dirty());
    }
}
