//! Undo/redo history over the committed shape list.

use crate::shapes::Shape;

/// Redo side of the history.
///
/// The committed shape list itself is the undo stack: undo moves its last
/// shape onto `undone`, redo moves it back. Any new commit empties `undone`.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Most recently undone shape last.
    undone: Vec<Shape>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the last committed shape onto the redo stack.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, committed: &mut Vec<Shape>) -> bool {
        match committed.pop() {
            Some(shape) => {
                self.undone.push(shape);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone shape back onto the committed list.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, committed: &mut Vec<Shape>) -> bool {
        match self.undone.pop() {
            Some(shape) => {
                committed.push(shape);
                true
            }
            None => false,
        }
    }

    /// Commit a new shape. Redo history does not survive a new edit.
    pub fn commit(&mut self, committed: &mut Vec<Shape>, shape: Shape) {
        committed.push(shape);
        self.invalidate();
    }

    /// Drop all redo history.
    pub fn invalidate(&mut self) {
        self.undone.clear();
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Shapes waiting to be redone, most recently undone last.
    pub fn undone(&self) -> &[Shape] {
        &self.undone
    }
}
