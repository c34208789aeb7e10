//! # Undo/Redo Stack
//!
//! Snapshot history for the editor.
//!
//! ## Design
//!
//! - Each mutation records the state captured *before* it is applied
//! - Undo swaps the current state for the most recent snapshot and keeps the
//!   current state on the redo stack
//! - Redo is the mirror image
//! - New mutations clear the redo stack
//! - Supports batched operations (group multiple mutations as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let before = state.clone();
//! mutate(&mut state);
//! stack.record(before, "Rename");
//!
//! if let Some(previous) = stack.undo(state.clone()) {
//!     state = previous;
//! }
//! ```

use std::collections::VecDeque;

/// One restorable point in history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<S> {
    pub snapshot: S,

    /// Optional description of the action that follows this snapshot
    pub description: Option<String>,
}

/// Undo/redo stack over owned snapshots
#[derive(Debug, Clone)]
pub struct UndoStack<S> {
    /// Snapshots before each applied action (most recent last)
    undo_stack: VecDeque<HistoryEntry<S>>,

    /// Snapshots after each undone action (most recent last)
    redo_stack: Vec<HistoryEntry<S>>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Nesting depth of open batches
    batch_depth: usize,

    /// First snapshot recorded inside the open batch
    batch_entry: Option<HistoryEntry<S>>,

    batch_description: Option<String>,
}

impl<S> UndoStack<S> {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels,
            batch_depth: 0,
            batch_entry: None,
            batch_description: None,
        }
    }

    /// Record the state from just before an action.
    ///
    /// Inside a batch only the first snapshot is kept, so the whole batch
    /// undoes as one step.
    pub fn record(&mut self, before: S, description: impl Into<String>) {
        let entry = HistoryEntry {
            snapshot: before,
            description: Some(description.into()),
        };

        if self.batch_depth > 0 {
            if self.batch_entry.is_none() {
                self.batch_entry = Some(entry);
                self.redo_stack.clear();
            }
            return;
        }

        self.push_entry(entry);
    }

    /// Start a batch of mutations (will be undone/redone together).
    /// Batches nest; only the outermost `end_batch` commits.
    pub fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.commit_batch();
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if self.batch_depth > 0 {
            self.batch_description = Some(description.into());
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    fn commit_batch(&mut self) {
        let description = self.batch_description.take();
        if let Some(mut entry) = self.batch_entry.take() {
            if description.is_some() {
                entry.description = description;
            }
            self.push_entry(entry);
        }
    }

    /// Close any open batch, e.g. before undo.
    fn close_batches(&mut self) {
        if self.batch_depth > 0 {
            self.batch_depth = 0;
            self.commit_batch();
        }
    }

    /// Push an entry to the undo stack
    fn push_entry(&mut self, entry: HistoryEntry<S>) {
        self.undo_stack.push_back(entry);

        // Trim oldest if exceeded max levels
        if self.max_levels > 0 {
            while self.undo_stack.len() > self.max_levels {
                self.undo_stack.pop_front();
            }
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Step back. `current` is kept for redo; the snapshot to restore is
    /// returned, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: S) -> Option<S> {
        self.close_batches();
        let entry = self.undo_stack.pop_back()?;

        self.redo_stack.push(HistoryEntry {
            snapshot: current,
            description: entry.description.clone(),
        });

        Some(entry.snapshot)
    }

    /// Step forward. `current` is kept for undo; the snapshot to restore is
    /// returned, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current: S) -> Option<S> {
        self.close_batches();
        let entry = self.redo_stack.pop()?;

        self.undo_stack.push_back(HistoryEntry {
            snapshot: current,
            description: entry.description.clone(),
        });

        Some(entry.snapshot)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || self.batch_entry.is_some()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch_depth = 0;
        self.batch_entry = None;
        self.batch_description = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .back()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl<S> Default for UndoStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Push `value` onto `state`, recording history first.
    fn apply(stack: &mut UndoStack<Vec<i32>>, state: &mut Vec<i32>, value: i32) {
        stack.record(state.clone(), format!("push {}", value));
        state.push(value);
    }

    fn undo(stack: &mut UndoStack<Vec<i32>>, state: &mut Vec<i32>) -> bool {
        match stack.undo(state.clone()) {
            Some(previous) => {
                *state = previous;
                true
            }
            None => false,
        }
    }

    fn redo(stack: &mut UndoStack<Vec<i32>>, state: &mut Vec<i32>) -> bool {
        match stack.redo(state.clone()) {
            Some(next) => {
                *state = next;
                true
            }
            None => false,
        }
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack: UndoStack<Vec<i32>> = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_and_undo() {
        let mut stack = UndoStack::new();
        let mut state = vec![];

        apply(&mut stack, &mut state, 1);
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("push 1"));

        assert!(undo(&mut stack, &mut state));
        assert!(state.is_empty());
        assert_eq!(stack.redo_levels(), 1);
        assert_eq!(stack.redo_description(), Some("push 1"));

        assert!(redo(&mut stack, &mut state));
        assert_eq!(state, vec![1]);
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut stack = UndoStack::new();
        let mut state = vec![7];
        assert!(!undo(&mut stack, &mut state));
        assert!(!redo(&mut stack, &mut state));
        assert_eq!(state, vec![7]);
    }

    #[test]
    fn test_batched_mutations() {
        let mut stack = UndoStack::new();
        let mut state = vec![];

        stack.begin_batch();
        stack.set_batch_description("Fill");
        apply(&mut stack, &mut state, 1);
        apply(&mut stack, &mut state, 2);
        apply(&mut stack, &mut state, 3);
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Fill"));

        undo(&mut stack, &mut state);
        assert!(state.is_empty());
    }

    #[test]
    fn test_nested_batches_commit_once() {
        let mut stack = UndoStack::new();
        let mut state = vec![];

        stack.begin_batch();
        apply(&mut stack, &mut state, 1);
        stack.begin_batch();
        apply(&mut stack, &mut state, 2);
        stack.end_batch();
        assert_eq!(stack.undo_levels(), 0);
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("push 1"));
    }

    #[test]
    fn test_empty_batch_records_nothing() {
        let mut stack: UndoStack<Vec<i32>> = UndoStack::new();
        stack.begin_batch();
        stack.end_batch();
        assert_eq!(stack.undo_levels(), 0);
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut stack = UndoStack::new();
        let mut state = vec![];

        apply(&mut stack, &mut state, 1);
        undo(&mut stack, &mut state);
        assert_eq!(stack.redo_levels(), 1);

        apply(&mut stack, &mut state, 2);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!redo(&mut stack, &mut state));
    }

    #[test]
    fn test_mutation_inside_batch_clears_redo() {
        let mut stack = UndoStack::new();
        let mut state = vec![];

        apply(&mut stack, &mut state, 1);
        undo(&mut stack, &mut state);
        assert!(stack.can_redo());

        stack.begin_batch();
        apply(&mut stack, &mut state, 2);
        assert!(!stack.can_redo());
        assert!(!redo(&mut stack, &mut state));
        assert_eq!(state, vec![2]);
        stack.end_batch();
        assert_eq!(stack.undo_levels(), 1);
    }

    #[test]
    fn test_max_levels_drops_oldest() {
        let mut stack = UndoStack::with_max_levels(2);
        let mut state = vec![];

        for i in 0..3 {
            apply(&mut stack, &mut state, i);
        }

        assert_eq!(stack.undo_levels(), 2);
        undo(&mut stack, &mut state);
        undo(&mut stack, &mut state);
        assert_eq!(state, vec![0]);
        assert!(!undo(&mut stack, &mut state));
    }

    #[test]
    fn test_clear_keeps_nothing() {
        let mut stack = UndoStack::new();
        let mut state = vec![];
        apply(&mut stack, &mut state, 1);
        apply(&mut stack, &mut state, 2);
        undo(&mut stack, &mut state);

        stack.clear();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert_eq!(state, vec![1]);
    }
}
