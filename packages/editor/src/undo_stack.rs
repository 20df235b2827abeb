//! # Undo/Redo Stack
//!
//! Tracks mutation history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each recorded batch keeps a snapshot of the collection taken before its
//!   first mutation
//! - Undo swaps the current collection for that snapshot and moves the batch
//!   (now holding the replaced state) to the redo stack
//! - Redo does the reverse
//! - New mutations clear the redo stack
//! - Supports batched operations (group multiple mutations as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let before = collection.clone();
//! mutation.apply(&mut collection, &catalog, &mut ids)?;
//! stack.record(mutation, before);
//!
//! if let Some(previous) = stack.undo(&collection) {
//!     collection = previous;
//! }
//! ```

use crate::collection::BlockCollection;
use crate::mutations::Mutation;

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone)]
struct MutationBatch {
    /// The mutations in this batch (in application order)
    mutations: Vec<Mutation>,

    /// Collection state on the other side of this batch
    snapshot: BlockCollection,

    description: Option<String>,
}

impl MutationBatch {
    fn new(snapshot: BlockCollection) -> Self {
        Self {
            mutations: Vec::new(),
            snapshot,
            description: None,
        }
    }
}

/// Undo/redo stack for page editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied batches (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone batches (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,

    /// Open `begin_batch` calls; only the outermost `end_batch` commits
    batch_depth: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
            batch_depth: 0,
        }
    }

    /// Record an applied mutation; `before` is the collection prior to it
    pub fn record(&mut self, mutation: Mutation, before: BlockCollection) {
        match &mut self.current_batch {
            Some(batch) => {
                // The batch snapshot is taken lazily at its first mutation
                if batch.mutations.is_empty() {
                    batch.snapshot = before;
                }
                batch.mutations.push(mutation);
            }
            None => {
                let mut batch = MutationBatch::new(before);
                batch.mutations.push(mutation);
                self.push_batch(batch);
            }
        }
    }

    /// Start a batch of mutations (will be undone/redone together).
    ///
    /// Batches nest: an inner batch joins the enclosing one.
    pub fn begin_batch(&mut self) {
        if self.current_batch.is_none() {
            self.current_batch = Some(MutationBatch::new(BlockCollection::new()));
        }
        self.batch_depth += 1;
    }

    /// End the current batch; the outermost end pushes it to the undo stack
    pub fn end_batch(&mut self) {
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth > 0 {
            return;
        }

        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Describe the current batch. The first description given wins, so a
    /// nested batch keeps the label of the one enclosing it.
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            if batch.description.is_none() {
                batch.description = Some(description.into());
            }
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the redo future
        self.redo_stack.clear();
    }

    /// Undo the most recent batch, returning the collection to restore
    pub fn undo(&mut self, current: &BlockCollection) -> Option<BlockCollection> {
        let mut batch = self.undo_stack.pop()?;
        let restored = std::mem::replace(&mut batch.snapshot, current.clone());
        self.redo_stack.push(batch);
        Some(restored)
    }

    /// Redo the most recently undone batch, returning the collection to restore
    pub fn redo(&mut self, current: &BlockCollection) -> Option<BlockCollection> {
        let mut batch = self.redo_stack.pop()?;
        let restored = std::mem::replace(&mut batch.snapshot, current.clone());
        self.undo_stack.push(batch);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockInstance;
    use pagekit_common::ConfigMap;

    fn page(ids: &[&str]) -> BlockCollection {
        BlockCollection::from_blocks(
            ids.iter()
                .enumerate()
                .map(|(i, id)| {
                    let mut b = BlockInstance::new(*id, "text", ConfigMap::new());
                    b.position = i;
                    b
                })
                .collect(),
        )
    }

    fn remove(id: &str) -> Mutation {
        Mutation::Remove { id: id.to_string() }
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut stack = UndoStack::new();
        let before = page(&["a", "b"]);
        let after = page(&["b"]);

        stack.record(remove("a"), before.clone());

        let undone = stack.undo(&after).unwrap();
        assert_eq!(undone, before);
        assert_eq!(stack.redo_levels(), 1);

        let redone = stack.redo(&undone).unwrap();
        assert_eq!(redone, after);
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_batched_mutations() {
        let mut stack = UndoStack::new();

        stack.begin_batch();
        stack.set_batch_description("Clear page");
        stack.record(remove("a"), page(&["a", "b"]));
        stack.record(remove("b"), page(&["b"]));
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Clear page"));

        let restored = stack.undo(&page(&[])).unwrap();
        assert_eq!(restored, page(&["a", "b"]));
    }

    #[test]
    fn test_nested_batch_joins_outer() {
        let mut stack = UndoStack::new();

        stack.begin_batch();
        stack.set_batch_description("Build page");
        stack.record(remove("a"), page(&["a", "b", "c"]));
        stack.begin_batch();
        assert!(stack.is_batching());
        stack.set_batch_description("Upload images");
        stack.record(remove("b"), page(&["b", "c"]));
        stack.end_batch();

        // Inner end leaves the outer batch open
        assert!(stack.is_batching());
        assert!(!stack.can_undo());

        stack.record(remove("c"), page(&["c"]));
        stack.end_batch();

        assert!(!stack.is_batching());
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Build page"));
        assert_eq!(stack.undo(&page(&[])), Some(page(&["a", "b", "c"])));
    }

    #[test]
    fn test_unbalanced_end_batch_is_ignored() {
        let mut stack = UndoStack::new();
        stack.end_batch();
        stack.record(remove("a"), page(&["a"]));
        assert_eq!(stack.undo_levels(), 1);
    }

    #[test]
    fn test_empty_batch_is_discarded() {
        let mut stack = UndoStack::new();
        stack.begin_batch();
        stack.end_batch();
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut stack = UndoStack::new();
        stack.record(remove("a"), page(&["a"]));
        stack.undo(&page(&[]));
        assert!(stack.can_redo());

        stack.record(remove("b"), page(&["b"]));
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_max_levels() {
        let mut stack = UndoStack::with_max_levels(2);
        for id in ["a", "b", "c"] {
            stack.record(remove(id), page(&[id]));
        }
        assert_eq!(stack.undo_levels(), 2);
    }
}
