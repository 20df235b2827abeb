//! # Edit Session Management
//!
//! Tracks one user's editing state for a page.
//!
//! An EditSession owns the working copy of the page's widgets and
//! everything around it: selection, the drag gesture, undo history and the
//! "collection changed" notification. Every edit goes through
//! [`EditSession::apply`], so listeners, history and the dirty flag never
//! miss a change.

use crate::collection::BlockCollection;
use crate::document::{PageDocument, PageStore};
use crate::drag::{DragError, DragState};
use crate::media::MediaPicker;
use crate::mutations::{Mutation, MutationOutcome};
use crate::sublist::SubListOp;
use crate::undo_stack::UndoStack;
use crate::uploads::{uploaded_item, MediaUploader, UploadReport, UploadRequest};
use crate::EditorError;
use futures::stream::{FuturesUnordered, StreamExt};
use pagekit_catalog::schema::{resolve_field, FieldSchema};
use pagekit_catalog::Catalog;
use pagekit_common::{ConfigPath, CtaTarget, IdGenerator};
use serde_json::Value;
use tracing::{debug, warn};

/// Observer of collection changes
pub trait ChangeListener {
    fn collection_changed(&mut self, blocks: &BlockCollection);
}

impl<F> ChangeListener for F
where
    F: FnMut(&BlockCollection),
{
    fn collection_changed(&mut self, blocks: &BlockCollection) {
        self(blocks)
    }
}

/// Single edit session
pub struct EditSession<'c> {
    catalog: &'c Catalog,

    /// Page being edited
    document: PageDocument,

    ids: IdGenerator,

    /// Currently selected widget
    selection: Option<String>,

    drag: DragState,

    history: UndoStack,

    listeners: Vec<Box<dyn ChangeListener + 'c>>,

    /// Incremented on every change
    version: u64,
}

impl<'c> EditSession<'c> {
    pub fn new(catalog: &'c Catalog, document: PageDocument) -> Self {
        Self {
            catalog,
            document,
            ids: IdGenerator::new(),
            selection: None,
            drag: DragState::Idle,
            history: UndoStack::new(),
            listeners: Vec::new(),
            version: 0,
        }
    }

    /// Use a specific id generator (deterministic ids in tests and tools)
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_history(mut self, history: UndoStack) -> Self {
        self.history = history;
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn blocks(&self) -> &BlockCollection {
        self.document.blocks()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'c) {
        self.listeners.push(Box::new(listener));
    }

    // Selection

    /// Select `id`; returns false (and keeps the selection) for unknown ids
    pub fn select(&mut self, id: &str) -> bool {
        if !self.blocks().contains(id) {
            return false;
        }
        self.selection = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    // Mutations

    /// Apply a mutation, record it for undo and notify listeners
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, EditorError> {
        self.ensure_idle()?;
        self.commit(mutation)
    }

    fn commit(&mut self, mutation: Mutation) -> Result<MutationOutcome, EditorError> {
        let before = self.document.blocks().clone();
        let mut next = before.clone();

        let outcome = mutation.apply(&mut next, self.catalog, &mut self.ids)?;
        if !outcome.is_applied() {
            debug!(?mutation, "Mutation had no effect");
            return Ok(outcome);
        }

        self.document.replace_blocks(next);
        self.history.record(mutation, before);
        self.changed();
        Ok(outcome)
    }

    /// Insert from the palette and select the new widget
    pub fn insert_from_palette(&mut self, tag: &str, at: Option<usize>) -> Result<String, EditorError> {
        let outcome = self.apply(Mutation::Insert {
            tag: tag.to_string(),
            at,
        })?;

        match outcome {
            MutationOutcome::Applied { id } => {
                self.selection = Some(id.clone());
                Ok(id)
            }
            MutationOutcome::NoOp => Err(EditorError::UnknownWidget(tag.to_string())),
        }
    }

    pub fn set_field(&mut self, id: &str, path: ConfigPath, value: Value) -> Result<MutationOutcome, EditorError> {
        self.apply(Mutation::SetField {
            id: id.to_string(),
            path,
            value,
        })
    }

    pub fn edit_list(&mut self, id: &str, path: ConfigPath, edit: SubListOp) -> Result<MutationOutcome, EditorError> {
        self.apply(Mutation::EditList {
            id: id.to_string(),
            path,
            edit,
        })
    }

    /// Replace the widget's top-level CTA
    pub fn set_cta(&mut self, id: &str, cta: CtaTarget) -> Result<MutationOutcome, EditorError> {
        self.apply(Mutation::SetCta {
            id: id.to_string(),
            at: None,
            cta,
        })
    }

    /// Replace a CTA nested inside the object at `at` (e.g. `tiers.0`)
    pub fn set_cta_at(&mut self, id: &str, at: ConfigPath, cta: CtaTarget) -> Result<MutationOutcome, EditorError> {
        self.apply(Mutation::SetCta {
            id: id.to_string(),
            at: Some(at),
            cta,
        })
    }

    /// Look up the schema entry an editing panel would bind to `path`
    pub fn validate_field(&self, id: &str, path: &ConfigPath) -> Result<&'c FieldSchema, EditorError> {
        let block = self
            .blocks()
            .get(id)
            .ok_or_else(|| EditorError::UnknownWidget(id.to_string()))?;

        let descriptor = self
            .catalog
            .describe(block.block_type())
            .map_err(|e| EditorError::Mutation(e.into()))?;

        resolve_field(descriptor.fields, path).ok_or_else(|| EditorError::UnknownField {
            tag: block.block_type().to_string(),
            path: path.clone(),
        })
    }

    // Drag and drop

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn drag_start(&mut self, id: &str) -> Result<(), EditorError> {
        if let Some(source) = self.drag.source_id() {
            return Err(DragError::AlreadyDragging(source.to_string()).into());
        }
        if !self.blocks().contains(id) {
            return Err(DragError::UnknownSource(id.to_string()).into());
        }

        self.drag = DragState::Dragging {
            source_id: id.to_string(),
        };
        debug!(id, "Drag started");
        Ok(())
    }

    /// Drop the dragged widget at `index` and end the gesture
    pub fn drop_at(&mut self, index: usize) -> Result<MutationOutcome, EditorError> {
        let DragState::Dragging { source_id } = std::mem::take(&mut self.drag) else {
            return Err(DragError::NotDragging.into());
        };

        self.commit(Mutation::Reorder {
            id: source_id,
            to_index: index,
        })
    }

    /// Cancel the gesture without changing anything
    pub fn drag_end(&mut self) {
        if self.drag.is_dragging() {
            debug!("Drag cancelled");
        }
        self.drag = DragState::Idle;
    }

    // History

    /// Group the following edits into one undo step. Batches nest; the
    /// outermost description is kept.
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        if self.history.is_batching() {
            warn!("undo ignored while a batch is open");
            return Ok(false);
        }
        match self.history.undo(self.document.blocks()) {
            Some(previous) => {
                self.document.replace_blocks(previous);
                self.changed();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        if self.history.is_batching() {
            warn!("redo ignored while a batch is open");
            return Ok(false);
        }
        match self.history.redo(self.document.blocks()) {
            Some(next) => {
                self.document.replace_blocks(next);
                self.changed();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // Media

    /// Ask `picker` for an asset and write it to `path`. Cancelling is a no-op.
    pub fn pick_media(
        &mut self,
        id: &str,
        path: ConfigPath,
        picker: &mut impl MediaPicker,
    ) -> Result<MutationOutcome, EditorError> {
        self.ensure_idle()?;
        if !self.blocks().contains(id) {
            return Ok(MutationOutcome::NoOp);
        }

        match picker.open_picker(&path) {
            Some(url) => self.set_field(id, path, Value::String(url)),
            None => Ok(MutationOutcome::NoOp),
        }
    }

    /// Upload `files` concurrently and append each finished image to the
    /// list at `path`. The whole upload is one undo step.
    pub async fn upload_into_list(
        &mut self,
        id: &str,
        path: ConfigPath,
        files: Vec<UploadRequest>,
        uploader: &impl MediaUploader,
    ) -> Result<UploadReport, EditorError> {
        self.ensure_idle()?;

        let fields = self
            .blocks()
            .get(id)
            .and_then(|block| self.catalog.describe(block.block_type()).ok())
            .map(|descriptor| descriptor.fields)
            .unwrap_or(&[]);

        let mut pending = files
            .into_iter()
            .map(|file| async move {
                let file_name = file.file_name.clone();
                (file_name, uploader.upload(file).await)
            })
            .collect::<FuturesUnordered<_>>();

        let mut report = UploadReport::default();
        self.history.begin_batch();
        self.history.set_batch_description("Upload images");

        while let Some((file_name, result)) = pending.next().await {
            match result {
                Ok(url) => {
                    let item = uploaded_item(fields, &path, &url);
                    let outcome = self.commit(Mutation::EditList {
                        id: id.to_string(),
                        path: path.clone(),
                        edit: SubListOp::Add { template: Some(item) },
                    });
                    match outcome {
                        Ok(MutationOutcome::Applied { .. }) => report.added.push(url),
                        Ok(MutationOutcome::NoOp) => report.failed += 1,
                        Err(error) => {
                            self.history.end_batch();
                            return Err(error);
                        }
                    }
                }
                Err(error) => {
                    warn!(file = %file_name, %error, "Upload failed, skipping");
                    report.failed += 1;
                }
            }
        }

        self.history.end_batch();
        Ok(report)
    }

    // Persistence

    /// Save the page. On failure the session keeps its state and stays dirty.
    pub fn save(&mut self, store: &mut dyn PageStore) -> Result<(), EditorError> {
        self.document.save(store)?;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        if self.drag.is_dragging() {
            return Err(EditorError::GestureInProgress);
        }
        Ok(())
    }

    fn changed(&mut self) {
        self.version += 1;

        if let Some(selected) = &self.selection {
            if !self.document.blocks().contains(selected) {
                self.selection = None;
            }
        }

        let blocks = self.document.blocks();
        for listener in &mut self.listeners {
            listener.collection_changed(blocks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(catalog: &Catalog) -> EditSession<'_> {
        EditSession::new(catalog, PageDocument::new("home")).with_ids(IdGenerator::from_seed("s"))
    }

    #[test]
    fn test_palette_insert_selects() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);

        let id = session.insert_from_palette("hero", None).unwrap();
        assert_eq!(session.selected(), Some(id.as_str()));
        assert_eq!(session.version(), 1);
        assert!(session.is_dirty());
    }

    #[test]
    fn test_remove_clears_selection() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);
        let id = session.insert_from_palette("text", None).unwrap();

        session.apply(Mutation::Remove { id }).unwrap();
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_listeners_see_every_change() {
        let catalog = Catalog::builtin();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = session(&catalog);

        let sink = seen.clone();
        session.subscribe(move |blocks: &BlockCollection| sink.borrow_mut().push(blocks.len()));

        session.insert_from_palette("text", None).unwrap();
        session.insert_from_palette("spacer", None).unwrap();
        session
            .apply(Mutation::Remove { id: "missing".to_string() })
            .unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_drag_gesture_blocks_other_edits() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);
        let a = session.insert_from_palette("text", None).unwrap();
        let b = session.insert_from_palette("spacer", None).unwrap();

        session.drag_start(&b).unwrap();
        assert!(matches!(
            session.apply(Mutation::ToggleEnabled { id: a.clone() }),
            Err(EditorError::GestureInProgress)
        ));
        assert!(matches!(
            session.drag_start(&a),
            Err(EditorError::Drag(DragError::AlreadyDragging(_)))
        ));

        session.drop_at(0).unwrap();
        assert_eq!(session.drag_state(), &DragState::Idle);
        assert_eq!(session.blocks().ids().collect::<Vec<_>>(), vec![b.as_str(), a.as_str()]);
    }

    #[test]
    fn test_drag_end_changes_nothing() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);
        let a = session.insert_from_palette("text", None).unwrap();
        let version = session.version();

        session.drag_start(&a).unwrap();
        session.drag_end();

        assert_eq!(session.version(), version);
        assert!(matches!(
            session.drop_at(0),
            Err(EditorError::Drag(DragError::NotDragging))
        ));
    }

    #[test]
    fn test_drag_unknown_source() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);
        assert!(matches!(
            session.drag_start("ghost"),
            Err(EditorError::Drag(DragError::UnknownSource(_)))
        ));
        assert!(!session.drag_state().is_dragging());
    }

    #[test]
    fn test_undo_restores_previous_collection() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);
        session.insert_from_palette("text", None).unwrap();
        let before = session.blocks().clone();

        session.insert_from_palette("faq", Some(0)).unwrap();
        assert!(session.undo().unwrap());
        assert_eq!(session.blocks(), &before);

        assert!(session.redo().unwrap());
        assert_eq!(session.blocks().len(), 2);
    }

    #[test]
    fn test_validate_field() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);
        let id = session.insert_from_palette("pricing", None).unwrap();

        let field = session
            .validate_field(&id, &ConfigPath::parse("tiers.0.gifts").unwrap())
            .unwrap();
        assert_eq!(field.name, "gifts");

        assert!(matches!(
            session.validate_field(&id, &ConfigPath::parse("nonsense").unwrap()),
            Err(EditorError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_pick_media_cancel_is_noop() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);
        let id = session.insert_from_palette("author-bio", None).unwrap();
        let path = ConfigPath::parse("imageUrl").unwrap();

        let mut cancel = |_: &ConfigPath| -> Option<String> { None };
        let outcome = session.pick_media(&id, path.clone(), &mut cancel).unwrap();
        assert_eq!(outcome, MutationOutcome::NoOp);

        let mut choose = |_: &ConfigPath| -> Option<String> { Some("me.jpg".to_string()) };
        session.pick_media(&id, path, &mut choose).unwrap();
        assert_eq!(
            session.blocks().get(&id).unwrap().config["imageUrl"],
            Value::from("me.jpg")
        );
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let catalog = Catalog::builtin();
        let mut store = MemoryStore::new();
        store.set_read_only(true);

        let mut session = session(&catalog);
        session.insert_from_palette("text", None).unwrap();

        assert!(matches!(session.save(&mut store), Err(EditorError::Persistence(_))));
        assert!(session.is_dirty());
        assert_eq!(session.blocks().len(), 1);

        store.set_read_only(false);
        session.save(&mut store).unwrap();
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_undo_waits_for_open_batch() {
        let catalog = Catalog::builtin();
        let mut session = session(&catalog);

        session.begin_batch("Build page");
        session.insert_from_palette("hero", None).unwrap();
        assert!(!session.undo().unwrap());
        assert_eq!(session.blocks().len(), 1);

        session.end_batch();
        assert!(session.undo().unwrap());
        assert!(session.blocks().is_empty());
    }
}
