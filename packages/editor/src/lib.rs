//! # Pagekit Editor
//!
//! Page editing engine for pagekit.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: variant tags → defaults + schemas  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: page lifecycle + mutations          │
//! │  - Load/save pages through a PageStore      │
//! │  - Apply mutations to the block collection  │
//! │  - Selection, drag-and-drop, undo/redo      │
//! │  - Media picking and bulk uploads           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: blocks → VDOM → HTML              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Collection is source of truth**: rendered output is a derived view
//! 2. **Dense positions**: after every operation positions are exactly `0..n`
//! 3. **Stale operations are no-ops**: acting on a removed widget is not an error
//! 4. **One change notification**: every applied mutation reaches listeners
//!
//! ## Usage
//!
//! ```rust
//! use pagekit_catalog::Catalog;
//! use pagekit_editor::{EditSession, MemoryStore, Mutation, PageDocument};
//!
//! let catalog = Catalog::builtin();
//! let mut session = EditSession::new(&catalog, PageDocument::new("landing"));
//!
//! let hero = session.insert_from_palette("hero", None).unwrap();
//! session.insert_from_palette("countdown-timer", None).unwrap();
//! session.apply(Mutation::Reorder { id: hero, to_index: 1 }).unwrap();
//!
//! let mut store = MemoryStore::new();
//! session.save(&mut store).unwrap();
//! assert!(!session.is_dirty());
//! ```

mod block;
mod collection;
mod document;
mod drag;
mod errors;
mod media;
mod mutations;
mod session;
mod sublist;
mod undo_stack;
mod uploads;

pub use block::BlockInstance;
pub use collection::{BlockCollection, Direction};
pub use document::{JsonFileStore, MemoryStore, PageDocument, PageStore, StoreError};
pub use drag::{DragError, DragState};
pub use errors::EditorError;
pub use media::MediaPicker;
pub use mutations::{Mutation, MutationError, MutationOutcome, MutationResult};
pub use session::{ChangeListener, EditSession};
pub use sublist::{add_item, edit_list, move_item, remove_item, set_item, update_item, SubListOp};
pub use undo_stack::UndoStack;
pub use uploads::{MediaUploader, UploadError, UploadReport, UploadRequest};

// Re-export common types for convenience
pub use pagekit_common::{ConfigMap, ConfigPath, CtaTarget, IdGenerator, LinkTarget};
