//! Drag-and-drop reordering as a two-phase gesture.
//!
//! ```text
//! Idle ──drag_start(id)──▶ Dragging { source_id }
//!   ▲                          │
//!   └──── drop_at(i) / drag_end ┘
//! ```

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source_id: String,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn source_id(&self) -> Option<&str> {
        match self {
            DragState::Dragging { source_id } => Some(source_id),
            DragState::Idle => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragError {
    #[error("A drag gesture is already in progress for {0}")]
    AlreadyDragging(String),

    #[error("Cannot drag unknown widget: {0}")]
    UnknownSource(String),

    #[error("No drag gesture in progress")]
    NotDragging,
}
