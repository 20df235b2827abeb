//! Error types for the editor

use crate::document::StoreError;
use crate::drag::DragError;
use crate::mutations::MutationError;
use pagekit_common::{ConfigPath, PathError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("A drag gesture is in progress; drop or cancel it first")]
    GestureInProgress,

    #[error("Drag error: {0}")]
    Drag(#[from] DragError),

    #[error("Failed to persist page: {0}")]
    Persistence(#[from] StoreError),

    #[error("Widget not found: {0}")]
    UnknownWidget(String),

    #[error("Widget type {tag} has no field at {path}")]
    UnknownField { tag: String, path: ConfigPath },

    #[error("Invalid field path: {0}")]
    Path(#[from] PathError),
}
