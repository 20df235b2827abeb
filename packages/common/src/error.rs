use thiserror::Error;

/// Errors raised while building a [`crate::ConfigPath`].
///
/// Only path *construction* can fail. Once a path exists, reading and
/// writing through it always succeeds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Path must have between 1 and {max} segments, got {got}")]
    InvalidLength { got: usize, max: usize },

    #[error("Path must start with a field name, found index {0}")]
    LeadingIndex(usize),

    #[error("Empty field name in path")]
    EmptyField,

    #[error("List index must be a non-negative integer: {0}")]
    InvalidIndex(String),

    #[error("Unsupported path segment: {0}")]
    UnsupportedSegment(String),
}
