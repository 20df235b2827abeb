use crate::error::PathError;

/// Result type for path construction
pub type PathResult<T> = Result<T, PathError>;
