//! Result type aliases for Listwire.

use crate::ListwireError;

/// A specialized `Result` type for Listwire operations.
pub type ListwireResult<T> = Result<T, ListwireError>;
