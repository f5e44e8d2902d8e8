//! The one way a tree operation can fail.

use thiserror::Error;

/// Errors reported by [`Tree`][crate::Tree] operations.
///
/// Missing keys and empty trees are not errors; they are reported through
/// `Option`, `bool` or a `-1` height/depth instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument could not be used, e.g. a traversal was started without a
    /// visitor to call.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
