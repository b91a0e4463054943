//! Error taxonomy for todo operations.
//!
//! Every failure a store operation can report is a variant of [`TodoError`].
//! The set is closed: callers are expected to match on it rather than treat
//! failures as opaque. None of these errors are transient, so nothing in the
//! workspace retries them.

use crate::todo::{TodoId, TodoStatus};
use thiserror::Error;

/// Result alias used throughout the todo crates.
pub type Result<T> = std::result::Result<T, TodoError>;

/// A field constraint that an input failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The identifier was empty or whitespace only.
    #[error("ID cannot be empty")]
    EmptyId,

    /// The title was empty or whitespace only.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// The title exceeded its character limit.
    #[error("Title cannot exceed {max} characters (got {len})")]
    TitleTooLong {
        /// Length of the rejected title, in characters
        len: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// The description exceeded its character limit.
    #[error("Description cannot exceed {max} characters (got {len})")]
    DescriptionTooLong {
        /// Length of the rejected description, in characters
        len: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// A stored record claims to have been updated before it was created.
    #[error("Updated timestamp cannot precede created timestamp")]
    UpdatedBeforeCreated,
}

/// Errors returned by todo operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Input failed a field constraint.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced todo does not exist.
    #[error("Todo not found with id: {0}")]
    NotFound(TodoId),

    /// The requested status transition is illegal for the current status.
    #[error("Todo {id} is already {status}")]
    InvalidState {
        /// Todo the transition was requested on
        id: TodoId,
        /// Status the todo already has
        status: TodoStatus,
    },

    /// An identifier is already taken.
    ///
    /// Only reachable through an [`IdGenerator`](crate::environment::IdGenerator)
    /// that repeats itself, or when restoring records that share an id.
    #[error("Todo with ID {0} already exists")]
    DuplicateId(TodoId),
}

/// Coarse classification of a [`TodoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`TodoError::Validation`]
    Validation,
    /// See [`TodoError::NotFound`]
    NotFound,
    /// See [`TodoError::InvalidState`]
    InvalidState,
    /// See [`TodoError::DuplicateId`]
    DuplicateId,
}

impl ErrorKind {
    /// Stable lowercase label, used for metrics and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::InvalidState => "invalid_state",
            Self::DuplicateId => "duplicate_id",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TodoError {
    /// Returns the class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::DuplicateId(_) => ErrorKind::DuplicateId,
        }
    }

    /// Returns the validation failure, if this is one.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
