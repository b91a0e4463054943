//! # Todo Store Core
//!
//! Domain types and rules for managing a list of todos.
//!
//! This crate is pure: it performs no I/O and holds no locks. The runtime
//! crate wraps [`state::TodoState`] in a concurrency-safe store.
//!
//! ## Core Concepts
//!
//! - **Todo**: the single domain record (title, description, status, timestamps)
//! - **Validated fields**: [`todo::TodoTitle`] and [`todo::TodoDescription`]
//!   can only be built from input that satisfies their length rules
//! - **Status**: strictly alternates between pending and completed
//! - **Environment**: time and identifiers are injected via traits
//!
//! ## Example
//!
//! ```
//! use todo_store_core::todo::{Todo, TodoDescription, TodoId, TodoTitle};
//! use chrono::Utc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut todo = Todo::new(
//!     TodoId::random(),
//!     TodoTitle::new("Buy groceries")?,
//!     TodoDescription::optional(Some("Milk, bread, eggs"))?,
//!     Utc::now(),
//! );
//! todo.complete(Utc::now())?;
//! assert!(todo.is_completed());
//! assert!(todo.complete(Utc::now()).is_err());
//! # Ok(())
//! # }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

/// Error taxonomy
pub mod error;

/// The id → todo mapping
pub mod state;

/// Todo entity and its value types
pub mod todo;

pub use error::{ErrorKind, Result, TodoError, ValidationError};
pub use state::TodoState;
pub use todo::{Todo, TodoDescription, TodoId, TodoRecord, TodoStatus, TodoTitle};

/// Environment module - Dependency injection traits
///
/// Store operations never call `Utc::now()` or generate identifiers
/// themselves. They ask the environment, so tests can pin both.
pub mod environment {
    use crate::todo::TodoId;
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_store_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of identifiers for newly created todos
    ///
    /// Implementations should not repeat themselves. A repeat is caught by
    /// the store and reported as
    /// [`TodoError::DuplicateId`](crate::TodoError::DuplicateId).
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> TodoId;
    }

    /// Production generator producing random UUID v4 strings
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> TodoId {
            TodoId::random()
        }
    }
}
