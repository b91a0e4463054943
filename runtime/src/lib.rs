//! # Todo Store Runtime
//!
//! Concurrency-safe store for todos.
//!
//! This crate provides the [`TodoStore`] that owns the id → todo mapping and
//! coordinates every operation on it.
//!
//! ## Core Components
//!
//! - **Store**: the mapping behind a lock, plus the injected environment
//! - **Environment**: clock and id generator used to stamp new records
//! - **Snapshot**: serialisable copy of all records, for export and restore
//! - **Metrics**: per-operation counters and latency histograms
//!
//! ## Example
//!
//! ```
//! use todo_store_runtime::{TodoEnvironment, TodoStore};
//!
//! # fn main() -> Result<(), todo_store_core::TodoError> {
//! let store = TodoStore::new(TodoEnvironment::production());
//!
//! let todo = store.create("Buy groceries", Some("Milk, bread, eggs"))?;
//! store.complete(todo.id())?;
//!
//! assert_eq!(store.find_completed().len(), 1);
//! assert!(store.complete(todo.id()).is_err());
//! # Ok(())
//! # }
//! ```

/// Prometheus metrics for observability
pub mod metrics;

/// Snapshot export and restore
pub mod snapshot;

/// The store itself
pub mod store;

pub use snapshot::{SnapshotError, TodoSnapshot};
pub use store::{TodoEnvironment, TodoStore};

/// Configuration for store instances
///
/// # Example
///
/// ```
/// use todo_store_runtime::{StoreConfig, TodoEnvironment, TodoStore};
///
/// let config = StoreConfig::default()
///     .with_initial_capacity(1024)
///     .with_metrics(false);
///
/// let store = TodoStore::with_config(TodoEnvironment::production(), config);
/// assert_eq!(store.count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of todos to reserve room for up front
    pub initial_capacity: usize,
    /// Whether operations report to the `metrics` facade
    pub emit_metrics: bool,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    ///
    /// # Arguments
    ///
    /// - `initial_capacity`: Number of todos to reserve room for
    /// - `emit_metrics`: Whether to record operation metrics
    #[must_use]
    pub const fn new(initial_capacity: usize, emit_metrics: bool) -> Self {
        Self {
            initial_capacity,
            emit_metrics,
        }
    }

    /// Set the initial capacity
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enable or disable metrics
    #[must_use]
    pub const fn with_metrics(mut self, enabled: bool) -> Self {
        self.emit_metrics = enabled;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            emit_metrics: true,
        }
    }
}
