//! # Todo Store Testing
//!
//! Testing utilities and helpers for the todo store.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//! - Record builders for seeding stores
//! - A Given-When-Then harness for store operations
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use todo_store_runtime::TodoStore;
//! use todo_store_testing::test_environment;
//!
//! let store = TodoStore::new(test_environment());
//! let todo = store.create("Buy milk", None).unwrap();
//!
//! // Ids and timestamps are predictable
//! assert_eq!(todo.id().as_str(), "todo-1");
//! ```

use chrono::{DateTime, Duration, Utc};
use todo_store_core::environment::{Clock, IdGenerator};
use todo_store_core::{TodoId, TodoRecord, TodoStatus};


/// Mock implementations of Environment traits
///
/// Deterministic stand-ins for time and identifiers.
pub mod mocks {
    use super::{Clock, DateTime, Duration, IdGenerator, TodoId, Utc};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
    use todo_store_runtime::TodoEnvironment;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_store_testing::mocks::FixedClock;
    /// use todo_store_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(epoch())
    }

    /// Clock that advances by a fixed step on every reading
    ///
    /// The first reading returns the start time. Useful for checking that
    /// `updated_at` moves when a todo changes.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_store_testing::mocks::SteppingClock;
    /// use todo_store_core::environment::Clock;
    /// use chrono::{Duration, Utc};
    ///
    /// let start = Utc::now();
    /// let clock = SteppingClock::new(start, Duration::seconds(1));
    /// assert_eq!(clock.now(), start);
    /// assert_eq!(clock.now(), start + Duration::seconds(1));
    /// ```
    #[derive(Debug)]
    pub struct SteppingClock {
        start: DateTime<Utc>,
        step: Duration,
        ticks: AtomicI32,
    }

    impl SteppingClock {
        /// Create a clock starting at `start` and advancing by `step`
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                start,
                step,
                ticks: AtomicI32::new(0),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            self.start + self.step * tick
        }
    }

    /// Predictable identifiers: `todo-1`, `todo-2`, ...
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Generator producing `todo-1`, `todo-2`, ...
        #[must_use]
        pub fn new() -> Self {
            Self::with_prefix("todo")
        }

        /// Generator producing `{prefix}-1`, `{prefix}-2`, ...
        #[must_use]
        pub fn with_prefix(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        #[allow(clippy::expect_used)] // The prefix is never blank
        fn next_id(&self) -> TodoId {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            TodoId::parse(format!("{}-{n}", self.prefix)).expect("generated ids are never blank")
        }
    }

    /// Generator that hands out the same identifier every time
    ///
    /// Exercises the store's duplicate-id guard.
    #[derive(Debug, Clone)]
    pub struct RepeatingIdGenerator {
        id: TodoId,
    }

    impl RepeatingIdGenerator {
        /// Generator that always returns `id`
        #[must_use]
        pub const fn new(id: TodoId) -> Self {
            Self { id }
        }
    }

    impl IdGenerator for RepeatingIdGenerator {
        fn next_id(&self) -> TodoId {
            self.id.clone()
        }
    }

    /// Environment with a one-second [`SteppingClock`] and a
    /// [`SequentialIdGenerator`]
    ///
    /// The clock starts at 2025-01-01 01:00:00 UTC, an hour after the
    /// timestamps of the seed records built by [`crate::helpers`], so any
    /// mutation of a seeded todo moves its `updated_at` forward.
    #[must_use]
    pub fn test_environment() -> TodoEnvironment {
        TodoEnvironment::new(
            Arc::new(SteppingClock::new(
                epoch() + Duration::hours(1),
                Duration::seconds(1),
            )),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    /// Environment whose clock never moves
    #[must_use]
    pub fn fixed_environment() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new()))
    }

    pub(crate) fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(1_735_689_600)
    }
}

/// Test helpers and utilities
pub mod helpers {
    use super::{DateTime, TodoRecord, TodoStatus, Utc, mocks::epoch};

    /// A pending record created and updated at 2025-01-01
    #[must_use]
    pub fn pending_record(id: &str, title: &str) -> TodoRecord {
        record(id, title, TodoStatus::Pending, epoch())
    }

    /// A completed record created and updated at 2025-01-01
    #[must_use]
    pub fn completed_record(id: &str, title: &str) -> TodoRecord {
        record(id, title, TodoStatus::Completed, epoch())
    }

    /// A record with explicit status and timestamp
    #[must_use]
    pub fn record(id: &str, title: &str, status: TodoStatus, at: DateTime<Utc>) -> TodoRecord {
        TodoRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status,
            created_at: at,
            updated_at: at,
        }
    }

    /// Install a `tracing` subscriber for tests, honouring `RUST_LOG`
    ///
    /// Safe to call from every test; only the first call installs anything.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities
///
/// Strategies for the inputs store operations accept and reject.
pub mod properties {
    use proptest::prelude::*;

    /// Titles that pass validation: 1..=200 characters, not blank
    pub fn valid_title() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9][a-zA-Z0-9 ,.!?-]{0,199}"
    }

    /// Titles that are empty or whitespace only
    pub fn blank_title() -> impl Strategy<Value = String> {
        "[ \t\n]{0,20}"
    }

    /// Titles longer than 200 characters
    pub fn oversized_title() -> impl Strategy<Value = String> {
        "[a-z]{201,300}"
    }

    /// Description input that passes validation, including absence
    pub fn valid_description() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-zA-Z0-9 ,.\n]{0,1000}")
    }

    /// Descriptions longer than 1000 characters
    pub fn oversized_description() -> impl Strategy<Value = String> {
        "[a-z]{1001,1100}"
    }
}

// Re-export commonly used items
pub use helpers::{completed_record, init_test_tracing, pending_record, record};
pub use mocks::{
    FixedClock, RepeatingIdGenerator, SequentialIdGenerator, SteppingClock, fixed_environment,
    test_clock, test_environment,
};
pub use store_test::{StoreTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(time1.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_stepping_clock() {
        let clock = SteppingClock::new(test_clock().now(), Duration::milliseconds(10));
        let first = clock.now();
        assert_eq!(clock.now() - first, Duration::milliseconds(10));
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::with_prefix("item");
        assert_eq!(ids.next_id().as_str(), "item-1");
        assert_eq!(ids.next_id().as_str(), "item-2");
    }

    #[test]
    fn test_record_builders() {
        let done = completed_record("a", "Done");
        assert_eq!(done.status, TodoStatus::Completed);
        assert_eq!(done.created_at, done.updated_at);
        assert_eq!(pending_record("b", "Open").status, TodoStatus::Pending);
    }
}
