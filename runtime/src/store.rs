use crate::StoreConfig;
use crate::metrics::StoreMetrics;
use crate::snapshot::{SnapshotError, TodoSnapshot};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use todo_store_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
use todo_store_core::{
    Result, Todo, TodoDescription, TodoError, TodoId, TodoState, TodoStatus, TodoTitle,
};

/// Environment dependencies for the todo store
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for generating timestamps
    pub clock: Arc<dyn Clock>,
    /// Generator for new todo identifiers
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System time and random UUIDs
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

#[derive(Clone, Copy, Debug)]
enum Command {
    Create,
    Update,
    Complete,
    Uncomplete,
    Delete,
}

impl Command {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Complete => "complete",
            Self::Uncomplete => "uncomplete",
            Self::Delete => "delete",
        }
    }
}

/// The todo store
///
/// Owns the id → todo mapping behind an `RwLock`. Cloning a store is cheap
/// and yields a handle to the same mapping, so one store can be shared
/// between threads by cloning it.
///
/// Every mutating operation does its lookup, its checks and its write while
/// holding the write lock. Two racing `complete` calls on the same todo
/// therefore see each other: exactly one succeeds and the other fails with
/// [`TodoError::InvalidState`].
///
/// # Example
///
/// ```
/// use todo_store_runtime::{TodoEnvironment, TodoStore};
///
/// # fn main() -> Result<(), todo_store_core::TodoError> {
/// let store = TodoStore::new(TodoEnvironment::production());
/// let todo = store.create("Write documentation", None)?;
///
/// let updated = store.update(todo.id(), "Write better documentation", Some("for the store"))?;
/// assert_eq!(updated.title().as_str(), "Write better documentation");
///
/// store.delete(todo.id())?;
/// assert!(store.find_by_id(todo.id()).is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TodoStore {
    state: Arc<RwLock<TodoState>>,
    environment: TodoEnvironment,
    config: StoreConfig,
}

impl TodoStore {
    /// Create an empty store with default configuration
    #[must_use]
    pub fn new(environment: TodoEnvironment) -> Self {
        Self::with_config(environment, StoreConfig::default())
    }

    /// Create an empty store with custom configuration
    #[must_use]
    pub fn with_config(environment: TodoEnvironment, config: StoreConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(TodoState::with_capacity(config.initial_capacity))),
            environment,
            config,
        }
    }

    /// Create a store holding every record of a snapshot
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::UnsupportedVersion`] for a snapshot from another format version
    /// - [`SnapshotError::Todo`] if a record breaks an invariant or repeats an id
    #[tracing::instrument(skip_all, fields(todos = snapshot.todos.len()))]
    pub fn restore(
        snapshot: TodoSnapshot,
        environment: TodoEnvironment,
        config: StoreConfig,
    ) -> std::result::Result<Self, SnapshotError> {
        snapshot.check_version()?;

        let mut state =
            TodoState::with_capacity(config.initial_capacity.max(snapshot.todos.len()));
        for record in snapshot.todos {
            let todo = Todo::reconstitute(record).map_err(TodoError::from)?;
            state.insert(todo)?;
        }

        tracing::info!(count = state.count(), "Restored todo store from snapshot");
        if config.emit_metrics {
            StoreMetrics::record_size(state.count());
        }

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            environment,
            config,
        })
    }

    /// Returns the injected environment
    #[must_use]
    pub const fn environment(&self) -> &TodoEnvironment {
        &self.environment
    }

    /// Returns the configuration
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Creates a pending todo with a fresh id
    ///
    /// # Errors
    ///
    /// - [`TodoError::Validation`] if the title is blank or too long, or the
    ///   description is too long
    /// - [`TodoError::DuplicateId`] if the id generator repeats an id
    #[tracing::instrument(level = "debug", skip(self, description))]
    pub fn create(&self, title: &str, description: Option<&str>) -> Result<Todo> {
        self.observe(Command::Create, || {
            let title = TodoTitle::new(title)?;
            let description = TodoDescription::optional(description)?;

            let mut state = self.write();
            let todo = Todo::new(
                self.environment.ids.next_id(),
                title,
                description,
                self.environment.clock.now(),
            );
            state.insert(todo.clone())?;
            self.record_size(&state);
            Ok(todo)
        })
    }

    /// Replaces the title and description of a todo
    ///
    /// Both fields are replaced together; on any error neither is.
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if no todo has this id
    /// - [`TodoError::Validation`] if the new values are invalid
    #[tracing::instrument(level = "debug", skip(self, description))]
    pub fn update(&self, id: &TodoId, title: &str, description: Option<&str>) -> Result<Todo> {
        self.observe(Command::Update, || {
            let mut state = self.write();
            let todo = state
                .get_mut(id)
                .ok_or_else(|| TodoError::NotFound(id.clone()))?;

            let title = TodoTitle::new(title)?;
            let description = TodoDescription::optional(description)?;
            todo.revise(title, description, self.environment.clock.now());
            Ok(todo.clone())
        })
    }

    /// Marks a todo as completed
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if no todo has this id
    /// - [`TodoError::InvalidState`] if it is already completed
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn complete(&self, id: &TodoId) -> Result<Todo> {
        self.observe(Command::Complete, || {
            let mut state = self.write();
            let todo = state
                .get_mut(id)
                .ok_or_else(|| TodoError::NotFound(id.clone()))?;
            todo.complete(self.environment.clock.now())?;
            Ok(todo.clone())
        })
    }

    /// Marks a completed todo as pending again
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if no todo has this id
    /// - [`TodoError::InvalidState`] if it is already pending
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn uncomplete(&self, id: &TodoId) -> Result<Todo> {
        self.observe(Command::Uncomplete, || {
            let mut state = self.write();
            let todo = state
                .get_mut(id)
                .ok_or_else(|| TodoError::NotFound(id.clone()))?;
            todo.uncomplete(self.environment.clock.now())?;
            Ok(todo.clone())
        })
    }

    /// Removes a todo permanently
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if no todo has this id.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: &TodoId) -> Result<()> {
        self.observe(Command::Delete, || {
            let mut state = self.write();
            state
                .remove(id)
                .ok_or_else(|| TodoError::NotFound(id.clone()))?;
            self.record_size(&state);
            Ok(())
        })
    }

    /// Looks up a todo; absence is `None`, not an error
    #[must_use]
    pub fn find_by_id(&self, id: &TodoId) -> Option<Todo> {
        self.read().get(id).cloned()
    }

    /// Every todo, oldest first
    #[must_use]
    pub fn find_all(&self) -> Vec<Todo> {
        self.read().all()
    }

    /// Every todo whose completion flag equals `completed`
    #[must_use]
    pub fn find_by_completed(&self, completed: bool) -> Vec<Todo> {
        self.read().with_status(TodoStatus::from_completed(completed))
    }

    /// Every completed todo
    #[must_use]
    pub fn find_completed(&self) -> Vec<Todo> {
        self.find_by_completed(true)
    }

    /// Every pending todo
    #[must_use]
    pub fn find_pending(&self) -> Vec<Todo> {
        self.find_by_completed(false)
    }

    /// Whether a todo with this id exists
    #[must_use]
    pub fn exists_by_id(&self, id: &TodoId) -> bool {
        self.read().exists(id)
    }

    /// Number of stored todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.read().count()
    }

    /// Number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.read().completed_count()
    }

    /// Copies every record into a snapshot
    #[must_use]
    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot::from_todos(&self.read().all())
    }

    fn observe<T>(&self, command: Command, op: impl FnOnce() -> Result<T>) -> Result<T> {
        let start = Instant::now();
        let result = op();
        let duration = start.elapsed();

        let outcome = match &result {
            Ok(_) => {
                tracing::debug!(command = command.as_str(), "Command applied");
                "ok"
            }
            Err(error) => {
                tracing::debug!(command = command.as_str(), %error, "Command rejected");
                error.kind().as_str()
            }
        };

        if self.config.emit_metrics {
            StoreMetrics::record_operation(command.as_str(), outcome, duration);
        }

        result
    }

    // Called with the write guard held so the gauge cannot be overtaken by a
    // later writer.
    fn record_size(&self, state: &TodoState) {
        if self.config.emit_metrics {
            StoreMetrics::record_size(state.count());
        }
    }

    // State is only written after every check has passed, so a poisoned lock
    // still guards a consistent mapping.
    fn read(&self) -> RwLockReadGuard<'_, TodoState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TodoState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
