//! The id → todo mapping.
//!
//! [`TodoState`] holds no lock of its own. It is the plain data a store keeps
//! behind one, and it upholds id uniqueness on insertion.

use crate::error::TodoError;
use crate::todo::{Todo, TodoId, TodoStatus};
use std::collections::HashMap;

/// State of the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoState {
    todos: HashMap<TodoId, Todo>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self {
            todos: HashMap::new(),
        }
    }

    /// Creates an empty state with room for `capacity` todos
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            todos: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.values().filter(|t| t.is_completed()).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.get(id)
    }

    /// Returns a mutable todo by ID
    pub fn get_mut(&mut self, id: &TodoId) -> Option<&mut Todo> {
        self.todos.get_mut(id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.todos.contains_key(id)
    }

    /// Adds a todo under its own id.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::DuplicateId`] if the id is already present; the
    /// existing todo is left untouched.
    pub fn insert(&mut self, todo: Todo) -> Result<(), TodoError> {
        if self.exists(todo.id()) {
            return Err(TodoError::DuplicateId(todo.id().clone()));
        }
        self.todos.insert(todo.id().clone(), todo);
        Ok(())
    }

    /// Removes a todo, returning it if it was present
    pub fn remove(&mut self, id: &TodoId) -> Option<Todo> {
        self.todos.remove(id)
    }

    /// Every todo, oldest first (ties broken by id)
    #[must_use]
    pub fn all(&self) -> Vec<Todo> {
        self.collect(|_| true)
    }

    /// Every todo whose status matches
    #[must_use]
    pub fn with_status(&self, status: TodoStatus) -> Vec<Todo> {
        self.collect(|todo| todo.status() == status)
    }

    fn collect(&self, keep: impl Fn(&Todo) -> bool) -> Vec<Todo> {
        let mut todos: Vec<Todo> = self.todos.values().filter(|t| keep(t)).cloned().collect();
        todos.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        todos
    }
}
