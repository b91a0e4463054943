//! Domain types for todos.
//!
//! A todo is a titled item with an optional description and a two-state
//! status. Every field that carries a constraint has its own type, so a
//! [`Todo`] that exists is already valid: the checks run once, when the value
//! is built, and never again.

use crate::error::{TodoError, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a todo
///
/// Identifiers are opaque strings. Generated ones are random UUIDs, but any
/// non-blank string parses.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoId(String);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses an identifier supplied by a caller.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] if `raw` is empty or whitespace.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TodoId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TodoId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TodoId> for String {
    fn from(id: TodoId) -> Self {
        id.0
    }
}

/// A todo title: never blank, at most [`TodoTitle::MAX_CHARS`] characters.
///
/// The blank check looks at the trimmed text, but the title is stored exactly
/// as given and its length is measured untrimmed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Maximum title length, in characters.
    pub const MAX_CHARS: usize = 200;

    /// Validates and wraps a title.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyTitle`] if the title is blank
    /// - [`ValidationError::TitleTooLong`] if it exceeds [`Self::MAX_CHARS`]
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let len = value.chars().count();
        if len > Self::MAX_CHARS {
            return Err(ValidationError::TitleTooLong {
                len,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    /// Returns the title text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TodoTitle {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoTitle> for String {
    fn from(title: TodoTitle) -> Self {
        title.0
    }
}

/// A todo description: at most [`TodoDescription::MAX_CHARS`] characters.
///
/// Absence is modelled as `Option<TodoDescription>`. See
/// [`TodoDescription::optional`] for how caller input maps onto that.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoDescription(String);

impl TodoDescription {
    /// Maximum description length, in characters.
    pub const MAX_CHARS: usize = 1000;

    /// Validates and wraps a description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DescriptionTooLong`] if the text exceeds
    /// [`Self::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let len = value.chars().count();
        if len > Self::MAX_CHARS {
            return Err(ValidationError::DescriptionTooLong {
                len,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    /// Normalizes caller input into an optional description.
    ///
    /// `None` and `Some("")` both mean "no description". Whitespace-only text
    /// is a real description and is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DescriptionTooLong`] if the text exceeds
    /// [`Self::MAX_CHARS`].
    pub fn optional(value: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match value {
            None | Some("") => Ok(None),
            Some(text) => Self::new(text).map(Some),
        }
    }

    /// Returns the description text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TodoDescription {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoDescription> for String {
    fn from(description: TodoDescription) -> Self {
        description.0
    }
}

/// Completion status of a todo
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    /// Not done yet
    #[default]
    Pending,
    /// Done
    Completed,
}

impl TodoStatus {
    /// Maps the boolean `completed` flag onto a status
    #[must_use]
    pub const fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Completed
        } else {
            Self::Pending
        }
    }

    /// Whether this is [`TodoStatus::Completed`]
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether this is [`TodoStatus::Pending`]
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// A single todo
///
/// Fields are private: titles and descriptions can only change through
/// [`Todo::revise`] and status only through [`Todo::complete`] and
/// [`Todo::uncomplete`], each of which refreshes `updated_at`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Todo {
    id: TodoId,
    title: TodoTitle,
    description: Option<TodoDescription>,
    status: TodoStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new pending todo stamped with `now`
    #[must_use]
    pub const fn new(
        id: TodoId,
        title: TodoTitle,
        description: Option<TodoDescription>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status: TodoStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a todo from a stored record, re-checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the record violates.
    pub fn reconstitute(record: TodoRecord) -> Result<Self, ValidationError> {
        if record.updated_at < record.created_at {
            return Err(ValidationError::UpdatedBeforeCreated);
        }
        Ok(Self {
            id: TodoId::parse(record.id)?,
            title: TodoTitle::new(record.title)?,
            description: TodoDescription::optional(record.description.as_deref())?,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Returns the identifier
    #[must_use]
    pub const fn id(&self) -> &TodoId {
        &self.id
    }

    /// Returns the title
    #[must_use]
    pub const fn title(&self) -> &TodoTitle {
        &self.title
    }

    /// Returns the description, if any
    #[must_use]
    pub const fn description(&self) -> Option<&TodoDescription> {
        self.description.as_ref()
    }

    /// Returns the status
    #[must_use]
    pub const fn status(&self) -> TodoStatus {
        self.status
    }

    /// Whether the todo is completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// When the todo was created
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the todo was last changed
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces both title and description
    pub fn revise(
        &mut self,
        title: TodoTitle,
        description: Option<TodoDescription>,
        now: DateTime<Utc>,
    ) {
        self.title = title;
        self.description = description;
        self.touch(now);
    }

    /// Marks the todo as completed
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidState`] if it is already completed.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), TodoError> {
        self.transition(TodoStatus::Completed, now)
    }

    /// Marks the todo as pending again
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidState`] if it is already pending.
    pub fn uncomplete(&mut self, now: DateTime<Utc>) -> Result<(), TodoError> {
        self.transition(TodoStatus::Pending, now)
    }

    /// Copies the todo into its plain record form
    #[must_use]
    pub fn to_record(&self) -> TodoRecord {
        TodoRecord {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.as_ref().map(ToString::to_string),
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn transition(&mut self, target: TodoStatus, now: DateTime<Utc>) -> Result<(), TodoError> {
        if self.status == target {
            return Err(TodoError::InvalidState {
                id: self.id.clone(),
                status: self.status,
            });
        }
        self.status = target;
        self.touch(now);
        Ok(())
    }

    // updated_at never moves backwards, even if the clock does.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }
}

impl From<&Todo> for TodoRecord {
    fn from(todo: &Todo) -> Self {
        todo.to_record()
    }
}

impl TryFrom<TodoRecord> for Todo {
    type Error = ValidationError;

    fn try_from(record: TodoRecord) -> Result<Self, Self::Error> {
        Self::reconstitute(record)
    }
}

/// Plain, unvalidated form of a [`Todo`] used for persistence and seeding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Description, `None` when absent
    pub description: Option<String>,
    /// Completion status
    pub status: TodoStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}
