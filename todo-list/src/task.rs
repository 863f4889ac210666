use crate::error::ParseTaskIdError;
use chrono::NaiveDateTime;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Globally unique task identifier, exchanged as UUID text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

impl TaskId {
    pub(crate) fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    /// Accepts hyphenated, simple, braced and URN forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|source| ParseTaskIdError {
                input: trimmed.to_string(),
                source,
            })
    }
}

/// A single to-do record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub(crate) id: TaskId,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) due_date: NaiveDateTime,
    pub(crate) completed: bool,
}

impl Task {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDateTime {
        self.due_date
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
