use crate::error::{ValidationError, validate};
use crate::task::{Task, TaskId};
use chrono::NaiveDateTime;
use tracing::{debug, info};

/// Result of an operation addressed at a single task.
///
/// A missing task is an expected outcome, not an error.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    NotFound,
}

/// The full store as returned by [`TaskService::list_all`].
#[derive(Debug, PartialEq)]
pub enum Listing<'a> {
    Empty,
    Tasks(&'a [Task]),
}

/// Owns every task for the lifetime of a run, in insertion order.
///
/// Lookups scan linearly; queries never reorder the store.
#[derive(Debug, Default)]
pub struct TaskService {
    tasks: Vec<Task>,
}

impl TaskService {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Adds a task and returns its freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `title` or `description` is blank.
    #[tracing::instrument(skip(self, title, description))]
    pub fn add(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDateTime,
    ) -> Result<TaskId, ValidationError> {
        let title = title.into();
        let description = description.into();
        validate(&title, &description)?;

        let id = self.fresh_id();
        self.tasks.push(Task {
            id,
            title,
            description,
            due_date,
            completed: false,
        });
        info!(%id, "task added");
        Ok(id)
    }

    /// Overwrites title, description and due date of an existing task.
    ///
    /// Input is validated before the lookup, so a blank field is reported even
    /// for an unknown id.
    #[tracing::instrument(skip(self, title, description))]
    pub fn update(
        &mut self,
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDateTime,
    ) -> Result<Outcome, ValidationError> {
        let title = title.into();
        let description = description.into();
        validate(&title, &description)?;

        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("task to update not found");
            return Ok(Outcome::NotFound);
        };
        task.title = title;
        task.description = description;
        task.due_date = due_date;
        info!("task updated");
        Ok(Outcome::Done)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: TaskId) -> Outcome {
        match self.tasks.iter().position(|task| task.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                info!("task deleted");
                Outcome::Done
            }
            None => {
                debug!("task to delete not found");
                Outcome::NotFound
            }
        }
    }

    /// Marks a task as completed. Marking an already completed task is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn mark_completed(&mut self, id: TaskId) -> Outcome {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = true;
                info!("task marked as completed");
                Outcome::Done
            }
            None => {
                debug!("task to complete not found");
                Outcome::NotFound
            }
        }
    }

    pub fn list_all(&self) -> Listing<'_> {
        if self.tasks.is_empty() {
            Listing::Empty
        } else {
            Listing::Tasks(&self.tasks)
        }
    }

    /// Tasks ordered by ascending due date, ties kept in insertion order.
    pub fn sort_by_due_date(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by_key(|task| task.due_date);
        sorted
    }

    /// Tasks ordered by title (ordinal compare), ties kept in insertion order.
    pub fn sort_by_title(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by(|a, b| a.title.cmp(&b.title));
        sorted
    }

    pub fn filter_completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.completed).collect()
    }

    pub fn filter_not_completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| !task.completed).collect()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::random();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}
