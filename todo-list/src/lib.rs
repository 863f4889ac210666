//! In-memory to-do list: task records and the service that owns them.
mod error;
mod service;
mod task;

pub use error::{ParseTaskIdError, ValidationError};
pub use service::{Listing, Outcome, TaskService};
pub use task::{Task, TaskId};
