use thiserror::Error;

/// Rejected input for a task's text fields.
///
/// Raised before the store is touched, so a failed call never leaves a
/// partially written task behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The To-Do Item title cannot be null or empty.")]
    EmptyTitle,
    #[error("The To-Do Item description cannot be null or empty.")]
    EmptyDescription,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid task id {input:?}: {source}")]
pub struct ParseTaskIdError {
    pub(crate) input: String,
    #[source]
    pub(crate) source: uuid::Error,
}

pub(crate) fn validate(title: &str, description: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(())
}
