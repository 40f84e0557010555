use super::domain::{FormId, FormStatus, FormSubmission};
use crate::workflows::users::UserId;

/// Storage abstraction for questionnaire submissions, so the services can be
/// exercised against any backing store.
///
/// `find_by_owner` and `find_by_status` return records in storage order;
/// history sorting relies on that order to break ties.
pub trait FormRepository: Send + Sync {
    fn save(&self, form: FormSubmission) -> Result<FormSubmission, RepositoryError>;
    fn find_by_id(&self, id: &FormId) -> Result<Option<FormSubmission>, RepositoryError>;
    fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<FormSubmission>, RepositoryError>;
    fn find_by_status(&self, status: FormStatus) -> Result<Vec<FormSubmission>, RepositoryError>;
    fn update(&self, form: FormSubmission) -> Result<FormSubmission, RepositoryError>;
    /// Returns `false` when nothing was stored under `id`.
    fn delete(&self, id: &FormId) -> Result<bool, RepositoryError>;
    fn exists(&self, id: &FormId) -> Result<bool, RepositoryError>;
    fn generate_id(&self) -> FormId;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
