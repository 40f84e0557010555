use super::domain::{UserAccount, UserId};
use crate::workflows::forms::repository::RepositoryError;

/// Read side of the account store consumed by the history and
/// recommendation workflows.
pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError>;
    fn list_all(&self) -> Result<Vec<UserAccount>, RepositoryError>;
    fn find_by_state(&self, state: &str) -> Result<Vec<UserAccount>, RepositoryError>;
}
