pub mod error;
pub mod forms;
pub mod history;
pub mod recommendation;
pub mod users;

pub use error::WorkflowError;
