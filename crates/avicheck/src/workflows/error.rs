use axum::extract::rejection::JsonRejection;

use crate::workflows::forms::domain::{FormId, FormStatus, Section};
use crate::workflows::forms::repository::RepositoryError;

/// Failures surfaced by the checkpoint workflows. None are retried or
/// recovered internally; the transport layer maps each to a client status.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("form {form_id} is incomplete; missing sections: {}", join_sections(.missing))]
    IncompleteForm {
        form_id: FormId,
        missing: Vec<Section>,
    },
    #[error("form {form_id} is {actual}, expected {expected}")]
    InvalidState {
        form_id: FormId,
        expected: FormStatus,
        actual: FormStatus,
    },
    #[error("invalid request: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl WorkflowError {
    pub fn form_not_found(id: &FormId) -> Self {
        Self::NotFound {
            entity: "form",
            id: id.0.clone(),
        }
    }

    pub fn producer_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "producer",
            id: id.to_string(),
        }
    }
}

/// Malformed or mistyped request bodies are client input errors.
impl From<JsonRejection> for WorkflowError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

fn join_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|section| section.key())
        .collect::<Vec<_>>()
        .join(", ")
}
