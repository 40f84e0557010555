use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::analysis::AnalysisEngine;
use super::domain::{FormDraft, FormId, FormStatus, FormSubmission};
use super::locks::FormLocks;
use super::repository::FormRepository;
use crate::workflows::users::UserId;
use crate::workflows::WorkflowError;

/// Owns the draft → submitted → analyzed state machine and runs the
/// analysis engine on submitted forms.
pub struct FormLifecycleService<R> {
    repository: Arc<R>,
    engine: AnalysisEngine,
    locks: FormLocks,
}

impl<R> FormLifecycleService<R>
where
    R: FormRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: AnalysisEngine::new(),
            locks: FormLocks::default(),
        }
    }

    /// Create a new draft. With `submit` set, a complete form moves straight
    /// to `submitted`; an incomplete one is kept as a draft.
    pub fn save(&self, draft: FormDraft) -> Result<FormSubmission, WorkflowError> {
        let owner_id = draft
            .owner_id
            .ok_or_else(|| WorkflowError::Validation("owner_id is required".to_string()))?;

        let now = Utc::now();
        let mut form = FormSubmission {
            id: self.repository.generate_id(),
            owner_id,
            answers: draft.answers,
            status: FormStatus::Draft,
            filled_at: now,
            updated_at: now,
            result: None,
        };

        if draft.submit {
            promote_if_complete(&mut form);
        }

        let stored = self.repository.save(form)?;
        info!(form_id = %stored.id, owner_id = %stored.owner_id, status = %stored.status, "form saved");
        Ok(stored)
    }

    /// Replace the answers of a draft or submitted form. Analyzed forms are
    /// frozen.
    pub fn update(&self, id: &FormId, draft: FormDraft) -> Result<FormSubmission, WorkflowError> {
        self.locks.with(id, || {
            let mut form = self.fetch(id)?;

            if form.status == FormStatus::Analyzed {
                return Err(WorkflowError::InvalidState {
                    form_id: id.clone(),
                    expected: FormStatus::Draft,
                    actual: form.status,
                });
            }
            if let Some(owner_id) = draft.owner_id {
                if owner_id != form.owner_id {
                    return Err(WorkflowError::Validation(
                        "owner_id cannot be changed".to_string(),
                    ));
                }
            }

            form.answers = draft.answers;
            form.updated_at = Utc::now();

            if form.status == FormStatus::Submitted && !form.is_complete() {
                debug!(form_id = %id, "edit removed required sections, form back to draft");
                form.status = FormStatus::Draft;
            }
            if draft.submit {
                promote_if_complete(&mut form);
            }

            let stored = self.repository.update(form)?;
            info!(form_id = %id, status = %stored.status, "form updated");
            Ok(stored)
        })
    }

    pub fn get(&self, id: &FormId) -> Result<FormSubmission, WorkflowError> {
        self.fetch(id)
    }

    pub fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<FormSubmission>, WorkflowError> {
        Ok(self.repository.find_by_owner(owner_id)?)
    }

    pub fn list_by_status(&self, status: FormStatus) -> Result<Vec<FormSubmission>, WorkflowError> {
        Ok(self.repository.find_by_status(status)?)
    }

    /// Move a draft to `submitted` once all four sections are present.
    /// Submitting an already submitted form is a no-op.
    pub fn submit(&self, id: &FormId) -> Result<FormSubmission, WorkflowError> {
        self.locks.with(id, || {
            let mut form = self.fetch(id)?;

            match form.status {
                FormStatus::Submitted => return Ok(form),
                FormStatus::Analyzed => {
                    return Err(WorkflowError::InvalidState {
                        form_id: id.clone(),
                        expected: FormStatus::Draft,
                        actual: form.status,
                    })
                }
                FormStatus::Draft => {}
            }

            let missing = form.answers.missing_sections();
            if !missing.is_empty() {
                return Err(WorkflowError::IncompleteForm {
                    form_id: id.clone(),
                    missing,
                });
            }

            form.status = FormStatus::Submitted;
            form.updated_at = Utc::now();
            let stored = self.repository.update(form)?;
            info!(form_id = %id, "form submitted");
            Ok(stored)
        })
    }

    /// Run the analysis engine on a submitted form and attach the result.
    /// Only `submitted` forms qualify, so a form is analyzed at most once.
    pub fn analyze(&self, id: &FormId) -> Result<FormSubmission, WorkflowError> {
        self.locks.with(id, || {
            let mut form = self.fetch(id)?;

            if form.status != FormStatus::Submitted {
                return Err(WorkflowError::InvalidState {
                    form_id: id.clone(),
                    expected: FormStatus::Submitted,
                    actual: form.status,
                });
            }

            let result = self.engine.analyze(&form.answers);
            let score = result.score;
            let alerts = result.alerts.len();
            form.result = Some(result);
            form.status = FormStatus::Analyzed;
            form.updated_at = Utc::now();

            let stored = self.repository.update(form)?;
            info!(form_id = %id, owner_id = %stored.owner_id, score, alerts, "form analyzed");
            Ok(stored)
        })
    }

    pub fn delete(&self, id: &FormId) -> Result<(), WorkflowError> {
        self.locks.with(id, || {
            if !self.repository.exists(id)? || !self.repository.delete(id)? {
                return Err(WorkflowError::form_not_found(id));
            }
            info!(form_id = %id, "form deleted");
            Ok(())
        })
    }

    fn fetch(&self, id: &FormId) -> Result<FormSubmission, WorkflowError> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| WorkflowError::form_not_found(id))
    }
}

fn promote_if_complete(form: &mut FormSubmission) {
    if form.is_complete() {
        form.status = FormStatus::Submitted;
    } else {
        debug!(
            form_id = %form.id,
            missing = ?form.answers.missing_sections(),
            "submit requested on incomplete form, kept as draft"
        );
    }
}
