use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::store::InMemoryFormRepository;
use crate::workflows::forms::domain::{
    ClinicalSign, DiseasesSection, EggCleanliness, EvaluationSection, FeedType, FormDraft,
    HealthSection, NutritionSection, SectionedAnswers, ShellQuality, YesNo,
};
use crate::workflows::forms::repository::{FormRepository, RepositoryError};
use crate::workflows::forms::{form_router, FormId, FormStatus, FormSubmission};
use crate::workflows::forms::FormLifecycleService;
use crate::workflows::users::UserId;

pub(super) const OWNER: UserId = UserId(7);

pub(super) fn healthy_health() -> HealthSection {
    HealthSection {
        disease_signs: Some(YesNo::No),
        clinical_signs: Some(vec![ClinicalSign::NoAlterations]),
        vaccination: Some(YesNo::Yes),
        quarantine: Some(YesNo::Yes),
        wild_bird_access: Some(YesNo::No),
    }
}

pub(super) fn healthy_nutrition() -> NutritionSection {
    NutritionSection {
        feed_type: Some(FeedType::IndustrialFeed),
        proper_storage: Some(YesNo::Yes),
        mold_or_pests: Some(YesNo::No),
    }
}

pub(super) fn healthy_evaluation() -> EvaluationSection {
    EvaluationSection {
        production_records: Some(YesNo::Yes),
        photoperiod: Some(YesNo::Yes),
        shell_quality: Some(ShellQuality::NoAlterations),
        egg_cleanliness: Some(EggCleanliness::NoAlterations),
    }
}

pub(super) fn healthy_diseases() -> DiseasesSection {
    DiseasesSection {
        sudden_deaths: Some(YesNo::No),
        sudden_production_drop: Some(YesNo::No),
        neurological_signs: Some(YesNo::No),
        respiratory_signs: Some(YesNo::No),
        green_diarrhea: Some(YesNo::No),
        wild_bird_contact: Some(YesNo::No),
    }
}

/// Every question answered with the best option: 18 strengths.
pub(super) fn healthy_answers() -> SectionedAnswers {
    SectionedAnswers {
        health: Some(healthy_health()),
        nutrition: Some(healthy_nutrition()),
        evaluation: Some(healthy_evaluation()),
        diseases: Some(healthy_diseases()),
    }
}

pub(super) fn answers_without_diseases() -> SectionedAnswers {
    SectionedAnswers {
        diseases: None,
        ..healthy_answers()
    }
}

pub(super) fn draft(answers: SectionedAnswers) -> FormDraft {
    FormDraft {
        owner_id: Some(OWNER),
        answers,
        submit: false,
    }
}

pub(super) fn build_service() -> (
    FormLifecycleService<InMemoryFormRepository>,
    Arc<InMemoryFormRepository>,
) {
    let repository = Arc::new(InMemoryFormRepository::default());
    let service = FormLifecycleService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(
    service: FormLifecycleService<InMemoryFormRepository>,
) -> axum::Router {
    form_router(Arc::new(service))
}

/// Store that is always down.
pub(super) struct UnavailableRepository;

impl FormRepository for UnavailableRepository {
    fn save(&self, _form: FormSubmission) -> Result<FormSubmission, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn find_by_id(&self, _id: &FormId) -> Result<Option<FormSubmission>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn find_by_owner(&self, _owner_id: UserId) -> Result<Vec<FormSubmission>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn find_by_status(&self, _status: FormStatus) -> Result<Vec<FormSubmission>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update(&self, _form: FormSubmission) -> Result<FormSubmission, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn delete(&self, _id: &FormId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn exists(&self, _id: &FormId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn generate_id(&self) -> FormId {
        FormId("form-offline".to_string())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json body")
}
