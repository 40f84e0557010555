use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{FormDraft, FormId, FormStatus, FormSubmission};
use super::repository::FormRepository;
use super::service::FormLifecycleService;
use crate::error::AppError;
use crate::workflows::users::UserId;
use crate::workflows::WorkflowError;

/// Submission plus the derived completeness flag.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    #[serde(flatten)]
    pub form: FormSubmission,
    pub complete: bool,
}

impl From<FormSubmission> for FormView {
    fn from(form: FormSubmission) -> Self {
        let complete = form.is_complete();
        Self { form, complete }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusQuery {
    status: Option<String>,
}

/// Router builder exposing the form lifecycle over HTTP.
pub fn form_router<R>(service: Arc<FormLifecycleService<R>>) -> Router
where
    R: FormRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/forms",
            post(save_handler::<R>).get(list_by_status_handler::<R>),
        )
        .route(
            "/api/v1/forms/:form_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/v1/forms/:form_id/submit", post(submit_handler::<R>))
        .route("/api/v1/forms/:form_id/analyze", post(analyze_handler::<R>))
        .route(
            "/api/v1/producers/:owner_id/forms",
            get(list_by_owner_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<FormLifecycleService<R>>>,
    payload: Result<Json<FormDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<FormView>), AppError>
where
    R: FormRepository + 'static,
{
    let Json(draft) = payload.map_err(WorkflowError::from)?;
    let form = service.save(draft)?;
    Ok((StatusCode::CREATED, Json(form.into())))
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<FormLifecycleService<R>>>,
    Path(form_id): Path<String>,
) -> Result<Json<FormView>, AppError>
where
    R: FormRepository + 'static,
{
    let form = service.get(&FormId(form_id))?;
    Ok(Json(form.into()))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<FormLifecycleService<R>>>,
    Path(form_id): Path<String>,
    payload: Result<Json<FormDraft>, JsonRejection>,
) -> Result<Json<FormView>, AppError>
where
    R: FormRepository + 'static,
{
    let Json(draft) = payload.map_err(WorkflowError::from)?;
    let form = service.update(&FormId(form_id), draft)?;
    Ok(Json(form.into()))
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<FormLifecycleService<R>>>,
    Path(form_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    R: FormRepository + 'static,
{
    service.delete(&FormId(form_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<FormLifecycleService<R>>>,
    Path(form_id): Path<String>,
) -> Result<Json<FormView>, AppError>
where
    R: FormRepository + 'static,
{
    let form = service.submit(&FormId(form_id))?;
    Ok(Json(form.into()))
}

pub(crate) async fn analyze_handler<R>(
    State(service): State<Arc<FormLifecycleService<R>>>,
    Path(form_id): Path<String>,
) -> Result<Json<FormView>, AppError>
where
    R: FormRepository + 'static,
{
    let form = service.analyze(&FormId(form_id))?;
    Ok(Json(form.into()))
}

pub(crate) async fn list_by_status_handler<R>(
    State(service): State<Arc<FormLifecycleService<R>>>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<FormView>>, AppError>
where
    R: FormRepository + 'static,
{
    let raw = query
        .status
        .ok_or_else(|| WorkflowError::Validation("status query parameter is required".to_string()))?;
    let status = raw
        .parse::<FormStatus>()
        .map_err(|err| WorkflowError::Validation(err.to_string()))?;
    let forms = service.list_by_status(status)?;
    Ok(Json(forms.into_iter().map(FormView::from).collect()))
}

pub(crate) async fn list_by_owner_handler<R>(
    State(service): State<Arc<FormLifecycleService<R>>>,
    Path(owner_id): Path<u32>,
) -> Result<Json<Vec<FormView>>, AppError>
where
    R: FormRepository + 'static,
{
    let forms = service.list_by_owner(UserId(owner_id))?;
    Ok(Json(forms.into_iter().map(FormView::from).collect()))
}
