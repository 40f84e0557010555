use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::domain::Recommendation;
use super::service::RecommendationService;
use crate::error::AppError;
use crate::workflows::forms::FormRepository;
use crate::workflows::users::{UserId, UserRepository};
use crate::workflows::WorkflowError;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendQuery {
    radius_km: Option<f64>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    specialty: String,
    city: String,
    state: String,
}

pub fn recommendation_router<F, U>(service: Arc<RecommendationService<F, U>>) -> Router
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/producers/:owner_id/recommendations",
            get(recommend_handler::<F, U>),
        )
        .route(
            "/api/v1/producers/:owner_id/recommendations/problems",
            post(problems_handler::<F, U>),
        )
        .route("/api/v1/veterinarians/search", get(search_handler::<F, U>))
        .with_state(service)
}

pub(crate) async fn recommend_handler<F, U>(
    State(service): State<Arc<RecommendationService<F, U>>>,
    Path(owner_id): Path<u32>,
    Query(query): Query<RecommendQuery>,
) -> Result<Json<Vec<Recommendation>>, AppError>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    let ranked = service.recommend(UserId(owner_id), query.radius_km, query.limit)?;
    Ok(Json(ranked))
}

pub(crate) async fn problems_handler<F, U>(
    State(service): State<Arc<RecommendationService<F, U>>>,
    Path(owner_id): Path<u32>,
    payload: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<Json<Vec<Recommendation>>, AppError>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    let Json(problems) = payload.map_err(WorkflowError::from)?;
    let ranked = service.recommend_by_problems(UserId(owner_id), &problems)?;
    Ok(Json(ranked))
}

pub(crate) async fn search_handler<F, U>(
    State(service): State<Arc<RecommendationService<F, U>>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Recommendation>>, AppError>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    let found = service.find_by_specialty_and_location(&query.specialty, &query.city, &query.state)?;
    Ok(Json(found))
}
