use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use super::domain::{DashboardSummary, FormComparison, HistoryEntry, TrendReport};
use super::service::HistoryService;
use crate::error::AppError;
use crate::workflows::forms::{FormId, FormRepository};
use crate::workflows::users::{UserId, UserRepository};

#[derive(Debug, Deserialize)]
pub(crate) struct TrendQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComparisonQuery {
    first: String,
    second: String,
}

pub fn history_router<F, U>(service: Arc<HistoryService<F, U>>) -> Router
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/producers/:owner_id/dashboard",
            get(dashboard_handler::<F, U>),
        )
        .route(
            "/api/v1/producers/:owner_id/history",
            get(history_handler::<F, U>),
        )
        .route(
            "/api/v1/producers/:owner_id/trends",
            get(trend_handler::<F, U>),
        )
        .route("/api/v1/comparisons", get(comparison_handler::<F, U>))
        .with_state(service)
}

pub(crate) async fn dashboard_handler<F, U>(
    State(service): State<Arc<HistoryService<F, U>>>,
    Path(owner_id): Path<u32>,
) -> Result<Json<DashboardSummary>, AppError>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    Ok(Json(service.dashboard(UserId(owner_id))?))
}

pub(crate) async fn history_handler<F, U>(
    State(service): State<Arc<HistoryService<F, U>>>,
    Path(owner_id): Path<u32>,
) -> Result<Json<Vec<HistoryEntry>>, AppError>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    Ok(Json(service.full_history(UserId(owner_id))?))
}

pub(crate) async fn trend_handler<F, U>(
    State(service): State<Arc<HistoryService<F, U>>>,
    Path(owner_id): Path<u32>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendReport>, AppError>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    let start = query.start.and_then(start_of_day);
    let end = query.end.and_then(end_of_day);
    Ok(Json(service.trend_report(UserId(owner_id), start, end)?))
}

pub(crate) async fn comparison_handler<F, U>(
    State(service): State<Arc<HistoryService<F, U>>>,
    Query(query): Query<ComparisonQuery>,
) -> Result<Json<FormComparison>, AppError>
where
    F: FormRepository + 'static,
    U: UserRepository + 'static,
{
    let comparison = service.compare(&FormId(query.first), &FormId(query.second))?;
    Ok(Json(comparison))
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

// Inclusive end date: the whole day counts.
fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .map(|naive| Utc.from_utc_datetime(&naive))
}
