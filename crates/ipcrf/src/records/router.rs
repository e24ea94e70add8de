use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::access::AdminActor;
use crate::catalog::{CatalogRepository, KraRatingEntry};
use crate::domain::RatingId;
use crate::rating::RatingSummaryView;
use crate::repository::RepositoryError;

use super::domain::{CreateRatingRequest, UpdateRatingRequest};
use super::overview::OverviewQuery;
use super::repository::{RatingRepository, TeacherDirectory};
use super::service::{RatingService, RatingServiceError};

type SharedService<R, C, T> = Arc<RatingService<R, C, T>>;

/// Router builder exposing rating preview, storage, review status, and reporting.
pub fn rating_router<R, C, T>(service: SharedService<R, C, T>) -> Router
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
{
    Router::new()
        .route("/api/v1/ipcrf/ratings", post(store_handler::<R, C, T>))
        .route(
            "/api/v1/ipcrf/ratings/preview",
            post(preview_handler::<R, C, T>),
        )
        .route(
            "/api/v1/ipcrf/ratings/export",
            get(export_handler::<R, C, T>),
        )
        .route(
            "/api/v1/ipcrf/ratings/:rating_id",
            get(show_handler::<R, C, T>).put(update_handler::<R, C, T>),
        )
        .route("/api/v1/ipcrf/overview", get(overview_handler::<R, C, T>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    #[serde(default)]
    pub(crate) kra_details: Vec<KraRatingEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default, alias = "year")]
    pub(crate) period: Option<String>,
}

pub(crate) async fn preview_handler<R, C, T>(
    _admin: AdminActor,
    State(service): State<SharedService<R, C, T>>,
    Json(request): Json<PreviewRequest>,
) -> Response
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
{
    match service.preview(&request.kra_details) {
        Ok(aggregated) => {
            let summary = RatingSummaryView::from_aggregate(Some(&aggregated));
            let payload = json!({
                "kra_details": aggregated.kra_details,
                "total_score": aggregated.total_score,
                "numerical_rating": aggregated.numerical_rating,
                "summary": summary,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn store_handler<R, C, T>(
    AdminActor(actor): AdminActor,
    State(service): State<SharedService<R, C, T>>,
    Json(request): Json<CreateRatingRequest>,
) -> Response
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
{
    match service.store(actor, request) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R, C, T>(
    AdminActor(actor): AdminActor,
    State(service): State<SharedService<R, C, T>>,
    Path(rating_id): Path<u64>,
    Json(request): Json<UpdateRatingRequest>,
) -> Response
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
{
    match service.update(actor, RatingId(rating_id), request) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn show_handler<R, C, T>(
    _admin: AdminActor,
    State(service): State<SharedService<R, C, T>>,
    Path(rating_id): Path<u64>,
) -> Response
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
{
    match service.get(RatingId(rating_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn overview_handler<R, C, T>(
    _admin: AdminActor,
    State(service): State<SharedService<R, C, T>>,
    Query(query): Query<OverviewQuery>,
) -> Response
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
{
    match service.overview(&query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R, C, T>(
    _admin: AdminActor,
    State(service): State<SharedService<R, C, T>>,
    Query(query): Query<ExportQuery>,
) -> Response
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
{
    let period = query
        .period
        .as_deref()
        .map(str::trim)
        .filter(|period| !period.is_empty());

    match service.export_csv(period) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"ipcrf-ratings.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: RatingServiceError) -> Response {
    match err {
        RatingServiceError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        RatingServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "rating not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        RatingServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "rating already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        other => {
            warn!(error = %other, "rating request failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
