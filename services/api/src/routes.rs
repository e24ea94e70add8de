use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use ipcrf::catalog::{catalog_router, CatalogRepository, CatalogService};
use ipcrf::records::{rating_router, RatingRepository, RatingService, TeacherDirectory};
use ipcrf::reviews::{reviews_router, ReviewService, SubmissionRepository};
use serde_json::json;

use crate::infra::AppState;

/// Services exposed over HTTP.
pub(crate) struct PortalServices<R, C, T, S> {
    pub(crate) catalog: Arc<CatalogService<C>>,
    pub(crate) ratings: Arc<RatingService<R, C, T>>,
    pub(crate) reviews: Arc<ReviewService<S>>,
}

pub(crate) fn with_ipcrf_routes<R, C, T, S>(services: PortalServices<R, C, T, S>) -> Router
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
    S: SubmissionRepository + 'static,
{
    catalog_router(services.catalog)
        .merge(rating_router(services.ratings))
        .merge(reviews_router(services.reviews))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
