use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::access::AdminActor;
use crate::domain::SubmissionId;
use crate::repository::RepositoryError;

use super::domain::ReviewRequest;
use super::repository::SubmissionRepository;
use super::service::{ReviewError, ReviewService};

pub fn reviews_router<S>(service: Arc<ReviewService<S>>) -> Router
where
    S: SubmissionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/ipcrf/reviews/:submission_id",
            post(review_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn review_handler<S>(
    AdminActor(actor): AdminActor,
    State(service): State<Arc<ReviewService<S>>>,
    Path(submission_id): Path<u64>,
    Json(request): Json<ReviewRequest>,
) -> Response
where
    S: SubmissionRepository + 'static,
{
    match service.review(actor, SubmissionId(submission_id), request) {
        Ok(submission) => (StatusCode::OK, Json(submission)).into_response(),
        Err(ReviewError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(ReviewError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "submission not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "submission review failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
