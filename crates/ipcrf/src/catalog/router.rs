use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::access::AdminActor;
use crate::domain::{KraId, ObjectiveId};
use crate::repository::RepositoryError;

use super::domain::{KraInput, NewObjectiveInput, ObjectiveInput};
use super::repository::CatalogRepository;
use super::service::{CatalogError, CatalogService};

/// Router builder exposing KRA and objective management.
pub fn catalog_router<R>(service: Arc<CatalogService<R>>) -> Router
where
    R: CatalogRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/ipcrf/kras",
            get(list_handler::<R>).post(create_kra_handler::<R>),
        )
        .route("/api/v1/ipcrf/kras/:kra_id", put(update_kra_handler::<R>))
        .route("/api/v1/ipcrf/objectives", post(create_objective_handler::<R>))
        .route(
            "/api/v1/ipcrf/objectives/:objective_id",
            put(update_objective_handler::<R>).delete(delete_objective_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    _admin: AdminActor,
    State(service): State<Arc<CatalogService<R>>>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.list() {
        Ok(kras) => (StatusCode::OK, Json(json!({ "kras": kras }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_kra_handler<R>(
    _admin: AdminActor,
    State(service): State<Arc<CatalogService<R>>>,
    Json(input): Json<KraInput>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.create_kra(input) {
        Ok(kra) => (StatusCode::CREATED, Json(kra)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_kra_handler<R>(
    _admin: AdminActor,
    State(service): State<Arc<CatalogService<R>>>,
    Path(kra_id): Path<u64>,
    Json(input): Json<KraInput>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.update_kra(KraId(kra_id), input) {
        Ok(kra) => (StatusCode::OK, Json(kra)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_objective_handler<R>(
    _admin: AdminActor,
    State(service): State<Arc<CatalogService<R>>>,
    Json(input): Json<NewObjectiveInput>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.create_objective(input) {
        Ok(objective) => (StatusCode::CREATED, Json(objective)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_objective_handler<R>(
    _admin: AdminActor,
    State(service): State<Arc<CatalogService<R>>>,
    Path(objective_id): Path<u64>,
    Json(input): Json<ObjectiveInput>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.update_objective(ObjectiveId(objective_id), input) {
        Ok(objective) => (StatusCode::OK, Json(objective)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_objective_handler<R>(
    _admin: AdminActor,
    State(service): State<Arc<CatalogService<R>>>,
    Path(objective_id): Path<u64>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.delete_objective(ObjectiveId(objective_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CatalogError) -> Response {
    match err {
        CatalogError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        CatalogError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "record not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        CatalogError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "record already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        other => {
            warn!(error = %other, "catalog request failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
