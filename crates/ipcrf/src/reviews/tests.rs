use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;
use crate::access::{Actor, Role};
use crate::domain::{SubmissionId, TeacherId, UserId};
use crate::repository::RepositoryError;
use crate::validation::Constraint;

#[derive(Default, Clone)]
struct MemorySubmissions {
    records: Arc<Mutex<BTreeMap<SubmissionId, TeacherSubmission>>>,
}

impl SubmissionRepository for MemorySubmissions {
    fn insert(&self, submission: TeacherSubmission) -> Result<TeacherSubmission, RepositoryError> {
        let mut guard = self.records.lock().expect("submission mutex poisoned");
        if guard.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(submission.id, submission.clone());
        Ok(submission)
    }

    fn update(&self, submission: TeacherSubmission) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("submission mutex poisoned");
        match guard.get_mut(&submission.id) {
            Some(slot) => {
                *slot = submission;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: SubmissionId) -> Result<Option<TeacherSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("submission mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

fn service_with_pending() -> Arc<ReviewService<MemorySubmissions>> {
    let service = ReviewService::new(Arc::new(MemorySubmissions::default()));
    service
        .register(TeacherId(1), "Lesson plans, first quarter")
        .expect("registered");
    Arc::new(service)
}

fn reviewer() -> Actor {
    Actor {
        id: UserId(9),
        role: Role::Admin,
    }
}

fn review(rating: f64, feedback: Option<&str>) -> ReviewRequest {
    ReviewRequest {
        rating: Some(rating),
        feedback: feedback.map(str::to_string),
    }
}

#[test]
fn register_creates_pending_submission() {
    let service = service_with_pending();
    let submission = service.get(SubmissionId(1)).expect("submission exists");

    assert_eq!(submission.status, SubmissionStatus::Pending);
    assert_eq!(submission.title, "Lesson plans, first quarter");
    assert!(submission.rating.is_none());
    assert!(submission.reviewed_at.is_none());
}

#[test]
fn review_marks_submission_reviewed() {
    let service = service_with_pending();

    let reviewed = service
        .review(reviewer(), SubmissionId(1), review(4.0, Some("  Clear objectives ")))
        .expect("review accepted");

    assert_eq!(reviewed.status, SubmissionStatus::Reviewed);
    assert_eq!(reviewed.rating, Some(4));
    assert_eq!(reviewed.feedback.as_deref(), Some("Clear objectives"));
    assert_eq!(reviewed.reviewed_by, Some(UserId(9)));
    assert!(reviewed.reviewed_at.is_some());
    assert_eq!(service.get(SubmissionId(1)).expect("stored"), reviewed);
}

#[test]
fn review_rejects_out_of_range_rating() {
    let service = service_with_pending();

    for rating in [0.0, 6.0, 3.5] {
        match service.review(reviewer(), SubmissionId(1), review(rating, None)) {
            Err(ReviewError::Validation(error)) => {
                assert_eq!(error.field, "rating");
                assert_eq!(error.constraint, Constraint::RatingRange { found: rating });
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    let untouched = service.get(SubmissionId(1)).expect("stored");
    assert_eq!(untouched.status, SubmissionStatus::Pending);
}

#[test]
fn review_rejects_long_feedback() {
    let service = service_with_pending();
    let feedback = "a".repeat(MAX_FEEDBACK_LENGTH + 1);

    let result = service.review(reviewer(), SubmissionId(1), review(3.0, Some(&feedback)));

    match result {
        Err(ReviewError::Validation(error)) => {
            assert_eq!(error.field, "feedback");
            assert_eq!(
                error.constraint,
                Constraint::MaxLength {
                    max: MAX_FEEDBACK_LENGTH
                }
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn review_of_missing_submission_is_not_found() {
    let service = service_with_pending();

    let result = service.review(reviewer(), SubmissionId(40), review(3.0, None));

    assert!(matches!(
        result,
        Err(ReviewError::Repository(RepositoryError::NotFound))
    ));
}

async fn post_review(uri: &str, role: &str, body: Value) -> (StatusCode, Value) {
    let response = reviews_router(service_with_pending())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("x-actor-id", "9")
                .header("x-actor-role", role)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

#[tokio::test]
async fn review_route_returns_reviewed_submission() {
    let (status, body) = post_review(
        "/api/v1/ipcrf/reviews/1",
        "super_admin",
        json!({ "rating": 5, "feedback": "Exemplary" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "reviewed");
    assert_eq!(body["rating"], 5);
    assert_eq!(body["reviewed_by"], 9);
}

#[tokio::test]
async fn review_route_maps_errors() {
    let (status, body) =
        post_review("/api/v1/ipcrf/reviews/1", "admin", json!({ "feedback": "?" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "rating");

    let (status, body) =
        post_review("/api/v1/ipcrf/reviews/1", "admin", json!({ "rating": 4.5 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "rating");

    let (status, _) = post_review("/api/v1/ipcrf/reviews/2", "admin", json!({ "rating": 3 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        post_review("/api/v1/ipcrf/reviews/1", "teacher", json!({ "rating": 3 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
