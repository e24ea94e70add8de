use super::common::*;
use crate::domain::TeacherId;
use crate::records::domain::{RatingStatus, UpdateRatingRequest};
use crate::records::overview::OverviewQuery;
use crate::records::service::RatingServiceError;
use crate::validation::Constraint;

fn query() -> OverviewQuery {
    OverviewQuery::default()
}

#[test]
fn overview_pairs_teachers_with_latest_rating() {
    let (service, _) = build_service();
    service
        .store(admin(), create_request(1, "2023-2024"))
        .expect("stored");
    let latest = service
        .store(admin(), create_request(1, "2024-2025"))
        .expect("stored");

    let page = service.overview(&query()).expect("overview");

    assert_eq!(page.total, 3);
    assert_eq!(page.last_page, 1);
    let maria = &page.teachers[0];
    assert_eq!(maria.teacher.name, "Maria Santos");
    assert_eq!(maria.ratings.len(), 2);
    assert_eq!(maria.latest_rating.as_ref().map(|row| row.id), Some(latest.id));
    assert!(page.teachers[1].latest_rating.is_none());
    assert_eq!(page.available_periods, vec!["2024-2025", "2023-2024"]);
}

#[test]
fn search_is_case_insensitive_and_blank_is_ignored() {
    let (service, _) = build_service();

    let page = service
        .overview(&OverviewQuery {
            search: Some("REYES".to_string()),
            ..query()
        })
        .expect("overview");
    assert_eq!(page.total, 1);
    assert_eq!(page.teachers[0].teacher.id, TeacherId(3));

    let page = service
        .overview(&OverviewQuery {
            search: Some("  ".to_string()),
            ..query()
        })
        .expect("overview");
    assert_eq!(page.total, 3);
}

#[test]
fn period_and_status_filters_narrow_ratings() {
    let (service, _) = build_service();
    let older = service
        .store(admin(), create_request(1, "2023-2024"))
        .expect("stored");
    service
        .store(admin(), create_request(2, "2024-2025"))
        .expect("stored");
    service
        .update(
            admin(),
            older.id,
            UpdateRatingRequest {
                kra_details: Some(entries(4, 4, 4)),
                remarks: None,
                status: Some(RatingStatus::Approved),
            },
        )
        .expect("approved");

    let page = service
        .overview(&OverviewQuery {
            period: Some("2024-2025".to_string()),
            ..query()
        })
        .expect("overview");
    assert_eq!(page.total, 3);
    assert!(page.teachers[0].ratings.is_empty());
    assert_eq!(page.teachers[1].ratings.len(), 1);

    let page = service
        .overview(&OverviewQuery {
            status: Some("approved".to_string()),
            ..query()
        })
        .expect("overview");
    assert_eq!(page.total, 1);
    assert_eq!(page.teachers[0].teacher.id, TeacherId(1));
    assert_eq!(
        page.teachers[0].latest_rating.as_ref().map(|row| row.status),
        Some(RatingStatus::Approved)
    );
}

#[test]
fn unknown_status_filter_is_rejected() {
    let (service, _) = build_service();

    let result = service.overview(&OverviewQuery {
        status: Some("archived".to_string()),
        ..query()
    });

    match result {
        Err(RatingServiceError::Validation(error)) => {
            assert_eq!(error.field, "status");
            assert_eq!(
                error.constraint,
                Constraint::OneOf {
                    allowed: &["draft", "submitted", "approved"],
                }
            );
            assert_eq!(
                error.to_string(),
                "status must be one of: draft, submitted, approved"
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn pages_hold_ten_teachers() {
    let (service, _) = build_service_with(MemoryTeachers::numbered(23));

    let first = service.overview(&query()).expect("overview");
    assert_eq!(first.per_page, 10);
    assert_eq!(first.total, 23);
    assert_eq!(first.last_page, 3);
    assert_eq!(first.teachers.len(), 10);
    assert_eq!(first.teachers[0].teacher.id, TeacherId(1));

    let last = service
        .overview(&OverviewQuery {
            page: Some(3),
            ..query()
        })
        .expect("overview");
    assert_eq!(last.teachers.len(), 3);
    assert_eq!(last.teachers[0].teacher.id, TeacherId(21));

    let beyond = service
        .overview(&OverviewQuery {
            page: Some(9),
            ..query()
        })
        .expect("overview");
    assert!(beyond.teachers.is_empty());

    let zero = service
        .overview(&OverviewQuery {
            page: Some(0),
            ..query()
        })
        .expect("overview");
    assert_eq!(zero.page, 1);
}
