use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{Teacher, TeacherId};
use crate::validation::{Constraint, ValidationError};

use super::domain::{IpcrfRating, RatingStatus, RatingSummaryRow};

/// Query-string filters for the teacher overview. Blank values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "year")]
    pub period: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherOverview {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub latest_rating: Option<RatingSummaryRow>,
    pub ratings: Vec<RatingSummaryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewPage {
    pub teachers: Vec<TeacherOverview>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub last_page: usize,
    pub available_periods: Vec<String>,
}

/// Distinct rating periods, most recent label first.
pub(crate) fn available_periods(ratings: &[IpcrfRating]) -> Vec<String> {
    let periods: BTreeSet<&str> = ratings
        .iter()
        .map(|rating| rating.rating_period.as_str())
        .collect();
    periods.into_iter().rev().map(str::to_string).collect()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

const STATUS_FILTERS: &[&str] = &["draft", "submitted", "approved"];

pub(crate) fn parse_status(raw: &Option<String>) -> Result<Option<RatingStatus>, ValidationError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "draft" => Ok(Some(RatingStatus::Draft)),
        "submitted" => Ok(Some(RatingStatus::Submitted)),
        "approved" => Ok(Some(RatingStatus::Approved)),
        _ => Err(ValidationError::new(
            "status",
            Constraint::OneOf {
                allowed: STATUS_FILTERS,
            },
        )),
    }
}

/// Filter, group, and paginate the roster.
///
/// Ratings are narrowed by period and status and sorted newest first. With a status filter,
/// teachers left without a matching rating drop out of the listing.
pub(crate) fn build_overview(
    mut teachers: Vec<Teacher>,
    mut ratings: Vec<IpcrfRating>,
    query: &OverviewQuery,
    per_page: usize,
) -> Result<OverviewPage, ValidationError> {
    let status = parse_status(&query.status)?;
    let available_periods = available_periods(&ratings);

    if let Some(needle) = non_blank(&query.search).map(str::to_lowercase) {
        teachers.retain(|teacher| teacher.name.to_lowercase().contains(&needle));
    }
    teachers.sort_by_key(|teacher| teacher.id);

    if let Some(period) = non_blank(&query.period) {
        ratings.retain(|rating| rating.rating_period == period);
    }
    if let Some(status) = status {
        ratings.retain(|rating| rating.status == status);
    }
    ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let mut by_teacher: HashMap<TeacherId, Vec<RatingSummaryRow>> = HashMap::new();
    for rating in &ratings {
        by_teacher
            .entry(rating.teacher_id)
            .or_default()
            .push(rating.summary_row());
    }

    let rows: Vec<TeacherOverview> = teachers
        .into_iter()
        .filter_map(|teacher| {
            let ratings = by_teacher.remove(&teacher.id).unwrap_or_default();
            if status.is_some() && ratings.is_empty() {
                return None;
            }
            Some(TeacherOverview {
                latest_rating: ratings.first().cloned(),
                teacher,
                ratings,
            })
        })
        .collect();

    let per_page = per_page.max(1);
    let total = rows.len();
    let last_page = total.div_ceil(per_page).max(1);
    let page = query.page.unwrap_or(1).max(1);
    let teachers = rows
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Ok(OverviewPage {
        teachers,
        page,
        per_page,
        total,
        last_page,
        available_periods,
    })
}
