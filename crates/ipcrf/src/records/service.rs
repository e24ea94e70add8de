use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::access::Actor;
use crate::catalog::{CatalogError, CatalogRepository, CatalogService, KraRatingEntry};
use crate::domain::{RatingId, TeacherId};
use crate::rating::{aggregate, AggregatedRating};
use crate::repository::RepositoryError;
use crate::validation::{self, Constraint, ValidationError};

use super::domain::{CreateRatingRequest, IpcrfRating, RatingStatus, UpdateRatingRequest};
use super::export::{ratings_to_csv, ExportError};
use super::overview::{self, OverviewPage, OverviewQuery};
use super::repository::{RatingRepository, TeacherDirectory};

/// Default overview page size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Service composing the catalog, the aggregator, and rating storage.
pub struct RatingService<R, C, T> {
    ratings: Arc<R>,
    catalog: Arc<CatalogService<C>>,
    teachers: Arc<T>,
    sequence: AtomicU64,
    page_size: usize,
}

impl<R, C, T> RatingService<R, C, T>
where
    R: RatingRepository + 'static,
    C: CatalogRepository + 'static,
    T: TeacherDirectory + 'static,
{
    pub fn new(ratings: Arc<R>, catalog: Arc<CatalogService<C>>, teachers: Arc<T>) -> Self {
        Self {
            ratings,
            catalog,
            teachers,
            sequence: AtomicU64::new(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Aggregate evaluator ratings against current catalog weights without storing anything.
    pub fn preview(&self, entries: &[KraRatingEntry]) -> Result<AggregatedRating, RatingServiceError> {
        let submission = self.catalog.submission_from_ratings(entries)?;
        let aggregated = aggregate(&submission)?;
        for warning in aggregated.warnings() {
            warn!(warning = %warning.summary(), "rating preview has empty input");
        }
        Ok(aggregated)
    }

    /// Create a draft rating. Scores are always recomputed here from catalog weights.
    pub fn store(
        &self,
        actor: Actor,
        request: CreateRatingRequest,
    ) -> Result<IpcrfRating, RatingServiceError> {
        let teacher_id = request
            .teacher_id
            .ok_or_else(|| ValidationError::required("teacher_id"))?;
        if self.teachers.fetch(teacher_id)?.is_none() {
            return Err(ValidationError::new("teacher_id", Constraint::UnknownReference).into());
        }
        let rating_period =
            validation::required_text(request.rating_period.as_deref(), "rating_period", None)?;
        let entries = required_entries(request.kra_details)?;
        let remarks = validation::optional_text(request.remarks.as_deref(), "remarks", None)?;

        let aggregated = self.preview(&entries)?;
        let now = Utc::now();
        let record = IpcrfRating {
            id: RatingId(self.sequence.fetch_add(1, Ordering::Relaxed)),
            teacher_id,
            rating_period,
            kra_details: aggregated.kra_details,
            total_score: aggregated.total_score,
            numerical_rating: aggregated.numerical_rating,
            remarks,
            status: RatingStatus::Draft,
            created_by: actor.id,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.ratings.insert(record)?;
        info!(
            rating_id = %stored.id,
            teacher_id = %stored.teacher_id,
            period = %stored.rating_period,
            total_score = stored.total_score,
            numerical_rating = stored.numerical_rating,
            "stored IPCRF rating"
        );
        Ok(stored)
    }

    /// Recompute and overwrite a rating, applying an optional status change.
    ///
    /// Moving to `approved` stamps the approving actor and time.
    pub fn update(
        &self,
        actor: Actor,
        id: RatingId,
        request: UpdateRatingRequest,
    ) -> Result<IpcrfRating, RatingServiceError> {
        let mut record = self.ratings.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let entries = required_entries(request.kra_details)?;
        let remarks = validation::optional_text(request.remarks.as_deref(), "remarks", None)?;
        let aggregated = self.preview(&entries)?;
        let now = Utc::now();

        record.kra_details = aggregated.kra_details;
        record.total_score = aggregated.total_score;
        record.numerical_rating = aggregated.numerical_rating;
        record.remarks = remarks;
        record.updated_at = now;

        if let Some(status) = request.status {
            record.status = status;
            if status == RatingStatus::Approved {
                record.approved_by = Some(actor.id);
                record.approved_at = Some(now);
            }
        }

        self.ratings.update(record.clone())?;
        info!(
            rating_id = %record.id,
            status = record.status.label(),
            total_score = record.total_score,
            numerical_rating = record.numerical_rating,
            "updated IPCRF rating"
        );
        Ok(record)
    }

    pub fn get(&self, id: RatingId) -> Result<IpcrfRating, RatingServiceError> {
        let record = self.ratings.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Ratings for one teacher, newest first, optionally limited to one period.
    pub fn list_for_teacher(
        &self,
        teacher_id: TeacherId,
        period: Option<&str>,
    ) -> Result<Vec<IpcrfRating>, RatingServiceError> {
        let mut records = self.ratings.for_teacher(teacher_id)?;
        if let Some(period) = period {
            records.retain(|record| record.rating_period == period);
        }
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    pub fn available_periods(&self) -> Result<Vec<String>, RatingServiceError> {
        Ok(overview::available_periods(&self.ratings.all()?))
    }

    pub fn overview(&self, query: &OverviewQuery) -> Result<OverviewPage, RatingServiceError> {
        let page = overview::build_overview(
            self.teachers.all()?,
            self.ratings.all()?,
            query,
            self.page_size,
        )?;
        Ok(page)
    }

    /// CSV export of every rating, optionally limited to one period, ordered by id.
    pub fn export_csv(&self, period: Option<&str>) -> Result<String, RatingServiceError> {
        let mut records = self.ratings.all()?;
        if let Some(period) = period {
            records.retain(|record| record.rating_period == period);
        }
        records.sort_by_key(|record| record.id);
        Ok(ratings_to_csv(&records)?)
    }
}

fn required_entries(
    entries: Option<Vec<KraRatingEntry>>,
) -> Result<Vec<KraRatingEntry>, ValidationError> {
    match entries {
        None => Err(ValidationError::required("kra_details")),
        Some(entries) if entries.is_empty() => {
            Err(ValidationError::new("kra_details", Constraint::NonEmpty))
        }
        Some(entries) => Ok(entries),
    }
}

/// Error raised by the rating service.
#[derive(Debug, thiserror::Error)]
pub enum RatingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<CatalogError> for RatingServiceError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::Validation(err) => Self::Validation(err),
            CatalogError::Repository(err) => Self::Repository(err),
        }
    }
}
