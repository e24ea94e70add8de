//! IPCRF rating records: storage, status workflow, teacher overview, and export.

pub mod domain;
mod export;
pub mod overview;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CreateRatingRequest, IpcrfRating, RatingStatus, RatingSummaryRow, UpdateRatingRequest,
};
pub use export::{ratings_to_csv, ExportError};
pub use overview::{OverviewPage, OverviewQuery, TeacherOverview};
pub use repository::{RatingRepository, TeacherDirectory};
pub use router::rating_router;
pub use service::{RatingService, RatingServiceError, DEFAULT_PAGE_SIZE};
