//! Administrator review of teacher document submissions.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ReviewRequest, SubmissionStatus, TeacherSubmission};
pub use repository::SubmissionRepository;
pub use router::reviews_router;
pub use service::{ReviewError, ReviewService, MAX_FEEDBACK_LENGTH};
