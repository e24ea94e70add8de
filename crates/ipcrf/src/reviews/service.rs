use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::access::Actor;
use crate::domain::{SubmissionId, TeacherId};
use crate::repository::RepositoryError;
use crate::validation::{self, ValidationError};

use super::domain::{ReviewRequest, SubmissionStatus, TeacherSubmission};
use super::repository::SubmissionRepository;

pub const MAX_FEEDBACK_LENGTH: usize = 1000;
const MAX_TITLE_LENGTH: usize = 255;

pub struct ReviewService<S> {
    submissions: Arc<S>,
    sequence: AtomicU64,
}

impl<S> ReviewService<S>
where
    S: SubmissionRepository + 'static,
{
    pub fn new(submissions: Arc<S>) -> Self {
        Self {
            submissions,
            sequence: AtomicU64::new(1),
        }
    }

    /// Record a pending submission awaiting review.
    pub fn register(
        &self,
        teacher_id: TeacherId,
        title: &str,
    ) -> Result<TeacherSubmission, ReviewError> {
        let title = validation::required_text(Some(title), "title", Some(MAX_TITLE_LENGTH))?;
        let submission = TeacherSubmission {
            id: SubmissionId(self.sequence.fetch_add(1, Ordering::Relaxed)),
            teacher_id,
            title,
            status: SubmissionStatus::Pending,
            rating: None,
            feedback: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Utc::now(),
        };
        Ok(self.submissions.insert(submission)?)
    }

    /// Rate a submission 1 to 5 with optional feedback and mark it reviewed.
    ///
    /// A second review overwrites the first.
    pub fn review(
        &self,
        actor: Actor,
        id: SubmissionId,
        request: ReviewRequest,
    ) -> Result<TeacherSubmission, ReviewError> {
        let mut submission = self
            .submissions
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        let rating = validation::rating(request.rating, "rating")?;
        let feedback = validation::optional_text(
            request.feedback.as_deref(),
            "feedback",
            Some(MAX_FEEDBACK_LENGTH),
        )?;

        submission.status = SubmissionStatus::Reviewed;
        submission.rating = Some(rating);
        submission.feedback = feedback;
        submission.reviewed_by = Some(actor.id);
        submission.reviewed_at = Some(Utc::now());

        self.submissions.update(submission.clone())?;
        info!(
            submission_id = %submission.id,
            teacher_id = %submission.teacher_id,
            rating,
            reviewer = %actor.id,
            "reviewed teacher submission"
        );
        Ok(submission)
    }

    pub fn get(&self, id: SubmissionId) -> Result<TeacherSubmission, ReviewError> {
        let submission = self
            .submissions
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(submission)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
