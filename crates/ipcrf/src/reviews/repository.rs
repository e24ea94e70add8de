use crate::domain::SubmissionId;
use crate::repository::RepositoryError;

use super::domain::TeacherSubmission;

/// Storage abstraction for teacher submissions.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, submission: TeacherSubmission) -> Result<TeacherSubmission, RepositoryError>;
    fn update(&self, submission: TeacherSubmission) -> Result<(), RepositoryError>;
    fn fetch(&self, id: SubmissionId) -> Result<Option<TeacherSubmission>, RepositoryError>;
}
