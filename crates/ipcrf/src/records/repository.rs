use crate::domain::{RatingId, Teacher, TeacherId};
use crate::repository::RepositoryError;

use super::domain::IpcrfRating;

/// Storage abstraction for rating records.
pub trait RatingRepository: Send + Sync {
    fn insert(&self, record: IpcrfRating) -> Result<IpcrfRating, RepositoryError>;
    /// Overwrites the stored record; last write wins.
    fn update(&self, record: IpcrfRating) -> Result<(), RepositoryError>;
    fn fetch(&self, id: RatingId) -> Result<Option<IpcrfRating>, RepositoryError>;
    fn for_teacher(&self, teacher_id: TeacherId) -> Result<Vec<IpcrfRating>, RepositoryError>;
    fn all(&self) -> Result<Vec<IpcrfRating>, RepositoryError>;
}

/// Read-only lookup of teachers maintained by the wider portal.
pub trait TeacherDirectory: Send + Sync {
    fn fetch(&self, id: TeacherId) -> Result<Option<Teacher>, RepositoryError>;
    fn all(&self) -> Result<Vec<Teacher>, RepositoryError>;
}
