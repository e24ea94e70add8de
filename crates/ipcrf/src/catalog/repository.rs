use crate::domain::{KraId, ObjectiveId};
use crate::repository::RepositoryError;

use super::domain::{Competency, Kra, Objective};

/// Storage abstraction for the evaluation criteria.
pub trait CatalogRepository: Send + Sync {
    fn insert_kra(&self, kra: Kra) -> Result<Kra, RepositoryError>;
    fn update_kra(&self, kra: Kra) -> Result<(), RepositoryError>;
    fn fetch_kra(&self, id: KraId) -> Result<Option<Kra>, RepositoryError>;
    fn kras(&self) -> Result<Vec<Kra>, RepositoryError>;

    fn insert_objective(&self, objective: Objective) -> Result<Objective, RepositoryError>;
    fn update_objective(&self, objective: Objective) -> Result<(), RepositoryError>;
    fn fetch_objective(&self, id: ObjectiveId) -> Result<Option<Objective>, RepositoryError>;
    fn objectives(&self) -> Result<Vec<Objective>, RepositoryError>;
    /// Removes the objective together with any competency attached to it.
    fn delete_objective(&self, id: ObjectiveId) -> Result<(), RepositoryError>;

    fn insert_competency(&self, competency: Competency) -> Result<Competency, RepositoryError>;
    fn competencies(&self) -> Result<Vec<Competency>, RepositoryError>;
}
