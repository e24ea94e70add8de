use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{CompetencyId, KraId, ObjectiveId};
use crate::rating::{KraRatingInput, ObjectiveRatingInput, RatingSubmission};
use crate::repository::RepositoryError;
use crate::validation::{self, Constraint, FieldPath, ValidationError};

use super::domain::{
    Competency, Kra, KraInput, KraRatingEntry, KraTree, NewObjectiveInput, Objective,
    ObjectiveInput, ObjectiveNode,
};
use super::repository::CatalogRepository;

const KRA_NAME_MAX: usize = 255;
const OBJECTIVE_CODE_MAX: usize = 50;

/// Service owning KRA/objective validation and the rating template built from them.
pub struct CatalogService<R> {
    repository: Arc<R>,
    kra_sequence: AtomicU64,
    objective_sequence: AtomicU64,
    competency_sequence: AtomicU64,
}

impl<R> CatalogService<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            kra_sequence: AtomicU64::new(1),
            objective_sequence: AtomicU64::new(1),
            competency_sequence: AtomicU64::new(1),
        }
    }

    /// KRAs ordered by display order, each with ordered objectives and their competency.
    pub fn list(&self) -> Result<Vec<KraTree>, CatalogError> {
        let mut kras = self.repository.kras()?;
        kras.sort_by_key(|kra| (kra.order, kra.id));

        let mut competencies: HashMap<ObjectiveId, Competency> = self
            .repository
            .competencies()?
            .into_iter()
            .map(|competency| (competency.objective_id, competency))
            .collect();

        let mut by_kra: HashMap<KraId, Vec<Objective>> = HashMap::new();
        for objective in self.repository.objectives()? {
            by_kra.entry(objective.kra_id).or_default().push(objective);
        }

        Ok(kras
            .into_iter()
            .map(|kra| {
                let mut objectives = by_kra.remove(&kra.id).unwrap_or_default();
                objectives.sort_by_key(|objective| (objective.order, objective.id));
                let objectives = objectives
                    .into_iter()
                    .map(|objective| ObjectiveNode {
                        competency: competencies.remove(&objective.id),
                        objective,
                    })
                    .collect();
                KraTree { kra, objectives }
            })
            .collect())
    }

    pub fn create_kra(&self, input: KraInput) -> Result<Kra, CatalogError> {
        let id = KraId(self.kra_sequence.fetch_add(1, Ordering::Relaxed));
        let kra = self.repository.insert_kra(validate_kra(id, input)?)?;
        info!(kra_id = %kra.id, name = %kra.name, "created KRA");
        Ok(kra)
    }

    pub fn update_kra(&self, id: KraId, input: KraInput) -> Result<Kra, CatalogError> {
        if self.repository.fetch_kra(id)?.is_none() {
            return Err(RepositoryError::NotFound.into());
        }
        let kra = validate_kra(id, input)?;
        self.repository.update_kra(kra.clone())?;
        Ok(kra)
    }

    /// Create an objective, plus a competency carrying the same weight when a type is given.
    ///
    /// If the competency cannot be stored the objective is removed again.
    pub fn create_objective(&self, input: NewObjectiveInput) -> Result<Objective, CatalogError> {
        let kra_id = input.kra_id.ok_or_else(|| ValidationError::required("kra_id"))?;
        if self.repository.fetch_kra(kra_id)?.is_none() {
            return Err(ValidationError::new("kra_id", Constraint::UnknownReference).into());
        }
        let competency_type = validation::optional_text(
            input.competency_type.as_deref(),
            "competency_type",
            Some(KRA_NAME_MAX),
        )?;

        let id = ObjectiveId(self.objective_sequence.fetch_add(1, Ordering::Relaxed));
        let objective = self
            .repository
            .insert_objective(validate_objective(id, kra_id, input.fields)?)?;

        if let Some(competency_type) = competency_type {
            let competency = Competency {
                id: CompetencyId(self.competency_sequence.fetch_add(1, Ordering::Relaxed)),
                objective_id: objective.id,
                competency_type,
                weight: objective.weight,
            };
            if let Err(err) = self.repository.insert_competency(competency) {
                if let Err(rollback) = self.repository.delete_objective(objective.id) {
                    warn!(
                        objective_id = %objective.id,
                        error = %rollback,
                        "failed to remove objective after competency write failed"
                    );
                }
                return Err(err.into());
            }
        }

        info!(
            objective_id = %objective.id,
            kra_id = %objective.kra_id,
            weight = objective.weight,
            "created objective"
        );
        Ok(objective)
    }

    pub fn update_objective(
        &self,
        id: ObjectiveId,
        input: ObjectiveInput,
    ) -> Result<Objective, CatalogError> {
        let existing = self
            .repository
            .fetch_objective(id)?
            .ok_or(RepositoryError::NotFound)?;
        let objective = validate_objective(id, existing.kra_id, input)?;
        self.repository.update_objective(objective.clone())?;
        Ok(objective)
    }

    pub fn delete_objective(&self, id: ObjectiveId) -> Result<(), CatalogError> {
        self.repository.delete_objective(id)?;
        info!(objective_id = %id, "deleted objective");
        Ok(())
    }

    /// Every KRA and objective in display order, unrated, with weights captured by value.
    pub fn rating_template(&self) -> Result<RatingSubmission, CatalogError> {
        let kras = self
            .list()?
            .into_iter()
            .map(|tree| KraRatingInput {
                kra_id: tree.kra.id,
                kra_name: tree.kra.name,
                objectives: tree
                    .objectives
                    .into_iter()
                    .map(|node| rating_input(node.objective, None))
                    .collect(),
            })
            .collect();

        Ok(RatingSubmission { kras })
    }

    /// Resolve evaluator ratings against the catalog, snapshotting names, codes, and weights.
    ///
    /// Ratings themselves are validated by the aggregator.
    pub fn submission_from_ratings(
        &self,
        entries: &[KraRatingEntry],
    ) -> Result<RatingSubmission, CatalogError> {
        let mut kras = Vec::with_capacity(entries.len());

        for (kra_index, entry) in entries.iter().enumerate() {
            let kra = self.repository.fetch_kra(entry.kra_id)?.ok_or_else(|| {
                ValidationError::new(
                    FieldPath::kra(kra_index).field("kra_id"),
                    Constraint::UnknownReference,
                )
            })?;

            let mut objectives = Vec::with_capacity(entry.objectives.len());
            for (objective_index, rated) in entry.objectives.iter().enumerate() {
                let objective = self
                    .repository
                    .fetch_objective(rated.objective_id)?
                    .filter(|objective| objective.kra_id == kra.id)
                    .ok_or_else(|| {
                        ValidationError::new(
                            FieldPath::objective(kra_index, objective_index).field("objective_id"),
                            Constraint::UnknownReference,
                        )
                    })?;
                objectives.push(rating_input(objective, rated.rating));
            }

            kras.push(KraRatingInput {
                kra_id: kra.id,
                kra_name: kra.name,
                objectives,
            });
        }

        Ok(RatingSubmission { kras })
    }
}

fn rating_input(objective: Objective, rating: Option<f64>) -> ObjectiveRatingInput {
    ObjectiveRatingInput {
        objective_id: objective.id,
        objective_code: objective.code,
        objective_description: objective.description,
        rating,
        weight: Some(objective.weight),
    }
}

fn validate_kra(id: KraId, input: KraInput) -> Result<Kra, ValidationError> {
    Ok(Kra {
        id,
        name: validation::required_text(input.name.as_deref(), "name", Some(KRA_NAME_MAX))?,
        description: validation::optional_text(input.description.as_deref(), "description", None)?,
        order: input.order.ok_or_else(|| ValidationError::required("order"))?,
    })
}

fn validate_objective(
    id: ObjectiveId,
    kra_id: KraId,
    input: ObjectiveInput,
) -> Result<Objective, ValidationError> {
    Ok(Objective {
        id,
        kra_id,
        code: validation::required_text(input.code.as_deref(), "code", Some(OBJECTIVE_CODE_MAX))?,
        description: validation::required_text(input.description.as_deref(), "description", None)?,
        weight: validation::weight(input.weight, "weight")?,
        order: input.order.ok_or_else(|| ValidationError::required("order"))?,
    })
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
