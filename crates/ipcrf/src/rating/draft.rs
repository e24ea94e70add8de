use crate::domain::ObjectiveId;
use crate::validation::{self, Constraint, ValidationError};

use super::domain::{AggregatedRating, RatingSubmission};
use super::aggregate;

/// Editable rating sheet that keeps a live preview in step with every change.
#[derive(Debug, Clone)]
pub struct RatingDraft {
    submission: RatingSubmission,
    preview: AggregatedRating,
}

impl RatingDraft {
    /// Rating assigned to objectives that have not been touched yet.
    pub const DEFAULT_RATING: f64 = 3.0;

    /// Seed a draft from a catalog template; unrated objectives start at [`Self::DEFAULT_RATING`].
    pub fn from_template(mut template: RatingSubmission) -> Result<Self, ValidationError> {
        for objective in template
            .kras
            .iter_mut()
            .flat_map(|kra| kra.objectives.iter_mut())
        {
            objective.rating.get_or_insert(Self::DEFAULT_RATING);
        }

        let preview = aggregate(&template)?;
        Ok(Self {
            submission: template,
            preview,
        })
    }

    /// Change a single objective rating and return the refreshed preview.
    ///
    /// A rejected edit leaves the draft untouched.
    pub fn set_rating(
        &mut self,
        objective_id: ObjectiveId,
        rating: f64,
    ) -> Result<&AggregatedRating, ValidationError> {
        let rating = validation::rating(Some(rating), "rating")?;
        let (kra_index, objective_index) = self
            .locate(objective_id)
            .ok_or_else(|| ValidationError::new("objective_id", Constraint::UnknownReference))?;

        let slot = &mut self.submission.kras[kra_index].objectives[objective_index].rating;
        let previous = slot.replace(f64::from(rating));
        match aggregate(&self.submission) {
            Ok(preview) => {
                self.preview = preview;
                Ok(&self.preview)
            }
            Err(err) => {
                self.submission.kras[kra_index].objectives[objective_index].rating = previous;
                Err(err)
            }
        }
    }

    fn locate(&self, objective_id: ObjectiveId) -> Option<(usize, usize)> {
        self.submission
            .kras
            .iter()
            .enumerate()
            .find_map(|(kra_index, kra)| {
                kra.objectives
                    .iter()
                    .position(|objective| objective.objective_id == objective_id)
                    .map(|objective_index| (kra_index, objective_index))
            })
    }

    pub fn preview(&self) -> &AggregatedRating {
        &self.preview
    }

    pub fn submission(&self) -> &RatingSubmission {
        &self.submission
    }

    pub fn into_submission(self) -> RatingSubmission {
        self.submission
    }
}
