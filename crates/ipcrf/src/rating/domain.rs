use serde::{Deserialize, Serialize};

use crate::domain::{KraId, ObjectiveId};

/// Ratings for every KRA in one review, with objective weights captured by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSubmission {
    #[serde(default)]
    pub kras: Vec<KraRatingInput>,
}

impl RatingSubmission {
    pub fn objective_count(&self) -> usize {
        self.kras.iter().map(|kra| kra.objectives.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KraRatingInput {
    pub kra_id: KraId,
    #[serde(default)]
    pub kra_name: String,
    #[serde(default)]
    pub objectives: Vec<ObjectiveRatingInput>,
}

/// One evaluator rating. `rating` and `weight` are optional floats so a missing or fractional
/// value surfaces as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveRatingInput {
    pub objective_id: ObjectiveId,
    #[serde(default)]
    pub objective_code: String,
    #[serde(default)]
    pub objective_description: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Scored objective as persisted inside `kra_details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveScore {
    pub objective_id: ObjectiveId,
    pub objective_code: String,
    pub objective_description: String,
    pub rating: u8,
    pub score: f64,
}

/// Per-KRA breakdown; `score` and `average_rating` are left unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KraBreakdown {
    pub kra_id: KraId,
    pub kra_name: String,
    pub objectives: Vec<ObjectiveScore>,
    pub average_rating: f64,
    pub score: f64,
}

/// Aggregator output. Totals are rounded to two decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRating {
    pub kra_details: Vec<KraBreakdown>,
    pub total_score: f64,
    pub numerical_rating: f64,
}

impl AggregatedRating {
    pub fn objective_count(&self) -> usize {
        self.kra_details.iter().map(|kra| kra.objectives.len()).sum()
    }

    /// Empty-input conditions worth logging. None of them are errors.
    pub fn warnings(&self) -> Vec<EmptyInputWarning> {
        if self.kra_details.is_empty() {
            return vec![EmptyInputWarning::NoKras];
        }

        self.kra_details
            .iter()
            .filter(|kra| kra.objectives.is_empty())
            .map(|kra| EmptyInputWarning::KraWithoutObjectives { kra_id: kra.kra_id })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyInputWarning {
    NoKras,
    KraWithoutObjectives { kra_id: KraId },
}

impl EmptyInputWarning {
    pub fn summary(&self) -> String {
        match self {
            EmptyInputWarning::NoKras => "rating contains no KRAs; totals default to zero".into(),
            EmptyInputWarning::KraWithoutObjectives { kra_id } => {
                format!("KRA {kra_id} has no objectives; its score and average default to zero")
            }
        }
    }
}
