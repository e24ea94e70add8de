use serde::Serialize;

use crate::domain::{KraId, ObjectiveId};

use super::domain::{AggregatedRating, KraBreakdown};

/// Display-ready rendering of an aggregated rating with every number fixed to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummaryView {
    pub numerical_rating: String,
    pub total_score: String,
    pub objective_count: usize,
    pub kras: Vec<KraSummaryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KraSummaryView {
    pub kra_id: KraId,
    pub kra_name: String,
    pub average_rating: String,
    pub score: String,
    pub objectives: Vec<ObjectiveSummaryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveSummaryView {
    pub objective_id: ObjectiveId,
    pub code: String,
    pub description: String,
    pub rating: u8,
    pub score: String,
}

impl RatingSummaryView {
    /// Render a rating, falling back to zeroed figures when there is nothing to show yet.
    pub fn from_aggregate(rating: Option<&AggregatedRating>) -> Self {
        let Some(rating) = rating else {
            return Self::empty();
        };

        Self {
            numerical_rating: fixed(rating.numerical_rating),
            total_score: fixed(rating.total_score),
            objective_count: rating.objective_count(),
            kras: rating.kra_details.iter().map(KraSummaryView::from).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            numerical_rating: fixed(0.0),
            total_score: fixed(0.0),
            objective_count: 0,
            kras: Vec::new(),
        }
    }
}

impl From<&KraBreakdown> for KraSummaryView {
    fn from(kra: &KraBreakdown) -> Self {
        Self {
            kra_id: kra.kra_id,
            kra_name: kra.kra_name.clone(),
            average_rating: fixed(kra.average_rating),
            score: fixed(kra.score),
            objectives: kra
                .objectives
                .iter()
                .map(|objective| ObjectiveSummaryView {
                    objective_id: objective.objective_id,
                    code: objective.objective_code.clone(),
                    description: objective.objective_description.clone(),
                    rating: objective.rating,
                    score: fixed(objective.score),
                })
                .collect(),
        }
    }
}

fn fixed(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "0.00".to_string()
    }
}
