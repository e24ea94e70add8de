use serde::{Deserialize, Serialize};

use crate::domain::{CompetencyId, KraId, ObjectiveId};

/// Top-level evaluation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kra {
    pub id: KraId,
    pub name: String,
    pub description: Option<String>,
    pub order: i32,
}

/// Weighted criterion inside a KRA. `weight` is the most it can add to the KRA score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    pub kra_id: KraId,
    pub code: String,
    pub description: String,
    pub weight: f64,
    pub order: i32,
}

/// Descriptive metadata attached to an objective. Never read by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competency {
    pub id: CompetencyId,
    pub objective_id: ObjectiveId,
    #[serde(rename = "type")]
    pub competency_type: String,
    pub weight: f64,
}

/// Payload for creating or updating a KRA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KraInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
}

/// Payload for creating an objective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewObjectiveInput {
    #[serde(default)]
    pub kra_id: Option<KraId>,
    #[serde(flatten)]
    pub fields: ObjectiveInput,
    #[serde(default)]
    pub competency_type: Option<String>,
}

/// Editable objective fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveInput {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub order: Option<i32>,
}

/// KRA with its ordered objectives, as listed to administrators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KraTree {
    #[serde(flatten)]
    pub kra: Kra,
    pub objectives: Vec<ObjectiveNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveNode {
    #[serde(flatten)]
    pub objective: Objective,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competency: Option<Competency>,
}

/// Evaluator input for one KRA: the objectives rated and their 1-5 ratings.
///
/// Client-side scores and averages may ride along in the payload; they are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KraRatingEntry {
    pub kra_id: KraId,
    #[serde(default)]
    pub objectives: Vec<ObjectiveRatingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveRatingEntry {
    pub objective_id: ObjectiveId,
    #[serde(default)]
    pub rating: Option<f64>,
}
