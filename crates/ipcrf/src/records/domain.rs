use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::KraRatingEntry;
use crate::domain::{RatingId, TeacherId, UserId};
use crate::rating::KraBreakdown;

/// Review workflow status. Not produced by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingStatus {
    Draft,
    Submitted,
    Approved,
}

impl RatingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RatingStatus::Draft => "draft",
            RatingStatus::Submitted => "submitted",
            RatingStatus::Approved => "approved",
        }
    }
}

/// Stored IPCRF rating for one teacher and rating period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcrfRating {
    pub id: RatingId,
    pub teacher_id: TeacherId,
    pub rating_period: String,
    pub kra_details: Vec<KraBreakdown>,
    pub total_score: f64,
    pub numerical_rating: f64,
    pub remarks: Option<String>,
    pub status: RatingStatus,
    pub created_by: UserId,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IpcrfRating {
    pub fn summary_row(&self) -> RatingSummaryRow {
        RatingSummaryRow {
            id: self.id,
            rating_period: self.rating_period.clone(),
            numerical_rating: self.numerical_rating,
            total_score: self.total_score,
            status: self.status,
        }
    }
}

/// Compact listing entry used by the overview and the export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummaryRow {
    pub id: RatingId,
    pub rating_period: String,
    pub numerical_rating: f64,
    pub total_score: f64,
    pub status: RatingStatus,
}

/// Request body for creating a rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateRatingRequest {
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub rating_period: Option<String>,
    #[serde(default)]
    pub kra_details: Option<Vec<KraRatingEntry>>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Request body for updating a rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRatingRequest {
    #[serde(default)]
    pub kra_details: Option<Vec<KraRatingEntry>>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub status: Option<RatingStatus>,
}
