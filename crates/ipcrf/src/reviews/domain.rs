use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{SubmissionId, TeacherId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Reviewed,
}

/// A document a teacher handed in for administrator review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSubmission {
    pub id: SubmissionId,
    pub teacher_id: TeacherId,
    pub title: String,
    pub status: SubmissionStatus,
    pub rating: Option<u8>,
    pub feedback: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
}
