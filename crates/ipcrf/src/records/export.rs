use serde::Serialize;

use super::domain::IpcrfRating;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finish CSV export: {0}")]
    Flush(String),
}

#[derive(Serialize)]
struct ExportRow<'a> {
    id: u64,
    teacher_id: u64,
    rating_period: &'a str,
    status: &'static str,
    total_score: String,
    numerical_rating: String,
}

/// Render rating records as CSV, one row per record, scores fixed to two decimals.
pub fn ratings_to_csv(records: &[IpcrfRating]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(ExportRow {
            id: record.id.0,
            teacher_id: record.teacher_id.0,
            rating_period: &record.rating_period,
            status: record.status.label(),
            total_score: format!("{:.2}", record.total_score),
            numerical_rating: format!("{:.2}", record.numerical_rating),
        })?;
    }

    if records.is_empty() {
        writer.write_record([
            "id",
            "teacher_id",
            "rating_period",
            "status",
            "total_score",
            "numerical_rating",
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Flush(err.to_string()))
}
