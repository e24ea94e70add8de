//! Field-level validation shared by the aggregator and the request boundaries.

use std::fmt;

use serde::Serialize;

/// The rule a rejected field failed.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    #[error("is required")]
    Required,
    #[error("must be an integer between 1 and 5 (found {found})")]
    RatingRange { found: f64 },
    #[error("must be a number between 0 and 100 (found {found})")]
    WeightRange { found: f64 },
    #[error("must not exceed {max} characters")]
    MaxLength { max: usize },
    #[error("must contain at least one entry")]
    NonEmpty,
    #[error("does not reference a known record")]
    UnknownReference,
    #[error("must be one of: {}", allowed.join(", "))]
    OneOf { allowed: &'static [&'static str] },
}

/// Contract violation naming the offending field and the rule it broke.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} {constraint}")]
pub struct ValidationError {
    pub field: String,
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            field: field.into(),
            constraint,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, Constraint::Required)
    }
}

/// Dotted/indexed path into a nested `kra_details` payload.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldPath {
    kra: usize,
    objective: Option<usize>,
}

impl FieldPath {
    pub(crate) fn kra(kra: usize) -> Self {
        Self {
            kra,
            objective: None,
        }
    }

    pub(crate) fn objective(kra: usize, objective: usize) -> Self {
        Self {
            kra,
            objective: Some(objective),
        }
    }

    pub(crate) fn field(self, name: &str) -> String {
        format!("{self}.{name}")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kra_details[{}]", self.kra)?;
        if let Some(objective) = self.objective {
            write!(f, ".objectives[{objective}]")?;
        }
        Ok(())
    }
}

pub(crate) const MIN_RATING: f64 = 1.0;
pub(crate) const MAX_RATING: f64 = 5.0;
pub(crate) const MAX_WEIGHT: f64 = 100.0;

/// Whole-number rating on the 1..=5 scale. Fractional and non-finite values are
/// range errors rather than parse failures so the caller gets the field path.
pub(crate) fn rating(value: Option<f64>, field: impl Into<String>) -> Result<u8, ValidationError> {
    let field = field.into();
    let found = value.ok_or_else(|| ValidationError::required(field.clone()))?;
    if !found.is_finite() || found.fract() != 0.0 || !(MIN_RATING..=MAX_RATING).contains(&found) {
        return Err(ValidationError::new(field, Constraint::RatingRange { found }));
    }
    // range-checked above
    Ok(found as u8)
}

pub(crate) fn weight(value: Option<f64>, field: impl Into<String>) -> Result<f64, ValidationError> {
    let field = field.into();
    let found = value.ok_or_else(|| ValidationError::required(field.clone()))?;
    if !found.is_finite() || !(0.0..=MAX_WEIGHT).contains(&found) {
        return Err(ValidationError::new(field, Constraint::WeightRange { found }));
    }
    Ok(found)
}

/// Trimmed, non-blank text no longer than `max` characters.
pub(crate) fn required_text(
    value: Option<&str>,
    field: &str,
    max: Option<usize>,
) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }
    optional_text(Some(trimmed), field, max).map(|text| text.unwrap_or_default())
}

/// Blank input collapses to `None`; anything longer than `max` characters is rejected.
pub(crate) fn optional_text(
    value: Option<&str>,
    field: &str,
    max: Option<usize>,
) -> Result<Option<String>, ValidationError> {
    let Some(text) = value.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    if let Some(max) = max {
        if text.chars().count() > max {
            return Err(ValidationError::new(field, Constraint::MaxLength { max }));
        }
    }
    Ok(Some(text.to_string()))
}
