//! IPCRF (Individual Performance Commitment and Review Form) portal core.
//!
//! The crate is organised the same way for every area: plain domain types, a repository trait
//! for storage, a service that owns the business rules, and an axum router exposing the service.
//! The weighted rating aggregator in [`rating`] is the one piece of arithmetic shared by the
//! authoritative write path and the interactive preview.

pub mod access;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod rating;
pub mod records;
pub mod repository;
pub mod reviews;
pub mod telemetry;
pub mod validation;

pub use rating::{aggregate, AggregatedRating, RatingSubmission};
pub use validation::{Constraint, ValidationError};
