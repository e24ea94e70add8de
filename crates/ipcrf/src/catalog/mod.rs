//! Evaluation criteria: Key Result Areas, their weighted objectives, and competency metadata.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Competency, Kra, KraInput, KraRatingEntry, KraTree, NewObjectiveInput, Objective,
    ObjectiveInput, ObjectiveNode, ObjectiveRatingEntry,
};
pub use repository::CatalogRepository;
pub use router::catalog_router;
pub use service::{CatalogError, CatalogService};
