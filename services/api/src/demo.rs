use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use ipcrf::access::{Actor, Role};
use ipcrf::catalog::{CatalogService, KraRatingEntry, ObjectiveRatingEntry};
use ipcrf::domain::{TeacherId, UserId};
use ipcrf::error::AppError;
use ipcrf::rating::{RatingDraft, RatingSummaryView};
use ipcrf::records::{CreateRatingRequest, RatingService, RatingStatus, UpdateRatingRequest};
use ipcrf::{aggregate, AggregatedRating, RatingSubmission};

use crate::infra::{
    seed_sample_teachers, seed_standard_catalog, InMemoryCatalogRepository,
    InMemoryRatingRepository, InMemoryTeacherDirectory,
};

#[derive(Args, Debug)]
pub(crate) struct AggregateArgs {
    /// JSON file holding a rating submission (`{"kras": [...]}`)
    pub(crate) file: PathBuf,
    /// Print the full aggregate as JSON instead of the summary table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Rating period recorded on the demo rating
    #[arg(long, default_value = "2024-2025")]
    pub(crate) period: String,
    /// Ratings applied in catalog order; remaining objectives keep the default of 3
    #[arg(long, value_delimiter = ',')]
    pub(crate) ratings: Vec<f64>,
    /// Leave the stored rating as a draft instead of approving it
    #[arg(long)]
    pub(crate) skip_approval: bool,
}

pub(crate) fn run_aggregate(args: AggregateArgs) -> Result<(), AppError> {
    let aggregated = aggregate_file(&args.file)?;

    for warning in aggregated.warnings() {
        eprintln!("warning: {}", warning.summary());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&aggregated)?);
    } else {
        render_summary(&aggregated);
    }
    Ok(())
}

fn aggregate_file(path: &Path) -> Result<AggregatedRating, AppError> {
    let raw = fs::read_to_string(path)?;
    aggregate_json(&raw)
}

/// Parse a submission document and aggregate it.
fn aggregate_json(raw: &str) -> Result<AggregatedRating, AppError> {
    let submission: RatingSubmission = serde_json::from_str(raw)?;
    Ok(aggregate(&submission)?)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        period,
        ratings: requested,
        skip_approval,
    } = args;

    let catalog = Arc::new(CatalogService::new(Arc::new(
        InMemoryCatalogRepository::default(),
    )));
    if let Err(err) = seed_standard_catalog(&catalog) {
        println!("Catalog unavailable: {err}");
        return Ok(());
    }
    let teachers = InMemoryTeacherDirectory::default();
    seed_sample_teachers(&teachers);
    let service = RatingService::new(
        Arc::new(InMemoryRatingRepository::default()),
        catalog.clone(),
        Arc::new(teachers),
    );

    let template = match catalog.rating_template() {
        Ok(template) => template,
        Err(err) => {
            println!("Catalog unavailable: {err}");
            return Ok(());
        }
    };
    let mut draft = RatingDraft::from_template(template)?;

    println!("IPCRF rating demo ({period})");
    println!(
        "- Draft opened with every objective at {}: total {:.2}, numerical {:.2}",
        RatingDraft::DEFAULT_RATING,
        draft.preview().total_score,
        draft.preview().numerical_rating
    );

    let objective_ids: Vec<_> = draft
        .submission()
        .kras
        .iter()
        .flat_map(|kra| kra.objectives.iter().map(|objective| objective.objective_id))
        .collect();
    for (objective_id, rating) in objective_ids.into_iter().zip(requested) {
        match draft.set_rating(objective_id, rating) {
            Ok(preview) => println!(
                "  objective {objective_id} -> {rating}: total {:.2}, numerical {:.2}",
                preview.total_score, preview.numerical_rating
            ),
            Err(err) => println!("  objective {objective_id} -> {rating} rejected: {err}"),
        }
    }

    let evaluator = Actor {
        id: UserId(1),
        role: Role::SuperAdmin,
    };
    let entries = rating_entries(draft.submission());
    let stored = match service.store(
        evaluator,
        CreateRatingRequest {
            teacher_id: Some(TeacherId(1)),
            rating_period: Some(period),
            kra_details: Some(entries.clone()),
            remarks: Some("Demo rating".to_string()),
        },
    ) {
        Ok(record) => record,
        Err(err) => {
            println!("  Rating rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Stored rating {} for teacher {} as {}",
        stored.id,
        stored.teacher_id,
        stored.status.label()
    );

    let record = if skip_approval {
        stored
    } else {
        match service.update(
            evaluator,
            stored.id,
            UpdateRatingRequest {
                kra_details: Some(entries),
                remarks: stored.remarks.clone(),
                status: Some(RatingStatus::Approved),
            },
        ) {
            Ok(record) => {
                println!("- Approved by user {}", evaluator.id);
                record
            }
            Err(err) => {
                println!("  Approval failed: {err}");
                stored
            }
        }
    };

    render_summary(&AggregatedRating {
        kra_details: record.kra_details,
        total_score: record.total_score,
        numerical_rating: record.numerical_rating,
    });
    Ok(())
}

fn rating_entries(submission: &RatingSubmission) -> Vec<KraRatingEntry> {
    submission
        .kras
        .iter()
        .map(|kra| KraRatingEntry {
            kra_id: kra.kra_id,
            objectives: kra
                .objectives
                .iter()
                .map(|objective| ObjectiveRatingEntry {
                    objective_id: objective.objective_id,
                    rating: objective.rating,
                })
                .collect(),
        })
        .collect()
}

fn render_summary(aggregated: &AggregatedRating) {
    let view = RatingSummaryView::from_aggregate(Some(aggregated));
    println!(
        "\nNumerical rating {} | total score {} | {} objectives",
        view.numerical_rating, view.total_score, view.objective_count
    );
    for kra in &view.kras {
        println!(
            "  {} (average {}, score {})",
            kra.kra_name, kra.average_rating, kra.score
        );
        for objective in &kra.objectives {
            println!(
                "    - {} rated {} -> {}",
                objective.code, objective.rating, objective.score
            );
        }
    }
}
