//! Weighted rating aggregation.
//!
//! [`aggregate`] is the single definition of IPCRF scoring. The rating service calls it when a
//! record is stored or updated, and [`RatingDraft`] calls it on every edit to refresh the live
//! preview, so both paths always agree.

mod domain;
mod draft;
mod rules;
pub mod views;

pub use domain::{
    AggregatedRating, EmptyInputWarning, KraBreakdown, KraRatingInput, ObjectiveRatingInput,
    ObjectiveScore, RatingSubmission,
};
pub use draft::RatingDraft;
pub use views::RatingSummaryView;

use crate::validation::{self, FieldPath, ValidationError};

/// Score every objective, then fold the scores into per-KRA and overall totals.
///
/// * objective score = `rating * weight / 5`
/// * KRA score = sum of its objective scores; KRA average = mean of its raw ratings
/// * `total_score` = sum of KRA scores
/// * `numerical_rating` = sum of every raw rating / number of objectives across all KRAs
///
/// The numerical rating is a count-weighted mean, so a KRA with more objectives pulls it harder
/// than a KRA with fewer. Only the two overall totals are rounded. Empty KRAs and empty
/// submissions produce zeros.
pub fn aggregate(submission: &RatingSubmission) -> Result<AggregatedRating, ValidationError> {
    let mut kra_details = Vec::with_capacity(submission.kras.len());
    let mut total_score = 0.0;
    let mut rating_sum: u64 = 0;
    let mut objective_count: usize = 0;

    for (kra_index, kra) in submission.kras.iter().enumerate() {
        let mut objectives = Vec::with_capacity(kra.objectives.len());
        let mut kra_score = 0.0;
        let mut kra_rating_sum: u64 = 0;

        for (objective_index, objective) in kra.objectives.iter().enumerate() {
            let path = FieldPath::objective(kra_index, objective_index);
            let rating = validation::rating(objective.rating, path.field("rating"))?;
            let weight = validation::weight(objective.weight, path.field("weight"))?;
            let score = rules::objective_score(rating, weight);

            kra_score += score;
            kra_rating_sum += u64::from(rating);
            objectives.push(ObjectiveScore {
                objective_id: objective.objective_id,
                objective_code: objective.objective_code.clone(),
                objective_description: objective.objective_description.clone(),
                rating,
                score,
            });
        }

        total_score += kra_score;
        rating_sum += kra_rating_sum;
        objective_count += objectives.len();

        kra_details.push(KraBreakdown {
            kra_id: kra.kra_id,
            kra_name: kra.kra_name.clone(),
            average_rating: rules::mean_rating(kra_rating_sum, objectives.len()),
            score: kra_score,
            objectives,
        });
    }

    Ok(AggregatedRating {
        kra_details,
        total_score: rules::round2(total_score),
        numerical_rating: rules::round2(rules::mean_rating(rating_sum, objective_count)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KraId, ObjectiveId};
    use crate::validation::Constraint;

    fn objective(id: u64, rating: u8, weight: f64) -> ObjectiveRatingInput {
        ObjectiveRatingInput {
            objective_id: ObjectiveId(id),
            objective_code: format!("OBJ-{id}"),
            objective_description: format!("Objective {id}"),
            rating: Some(f64::from(rating)),
            weight: Some(weight),
        }
    }

    fn kra(id: u64, objectives: Vec<ObjectiveRatingInput>) -> KraRatingInput {
        KraRatingInput {
            kra_id: KraId(id),
            kra_name: format!("KRA {id}"),
            objectives,
        }
    }

    #[test]
    fn single_kra_scores_and_averages() {
        let submission = RatingSubmission {
            kras: vec![kra(1, vec![objective(1, 5, 60.0), objective(2, 3, 40.0)])],
        };

        let result = aggregate(&submission).expect("valid submission");

        let breakdown = &result.kra_details[0];
        assert_eq!(breakdown.objectives[0].score, 60.0);
        assert_eq!(breakdown.objectives[1].score, 24.0);
        assert_eq!(breakdown.score, 84.0);
        assert_eq!(breakdown.average_rating, 4.0);
        assert_eq!(result.total_score, 84.0);
        assert_eq!(result.numerical_rating, 4.0);
    }

    #[test]
    fn numerical_rating_is_weighted_by_objective_count() {
        let submission = RatingSubmission {
            kras: vec![
                kra(1, vec![objective(1, 5, 100.0)]),
                kra(
                    2,
                    vec![
                        objective(2, 1, 10.0),
                        objective(3, 1, 10.0),
                        objective(4, 1, 10.0),
                    ],
                ),
            ],
        };

        let result = aggregate(&submission).expect("valid submission");

        assert_eq!(result.kra_details[0].score, 100.0);
        assert_eq!(result.kra_details[1].score, 6.0);
        assert_eq!(result.total_score, 106.0);
        assert_eq!(result.numerical_rating, 2.0);
        let mean_of_averages = (result.kra_details[0].average_rating
            + result.kra_details[1].average_rating)
            / 2.0;
        assert_eq!(mean_of_averages, 3.0);
    }

    #[test]
    fn empty_kra_contributes_zero() {
        let submission = RatingSubmission {
            kras: vec![kra(1, Vec::new()), kra(2, vec![objective(1, 4, 50.0)])],
        };

        let result = aggregate(&submission).expect("empty KRA is allowed");

        assert_eq!(result.kra_details[0].score, 0.0);
        assert_eq!(result.kra_details[0].average_rating, 0.0);
        assert_eq!(result.total_score, 40.0);
        assert_eq!(result.numerical_rating, 4.0);
        assert_eq!(
            result.warnings(),
            vec![EmptyInputWarning::KraWithoutObjectives { kra_id: KraId(1) }]
        );
    }

    #[test]
    fn empty_submission_yields_zero_totals() {
        let result = aggregate(&RatingSubmission::default()).expect("empty input is allowed");

        assert!(result.kra_details.is_empty());
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.numerical_rating, 0.0);
        assert!(!result.numerical_rating.is_nan());
        assert_eq!(result.warnings(), vec![EmptyInputWarning::NoKras]);
    }

    #[test]
    fn totals_are_rounded_but_kra_values_are_not() {
        let submission = RatingSubmission {
            kras: vec![kra(
                1,
                vec![
                    objective(1, 4, 33.33),
                    objective(2, 3, 33.33),
                    objective(3, 4, 33.34),
                ],
            )],
        };

        let result = aggregate(&submission).expect("valid submission");

        assert_eq!(result.numerical_rating, 3.67);
        assert_eq!(result.total_score, 73.33);
        let kra_average = result.kra_details[0].average_rating;
        assert!((kra_average - 11.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_rating_names_the_field() {
        let submission = RatingSubmission {
            kras: vec![
                kra(1, vec![objective(1, 5, 50.0)]),
                kra(2, vec![objective(2, 3, 20.0), objective(3, 7, 20.0)]),
            ],
        };

        let err = aggregate(&submission).expect_err("rating 7 is out of range");

        assert_eq!(err.field, "kra_details[1].objectives[1].rating");
        assert_eq!(err.constraint, Constraint::RatingRange { found: 7.0 });
    }

    #[test]
    fn fractional_rating_names_the_field() {
        let mut half = objective(2, 4, 50.0);
        half.rating = Some(4.5);
        let submission = RatingSubmission {
            kras: vec![kra(1, vec![objective(1, 5, 50.0), half])],
        };

        let err = aggregate(&submission).expect_err("4.5 is not a whole score");

        assert_eq!(err.field, "kra_details[0].objectives[1].rating");
        assert_eq!(err.constraint, Constraint::RatingRange { found: 4.5 });
    }

    #[test]
    fn total_score_rounds_decimal_ties_up() {
        let submission = RatingSubmission {
            kras: vec![kra(1, vec![objective(1, 5, 1.005)])],
        };

        let result = aggregate(&submission).expect("valid submission");

        assert_eq!(result.total_score, 1.01);
        assert_eq!(result.numerical_rating, 5.0);
    }

    #[test]
    fn missing_weight_is_rejected() {
        let mut input = objective(1, 3, 0.0);
        input.weight = None;
        let submission = RatingSubmission {
            kras: vec![kra(1, vec![input])],
        };

        let err = aggregate(&submission).expect_err("weight is required");

        assert_eq!(err.field, "kra_details[0].objectives[0].weight");
        assert_eq!(err.constraint, Constraint::Required);
    }

    #[test]
    fn weight_above_one_hundred_is_not_clamped() {
        let submission = RatingSubmission {
            kras: vec![kra(1, vec![objective(1, 3, 120.0)])],
        };

        let err = aggregate(&submission).expect_err("weight 120 is out of range");
        assert_eq!(err.constraint, Constraint::WeightRange { found: 120.0 });
    }

    #[test]
    fn repeated_calls_are_identical() {
        let submission = RatingSubmission {
            kras: vec![
                kra(1, vec![objective(1, 2, 17.5), objective(2, 5, 22.25)]),
                kra(2, vec![objective(3, 4, 60.25)]),
            ],
        };

        let first = aggregate(&submission).expect("valid");
        let second = aggregate(&submission).expect("valid");

        assert_eq!(first, second);
        assert_eq!(first.total_score.to_bits(), second.total_score.to_bits());
        assert_eq!(
            first.numerical_rating.to_bits(),
            second.numerical_rating.to_bits()
        );
    }
}
