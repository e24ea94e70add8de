use crate::validation::MAX_RATING;

/// `rating * weight / 5`; multiplication happens first so results match the stored history.
pub(crate) fn objective_score(rating: u8, weight: f64) -> f64 {
    (f64::from(rating) * weight) / MAX_RATING
}

/// Mean of `count` ratings summing to `sum`, with an empty set defined as zero.
pub(crate) fn mean_rating(sum: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

/// Two-decimal rounding, half away from zero on the decimal value.
///
/// The scaled value is first cut to 15 significant digits so that a tie such as
/// `1.005` (stored as `1.00499999...`) rounds up instead of down.
pub(crate) fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let settled = format!("{scaled:.14e}").parse::<f64>().unwrap_or(scaled);
    settled.round() / 100.0
}
