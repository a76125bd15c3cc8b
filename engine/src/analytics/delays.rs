// Distribution of the `Atraso` column for the box plot
use shared::models::{DelaySummary, PaymentTable};

pub fn delay_values(table: &PaymentTable) -> Vec<f64> {
    table.iter().map(|record| record.delay).collect()
}

// Linear interpolation between closest ranks; `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Five-number summary plus mean. `None` for an empty column.
pub fn summarize_delays(values: &[f64]) -> Option<DelaySummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    Some(DelaySummary {
        count,
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[count - 1],
        mean: sorted.iter().sum::<f64>() / count as f64,
    })
}
