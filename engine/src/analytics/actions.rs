// Proportional breakdown of the actions file for the donut chart
use super::grouping::share;
use shared::models::{ActionRow, ActionShare};

/// Each action's share of the summed `Valor`. Rows repeating a label are
/// merged into one slice, kept at the position the label first appeared.
pub fn compute_action_shares(rows: &[ActionRow]) -> Vec<ActionShare> {
    let mut merged: Vec<(&str, f64)> = Vec::new();
    for row in rows {
        match merged.iter_mut().find(|(action, _)| *action == row.action) {
            Some((_, value)) => *value += row.value,
            None => merged.push((row.action.as_str(), row.value)),
        }
    }

    let total: f64 = merged.iter().map(|(_, value)| value).sum();
    merged
        .into_iter()
        .map(|(action, value)| ActionShare {
            action: action.to_string(),
            value,
            percentage: share(value, total),
        })
        .collect()
}
