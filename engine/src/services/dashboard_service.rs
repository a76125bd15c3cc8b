// Builds the dashboard payload in one pass: load, validate, normalise, aggregate.
use crate::analytics;
use crate::config::settings::EngineSettings;
use crate::data::csv_parser::BrazilianCsvParser;
use crate::error::EngineError;
use shared::models::{ActionRow, DashboardData, PaymentTable};

/// Computes every aggregate the renderer needs from already-loaded inputs.
pub fn build_dashboard(table: &PaymentTable, actions: &[ActionRow]) -> DashboardData {
    let totals = analytics::compute_totals(table);
    let delays = analytics::delay_values(table);
    let delay_summary = analytics::summarize_delays(&delays);

    DashboardData {
        totals,
        daily: analytics::group_by_date(table),
        categories: analytics::group_by_category(table),
        comparison: analytics::compare_charges_commission(&totals),
        delays,
        delay_summary,
        actions: analytics::compute_action_shares(actions),
    }
}

/// Loads both input files named in `settings` and prepares the dashboard.
/// Any failure aborts the whole preparation; there is no partial result.
pub fn prepare_dashboard(settings: &EngineSettings) -> Result<DashboardData, EngineError> {
    settings.validate()?;

    tracing::info!(
        primary = %settings.primary_path.display(),
        secondary = %settings.secondary_path.display(),
        "Preparing dashboard data"
    );

    let table = BrazilianCsvParser::load_payments(&settings.primary_path, settings)?;
    let actions = BrazilianCsvParser::load_actions(&settings.secondary_path, settings)?;
    let data = build_dashboard(&table, &actions);

    tracing::info!(
        rows = data.totals.count,
        days = data.daily.len(),
        categories = data.categories.len(),
        actions = data.actions.len(),
        "Dashboard data ready"
    );
    Ok(data)
}
