// Aggregations over a prepared payments table
pub mod actions;
pub mod delays;
pub mod grouping;
pub mod totals;

pub use actions::compute_action_shares;
pub use delays::{delay_values, summarize_delays};
pub use grouping::{group_by_category, group_by_date};
pub use totals::{compare_charges_commission, compute_totals};
