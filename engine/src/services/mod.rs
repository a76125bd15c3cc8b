// Services exposed by the engine
pub mod dashboard_service;

pub use dashboard_service::{build_dashboard, prepare_dashboard};
