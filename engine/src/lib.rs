// Engine library root
// Loads the recovery files, normalises Brazilian-formatted fields and computes
// the aggregates the dashboard renders.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use error::EngineError;
