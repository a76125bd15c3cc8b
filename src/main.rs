// Recovery dashboard entry point
use anyhow::Context;
use engine::config::settings::EngineSettings;
use engine::services::prepare_dashboard;
use std::path::Path;
use tracing::{error, info};

mod report;

const SETTINGS_FILE: &str = "dashboard.json";

fn run() -> anyhow::Result<()> {
    let settings = EngineSettings::load_or_default(Path::new(SETTINGS_FILE))
        .with_context(|| format!("Failed to load settings from '{}'", SETTINGS_FILE))?;

    let data = prepare_dashboard(&settings).context("Failed to prepare dashboard data")?;
    if settings.emit_json {
        println!("{}", report::render_json(&data).context("Failed to serialize dashboard data")?);
    } else {
        print!("{}", report::render(&data));
    }
    Ok(())
}

fn main() {
    // Logs go to stderr so the report owns stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("Starting Recovery Dashboard...");

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
