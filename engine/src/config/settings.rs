// Engine settings, loaded from an optional JSON file next to the binary's working directory
use crate::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How a plain numeric column is written in the source file.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NumberStyle {
    /// `.` is the decimal point, no thousands separator.
    #[default]
    Plain,
    /// `.` separates thousands and `,` the decimal fraction.
    Brazilian,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub primary_path: PathBuf,
    pub secondary_path: PathBuf,
    pub delimiter: String, // Single ASCII character; a JSON string is easier to write
    pub date_formats: Vec<String>,
    pub delay_style: NumberStyle,
    pub action_value_style: NumberStyle,
    pub unknown_category_label: String,
    /// Print the prepared payload as JSON instead of the text report.
    pub emit_json: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            primary_path: PathBuf::from("gborpgto.csv"),
            secondary_path: PathBuf::from("acao.csv"),
            delimiter: ",".to_string(),
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%d/%m/%Y".to_string(),
                "%Y/%m/%d".to_string(),
                "%d-%m-%Y".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%d/%m/%Y %H:%M:%S".to_string(),
            ],
            delay_style: NumberStyle::Plain,
            action_value_style: NumberStyle::Plain,
            unknown_category_label: "Não informado".to_string(),
            emit_json: false,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(json)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, EngineError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No settings file found, using defaults");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::FileAccessError {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded settings file");
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.delimiter_byte()?;
        if self.date_formats.is_empty() {
            return Err(EngineError::ConfigError("date_formats must not be empty".to_string()));
        }
        if self.unknown_category_label.trim().is_empty() {
            return Err(EngineError::ConfigError(
                "unknown_category_label must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8, EngineError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}
