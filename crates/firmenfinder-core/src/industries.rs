use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
pub struct IndustriesFile {
    pub industries: Vec<String>,
}

/// Load and validate the industries vocabulary from a YAML file.
///
/// An empty list is valid — the synthesizer falls back to a generic label
/// when no industry is selected.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_industries(path: &Path) -> Result<IndustriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IndustriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let industries_file: IndustriesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::IndustriesFileParse)?;

    validate_industries(&industries_file)?;

    Ok(industries_file)
}

fn validate_industries(industries_file: &IndustriesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for industry in &industries_file.industries {
        if industry.trim().is_empty() {
            return Err(ConfigError::Validation(
                "industry name must be non-empty".to_string(),
            ));
        }

        if !seen.insert(industry.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate industry: '{industry}'"
            )));
        }
    }

    Ok(())
}
