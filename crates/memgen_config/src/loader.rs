//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{ProjectConfig, RamInstance};
use memgen_ram::RamConfig;
use std::collections::BTreeSet;
use std::path::Path;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "memgen.toml";

/// Loads and validates a `memgen.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a `memgen.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates required fields, instance names, widths and connection keys.
///
/// Feasibility (bus topology, trigger, clear pin...) is not checked here;
/// unsupported RAMs are valid configuration and are reported at generation.
/// Their connection keys are not checked either, since they are never bound.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.output_dir.is_empty() {
        return Err(ConfigError::MissingField("project.output_dir".to_string()));
    }

    let mut seen = BTreeSet::new();
    for ram in &config.ram {
        if !is_identifier(&ram.name) {
            return Err(ConfigError::ValidationError(format!(
                "RAM name '{}' is not a valid identifier",
                ram.name
            )));
        }
        if !seen.insert(ram.name.to_ascii_lowercase()) {
            return Err(ConfigError::ValidationError(format!(
                "RAM name '{}' is used more than once",
                ram.name
            )));
        }
        validate_widths(ram)?;
        ram.connectivity(config.project.global_clock)?;
    }
    Ok(())
}

fn validate_widths(ram: &RamInstance) -> Result<(), ConfigError> {
    if !(1..=RamConfig::MAX_DATA_WIDTH).contains(&ram.data_width) {
        return Err(ConfigError::ValidationError(format!(
            "RAM '{}': data_width must be between 1 and {}, got {}",
            ram.name,
            RamConfig::MAX_DATA_WIDTH,
            ram.data_width
        )));
    }
    if !(1..=RamConfig::MAX_ADDRESS_WIDTH).contains(&ram.address_width) {
        return Err(ConfigError::ValidationError(format!(
            "RAM '{}': address_width must be between 1 and {}, got {}",
            ram.name,
            RamConfig::MAX_ADDRESS_WIDTH,
            ram.address_width
        )));
    }
    Ok(())
}

/// A letter followed by letters, digits and single underscores, not ending
/// in an underscore. Names are used as HDL labels and file names.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.ends_with('_')
        && !name.contains("__")
}
