//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{SynthConfig, MAX_RANDOM_TRIALS, MAX_WIDTH};
use std::path::Path;

/// File name looked up inside a run directory.
pub const CONFIG_FILE_NAME: &str = "majsynth.toml";

/// Loads and validates a `majsynth.toml` configuration from a run directory.
///
/// Reads `<dir>/majsynth.toml`, parses it, and validates its values.
pub fn load_config(dir: &Path) -> Result<SynthConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `majsynth.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<SynthConfig, ConfigError> {
    let config: SynthConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates the width and the search bounds.
fn validate_config(config: &SynthConfig) -> Result<(), ConfigError> {
    let width = config.synth.width;
    if !(3..=MAX_WIDTH).contains(&width) || width % 2 == 0 {
        return Err(ConfigError::InvalidValue {
            key: "synth.width",
            reason: format!("must be an odd integer in 3..={MAX_WIDTH}, got {width}"),
        });
    }
    if config.search.random_trials > MAX_RANDOM_TRIALS {
        return Err(ConfigError::InvalidValue {
            key: "search.random_trials",
            reason: format!(
                "must be at most {MAX_RANDOM_TRIALS}, got {}",
                config.search.random_trials
            ),
        });
    }
    Ok(())
}
