pub mod types;

pub use types::{Config, GenerationConfig};

use crate::common::file_utils::read_file_safe;
use crate::error::{ConfigError, Result};
use std::path::Path;

const MAX_CONFIG_SIZE: usize = 64 * 1024;

/// Load configuration from file or use defaults.
///
/// Missing keys take their default values; unknown keys are ignored.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    if !path.is_file() {
        return Err(ConfigError::InvalidFile(format!("{} is not a file", path.display())).into());
    }

    let content = read_file_safe(path, MAX_CONFIG_SIZE)
        .map_err(|e| ConfigError::InvalidFile(format!("{}: {}", path.display(), e)))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| ConfigError::ParsingFailed(format!("{}: {}", path.display(), e)))?;

    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}
