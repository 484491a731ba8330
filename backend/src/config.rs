//! # Report Configuration
//!
//! `ReportConfig` is read from a YAML file:
//!
//! ```yaml
//! window_size: 12
//! include_next_month: true
//! week_starts_on: sunday
//! currency_symbol: "₩"
//! ```
//!
//! Every key is optional. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use shared::ReportConfig;
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "ITSFRIDAY_REPORT_CONFIG";

pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
}

/// Load the config at `path`, or defaults when no path is given or the file
/// does not exist
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    let Some(path) = path else {
        info!("No report config path set, using defaults");
        return Ok(ReportConfig::default());
    };

    if !path.exists() {
        warn!("Report config {} not found, using defaults", path.display());
        return Ok(ReportConfig::default());
    }

    let yaml_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report config {}", path.display()))?;
    let config = parse_config(&yaml_content)
        .with_context(|| format!("Invalid report config {}", path.display()))?;

    info!("Loaded report config from {}: {:?}", path.display(), config);
    Ok(config)
}

pub fn parse_config(yaml_content: &str) -> Result<ReportConfig> {
    let config: ReportConfig = if yaml_content.trim().is_empty() {
        ReportConfig::default()
    } else {
        serde_yaml::from_str(yaml_content)?
    };

    if config.window_size == 0 {
        bail!("window_size must be at least 1");
    }
    Ok(config)
}
