// Configuration loader
// Reads ~/.nerfctl/config.toml when present, falling back to defaults

use anyhow::{Context, Result};
use std::fs;

use crate::export::PointcloudParams;

use super::settings::Config;

/// Load configuration from `~/.nerfctl/config.toml`, or defaults when the
/// file does not exist.
pub fn load_config() -> Result<Config> {
    let Some(home) = dirs::home_dir() else {
        return Ok(Config::default());
    };
    let config_path = home.join(".nerfctl/config.toml");
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    parse_config(&contents).with_context(|| format!("Failed to parse {}", config_path.display()))
}

fn parse_config(contents: &str) -> Result<Config> {
    #[derive(serde::Deserialize)]
    struct TomlConfig {
        #[serde(default = "default_conda_env")]
        conda_env: String,
        #[serde(default = "default_dataparser")]
        dataparser: String,
        #[serde(default = "default_steps_per_log")]
        steps_per_log: u32,
        #[serde(default)]
        max_log_size: u32,
        #[serde(default)]
        pointcloud: Option<PointcloudParams>,
    }

    fn default_conda_env() -> String {
        "nerfstudio".to_string()
    }

    fn default_dataparser() -> String {
        "nerfstudio-data".to_string()
    }

    fn default_steps_per_log() -> u32 {
        100
    }

    let parsed: TomlConfig = toml::from_str(contents).context("Invalid TOML")?;
    Ok(Config {
        conda_env: parsed.conda_env,
        dataparser: parsed.dataparser,
        steps_per_log: parsed.steps_per_log,
        max_log_size: parsed.max_log_size,
        pointcloud: parsed.pointcloud.unwrap_or_default(),
    })
}
