// Parameter snapshot persistence
//
// One JSON record per training run, written before execution and rewritten
// at the same path afterwards with duration and return code added.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::runner::ExecutionRecord;

use super::TrainOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub timestamp: String,
    pub method: String,
    pub base_dir: PathBuf,
    pub experiment_name: String,
    pub config: Vec<String>,
    pub environment_label: String,
    pub command: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_code: Option<i32>,
}

impl ParameterSnapshot {
    pub fn new(timestamp: &str, options: &TrainOptions, command: String) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            method: options.method.clone(),
            base_dir: options.base_dir.clone(),
            experiment_name: options.experiment_name.clone(),
            config: options.overrides.clone(),
            environment_label: options.environment_label.clone(),
            command,
            duration_seconds: None,
            return_code: None,
        }
    }

    /// Attach the execution outcome. The snapshot keeps its identity; a
    /// second `write` to the same path replaces the pre-run record.
    pub fn finalize(&mut self, record: &ExecutionRecord) {
        self.duration_seconds = Some(record.duration_seconds());
        self.return_code = record.return_code();
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize parameter snapshot")?;
        fs::write(path, json).with_context(|| {
            format!("Failed to write parameter snapshot: {}", path.display())
        })?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("Failed to read parameter snapshot: {}", path.display())
        })?;
        serde_json::from_str(&contents).context("Failed to parse parameter snapshot")
    }
}
