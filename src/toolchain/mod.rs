// Toolchain environment gate
//
// The nerfstudio executables only resolve inside the right conda
// environment. The check runs once, before any invocation; library code
// reports a configuration error instead of terminating the process.

use thiserror::Error;

/// Training executable name.
pub const TRAIN_BIN: &str = "ns-train";

/// Export executable name.
pub const EXPORT_BIN: &str = "ns-export";

/// Environment variable conda sets to the active environment name.
pub const ENV_VAR: &str = "CONDA_DEFAULT_ENV";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolchainError {
    #[error("expected conda environment '{expected}', active environment '{active}'")]
    EnvironmentMismatch { expected: String, active: String },
}

/// Name of the currently active conda environment, if any.
pub fn active_environment() -> Option<String> {
    std::env::var(ENV_VAR).ok().filter(|value| !value.is_empty())
}

/// Check the active environment name against the expected one.
pub fn verify_environment(expected: &str, active: Option<&str>) -> Result<(), ToolchainError> {
    match active {
        Some(env) if env == expected => Ok(()),
        other => Err(ToolchainError::EnvironmentMismatch {
            expected: expected.to_string(),
            active: other.unwrap_or("").to_string(),
        }),
    }
}

/// Render a bool the way the nerfstudio CLI parses it.
pub fn bool_flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
