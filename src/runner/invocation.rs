// Invocation and execution record types

use std::path::{Path, PathBuf};
use std::time::Duration;

/// One fully-assembled external command plus its logging target.
///
/// Immutable once constructed. `details` are extra key/value lines echoed
/// into the log header below the `Command:` line.
#[derive(Debug, Clone)]
pub struct Invocation {
    label: String,
    program: String,
    args: Vec<String>,
    details: Vec<(String, String)>,
    env_label: Option<String>,
    log_path: PathBuf,
}

impl Invocation {
    pub fn new(
        label: impl Into<String>,
        program: impl Into<String>,
        args: Vec<String>,
        log_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args,
            details: Vec::new(),
            env_label: None,
            log_path: log_path.into(),
        }
    }

    /// Add a metadata line to the log header.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((key.into(), value.into()));
        self
    }

    /// Record the toolchain environment the command is expected to run in.
    pub fn with_env_label(mut self, env_label: impl Into<String>) -> Self {
        self.env_label = Some(env_label.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn details(&self) -> &[(String, String)] {
        &self.details
    }

    pub fn env_label(&self) -> Option<&str> {
        self.env_label.as_deref()
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// The full invocation rendered as a single string.
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Outcome of running an [`Invocation`].
///
/// `return_code` is `None` when the process never produced an exit code:
/// spawn failure, log I/O failure, or death by signal.
#[derive(Debug, Clone)]
pub struct ExecutionRecord {
    return_code: Option<i32>,
    duration: Duration,
    output: String,
}

impl ExecutionRecord {
    pub fn new(return_code: Option<i32>, duration: Duration, output: String) -> Self {
        Self {
            return_code,
            duration,
            output,
        }
    }

    /// Record for an invocation that failed before producing output.
    pub fn aborted(duration: Duration) -> Self {
        Self::new(None, duration, String::new())
    }

    /// True iff the process exited with the canonical success code.
    pub fn succeeded(&self) -> bool {
        self.return_code == Some(0)
    }

    pub fn return_code(&self) -> Option<i32> {
        self.return_code
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Combined stdout/stderr text captured from the child.
    pub fn output(&self) -> &str {
        &self.output
    }
}
