// Child-process execution with live log teeing
//
// Runs one external command at a time. stdout and stderr are merged into a
// single OS pipe so chunks land in the log in the order the kernel delivered
// them, and every chunk is flushed to both console and log immediately so
// the log file can be tailed while the process runs.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, error};

use super::{CommandRunner, ExecutionRecord, Invocation};

const SEPARATOR: &str = "==================================================";

/// Synchronous runner for external toolchain commands.
///
/// Failures never propagate to callers: spawn and I/O errors are written
/// into the log file (when one is open) and collapse into a failed
/// [`ExecutionRecord`].
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn execute(&self, invocation: &Invocation) -> Result<ExecutionRecord> {
        if let Some(parent) = invocation.log_path().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create log directory: {}", parent.display())
            })?;
        }

        // Each run owns a fresh timestamped filename, so truncation is safe.
        let mut log = File::create(invocation.log_path()).with_context(|| {
            format!("Failed to create log file: {}", invocation.log_path().display())
        })?;
        write_header(&mut log, invocation)?;

        debug!(command = %invocation.command_line(), "Spawning child process");

        let (mut reader, writer) = io::pipe().context("Failed to create output pipe")?;
        let start = Instant::now();
        let mut child = {
            let mut cmd = Command::new(invocation.program());
            cmd.args(invocation.args())
                .stdin(Stdio::null())
                .stdout(writer.try_clone().context("Failed to clone pipe writer")?)
                .stderr(writer);
            cmd.spawn()
                .with_context(|| format!("Failed to spawn {}", invocation.program()))?
        };
        // `cmd` dropped here, closing the parent's writer copies; the reader
        // hits EOF once the child closes its end.

        let mut console = io::stdout();
        let mut captured = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = reader
                .read(&mut chunk)
                .context("Failed to read child output")?;
            if n == 0 {
                break;
            }
            console.write_all(&chunk[..n])?;
            console.flush()?;
            log.write_all(&chunk[..n])?;
            log.flush()?;
            captured.extend_from_slice(&chunk[..n]);
        }

        let status = child.wait().context("Failed to wait for child process")?;
        let duration = start.elapsed();

        write_footer(&mut log, duration.as_secs_f64(), status.code())?;

        Ok(ExecutionRecord::new(
            status.code(),
            duration,
            String::from_utf8_lossy(&captured).into_owned(),
        ))
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> ExecutionRecord {
        let start = Instant::now();
        match self.execute(invocation) {
            Ok(record) => record,
            Err(err) => {
                error!("{} failed: {:#}", invocation.label(), err);
                append_exception(invocation.log_path(), &err);
                ExecutionRecord::aborted(start.elapsed())
            }
        }
    }
}

fn write_header(log: &mut File, invocation: &Invocation) -> Result<()> {
    writeln!(log, "=== {} START ===", invocation.label())?;
    writeln!(log, "Command: {}", invocation.command_line())?;
    for (key, value) in invocation.details() {
        writeln!(log, "{key}: {value}")?;
    }
    if let Some(env) = invocation.env_label() {
        writeln!(log, "Conda Environment: {env}")?;
    }
    writeln!(log, "{SEPARATOR}")?;
    writeln!(log)?;
    log.flush()?;
    Ok(())
}

fn write_footer(log: &mut File, seconds: f64, return_code: Option<i32>) -> Result<()> {
    writeln!(log, "\n{SEPARATOR}")?;
    writeln!(log, "Duration: {:.2}s ({:.2} minutes)", seconds, seconds / 60.0)?;
    match return_code {
        Some(code) => writeln!(log, "Return code: {code}")?,
        None => writeln!(log, "Return code: signal")?,
    }
    log.flush()?;
    Ok(())
}

/// Best-effort marker for failures caught inside the runner. The log may
/// not exist if creating it was the failure.
fn append_exception(log_path: &Path, err: &anyhow::Error) {
    if let Ok(mut log) = OpenOptions::new().append(true).open(log_path) {
        let _ = writeln!(log, "\nEXCEPTION: {err:#}");
    }
}
