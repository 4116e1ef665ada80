// Process runner module
// Assembles external commands and executes them with live log teeing

mod invocation;
mod process;

pub use invocation::{ExecutionRecord, Invocation};
pub use process::ProcessRunner;

use std::path::{Path, PathBuf};

/// Seam between invocation builders and process execution.
///
/// Builders only ever see an `ExecutionRecord`; every failure mode
/// (spawn error, log I/O error, nonzero exit) collapses into it. Tests
/// substitute a recording implementation to assert on assembled commands
/// without spawning anything.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> ExecutionRecord;
}

/// Timestamp key used in log and snapshot filenames.
pub fn run_stamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Pick a log path `<dir>/<prefix>_<stamp>.log` that does not exist yet.
///
/// The stamp has second resolution, so back-to-back runs get a numeric
/// suffix instead of clobbering an earlier log.
pub fn fresh_log_path(dir: &Path, prefix: &str) -> PathBuf {
    let stamp = run_stamp();
    let mut path = dir.join(format!("{prefix}_{stamp}.log"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{prefix}_{stamp}_{n}.log"));
        n += 1;
    }
    path
}
