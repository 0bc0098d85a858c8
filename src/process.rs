//! Subprocess execution with explicit working directories.
//!
//! Every external command the pipeline runs (git probes, clone, checkout,
//! make) goes through this module. Two modes are provided:
//!
//! - [`run`] captures stdout/stderr for inspection (probes, clone, tags).
//! - [`run_streamed`] inherits the parent's stdio so long-running make
//!   targets stay visible to the operator.
//!
//! A non-zero exit is never an error at this layer; callers inspect the
//! returned status and decide. Only a failure to spawn the process at all
//! (binary missing, permission denied) produces [`Error::CommandSpawn`].
//!
//! The working directory is always passed explicitly. The process-global
//! current directory is never changed, so stages cannot affect each other
//! through shared process state.

use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::error::{Error, Result};

/// Captured result of a finished subprocess.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl RunOutput {
    /// True if the process exited with status 0.
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Run a command to completion, capturing stdout and stderr.
pub fn run(program: &str, args: &[&str], cwd: &Path) -> Result<RunOutput> {
    log::debug!("running: {} {} (cwd: {})", program, args.join(" "), cwd.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| Error::CommandSpawn {
            command: format!("{} {}", program, args.join(" ")),
            message: e.to_string(),
        })?;

    Ok(RunOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status,
    })
}

/// Run a command to completion with inherited stdio.
///
/// Used for the make targets, whose output the operator wants to watch
/// scroll by rather than have buffered and discarded.
pub fn run_streamed(program: &str, args: &[&str], cwd: &Path) -> Result<ExitStatus> {
    log::debug!("running (streamed): {} {} (cwd: {})", program, args.join(" "), cwd.display());

    Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|e| Error::CommandSpawn {
            command: format!("{} {}", program, args.join(" ")),
            message: e.to_string(),
        })
}
