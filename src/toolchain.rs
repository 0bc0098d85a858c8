//! Build toolchain detection.
//!
//! The pipeline shells out to `git` and `make`; before anything is cloned,
//! each binary is probed with a version query and its stdout is checked for
//! an identifying marker. A missing binary, a non-zero probe exit, or
//! unrecognizable probe output all surface as [`Error::ToolchainMissing`]
//! with a remediation hint, and the pipeline halts before touching the
//! filesystem.

use crate::error::{Error, Result};
use crate::process::{self, RunOutput};

/// A version-query probe for one required binary.
#[derive(Debug, Clone, Copy)]
pub struct ToolProbe {
    /// Binary name, resolved via PATH.
    pub tool: &'static str,
    /// Arguments for the version query.
    pub args: &'static [&'static str],
    /// Substring the probe's stdout must contain.
    pub marker: &'static str,
    /// Remediation shown when the probe fails.
    pub hint: &'static str,
}

/// The toolchain the pipeline requires: git for fetch/checkout, make for
/// Carthage's build and install targets.
pub const PROBES: &[ToolProbe] = &[
    ToolProbe {
        tool: "git",
        args: &["--version"],
        marker: "git version",
        hint: "install git (https://git-scm.com/downloads) and make sure it is on PATH",
    },
    ToolProbe {
        tool: "make",
        args: &["--version"],
        marker: "Make",
        hint: "install make: 'xcode-select --install' on macOS, or the build-essential package on Debian/Ubuntu",
    },
];

/// Verify every required tool is present and identifies itself.
pub fn check_environment() -> Result<()> {
    for probe in PROBES {
        probe_version(probe)?;
    }
    Ok(())
}

/// Run one probe and return the tool's reported version line.
pub fn probe_version(probe: &ToolProbe) -> Result<String> {
    let cwd = std::env::current_dir()?;
    let output = process::run(probe.tool, probe.args, &cwd).map_err(|e| {
        log::debug!("probe spawn failed for {}: {}", probe.tool, e);
        Error::ToolchainMissing {
            tool: probe.tool.to_string(),
            hint: probe.hint.to_string(),
        }
    })?;

    verify(probe, &output)
}

/// Check a probe's captured output against its marker.
fn verify(probe: &ToolProbe, output: &RunOutput) -> Result<String> {
    if !output.success() || !output.stdout.contains(probe.marker) {
        return Err(Error::ToolchainMissing {
            tool: probe.tool.to_string(),
            hint: probe.hint.to_string(),
        });
    }

    Ok(output.stdout.lines().next().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    fn output(stdout: &str, code: i32) -> RunOutput {
        RunOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            status: ExitStatus::from_raw(code << 8),
        }
    }

    fn git_probe() -> &'static ToolProbe {
        &PROBES[0]
    }

    #[test]
    fn test_verify_accepts_marker() {
        let version = verify(git_probe(), &output("git version 2.43.0\n", 0)).unwrap();
        assert_eq!(version, "git version 2.43.0");
    }

    #[test]
    fn test_verify_rejects_missing_marker() {
        // A binary answered, but it is not the tool we need.
        let result = verify(git_probe(), &output("something else entirely\n", 0));
        match result {
            Err(Error::ToolchainMissing { tool, hint }) => {
                assert_eq!(tool, "git");
                assert!(hint.contains("install git"));
            }
            other => panic!("expected ToolchainMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_rejects_nonzero_exit() {
        let result = verify(git_probe(), &output("git version 2.43.0\n", 1));
        assert!(matches!(result, Err(Error::ToolchainMissing { .. })));
    }

    #[test]
    fn test_probe_version_missing_binary() {
        let probe = ToolProbe {
            tool: "definitely-not-a-real-binary-xyz",
            args: &["--version"],
            marker: "whatever",
            hint: "install it",
        };
        let result = probe_version(&probe);
        match result {
            Err(Error::ToolchainMissing { tool, hint }) => {
                assert_eq!(tool, "definitely-not-a-real-binary-xyz");
                assert_eq!(hint, "install it");
            }
            other => panic!("expected ToolchainMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_probes_cover_git_and_make() {
        let tools: Vec<&str> = PROBES.iter().map(|p| p.tool).collect();
        assert_eq!(tools, vec!["git", "make"]);
    }
}
