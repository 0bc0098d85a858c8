//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, which runs only the
//! environment stage of the pipeline: it probes each required toolchain
//! binary with a version query and reports what it found. This is a safe,
//! read-only operation that touches nothing on disk.
//!
//! A failed probe prints the same remediation hint the full pipeline would
//! and exits non-zero, so `check` can gate provisioning scripts.

use anyhow::Result;
use clap::Args;

use carthage_boost::output::{emoji, OutputConfig};
use carthage_boost::toolchain;

/// Check that the required build toolchain is installed
#[derive(Args, Debug)]
pub struct CheckArgs {}

/// Execute the `check` command.
pub fn execute(_args: CheckArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let mut failed = false;

    for probe in toolchain::PROBES {
        match toolchain::probe_version(probe) {
            Ok(version) => {
                println!("{} {}: {}", emoji(&out, "✅", "[OK]"), probe.tool, version);
            }
            Err(e) => {
                failed = true;
                println!("{} {}", emoji(&out, "❌", "[MISSING]"), e);
            }
        }
    }

    if failed {
        anyhow::bail!("toolchain check failed");
    }

    println!("\nToolchain ready.");
    Ok(())
}
