//! Run command implementation
//!
//! The run command executes the full bootstrap pipeline:
//! 1. Check that git and make are present
//! 2. Clone the Carthage repository (reusing a valid prior checkout)
//! 3. Check out the latest tag by committer date
//! 4. Patch the build-concurrency strategy in Project.swift
//! 5. `make installables`
//! 6. `make install`
//!
//! The pipeline is fail-fast: the first stage error aborts the run and is
//! reported with the stage it happened in. Filesystem effects of earlier
//! stages are left in place, so a fixed-up re-run can pick up where the
//! failed one stopped.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use carthage_boost::config;
use carthage_boost::defaults;
use carthage_boost::output::{emoji, OutputConfig};
use carthage_boost::patch::PatchOutcome;
use carthage_boost::pipeline::{self, BootstrapStages};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Parent directory for the checkout (defaults to the current directory)
    #[arg(long, value_name = "PATH", env = "CARTHAGE_BOOST_PARENT")]
    pub parent_dir: Option<PathBuf>,

    /// Patch manifest file overriding the built-in Carthage manifest
    #[arg(short, long, value_name = "PATH", env = "CARTHAGE_BOOST_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Build but do not run the install target
    #[arg(long)]
    pub skip_install: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `run` command.
pub fn execute(args: RunArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    let manifest = match &args.manifest {
        Some(path) => config::from_file(path)?,
        None => defaults::carthage_manifest(),
    };

    let parent_dir = args
        .parent_dir
        .clone()
        .unwrap_or_else(defaults::default_parent_dir);

    if !args.quiet {
        println!(
            "{} Bootstrapping {} under {}",
            emoji(&out, "🚀", "[RUN]"),
            manifest.repository,
            parent_dir.display()
        );
    }

    let mut stages = BootstrapStages::new(manifest, parent_dir);
    let quiet = args.quiet;
    let result = pipeline::run(&mut stages, args.skip_install, &mut |stage| {
        if !quiet {
            println!("{}", stage.label());
        }
    });

    match result {
        Ok(report) => {
            let duration = start_time.elapsed();

            if !args.quiet {
                println!(
                    "{} Built Carthage {} in {:.1}s",
                    emoji(&out, "✅", "[OK]"),
                    report.tag,
                    duration.as_secs_f64()
                );
                match report.outcome {
                    PatchOutcome::Applied { substitutions } => {
                        println!("   {} substitution(s) applied", substitutions);
                    }
                    PatchOutcome::AlreadyPatched => {
                        println!("   source was already patched");
                    }
                }
                println!("   checkout: {}", report.checkout.root().display());
            }

            Ok(())
        }
        Err(failure) => {
            if !args.quiet {
                println!("{} Pipeline halted", emoji(&out, "❌", "[FAIL]"));
            }
            Err(failure.into())
        }
    }
}
