//! # Pipeline Orchestrator
//!
//! Sequences the six bootstrap stages as a strictly linear state machine:
//!
//! ```text
//! CheckingEnvironment -> Cloning -> CheckingOut -> Patching -> Building -> Installing
//! ```
//!
//! Each stage returns a `Result`; the first error is wrapped in a
//! [`StageFailure`] carrying the failing stage's identity and the machine
//! halts. There are no retries, no rollback of earlier filesystem effects,
//! and later stages are never invoked. Stages communicate only through the
//! shared checkout directory.
//!
//! The stages are behind the [`Stages`] trait so the sequencing logic can be
//! exercised with instrumented stubs; [`BootstrapStages`] is the production
//! implementation wiring the toolchain, fetch, tags, patch, and build
//! modules together.

use std::fmt;
use std::path::PathBuf;

use crate::config::PatchManifest;
use crate::error::{Error, Result};
use crate::fetch::{self, Checkout};
use crate::patch::{self, PatchOutcome};
use crate::tags;
use crate::toolchain;
use crate::build;

/// One unit of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckingEnvironment,
    Cloning,
    CheckingOut,
    Patching,
    Building,
    Installing,
}

impl Stage {
    /// Short label printed as the stage begins.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::CheckingEnvironment => "Check",
            Stage::Cloning => "Clone",
            Stage::CheckingOut => "Checkout",
            Stage::Patching => "Patch",
            Stage::Building => "Build",
            Stage::Installing => "Install",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The first failure encountered by a run, with the stage it happened in.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {error}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub error: Error,
}

/// Summary of a successful run.
#[derive(Debug)]
pub struct PipelineReport {
    /// The checkout the pipeline operated on.
    pub checkout: Checkout,
    /// The tag that was built.
    pub tag: String,
    /// Whether the patch was applied or already present.
    pub outcome: PatchOutcome,
}

/// The six stage actions, separated from their sequencing.
pub trait Stages {
    fn check_environment(&mut self) -> Result<()>;
    fn clone_repository(&mut self) -> Result<Checkout>;
    fn checkout_latest_tag(&mut self, checkout: &Checkout) -> Result<String>;
    fn patch(&mut self, checkout: &Checkout) -> Result<PatchOutcome>;
    fn build(&mut self, checkout: &Checkout) -> Result<()>;
    fn install(&mut self, checkout: &Checkout) -> Result<()>;
}

/// Run the pipeline to completion or first failure.
///
/// `on_stage` fires as each stage begins, before its action runs; the caller
/// uses it for progress output. When `skip_install` is set the machine
/// terminates after the build stage.
pub fn run(
    stages: &mut dyn Stages,
    skip_install: bool,
    on_stage: &mut dyn FnMut(Stage),
) -> std::result::Result<PipelineReport, StageFailure> {
    let fail = |stage: Stage| move |error: Error| StageFailure { stage, error };

    on_stage(Stage::CheckingEnvironment);
    stages
        .check_environment()
        .map_err(fail(Stage::CheckingEnvironment))?;

    on_stage(Stage::Cloning);
    let checkout = stages.clone_repository().map_err(fail(Stage::Cloning))?;

    on_stage(Stage::CheckingOut);
    let tag = stages
        .checkout_latest_tag(&checkout)
        .map_err(fail(Stage::CheckingOut))?;

    on_stage(Stage::Patching);
    let outcome = stages.patch(&checkout).map_err(fail(Stage::Patching))?;

    on_stage(Stage::Building);
    stages.build(&checkout).map_err(fail(Stage::Building))?;

    if !skip_install {
        on_stage(Stage::Installing);
        stages.install(&checkout).map_err(fail(Stage::Installing))?;
    }

    Ok(PipelineReport {
        checkout,
        tag,
        outcome,
    })
}

/// Production stage implementation.
pub struct BootstrapStages {
    manifest: PatchManifest,
    parent_dir: PathBuf,
}

impl BootstrapStages {
    pub fn new(manifest: PatchManifest, parent_dir: PathBuf) -> Self {
        Self {
            manifest,
            parent_dir,
        }
    }
}

impl Stages for BootstrapStages {
    fn check_environment(&mut self) -> Result<()> {
        toolchain::check_environment()
    }

    fn clone_repository(&mut self) -> Result<Checkout> {
        fetch::fetch(&self.manifest, &self.parent_dir)
    }

    fn checkout_latest_tag(&mut self, checkout: &Checkout) -> Result<String> {
        tags::checkout_latest_tag(checkout)
    }

    fn patch(&mut self, checkout: &Checkout) -> Result<PatchOutcome> {
        patch::apply_file(&checkout.target_file(&self.manifest), &self.manifest)
    }

    fn build(&mut self, checkout: &Checkout) -> Result<()> {
        build::build(checkout)
    }

    fn install(&mut self, checkout: &Checkout) -> Result<()> {
        build::install(checkout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every stage action invoked, optionally failing at one stage.
    struct StubStages {
        calls: Vec<Stage>,
        fail_at: Option<Stage>,
    }

    impl StubStages {
        fn new(fail_at: Option<Stage>) -> Self {
            Self {
                calls: Vec::new(),
                fail_at,
            }
        }

        fn record(&mut self, stage: Stage) -> Result<()> {
            self.calls.push(stage);
            if self.fail_at == Some(stage) {
                return Err(Error::ManifestInvalid {
                    message: format!("injected failure at {}", stage),
                    hint: None,
                });
            }
            Ok(())
        }
    }

    impl Stages for StubStages {
        fn check_environment(&mut self) -> Result<()> {
            self.record(Stage::CheckingEnvironment)
        }

        fn clone_repository(&mut self) -> Result<Checkout> {
            self.record(Stage::Cloning)?;
            Ok(Checkout::new(PathBuf::from("/tmp/stub")))
        }

        fn checkout_latest_tag(&mut self, _checkout: &Checkout) -> Result<String> {
            self.record(Stage::CheckingOut)?;
            Ok("0.1.0".to_string())
        }

        fn patch(&mut self, _checkout: &Checkout) -> Result<PatchOutcome> {
            self.record(Stage::Patching)?;
            Ok(PatchOutcome::Applied { substitutions: 2 })
        }

        fn build(&mut self, _checkout: &Checkout) -> Result<()> {
            self.record(Stage::Building)
        }

        fn install(&mut self, _checkout: &Checkout) -> Result<()> {
            self.record(Stage::Installing)
        }
    }

    const ALL_STAGES: [Stage; 6] = [
        Stage::CheckingEnvironment,
        Stage::Cloning,
        Stage::CheckingOut,
        Stage::Patching,
        Stage::Building,
        Stage::Installing,
    ];

    #[test]
    fn test_run_invokes_all_stages_in_order() {
        let mut stages = StubStages::new(None);
        let mut announced = Vec::new();

        let report = run(&mut stages, false, &mut |s| announced.push(s)).unwrap();

        assert_eq!(stages.calls, ALL_STAGES);
        assert_eq!(announced, ALL_STAGES);
        assert_eq!(report.tag, "0.1.0");
        assert_eq!(report.outcome, PatchOutcome::Applied { substitutions: 2 });
    }

    #[test]
    fn test_run_fail_fast_at_every_stage() {
        // Inject a failure at each stage in turn and assert that exactly the
        // stages up to and including it ran, and none after.
        for (i, failing) in ALL_STAGES.iter().enumerate() {
            let mut stages = StubStages::new(Some(*failing));
            let result = run(&mut stages, false, &mut |_| {});

            let failure = result.expect_err("run should fail");
            assert_eq!(failure.stage, *failing);
            assert_eq!(stages.calls, &ALL_STAGES[..=i]);
        }
    }

    #[test]
    fn test_run_skip_install() {
        let mut stages = StubStages::new(None);
        run(&mut stages, true, &mut |_| {}).unwrap();

        assert_eq!(stages.calls, &ALL_STAGES[..5]);
    }

    #[test]
    fn test_stage_failure_display_names_stage() {
        let mut stages = StubStages::new(Some(Stage::CheckingOut));
        let failure = run(&mut stages, false, &mut |_| {}).unwrap_err();

        let display = format!("{}", failure);
        assert!(display.contains("Checkout stage failed"));
        assert!(display.contains("injected failure"));
    }

    #[test]
    fn test_stage_labels() {
        let labels: Vec<&str> = ALL_STAGES.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Check", "Clone", "Checkout", "Patch", "Build", "Install"]
        );
    }
}
