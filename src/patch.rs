//! # Patch Engine
//!
//! Literal-substitution patching of a single source file. This is the
//! correctness-critical piece of the pipeline: the substitutions turn
//! Carthage's serial dependency-build strategy into a concurrent one, and a
//! patch that silently fails to match would produce a correctly built but
//! unmodified tool.
//!
//! The engine is deliberately not a diff applier. Patterns are exact
//! substrings matched against a source tree pinned to one tag, which keeps
//! the transformation trivially auditable:
//!
//! 1. If the injected fragment is already present, the file was patched by a
//!    previous run; return unchanged (re-running the pipeline is a no-op).
//! 2. Fold the rules in order over the text. Each rule replaces every
//!    non-overlapping occurrence of its pattern, so later rules see the
//!    output of earlier ones.
//! 3. Rules with an `expect` count are assertions: the wrong number of
//!    occurrences means the upstream source drifted from the pinned version,
//!    and the run fails loudly rather than building from a half-patched file.
//! 4. Append the fragment once at the end of the file.
//!
//! [`apply`] is a pure function of (content, manifest); [`apply_file`] wraps
//! it with the read/overwrite of the target file. No backup is kept; the
//! checkout is disposable and re-cloneable.

use std::path::Path;

use crate::config::PatchManifest;
use crate::error::{Error, Result};

/// What a patch application did to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The substitutions ran and the fragment was appended.
    Applied {
        /// Total occurrences replaced across all rules.
        substitutions: usize,
    },
    /// The fragment was already present; nothing was changed.
    AlreadyPatched,
}

/// Apply a manifest to source text.
///
/// Pure: the result depends only on `content` and `manifest`, so applying
/// the same manifest to the same pristine text always yields byte-identical
/// output.
pub fn apply(content: &str, manifest: &PatchManifest) -> Result<(String, PatchOutcome)> {
    if content.contains(&manifest.fragment) {
        log::info!("target already contains the injected fragment, skipping patch");
        return Ok((content.to_string(), PatchOutcome::AlreadyPatched));
    }

    let mut text = content.to_string();
    let mut substitutions = 0;

    for rule in &manifest.rules {
        let found = text.matches(&rule.pattern).count();

        if let Some(expected) = rule.expect {
            if found != expected {
                return Err(Error::PatchDrift {
                    pattern: rule.pattern.clone(),
                    expected,
                    found,
                });
            }
        }

        if found > 0 {
            text = text.replace(&rule.pattern, &rule.replacement);
            substitutions += found;
        }
    }

    text.push_str(&manifest.fragment);

    Ok((text, PatchOutcome::Applied { substitutions }))
}

/// Apply a manifest to the target file in place.
///
/// Reads the file, runs [`apply`], and overwrites the file only when the
/// patch actually changed something.
pub fn apply_file(path: &Path, manifest: &PatchManifest) -> Result<PatchOutcome> {
    let content = std::fs::read_to_string(path)?;
    let (patched, outcome) = apply(&content, manifest)?;

    match &outcome {
        PatchOutcome::Applied { substitutions } => {
            std::fs::write(path, &patched)?;
            log::info!(
                "patched {} ({} substitution(s), fragment appended)",
                path.display(),
                substitutions
            );
        }
        PatchOutcome::AlreadyPatched => {
            log::info!("{} already patched, left untouched", path.display());
        }
    }

    Ok(outcome)
}
