//! Repository fetching.
//!
//! Clones the manifest's repository into `<parent>/<directory>` using the
//! system git command, which automatically handles SSH keys, credential
//! helpers, and anything else configured in `~/.gitconfig`.
//!
//! The clone is re-run friendly: if git refuses because the destination
//! already exists and the destination contains the manifest's target file
//! (the marker of a valid prior checkout), the existing checkout is reused.
//! Any other non-zero outcome is a hard failure.

use std::path::{Path, PathBuf};

use crate::config::PatchManifest;
use crate::error::{Error, Result};
use crate::process::{self, RunOutput};

/// A local working copy of the cloned repository.
///
/// Created by [`fetch`], mutated in place by the checkout and patch stages,
/// consumed by the build stages. One pipeline run owns its checkout
/// exclusively; concurrent runs against the same path are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    root: PathBuf,
}

impl Checkout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the working copy.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the manifest's patch target inside this checkout.
    pub fn target_file(&self, manifest: &PatchManifest) -> PathBuf {
        self.root.join(&manifest.target)
    }
}

/// Clone the manifest's repository under `parent`.
pub fn fetch(manifest: &PatchManifest, parent: &Path) -> Result<Checkout> {
    let checkout = Checkout::new(parent.join(&manifest.directory));

    let output = process::run(
        "git",
        &["clone", &manifest.repository, &manifest.directory],
        parent,
    )?;

    interpret_clone(manifest, &checkout, &output)?;
    Ok(checkout)
}

/// The stderr line git emits when the destination directory is occupied.
fn already_exists_message(directory: &str) -> String {
    format!(
        "destination path '{}' already exists and is not an empty directory",
        directory
    )
}

/// Classify a finished clone: success, benign re-run, or failure.
fn interpret_clone(
    manifest: &PatchManifest,
    checkout: &Checkout,
    output: &RunOutput,
) -> Result<()> {
    if output.success() {
        return Ok(());
    }

    if output.stderr.contains(&already_exists_message(&manifest.directory))
        && checkout.target_file(manifest).is_file()
    {
        log::info!(
            "reusing existing checkout at {}",
            checkout.root().display()
        );
        return Ok(());
    }

    Err(Error::CloneFailed {
        url: manifest.repository.clone(),
        stderr: output.stderr.trim_end().to_string(),
    })
}
