//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `carthage-boost` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to one failure
//!   mode of the bootstrap pipeline and includes contextual information to
//!   aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures.
//!
//! The pipeline is fail-fast: the first error produced by any stage aborts
//! the whole run. The variants therefore map one-to-one onto the ways a run
//! can end early:
//!
//! - A required toolchain binary is missing or unrecognizable.
//! - A subprocess could not be spawned at all.
//! - The clone failed and was not a benign re-run.
//! - The repository has no tags, or the tag checkout failed.
//! - The patch manifest is invalid.
//! - A substitution pattern no longer matches the pinned source (drift).
//! - The build or install make target exited non-zero.
//! - I/O or YAML parsing failed.
//!
//! Variants that have an obvious remediation carry a `hint` that is rendered
//! on its own indented line below the message.

use thiserror::Error;

/// Main error type for carthage-boost operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required build toolchain binary is missing or did not identify
    /// itself. Includes a user-facing remediation hint.
    #[error("Toolchain check failed for '{tool}'\n  hint: {hint}")]
    ToolchainMissing { tool: String, hint: String },

    /// A subprocess could not be spawned at all (as opposed to running and
    /// exiting non-zero, which stages handle themselves).
    #[error("Failed to spawn '{command}': {message}")]
    CommandSpawn { command: String, message: String },

    /// `git clone` exited non-zero and the failure was not a benign
    /// already-cloned re-run.
    #[error("Failed to clone {url}: {stderr}")]
    CloneFailed { url: String, stderr: String },

    /// `git tag --sort=committerdate` itself exited non-zero.
    #[error("Failed to list tags: {stderr}")]
    TagListFailed { stderr: String },

    /// The cloned repository has no tags to select a version from.
    #[error("No tags found in {repo}\n  hint: the clone may be shallow or incomplete; remove the checkout directory and re-run")]
    NoTags { repo: String },

    /// `git checkout tags/<tag>` exited non-zero.
    #[error("Failed to checkout tags/{tag}: {stderr}")]
    CheckoutFailed { tag: String, stderr: String },

    /// The patch manifest failed validation or could not be parsed into a
    /// usable rule set.
    #[error("Invalid patch manifest: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestInvalid {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// A substitution pattern with an expected match count did not match the
    /// source file the expected number of times. This means the upstream
    /// source has drifted from the version the manifest was written against.
    #[error("Patch pattern matched {found} time(s), expected {expected}: {pattern:?}\n  hint: the upstream source has changed; update the patch manifest for the new release")]
    PatchDrift {
        pattern: String,
        expected: usize,
        found: usize,
    },

    /// `make installables` exited non-zero.
    #[error("Build failed: 'make installables' exited with {}", exit_code_label(*code))]
    BuildFailed { code: Option<i32> },

    /// `make install` exited non-zero.
    #[error("Install failed: 'make install' exited with {}", exit_code_label(*code))]
    InstallFailed { code: Option<i32> },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

fn exit_code_label(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}
