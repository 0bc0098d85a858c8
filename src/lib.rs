//! # carthage-boost Library
//!
//! This library implements a bootstrap pipeline that builds and installs a
//! patched Carthage from source. Upstream Carthage builds dependencies with a
//! serial flatten strategy and exposes no knob to change it; the only way to
//! lift the limit is to rewrite the relevant call sites before compiling.
//! That is what this crate automates.
//!
//! ## Quick Example
//!
//! ```
//! use carthage_boost::{defaults, patch};
//!
//! let manifest = defaults::carthage_manifest();
//! let source = ".flatMap(.concat) { dependency, version -> BuildSchemeProducer in
//!             .flatMap(.concat) { dependency, version -> SignalProducer in
//! ";
//! let (patched, _outcome) = patch::apply(source, &manifest).unwrap();
//! assert!(patched.contains(".flatMap(.maxConcurrent)"));
//! assert!(patched.ends_with(&manifest.fragment));
//! ```
//!
//! ## Core Concepts
//!
//! - **Patch Manifest (`config`, `defaults`)**: versioned data describing the
//!   repository, the single target file, the ordered literal substitutions
//!   (with expected-match-count assertions), and the fragment to append.
//! - **Patch Engine (`patch`)**: pure literal-substring rewriting. Asserted
//!   rules fail loudly when the upstream source drifts from the pinned
//!   version; re-applying to an already-patched file is a no-op.
//! - **Stage Adapters (`toolchain`, `fetch`, `tags`, `build`)**: thin
//!   wrappers over the external `git` and `make` binaries, each reporting
//!   success or a typed error.
//! - **Pipeline (`pipeline`)**: a strictly linear, fail-fast state machine
//!   (check, clone, checkout, patch, build, install) with no retries and no
//!   rollback.
//! - **Process Runner (`process`)**: subprocess execution with explicit
//!   working directories; non-zero exits are data, not errors.
//!
//! Everything is synchronous and single-threaded; the suspension points are
//! exactly the subprocess invocations.

pub mod build;
pub mod config;
pub mod defaults;
pub mod error;
pub mod fetch;
pub mod output;
pub mod patch;
pub mod pipeline;
pub mod process;
pub mod tags;
pub mod toolchain;
