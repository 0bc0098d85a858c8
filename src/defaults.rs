//! Default values for carthage-boost.
//!
//! This module provides the built-in patch manifest and the default checkout
//! location, keeping the pinned literals in one place.

use std::path::PathBuf;

use crate::config::{PatchManifest, PatchRule};

/// Upstream repository the bootstrap builds from.
pub const CARTHAGE_REPOSITORY: &str = "https://github.com/Carthage/Carthage.git";

/// Name of the checkout directory created under the parent directory.
pub const CARTHAGE_DIRECTORY: &str = "Carthage";

/// The one file the patch rewrites, relative to the checkout root.
pub const CARTHAGE_TARGET: &str = "Source/CarthageKit/Project.swift";

/// The `FlattenStrategy` extension appended to the target file. It derives a
/// concurrency limit from the machine's processor count, replacing the
/// serial `.concat` strategy Carthage hardcodes for dependency builds.
const FLATTEN_STRATEGY_EXTENSION: &str = "extension FlattenStrategy {
    static let maxConcurrent: FlattenStrategy = {
        let n = UInt(ProcessInfo().processorCount * 2)
        return FlattenStrategy.concurrent(limit: n)
    }()
}
";

/// Returns the built-in manifest for patching Carthage.
///
/// Both substitution sites appear exactly once in the pinned source, so both
/// rules assert a match count of 1. If a new Carthage release moves or
/// rewords either call site, the patch fails with a drift error instead of
/// silently building an unpatched binary.
pub fn carthage_manifest() -> PatchManifest {
    PatchManifest {
        repository: CARTHAGE_REPOSITORY.to_string(),
        directory: CARTHAGE_DIRECTORY.to_string(),
        target: CARTHAGE_TARGET.to_string(),
        rules: vec![
            PatchRule {
                pattern: ".flatMap(.concat) { dependency, version -> BuildSchemeProducer"
                    .to_string(),
                replacement: ".flatMap(.maxConcurrent) { dependency, version -> BuildSchemeProducer"
                    .to_string(),
                expect: Some(1),
            },
            PatchRule {
                pattern: ".flatMap(.concat) { dependency, version -> SignalProducer".to_string(),
                replacement: ".flatMap(.maxConcurrent) { dependency, version -> SignalProducer"
                    .to_string(),
                expect: Some(1),
            },
        ],
        fragment: FLATTEN_STRATEGY_EXTENSION.to_string(),
    }
}

/// Returns the default parent directory for the checkout.
///
/// The checkout lands at `<parent>/Carthage`; the parent defaults to the
/// directory the tool is invoked from and can be overridden with
/// `--parent-dir`.
pub fn default_parent_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn test_carthage_manifest_is_valid() {
        let manifest = carthage_manifest();
        config::validate(&manifest).unwrap();
    }

    #[test]
    fn test_carthage_manifest_rules_are_asserted() {
        // Every built-in rule must carry a match-count assertion so upstream
        // drift is caught rather than silently ignored.
        let manifest = carthage_manifest();
        assert!(manifest.rules.iter().all(|r| r.expect.is_some()));
    }

    #[test]
    fn test_carthage_manifest_rewrites_flatten_strategy() {
        let manifest = carthage_manifest();
        for rule in &manifest.rules {
            assert!(rule.pattern.contains(".flatMap(.concat)"));
            assert!(rule.replacement.contains(".flatMap(.maxConcurrent)"));
        }
        assert!(manifest.fragment.contains("static let maxConcurrent"));
        assert!(manifest.fragment.ends_with('\n'));
    }

    #[test]
    fn test_default_parent_dir_returns_path() {
        let parent = default_parent_dir();
        assert!(parent.as_os_str().len() > 0);
    }
}
