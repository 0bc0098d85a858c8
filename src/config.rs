//! # Patch Manifest Configuration
//!
//! This module defines the schema for a patch manifest: the versioned data
//! that describes which repository to fetch, which file inside it to rewrite,
//! and the ordered literal substitutions plus appended fragment that make up
//! the patch.
//!
//! Keeping the rules as explicit data (rather than string literals buried in
//! the patching code) means a manifest is coupled to one upstream release on
//! purpose: each rule can carry an expected match count, and a mismatch is
//! detected as drift instead of silently producing an unpatched build.
//!
//! Manifests are YAML. The built-in Carthage manifest lives in
//! [`crate::defaults`]; `--manifest` on the CLI swaps in a file-based one:
//!
//! ```yaml
//! repository: https://github.com/Carthage/Carthage.git
//! directory: Carthage
//! target: Source/CarthageKit/Project.swift
//! rules:
//!   - pattern: ".flatMap(.concat) {"
//!     replacement: ".flatMap(.maxConcurrent) {"
//!     expect: 2
//! fragment: |
//!   extension FlattenStrategy { ... }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// One ordered literal substitution.
///
/// Patterns are exact, case-sensitive substrings; no pattern language is
/// involved. Rules are applied in declaration order and each replaces every
/// non-overlapping occurrence, so a later rule may match text an earlier rule
/// introduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRule {
    /// Literal text to find.
    pub pattern: String,
    /// Literal text to substitute for each occurrence.
    pub replacement: String,
    /// Expected number of occurrences in the pristine source. When set, any
    /// other count fails the patch with a drift error. When absent the rule
    /// is best-effort and zero matches is a silent no-op.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<usize>,
}

/// A complete patch manifest, pinned to one upstream release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchManifest {
    /// Remote repository URL to clone.
    pub repository: String,
    /// Name of the checkout directory created under the parent directory.
    pub directory: String,
    /// Path of the file to patch, relative to the checkout root. Also serves
    /// as the marker that an existing directory is a valid prior checkout.
    pub target: String,
    /// Ordered substitutions, applied by folding left-to-right.
    pub rules: Vec<PatchRule>,
    /// Source text appended verbatim to the target file exactly once.
    pub fragment: String,
}

/// Parse a manifest from a YAML string.
pub fn parse(yaml: &str) -> Result<PatchManifest> {
    let manifest: PatchManifest = serde_yaml::from_str(yaml)?;
    validate(&manifest)?;
    Ok(manifest)
}

/// Load and parse a manifest from a YAML file.
pub fn from_file(path: &Path) -> Result<PatchManifest> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Validate manifest invariants that the schema alone cannot express.
pub fn validate(manifest: &PatchManifest) -> Result<()> {
    if manifest.rules.is_empty() {
        return Err(Error::ManifestInvalid {
            message: "rule list is empty".to_string(),
            hint: Some("declare at least one pattern/replacement pair under 'rules:'".to_string()),
        });
    }

    if manifest.fragment.is_empty() {
        return Err(Error::ManifestInvalid {
            message: "injected fragment is empty".to_string(),
            hint: Some("the 'fragment:' block must contain the source text to append".to_string()),
        });
    }

    for rule in &manifest.rules {
        if rule.pattern.is_empty() {
            return Err(Error::ManifestInvalid {
                message: "a rule has an empty pattern".to_string(),
                hint: None,
            });
        }
    }

    if Path::new(&manifest.target).is_absolute() {
        return Err(Error::ManifestInvalid {
            message: format!(
                "target must be relative to the checkout root: {}",
                manifest.target
            ),
            hint: None,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
repository: https://github.com/Carthage/Carthage.git
directory: Carthage
target: Source/CarthageKit/Project.swift
rules:
  - pattern: "old"
    replacement: "new"
    expect: 1
fragment: |
  extension Foo {}
"#;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = parse(MINIMAL).unwrap();
        assert_eq!(manifest.directory, "Carthage");
        assert_eq!(manifest.target, "Source/CarthageKit/Project.swift");
        assert_eq!(manifest.rules.len(), 1);
        assert_eq!(manifest.rules[0].pattern, "old");
        assert_eq!(manifest.rules[0].expect, Some(1));
        assert!(manifest.fragment.contains("extension Foo"));
    }

    #[test]
    fn test_parse_rule_without_expect() {
        let yaml = r#"
repository: https://example.com/repo.git
directory: repo
target: src/file.txt
rules:
  - pattern: "a"
    replacement: "b"
fragment: "tail"
"#;
        let manifest = parse(yaml).unwrap();
        assert_eq!(manifest.rules[0].expect, None);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse("rules: [unclosed");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_validate_empty_rules() {
        let yaml = r#"
repository: https://example.com/repo.git
directory: repo
target: src/file.txt
rules: []
fragment: "tail"
"#;
        let result = parse(yaml);
        match result {
            Err(Error::ManifestInvalid { message, hint }) => {
                assert!(message.contains("rule list is empty"));
                assert!(hint.is_some());
            }
            other => panic!("expected ManifestInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_empty_fragment() {
        let yaml = r#"
repository: https://example.com/repo.git
directory: repo
target: src/file.txt
rules:
  - pattern: "a"
    replacement: "b"
fragment: ""
"#;
        let result = parse(yaml);
        match result {
            Err(Error::ManifestInvalid { message, .. }) => {
                assert!(message.contains("fragment is empty"));
            }
            other => panic!("expected ManifestInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_empty_pattern() {
        let yaml = r#"
repository: https://example.com/repo.git
directory: repo
target: src/file.txt
rules:
  - pattern: ""
    replacement: "b"
fragment: "tail"
"#;
        let result = parse(yaml);
        assert!(matches!(result, Err(Error::ManifestInvalid { .. })));
    }

    #[test]
    fn test_validate_absolute_target() {
        let yaml = r#"
repository: https://example.com/repo.git
directory: repo
target: /etc/passwd
rules:
  - pattern: "a"
    replacement: "b"
fragment: "tail"
"#;
        let result = parse(yaml);
        match result {
            Err(Error::ManifestInvalid { message, .. }) => {
                assert!(message.contains("relative to the checkout root"));
            }
            other => panic!("expected ManifestInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("manifest.yaml");
        std::fs::write(&path, MINIMAL).unwrap();

        let manifest = from_file(&path).unwrap();
        assert_eq!(manifest.directory, "Carthage");
    }

    #[test]
    fn test_from_file_missing() {
        let result = from_file(Path::new("/nonexistent/manifest.yaml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_serialize_round_trip() {
        let manifest = parse(MINIMAL).unwrap();
        let yaml = serde_yaml::to_string(&manifest).unwrap();
        let reparsed = parse(&yaml).unwrap();
        assert_eq!(manifest, reparsed);
    }
}
