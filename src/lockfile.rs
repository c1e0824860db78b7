//! Extraction of package entries from `package-lock.json` documents.
//!
//! Two container shapes are understood:
//!
//! - `packages` (lockfile versions 2 and 3), keyed by install path such as
//!   `node_modules/a/node_modules/@scope/b`
//! - `dependencies` (lockfile version 1), keyed by package name with nested
//!   `dependencies` maps
//!
//! When both are present `packages` is used. Entries come out in document
//! order, which relies on `serde_json`'s `preserve_order` feature.
//!
//! # Example
//!
//! ```
//! use lockaudit::lockfile::extract;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "lockfileVersion": 3,
//!     "packages": {
//!         "": { "name": "my-app", "version": "1.0.0" },
//!         "node_modules/lodash": {
//!             "version": "4.17.21",
//!             "resolved": "https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz",
//!             "integrity": "sha512-abc"
//!         }
//!     }
//! });
//!
//! let entries = extract(&doc).unwrap();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].name, "lodash");
//! ```

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{LockfileError, Result};
use crate::model::PackageEntry;

const NODE_MODULES: &str = "node_modules/";

/// Projects a parsed lockfile document into an ordered list of entries.
///
/// # Errors
///
/// Returns [`LockfileError::Malformed`] if the document is not an object or has
/// neither a `packages` nor a `dependencies` object. Individual records that
/// cannot be understood are skipped.
pub fn extract(document: &Value) -> Result<Vec<PackageEntry>> {
    let root = document.as_object().ok_or_else(|| {
        LockfileError::Malformed("expected a JSON object at the top level".to_string())
    })?;

    let packages = root.get("packages").and_then(Value::as_object);
    let dependencies = root.get("dependencies").and_then(Value::as_object);

    let mut entries = Vec::new();
    match (packages, dependencies) {
        (Some(packages), _) => extract_packages(packages, &mut entries),
        (None, Some(dependencies)) => extract_dependencies(dependencies, &mut entries),
        (None, None) => {
            return Err(LockfileError::Malformed(
                "missing `packages` or `dependencies` object".to_string(),
            ))
        }
    }

    debug!(count = entries.len(), "extracted lockfile entries");
    Ok(entries)
}

/// Parses lockfile text and extracts its entries.
pub fn parse_str(content: &str) -> Result<Vec<PackageEntry>> {
    let document: Value = serde_json::from_str(content)?;
    extract(&document)
}

/// Reads a lockfile from disk and extracts its entries.
pub fn read_path(path: &Path) -> Result<Vec<PackageEntry>> {
    let content = fs::read_to_string(path).map_err(|source| LockfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&content)
}

fn extract_packages(packages: &Map<String, Value>, entries: &mut Vec<PackageEntry>) {
    for (key, meta) in packages {
        let Some(name) = package_name(key, meta) else {
            continue;
        };
        if let Some(entry) = entry_from(name, meta) {
            entries.push(entry);
        }
    }
}

fn extract_dependencies(dependencies: &Map<String, Value>, entries: &mut Vec<PackageEntry>) {
    for (name, meta) in dependencies {
        if name.is_empty() {
            continue;
        }
        if let Some(entry) = entry_from(name, meta) {
            entries.push(entry);
        }
        if let Some(nested) = meta.get("dependencies").and_then(Value::as_object) {
            extract_dependencies(nested, entries);
        }
    }
}

/// Logical package name for a `packages` key.
///
/// `None` for the project root.
fn package_name<'a>(key: &'a str, meta: &'a Value) -> Option<&'a str> {
    if key.is_empty() {
        return None;
    }

    let name = match key.rfind(NODE_MODULES) {
        Some(pos) => &key[pos + NODE_MODULES.len()..],
        // Workspace members live outside node_modules.
        None => meta.get("name").and_then(Value::as_str).unwrap_or(key),
    };

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn entry_from(name: &str, meta: &Value) -> Option<PackageEntry> {
    let Some(meta) = meta.as_object() else {
        debug!(package = name, "skipping non-object lockfile entry");
        return None;
    };

    let Some(version) = meta.get("version").and_then(Value::as_str) else {
        debug!(package = name, "skipping lockfile entry without a version");
        return None;
    };

    Some(PackageEntry {
        name: name.to_string(),
        version: version.to_string(),
        resolved: string_field(meta, "resolved"),
        integrity: string_field(meta, "integrity"),
        dev: meta.get("dev").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn string_field(meta: &Map<String, Value>, field: &str) -> Option<String> {
    meta.get(field).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object() {
        let err = extract(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, LockfileError::Malformed(_)));

        let err = extract(&json!("package-lock")).unwrap_err();
        assert!(matches!(err, LockfileError::Malformed(_)));
    }

    #[test]
    fn test_rejects_missing_container() {
        let err = extract(&json!({ "name": "app", "lockfileVersion": 3 })).unwrap_err();
        assert!(matches!(err, LockfileError::Malformed(_)));

        let err = extract(&json!({ "packages": [] })).unwrap_err();
        assert!(matches!(err, LockfileError::Malformed(_)));
    }

    #[test]
    fn test_empty_container() {
        assert!(extract(&json!({ "packages": {} })).unwrap().is_empty());
        assert!(extract(&json!({ "dependencies": {} })).unwrap().is_empty());
    }

    #[test]
    fn test_skips_root_entry() {
        let doc = json!({
            "packages": {
                "": { "name": "my-app", "version": "1.0.0" },
                "node_modules/chalk": { "version": "5.3.0" }
            }
        });

        let entries = extract(&doc).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "chalk");
    }

    #[test]
    fn test_nested_and_scoped_names() {
        let doc = json!({
            "packages": {
                "node_modules/@babel/core": { "version": "7.24.0" },
                "node_modules/a/node_modules/@types/node": { "version": "20.1.0" },
                "node_modules/a/node_modules/lodash": { "version": "4.17.20" }
            }
        });

        let names: Vec<_> = extract(&doc)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["@babel/core", "@types/node", "lodash"]);
    }

    #[test]
    fn test_workspace_member_uses_name_field() {
        let doc = json!({
            "packages": {
                "packages/ui": { "name": "@acme/ui", "version": "0.1.0" },
                "packages/cli": { "version": "0.2.0" }
            }
        });

        let entries = extract(&doc).unwrap();
        assert_eq!(entries[0].name, "@acme/ui");
        assert_eq!(entries[1].name, "packages/cli");
    }

    #[test]
    fn test_preserves_document_order() {
        let doc: Value = serde_json::from_str(
            r#"{"packages": {
                "node_modules/zeta": {"version": "1.0.0"},
                "node_modules/alpha": {"version": "1.0.0"},
                "node_modules/mid": {"version": "1.0.0"}
            }}"#,
        )
        .unwrap();

        let names: Vec<_> = extract(&doc)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let doc = json!({
            "packages": {
                "node_modules/a": { "version": "1.0.0" },
                "node_modules/b": { "version": "1.0.0", "resolved": "", "integrity": "" },
                "node_modules/c": { "version": "1.0.0", "integrity": 42, "dev": true }
            }
        });

        let entries = extract(&doc).unwrap();
        assert_eq!(entries[0].resolved, None);
        assert_eq!(entries[0].integrity, None);
        assert_eq!(entries[1].resolved.as_deref(), Some(""));
        assert_eq!(entries[1].integrity.as_deref(), Some(""));
        assert_eq!(entries[2].integrity, None);
        assert!(entries[2].dev);
        assert!(!entries[0].dev);
    }

    #[test]
    fn test_skips_malformed_entries() {
        let doc = json!({
            "packages": {
                "node_modules/good": { "version": "1.0.0" },
                "node_modules/string": "not-an-object",
                "node_modules/linked": { "resolved": "../linked", "link": true },
                "node_modules/numeric": { "version": 3 },
                "node_modules/also-good": { "version": "2.0.0" }
            }
        });

        let names: Vec<_> = extract(&doc)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["good", "also-good"]);
    }

    #[test]
    fn test_v1_dependencies_depth_first() {
        let doc = json!({
            "lockfileVersion": 1,
            "dependencies": {
                "a": {
                    "version": "1.0.0",
                    "dependencies": {
                        "lodash": { "version": "4.17.20" }
                    }
                },
                "lodash": { "version": "4.17.21", "dev": true }
            }
        });

        let entries = extract(&doc).unwrap();
        let pairs: Vec<_> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.version.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("a", "1.0.0"), ("lodash", "4.17.20"), ("lodash", "4.17.21")]
        );
        assert!(entries[2].dev);
    }

    #[test]
    fn test_packages_preferred_over_dependencies() {
        let doc = json!({
            "packages": { "node_modules/from-packages": { "version": "1.0.0" } },
            "dependencies": { "from-dependencies": { "version": "1.0.0" } }
        });

        let entries = extract(&doc).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "from-packages");
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let err = parse_str("{ not json").unwrap_err();
        assert!(matches!(err, LockfileError::Parse(_)));
    }

    #[test]
    fn test_read_path_missing_file() {
        let err = read_path(Path::new("/nonexistent/package-lock.json")).unwrap_err();
        assert!(matches!(err, LockfileError::Io { .. }));
    }
}
