use std::fs;
use std::path::PathBuf;

use lockaudit::{analyze_entries, lockfile, Config, FindingKind, LockfileError, Severity};
use tempfile::TempDir;

const MIXED_LOCK: &str = r#"{
  "name": "storefront",
  "version": "2.3.0",
  "lockfileVersion": 3,
  "requires": true,
  "packages": {
    "": {
      "name": "storefront",
      "version": "2.3.0",
      "dependencies": { "lodash": "^4.17.20", "evil-package": "1.0.0" }
    },
    "node_modules/lodash": {
      "version": "4.17.20",
      "resolved": "https://registry.npmjs.org/lodash/-/lodash-4.17.20.tgz",
      "integrity": "sha512-PlhdFcillOINfeV7Ni6oF1TAEayyZBoZ8bcshTHqOYJYlrqzRK5hagpagky5o4HfCzzd1TRkXPMFq6cKk9rGmA=="
    },
    "node_modules/evil-package": {
      "version": "1.0.0",
      "resolved": "https://malicious-registry.com/evil-package/-/evil-package-1.0.0.tgz",
      "integrity": "sha512-AAAA"
    },
    "node_modules/unsigned": {
      "version": "0.0.1",
      "resolved": "https://registry.yarnpkg.com/unsigned/-/unsigned-0.0.1.tgz",
      "dev": true
    },
    "node_modules/report-kit/node_modules/lodash": {
      "version": "4.17.21",
      "resolved": "https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz",
      "integrity": "sha512-v2kDEe57lecTulaDIuNTPy3Ry4gLGJ6Z1O3vE1krgXZNrsQ+LFTGHVxVjcXPs17LhbZVGedAJv8XZ1tvj5FvSg=="
    }
  }
}
"#;

fn write_lockfile(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package-lock.json");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_mixed_lockfile_lenient() {
    let (_dir, path) = write_lockfile(MIXED_LOCK);
    let entries = lockfile::read_path(&path).unwrap();
    assert_eq!(entries.len(), 4);

    let result = analyze_entries(&entries, &Config::default());
    assert!(result.passed());
    assert!(result.errors().is_empty());

    let summary: Vec<_> = result
        .warnings()
        .iter()
        .map(|f| (f.kind, f.package.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (FindingKind::SuspiciousRegistry, "evil-package"),
            (FindingKind::MissingIntegrity, "unsigned"),
            (FindingKind::DuplicateVersion, "lodash"),
        ]
    );
    assert!(result.warnings()[0]
        .detail
        .contains("https://malicious-registry.com/evil-package/-/evil-package-1.0.0.tgz"));
    assert!(result.warnings()[2].detail.contains("4.17.20, 4.17.21"));
}

#[test]
fn test_mixed_lockfile_strict() {
    let (_dir, path) = write_lockfile(MIXED_LOCK);
    let entries = lockfile::read_path(&path).unwrap();

    let config = Config {
        strict: true,
        ..Config::default()
    };
    let result = analyze_entries(&entries, &config);

    assert!(!result.passed());
    assert!(result.warnings().is_empty());
    assert_eq!(result.errors().len(), 3);
    assert!(result.errors().iter().all(|f| f.severity == Severity::Error));
}

#[test]
fn test_v1_lockfile() {
    let (_dir, path) = write_lockfile(
        r#"{
          "name": "legacy",
          "lockfileVersion": 1,
          "dependencies": {
            "debug": {
              "version": "2.6.9",
              "resolved": "https://registry.npmjs.org/debug/-/debug-2.6.9.tgz",
              "integrity": "sha512-a",
              "dependencies": {
                "ms": {
                  "version": "2.0.0",
                  "resolved": "https://registry.npmjs.org/ms/-/ms-2.0.0.tgz",
                  "integrity": "sha1-b"
                }
              }
            },
            "ms": {
              "version": "2.1.3",
              "resolved": "https://registry.npmjs.org/ms/-/ms-2.1.3.tgz",
              "integrity": "sha512-c"
            }
          }
        }"#,
    );

    let entries = lockfile::read_path(&path).unwrap();
    let result = analyze_entries(&entries, &Config::default());

    assert_eq!(result.warnings().len(), 1);
    assert_eq!(result.warnings()[0].kind, FindingKind::DuplicateVersion);
    assert_eq!(result.warnings()[0].package, "ms");
}

#[test]
fn test_empty_packages_passes_strict() {
    let (_dir, path) = write_lockfile(r#"{ "lockfileVersion": 3, "packages": {} }"#);
    let entries = lockfile::read_path(&path).unwrap();

    let config = Config {
        strict: true,
        ..Config::default()
    };
    let result = analyze_entries(&entries, &config);
    assert!(result.passed());
    assert_eq!(result.findings().count(), 0);
}

#[test]
fn test_malformed_and_invalid_documents() {
    let (_dir, path) = write_lockfile(r#"{ "name": "no-packages", "lockfileVersion": 3 }"#);
    assert!(matches!(
        lockfile::read_path(&path),
        Err(LockfileError::Malformed(_))
    ));

    let (_dir, path) = write_lockfile("not json at all");
    assert!(matches!(
        lockfile::read_path(&path),
        Err(LockfileError::Parse(_))
    ));
}

#[test]
fn test_project_config_applies() {
    let (dir, path) = write_lockfile(MIXED_LOCK);
    fs::write(
        dir.path().join(".lockaudit.toml"),
        "skip_dev = true\n\n[ignore]\nduplicates = [\"lodash\"]\n",
    )
    .unwrap();

    let config = Config::load_for(&path).unwrap();
    let entries = lockfile::read_path(&path).unwrap();
    let result = analyze_entries(&entries, &config);

    assert_eq!(result.warnings().len(), 1);
    assert_eq!(result.warnings()[0].kind, FindingKind::SuspiciousRegistry);
}

#[test]
fn test_repeated_runs_identical() {
    let (_dir, path) = write_lockfile(MIXED_LOCK);
    let config = Config::default();

    let first = analyze_entries(&lockfile::read_path(&path).unwrap(), &config);
    let second = analyze_entries(&lockfile::read_path(&path).unwrap(), &config);
    assert_eq!(first, second);
}
