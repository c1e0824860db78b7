//! The full audit pipeline: extract, check, aggregate.

use serde_json::Value;
use tracing::{debug, info};

use crate::checker::default_checks;
use crate::config::Config;
use crate::error::Result;
use crate::lockfile::extract;
use crate::model::{CheckResult, FindingKind, PackageEntry};
use crate::policy::aggregate;

/// Audits a parsed lockfile document.
///
/// # Errors
///
/// Returns [`LockfileError::Malformed`](crate::LockfileError::Malformed) if
/// the document is not a lockfile. Findings never produce an error.
///
/// # Example
///
/// ```
/// use lockaudit::{analyze, Config};
/// use serde_json::json;
///
/// let doc = json!({
///     "packages": {
///         "node_modules/evil-package": {
///             "version": "1.0.0",
///             "resolved": "https://malicious-registry.com/evil-package/-/evil-package-1.0.0.tgz",
///             "integrity": "sha512-abc"
///         }
///     }
/// });
///
/// let result = analyze(&doc, &Config::default()).unwrap();
/// assert!(result.passed());
/// assert_eq!(result.warnings().len(), 1);
/// ```
pub fn analyze(document: &Value, config: &Config) -> Result<CheckResult> {
    let entries = extract(document)?;
    Ok(analyze_entries(&entries, config))
}

/// Audits already extracted entries.
pub fn analyze_entries(entries: &[PackageEntry], config: &Config) -> CheckResult {
    let selected: Vec<PackageEntry> = if config.skip_dev {
        entries.iter().filter(|e| !e.dev).cloned().collect()
    } else {
        entries.to_vec()
    };

    let mut findings = Vec::new();
    for check in default_checks(config) {
        let found = check.run(&selected);
        debug!(
            check = check.name(),
            kind = %check.kind(),
            count = found.len(),
            "check finished"
        );
        findings.extend(found);
    }

    let ignore = &config.ignore;
    findings.retain(|f| {
        if ignore.should_ignore_package(&f.package) {
            return false;
        }
        !(f.kind == FindingKind::DuplicateVersion && ignore.should_ignore_duplicates(&f.package))
    });

    let result = aggregate(findings, config.strict);
    info!(
        packages = selected.len(),
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        passed = result.passed(),
        "lockfile audit complete"
    );
    result
}
