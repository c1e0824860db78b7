//! Severity policy and result aggregation.

use crate::model::{CheckResult, Finding, Severity};

/// Merges findings from all passes into a [`CheckResult`].
///
/// Findings are ordered by kind (registry, integrity, duplicate) and then by
/// the entry they concern, whatever order the passes ran in. Under `strict`
/// every finding is promoted to [`Severity::Error`].
///
/// # Example
///
/// ```
/// use lockaudit::model::{Finding, FindingKind};
/// use lockaudit::policy::aggregate;
///
/// let findings = vec![Finding::warning(
///     FindingKind::MissingIntegrity,
///     "left-pad",
///     "left-pad@1.3.0 has no integrity digest",
///     0,
/// )];
///
/// assert!(aggregate(findings.clone(), false).passed());
/// assert!(!aggregate(findings, true).passed());
/// ```
pub fn aggregate(mut findings: Vec<Finding>, strict: bool) -> CheckResult {
    findings.sort_by_key(|f| (f.kind.rank(), f.entry_index));

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for mut finding in findings {
        if strict {
            finding.severity = Severity::Error;
        }
        match finding.severity {
            Severity::Error => errors.push(finding),
            Severity::Warning => warnings.push(finding),
        }
    }

    CheckResult::new(errors, warnings)
}
