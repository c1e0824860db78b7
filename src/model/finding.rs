use serde::{Deserialize, Serialize};

/// The rule a finding was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    SuspiciousRegistry,
    MissingIntegrity,
    DuplicateVersion,
}

impl FindingKind {
    /// Position of this kind in reported output.
    pub fn rank(&self) -> u8 {
        match self {
            FindingKind::SuspiciousRegistry => 0,
            FindingKind::MissingIntegrity => 1,
            FindingKind::DuplicateVersion => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::SuspiciousRegistry => "suspicious-registry",
            FindingKind::MissingIntegrity => "missing-integrity",
            FindingKind::DuplicateVersion => "duplicate-version",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FindingKind::SuspiciousRegistry => "Suspicious registry",
            FindingKind::MissingIntegrity => "Missing integrity",
            FindingKind::DuplicateVersion => "Duplicate version",
        }
    }

    pub fn all() -> [FindingKind; 3] {
        [
            FindingKind::SuspiciousRegistry,
            FindingKind::MissingIntegrity,
            FindingKind::DuplicateVersion,
        ]
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A single issue detected by one check pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub detail: String,
    /// Index of the first lockfile entry this finding concerns.
    #[serde(skip)]
    pub entry_index: usize,
}

impl Finding {
    pub fn warning(
        kind: FindingKind,
        package: impl Into<String>,
        detail: impl Into<String>,
        entry_index: usize,
    ) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            package: package.into(),
            version: None,
            detail: detail.into(),
            entry_index,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// The verdict of a full audit.
///
/// `passed` is true exactly when `errors` is empty. Fields are private so the
/// only ways to build one are [`CheckResult::new`] and deserialization, and
/// both derive `passed` from `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CheckResultRepr")]
pub struct CheckResult {
    passed: bool,
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

/// Wire shape of [`CheckResult`]; a serialized `passed` is ignored.
#[derive(Deserialize)]
struct CheckResultRepr {
    #[serde(default)]
    errors: Vec<Finding>,
    #[serde(default)]
    warnings: Vec<Finding>,
}

impl From<CheckResultRepr> for CheckResult {
    fn from(repr: CheckResultRepr) -> Self {
        CheckResult::new(repr.errors, repr.warnings)
    }
}

impl CheckResult {
    pub fn new(errors: Vec<Finding>, warnings: Vec<Finding>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// All findings, errors first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn count_of(&self, kind: FindingKind) -> usize {
        self.findings().filter(|f| f.kind == kind).count()
    }
}
