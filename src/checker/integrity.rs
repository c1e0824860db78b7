use crate::model::{Finding, FindingKind, PackageEntry};

use super::Check;

/// Flags entries without an integrity digest.
///
/// Only presence is checked; the digest format is left to npm.
pub struct IntegrityCheck;

impl Check for IntegrityCheck {
    fn name(&self) -> &'static str {
        "Integrity presence"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::MissingIntegrity
    }

    fn run(&self, entries: &[PackageEntry]) -> Vec<Finding> {
        check_integrity(entries)
    }
}

/// Emits one [`FindingKind::MissingIntegrity`] warning per entry whose
/// digest is absent or empty.
pub fn check_integrity(entries: &[PackageEntry]) -> Vec<Finding> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| !entry.has_integrity())
        .map(|(index, entry)| {
            Finding::warning(
                FindingKind::MissingIntegrity,
                &entry.name,
                format!("{}@{} has no integrity digest", entry.name, entry.version),
                index,
            )
            .with_version(&entry.version)
        })
        .collect()
}
