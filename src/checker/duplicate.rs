use std::collections::HashMap;

use crate::model::{Finding, FindingKind, PackageEntry};

use super::Check;

/// Flags package names that resolve to more than one version.
pub struct DuplicateCheck;

impl Check for DuplicateCheck {
    fn name(&self) -> &'static str {
        "Duplicate versions"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::DuplicateVersion
    }

    fn run(&self, entries: &[PackageEntry]) -> Vec<Finding> {
        check_duplicates(entries)
    }
}

struct VersionGroup<'a> {
    name: &'a str,
    first_index: usize,
    versions: Vec<&'a str>,
}

/// Emits one [`FindingKind::DuplicateVersion`] warning per package name with
/// two or more distinct versions.
///
/// Grouping is by the literal package name. Versions are listed in first-seen
/// order and findings come out in the order each name first appears.
pub fn check_duplicates(entries: &[PackageEntry]) -> Vec<Finding> {
    let mut groups: Vec<VersionGroup<'_>> = Vec::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();

    for (index, entry) in entries.iter().enumerate() {
        let slot = *by_name.entry(entry.name.as_str()).or_insert_with(|| {
            groups.push(VersionGroup {
                name: &entry.name,
                first_index: index,
                versions: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        if !group.versions.contains(&entry.version.as_str()) {
            group.versions.push(&entry.version);
        }
    }

    groups
        .into_iter()
        .filter(|group| group.versions.len() > 1)
        .map(|group| {
            Finding::warning(
                FindingKind::DuplicateVersion,
                group.name,
                format!(
                    "{} resolves to {} versions: {}",
                    group.name,
                    group.versions.len(),
                    group.versions.join(", ")
                ),
                group.first_index,
            )
        })
        .collect()
}
