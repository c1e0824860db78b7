use crate::model::{Finding, FindingKind, PackageEntry};

use super::Check;

/// Public registries accepted when no allowlist is configured.
pub const DEFAULT_REGISTRIES: [&str; 2] =
    ["https://registry.npmjs.org", "https://registry.yarnpkg.com"];

/// Flags entries whose tarball URL is outside the allowlist.
pub struct RegistryCheck {
    allowed: Vec<String>,
}

impl RegistryCheck {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }
}

impl Default for RegistryCheck {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRIES.iter().map(|r| r.to_string()).collect())
    }
}

impl Check for RegistryCheck {
    fn name(&self) -> &'static str {
        "Registry allowlist"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::SuspiciousRegistry
    }

    fn run(&self, entries: &[PackageEntry]) -> Vec<Finding> {
        check_registries(entries, self.allowed.as_slice())
    }
}

/// Emits one [`FindingKind::SuspiciousRegistry`] warning per entry whose
/// `resolved` URL starts with none of `allowed`.
///
/// Entries without a `resolved` URL are not reported here.
pub fn check_registries<S: AsRef<str>>(entries: &[PackageEntry], allowed: &[S]) -> Vec<Finding> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let url = entry.resolved.as_deref()?;
            if allowed.iter().any(|prefix| url.starts_with(prefix.as_ref())) {
                return None;
            }
            Some(
                Finding::warning(
                    FindingKind::SuspiciousRegistry,
                    &entry.name,
                    format!(
                        "{}@{} resolves from an unapproved registry: {}",
                        entry.name, entry.version, url
                    ),
                    index,
                )
                .with_version(&entry.version),
            )
        })
        .collect()
}
