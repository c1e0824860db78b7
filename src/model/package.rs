use serde::{Deserialize, Serialize};

/// One resolved package record from a lockfile.
///
/// `resolved` and `integrity` stay `None` when the lockfile omits them, so an
/// absent field is distinguishable from one that is present but empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    #[serde(default)]
    pub dev: bool,
}

impl PackageEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            resolved: None,
            integrity: None,
            dev: false,
        }
    }

    pub fn with_resolved(mut self, url: impl Into<String>) -> Self {
        self.resolved = Some(url.into());
        self
    }

    pub fn with_integrity(mut self, digest: impl Into<String>) -> Self {
        self.integrity = Some(digest.into());
        self
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// Returns true if the entry carries a non-empty integrity digest.
    pub fn has_integrity(&self) -> bool {
        self.integrity.as_deref().is_some_and(|d| !d.is_empty())
    }
}
