//! Check passes run over extracted lockfile entries.
//!
//! Every pass is stateless and only reads the entry slice, so passes can run
//! in any order. The aggregator restores a stable output order afterwards.

mod duplicate;
mod integrity;
mod registry;

pub use duplicate::{check_duplicates, DuplicateCheck};
pub use integrity::{check_integrity, IntegrityCheck};
pub use registry::{check_registries, RegistryCheck, DEFAULT_REGISTRIES};

use crate::config::Config;
use crate::model::{Finding, FindingKind, PackageEntry};

pub trait Check {
    fn name(&self) -> &'static str;
    fn kind(&self) -> FindingKind;
    fn run(&self, entries: &[PackageEntry]) -> Vec<Finding>;
}

/// The registry, integrity and duplicate passes, in that order.
pub fn default_checks(config: &Config) -> Vec<Box<dyn Check>> {
    vec![
        Box::new(RegistryCheck::new(config.allowed_registries.clone())),
        Box::new(IntegrityCheck),
        Box::new(DuplicateCheck),
    ]
}
