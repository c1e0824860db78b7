pub mod audit;
pub mod checker;
pub mod config;
pub mod error;
pub mod lockfile;
pub mod model;
pub mod output;
pub mod policy;

pub use audit::{analyze, analyze_entries};
pub use config::Config;
pub use error::LockfileError;
pub use model::{CheckResult, Finding, FindingKind, PackageEntry, Severity};
