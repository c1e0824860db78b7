//! Core data types for lockfile entries, findings, and audit results.
//!
//! - [`PackageEntry`] - One resolved package record from the lockfile
//! - [`Finding`] - An issue raised by a check pass
//! - [`CheckResult`] - The aggregated verdict
//!
//! # Example
//!
//! ```
//! use lockaudit::{CheckResult, PackageEntry};
//!
//! let entry = PackageEntry::new("lodash", "4.17.21")
//!     .with_resolved("https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz");
//! assert!(!entry.has_integrity());
//!
//! let result = CheckResult::new(vec![], vec![]);
//! assert!(result.passed());
//! ```

mod finding;
mod package;

pub use finding::*;
pub use package::*;
