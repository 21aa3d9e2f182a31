//! Canonical issue model: issues, per-file aggregates and path ordering.

mod file;
mod issue;
mod paths;

pub use file::{sort_files, File};
pub use issue::{Issue, ERROR_SEVERITY, WARNING_SEVERITY};
pub use paths::{common_path_prefix, compare_paths, SEPARATOR};
