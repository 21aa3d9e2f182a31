//! A single reported defect.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Severity string counted by `File::error_count`.
pub const ERROR_SEVERITY: &str = "error";

/// Severity string counted by `File::warning_count`.
pub const WARNING_SEVERITY: &str = "warning";

/// A defect reported by one tool for an inclusive line range of one file.
///
/// `severity` is free text as emitted by the tool. Only the exact strings
/// `"error"` and `"warning"` are counted anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    file_path: String,
    line_start: usize,
    line_end: usize,
    found_by: String,
    description: String,
    severity: String,
}

impl Issue {
    /// Create an issue. Lines are 1-based and `line_start <= line_end`.
    pub fn new(
        file_path: impl Into<String>,
        line_start: usize,
        line_end: usize,
        found_by: impl Into<String>,
        description: impl Into<String>,
        severity: impl Into<String>,
    ) -> Result<Self> {
        let file_path = file_path.into();
        if line_start == 0 || line_start > line_end {
            return Err(Error::Validation(format!(
                "invalid line range {}-{} for {}",
                line_start, line_end, file_path
            )));
        }
        Ok(Self {
            file_path,
            line_start,
            line_end,
            found_by: found_by.into(),
            description: description.into(),
            severity: severity.into(),
        })
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn line_start(&self) -> usize {
        self.line_start
    }

    pub fn line_end(&self) -> usize {
        self.line_end
    }

    /// Name of the tool that reported the issue.
    pub fn found_by(&self) -> &str {
        &self.found_by
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn severity(&self) -> &str {
        &self.severity
    }

    /// Lines covered by this issue.
    pub fn lines(&self) -> std::ops::RangeInclusive<usize> {
        self.line_start..=self.line_end
    }

    pub fn is_error(&self) -> bool {
        self.severity == ERROR_SEVERITY
    }

    pub fn is_warning(&self) -> bool {
        self.severity == WARNING_SEVERITY
    }

    /// Tooltip text shown for this issue on an annotated line.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.found_by, self.description)
    }
}
