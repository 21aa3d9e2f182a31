//! PMD / PHPMD report extractor.
//!
//! The violation text is the description and the PMD priority is kept as
//! the severity string.

use super::{extract_with_schema, Extractor, Field, ReportSchema};
use crate::error::Result;
use crate::merge::MergedDocument;
use crate::model::Issue;

pub struct PmdExtractor {
    schema: ReportSchema,
}

impl PmdExtractor {
    pub fn new() -> Self {
        Self {
            schema: ReportSchema {
                found_by: "PMD",
                file_query: "/codebrowser/pmd/file",
                file_name_attr: "name",
                issue_query: "violation",
                line_start_attr: "beginline",
                line_end_attr: Some("endline"),
                description: Field::Text,
                severity: Field::Attribute("priority"),
            },
        }
    }
}

impl Default for PmdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PmdExtractor {
    fn name(&self) -> &'static str {
        "pmd"
    }

    fn description(&self) -> &'static str {
        "PMD / PHPMD XML reports"
    }

    fn extract(&self, document: &MergedDocument) -> Result<Vec<Issue>> {
        extract_with_schema(&self.schema, document)
    }
}
