//! Checkstyle report extractor.
//!
//! ```xml
//! <checkstyle version="5.0">
//!   <file name="/src/Foo.php">
//!     <error line="12" column="5" severity="error" message="..." source="..."/>
//!   </file>
//! </checkstyle>
//! ```

use super::{extract_with_schema, Extractor, Field, ReportSchema};
use crate::error::Result;
use crate::merge::MergedDocument;
use crate::model::Issue;

pub struct CheckstyleExtractor {
    schema: ReportSchema,
}

impl CheckstyleExtractor {
    pub fn new() -> Self {
        Self {
            schema: ReportSchema {
                found_by: "Checkstyle",
                file_query: "/codebrowser/checkstyle/file",
                file_name_attr: "name",
                issue_query: "error",
                line_start_attr: "line",
                line_end_attr: None,
                description: Field::Attribute("message"),
                severity: Field::Attribute("severity"),
            },
        }
    }
}

impl Default for CheckstyleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for CheckstyleExtractor {
    fn name(&self) -> &'static str {
        "checkstyle"
    }

    fn description(&self) -> &'static str {
        "Checkstyle / PHP_CodeSniffer XML reports"
    }

    fn extract(&self, document: &MergedDocument) -> Result<Vec<Issue>> {
        extract_with_schema(&self.schema, document)
    }
}
