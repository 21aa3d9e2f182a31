//! Extractors turning tool-specific report fragments into issues.
//!
//! Each extractor knows one tool's report schema and queries the merged
//! document for it. Extractors are looked up by name from a fixed table;
//! all selected extractors run over the same document and their issues are
//! concatenated.

mod checkstyle;
mod coverage;
mod cpd;
mod pmd;

use std::path::Path;

use crate::error::{Error, Result};
use crate::merge::{Element, MergedDocument};
use crate::model::Issue;

pub use checkstyle::CheckstyleExtractor;
pub use coverage::CoverageExtractor;
pub use cpd::CpdExtractor;
pub use pmd::PmdExtractor;

/// Translates one tool's report schema into issues.
pub trait Extractor: Send + Sync {
    /// Registry name, e.g. "checkstyle".
    fn name(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    /// Extract all issues this extractor understands from the document.
    fn extract(&self, document: &MergedDocument) -> Result<Vec<Issue>>;
}

/// Factory function type for creating extractor instances.
pub type ExtractorFactory = fn() -> Box<dyn Extractor>;

/// All built-in extractors, in the order they run by default.
static EXTRACTORS: &[(&str, ExtractorFactory)] = &[
    ("checkstyle", checkstyle_factory),
    ("pmd", pmd_factory),
    ("cpd", cpd_factory),
    ("coverage", coverage_factory),
];

fn checkstyle_factory() -> Box<dyn Extractor> {
    Box::new(CheckstyleExtractor::new())
}

fn pmd_factory() -> Box<dyn Extractor> {
    Box::new(PmdExtractor::new())
}

fn cpd_factory() -> Box<dyn Extractor> {
    Box::new(CpdExtractor)
}

fn coverage_factory() -> Box<dyn Extractor> {
    Box::new(CoverageExtractor)
}

/// Names of all built-in extractors.
pub fn names() -> Vec<&'static str> {
    EXTRACTORS.iter().map(|(name, _)| *name).collect()
}

/// Get an extractor by name.
pub fn for_name(name: &str) -> Option<Box<dyn Extractor>> {
    EXTRACTORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, factory)| factory())
}

/// Every built-in extractor.
pub fn all() -> Vec<Box<dyn Extractor>> {
    EXTRACTORS.iter().map(|(_, factory)| factory()).collect()
}

/// Resolve a list of names; an empty list selects every extractor.
pub fn resolve<S: AsRef<str>>(selected: &[S]) -> Result<Vec<Box<dyn Extractor>>> {
    if selected.is_empty() {
        return Ok(all());
    }
    selected
        .iter()
        .map(|name| {
            let name = name.as_ref();
            for_name(name).ok_or_else(|| {
                Error::Validation(format!(
                    "unknown extractor {:?} (available: {})",
                    name,
                    names().join(", ")
                ))
            })
        })
        .collect()
}

/// Run every extractor over the document and concatenate their issues.
pub fn extract_all(
    document: &MergedDocument,
    extractors: &[Box<dyn Extractor>],
) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();
    for extractor in extractors {
        let found = extractor.extract(document)?;
        tracing::debug!(extractor = extractor.name(), issues = found.len(), "extracted issues");
        issues.extend(found);
    }
    Ok(issues)
}

/// Where an issue field is read from.
#[derive(Debug, Clone, Copy)]
pub enum Field {
    /// An attribute of the issue element.
    Attribute(&'static str),
    /// The trimmed text content of the issue element.
    Text,
    /// A constant value.
    Fixed(&'static str),
}

impl Field {
    fn read(&self, element: &Element) -> String {
        match self {
            Field::Attribute(name) => element.attribute(name).unwrap_or_default().to_string(),
            Field::Text => element.text().trim().to_string(),
            Field::Fixed(value) => value.to_string(),
        }
    }
}

/// Schema of a report that lists issues grouped per file element.
#[derive(Debug, Clone)]
pub struct ReportSchema {
    /// Tool name stored as `found_by`
    pub found_by: &'static str,
    /// Absolute query selecting the file elements
    pub file_query: &'static str,
    /// Attribute of a file element holding its path
    pub file_name_attr: &'static str,
    /// Query relative to a file element selecting its issue elements
    pub issue_query: &'static str,
    /// Attribute holding the first line
    pub line_start_attr: &'static str,
    /// Attribute holding the last line; defaults to the first line
    pub line_end_attr: Option<&'static str>,
    pub description: Field,
    pub severity: Field,
}

/// Extracts issues from documents following a [`ReportSchema`].
pub(crate) fn extract_with_schema(
    schema: &ReportSchema,
    document: &MergedDocument,
) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    for file in document.query(schema.file_query)? {
        let Some(name) = file.attribute(schema.file_name_attr) else {
            tracing::debug!(tool = schema.found_by, "file element without a name");
            continue;
        };
        let path = normalize_path(name);

        for element in document.query_from(file, schema.issue_query)? {
            let Some(line_start) = parse_line(element.attribute(schema.line_start_attr)) else {
                tracing::debug!(tool = schema.found_by, path = %path, "issue without a line");
                continue;
            };
            let line_end = schema
                .line_end_attr
                .and_then(|attr| parse_line(element.attribute(attr)))
                .unwrap_or(line_start)
                .max(line_start);

            match Issue::new(
                path.clone(),
                line_start,
                line_end,
                schema.found_by,
                schema.description.read(element),
                schema.severity.read(element),
            ) {
                Ok(issue) => issues.push(issue),
                Err(e) => {
                    tracing::debug!(tool = schema.found_by, path = %path, error = %e, "skipping issue")
                }
            }
        }
    }

    Ok(issues)
}

/// Parse a 1-based line number attribute.
pub(crate) fn parse_line(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|line| *line >= 1)
}

/// Canonical form of a reported path, so the same file reported by
/// different tools (or found by the source scan) maps to one key.
pub(crate) fn normalize_path(name: &str) -> String {
    match Path::new(name).canonicalize() {
        Ok(path) => path.to_string_lossy().to_string(),
        Err(_) => name.to_string(),
    }
}
