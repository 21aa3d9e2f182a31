//! Merging of report documents into one queryable tree.
//!
//! Every report found in the log directory is parsed and its root element
//! is appended under a single `codebrowser` root. Extractors then query the
//! merged tree for the fragments of their own schema.

mod query;
mod xml;

pub use query::Query;
pub use xml::{Element, Node};

use std::path::Path;

use walkdir::WalkDir;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{Error, Result};

/// File extension of report documents.
pub const REPORT_EXTENSION: &str = "xml";

/// The union of all parsed report documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedDocument {
    root: Element,
}

impl Default for MergedDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MergedDocument {
    /// Name of the element all reports are merged under.
    pub const ROOT: &'static str = "codebrowser";

    pub fn new() -> Self {
        Self {
            root: Element::new(Self::ROOT),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// True when no report content has been merged.
    pub fn is_empty(&self) -> bool {
        self.root.children().is_empty()
    }

    /// Merge a single document given as text. `origin` names the document in
    /// errors.
    pub fn merge_str(&mut self, xml: &str, origin: &str) -> Result<()> {
        let document = xml::parse_document(xml).map_err(|reason| Error::MalformedInput {
            path: origin.to_string(),
            reason,
        })?;
        self.root.push(Node::Element(document));
        Ok(())
    }

    /// Read and merge one report file.
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let origin = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| Error::MalformedInput {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        let text = String::from_utf8(bytes).map_err(|e| Error::MalformedInput {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        self.merge_str(&text, &origin)
    }

    /// Merge every report file found recursively under `dir`.
    ///
    /// Reports that fail to parse are skipped and reported as diagnostics.
    /// An empty result is reported too, but is not an error.
    pub fn merge_directory(&mut self, dir: &Path) -> Result<Vec<Diagnostic>> {
        if !dir.is_dir() {
            return Err(Error::io(
                dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut diagnostics = Vec::new();
        let mut merged = 0usize;

        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| dir.display().to_string());
                    diagnostics.push(Diagnostic::warn(
                        DiagnosticKind::MalformedInput,
                        path,
                        format!("cannot read report location: {}", e),
                    ));
                    continue;
                }
            };

            let path = entry.path();
            let is_report = entry.file_type().is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(REPORT_EXTENSION);
            if !is_report {
                continue;
            }

            tracing::debug!(path = %path.display(), "merging report");
            match self.merge_file(path) {
                Ok(()) => merged += 1,
                Err(e) => diagnostics.push(Diagnostic::warn(
                    DiagnosticKind::MalformedInput,
                    path.display().to_string(),
                    format!("{}; make sure it contains valid xml", e),
                )),
            }
        }

        if self.is_empty() {
            diagnostics.push(Diagnostic::warn(
                DiagnosticKind::EmptyInput,
                dir.display().to_string(),
                "no valid log files found",
            ));
        }

        tracing::info!(merged, skipped = diagnostics.len(), "merged report files");
        Ok(diagnostics)
    }

    /// Select elements with a path query, see [`Query`].
    pub fn query(&self, expr: &str) -> Result<Vec<&Element>> {
        Ok(Query::parse(expr)?.select(&self.root, None))
    }

    /// Select elements with a path query relative to `context`.
    pub fn query_from<'a>(&'a self, context: &'a Element, expr: &str) -> Result<Vec<&'a Element>> {
        Ok(Query::parse(expr)?.select(&self.root, Some(context)))
    }
}
