//! HTML output: one review page per file, an index page and the stylesheet.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;

use crate::annotate::{AnnotatedLine, AnnotatedSource};
use crate::error::{Error, Result};
use crate::model::{File, SEPARATOR};

/// Title shown on every review page.
pub const REVIEW_TITLE: &str = "Code Browser - Review View";

/// Title of the index page.
pub const INDEX_TITLE: &str = "Code Browser";

/// Stylesheet location relative to the output directory.
pub const STYLESHEET_PATH: &str = "css/codebrowser.css";

const REVIEW_TEMPLATE: &str = include_str!("templates/review.hbs");
const INDEX_TEMPLATE: &str = include_str!("templates/index.hbs");
const STYLESHEET: &str = include_str!("templates/codebrowser.css");

/// Path of `path` relative to the common prefix, never starting with a
/// separator.
pub fn short_path<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix)
        .unwrap_or(path)
        .trim_start_matches(SEPARATOR)
}

/// File name of the review page for `short_path`, relative to the output
/// root. `index.html` belongs to the index page, so a top-level `index`
/// source (and each `index_...` name that could collide with its
/// replacement) gets one more underscore.
pub fn page_path(short_path: &str) -> String {
    let reserved = short_path
        .strip_prefix("index")
        .is_some_and(|rest| rest.chars().all(|c| c == '_'));
    if reserved {
        format!("{}_.html", short_path)
    } else {
        format!("{}.html", short_path)
    }
}

/// Relative path from a page at `short_path` back to the output root.
pub fn css_path(short_path: &str) -> String {
    "../".repeat(short_path.matches(SEPARATOR).count())
}

#[derive(Serialize)]
struct ReviewPage<'a> {
    title: &'a str,
    file_path: &'a str,
    css_path: String,
    issue_count: usize,
    error_count: usize,
    warning_count: usize,
    lines: &'a [AnnotatedLine],
}

/// A file listed on the index page.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry<'a> {
    pub file: &'a File,
    /// Whether its review page was written
    pub rendered: bool,
}

#[derive(Serialize)]
struct IndexRow<'a> {
    short_path: &'a str,
    href: Option<String>,
    issue_count: usize,
    error_count: usize,
    warning_count: usize,
}

#[derive(Serialize)]
struct IndexPage<'a> {
    title: &'a str,
    common_prefix: &'a str,
    files: Vec<IndexRow<'a>>,
    file_count: usize,
    issue_count: usize,
    error_count: usize,
    warning_count: usize,
}

/// Writes pages below an output directory.
pub struct Renderer {
    templates: Handlebars<'static>,
    output_dir: PathBuf,
}

impl Renderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut templates = Handlebars::new();
        templates.register_template_string("review", REVIEW_TEMPLATE)?;
        templates.register_template_string("index", INDEX_TEMPLATE)?;
        Ok(Self {
            templates,
            output_dir: output_dir.into(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render the review page of one file. Returns the written path.
    pub fn render_review(
        &self,
        file: &File,
        source: &AnnotatedSource,
        common_prefix: &str,
    ) -> Result<PathBuf> {
        let short = short_path(file.path(), common_prefix);
        let page = ReviewPage {
            title: REVIEW_TITLE,
            file_path: short,
            css_path: css_path(short),
            issue_count: file.issue_count(),
            error_count: file.error_count(),
            warning_count: file.warning_count(),
            lines: &source.lines,
        };
        let html = self.templates.render("review", &page)?;

        let target = self.output_dir.join(page_path(short));
        write_atomic(&target, html.as_bytes())?;
        tracing::debug!(path = %target.display(), "wrote review page");
        Ok(target)
    }

    /// Render `index.html` listing `entries` in the given order. Files
    /// without a review page are listed without a link.
    pub fn render_index(&self, entries: &[IndexEntry], common_prefix: &str) -> Result<PathBuf> {
        let rows: Vec<IndexRow> = entries
            .iter()
            .map(|&IndexEntry { file, rendered }| {
                let short = short_path(file.path(), common_prefix);
                IndexRow {
                    short_path: short,
                    href: rendered.then(|| page_path(short)),
                    issue_count: file.issue_count(),
                    error_count: file.error_count(),
                    warning_count: file.warning_count(),
                }
            })
            .collect();

        let page = IndexPage {
            title: INDEX_TITLE,
            common_prefix,
            file_count: rows.len(),
            issue_count: rows.iter().map(|r| r.issue_count).sum(),
            error_count: rows.iter().map(|r| r.error_count).sum(),
            warning_count: rows.iter().map(|r| r.warning_count).sum(),
            files: rows,
        };
        let html = self.templates.render("index", &page)?;

        let target = self.output_dir.join("index.html");
        write_atomic(&target, html.as_bytes())?;
        Ok(target)
    }

    /// Write the stylesheet asset.
    pub fn write_stylesheet(&self) -> Result<PathBuf> {
        let target = self.output_dir.join(STYLESHEET_PATH);
        write_atomic(&target, STYLESHEET.as_bytes())?;
        Ok(target)
    }
}

/// Write through a temporary sibling and rename it into place.
fn write_atomic(target: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let temp = target.with_file_name(format!(".{}.tmp", file_name));

    std::fs::write(&temp, contents).map_err(|e| Error::io(&temp, e))?;
    std::fs::rename(&temp, target).map_err(|e| {
        let _ = std::fs::remove_file(&temp);
        Error::io(target, e)
    })
}
