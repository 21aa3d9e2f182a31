//! Codebrowser - browsable source annotated with static-analysis issues.
//!
//! Reports produced by code analysis tools are merged into one document,
//! translated into issues, grouped per source file and rendered as HTML
//! pages where every line shows the issues reported for it.
//!
//! # Architecture
//!
//! - `merge`: parses report files into one queryable XML tree
//! - `extract`: per-tool extractors turning report fragments into issues
//! - `model`: `Issue` and `File` entities, path ordering and prefixes
//! - `registry`: the set of files to render, source scan and exclusion
//! - `highlight`: tree-sitter tokenizers producing classed tokens per line
//! - `annotate`: overlays issues on the tokenized lines
//! - `render`: Handlebars review pages, index page and stylesheet
//! - `runner`: the end-to-end pipeline
//!
//! # Adding a New Report Format
//!
//! Implement `Extractor` (see `src/extract/`) and add a factory to the
//! extractor table in `extract/mod.rs`.

pub mod annotate;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod logging;
pub mod merge;
pub mod model;
pub mod registry;
pub mod render;
pub mod report;
pub mod runner;

pub use annotate::{annotate, bucket_issues, AnnotatedLine, AnnotatedSource, SourceAnnotator};
pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{Error, Result};
pub use extract::Extractor;
pub use highlight::{tokenizer_for, Token, Tokenizer};
pub use merge::MergedDocument;
pub use model::{File, Issue};
pub use registry::FileRegistry;
pub use render::Renderer;
pub use runner::{RunOptions, RunSummary, Runner};

/// Initialize all subsystems.
///
/// Call this once at startup.
pub fn init() {
    highlight::init();
}
