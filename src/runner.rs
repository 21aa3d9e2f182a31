//! Run orchestration: reports in, browsable pages out.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use crate::annotate::SourceAnnotator;
use crate::config::{self, Config};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::Error;
use crate::extract;
use crate::highlight;
use crate::merge::MergedDocument;
use crate::model::File;
use crate::registry::FileRegistry;
use crate::render::{IndexEntry, Renderer};

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub log_dir: PathBuf,
    pub output_dir: PathBuf,
    pub source_dir: Option<PathBuf>,
    pub exclude: Vec<Regex>,
    /// Extractor names; empty selects every built-in extractor
    pub extractors: Vec<String>,
    pub clean_output: bool,
}

impl RunOptions {
    pub fn new(log_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            output_dir: output_dir.into(),
            source_dir: None,
            exclude: Vec::new(),
            extractors: Vec::new(),
            clean_output: false,
        }
    }

    /// Build options from a configuration; log and output directories are
    /// required.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let log_dir = config
            .log_dir
            .clone()
            .context("no log directory given (use --log or log_dir)")?;
        let output_dir = config
            .output
            .clone()
            .context("no output directory given (use --output or output)")?;
        config.validate()?;

        Ok(Self {
            log_dir,
            output_dir,
            source_dir: config.source.clone(),
            exclude: config::compile_patterns(&config.exclude)?,
            extractors: config.extractors.clone(),
            clean_output: config.clean_output,
        })
    }

    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    pub fn exclude(mut self, pattern: Regex) -> Self {
        self.exclude.push(pattern);
        self
    }

    pub fn extractors<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.extractors = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn clean_output(mut self, clean: bool) -> Self {
        self.clean_output = clean;
        self
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub common_prefix: String,
    /// Files in the registry after exclusion
    pub files: usize,
    /// Review pages written
    pub rendered: usize,
    /// Files whose page could not be produced
    pub skipped: usize,
    pub issues: usize,
    pub errors: usize,
    pub warnings: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Executes the whole pipeline for one set of options.
pub struct Runner {
    options: RunOptions,
}

impl Runner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Merge, extract, aggregate, annotate and render.
    pub fn run(&self) -> anyhow::Result<RunSummary> {
        highlight::init();
        let options = &self.options;
        let extractors = extract::resolve(&options.extractors)?;
        check_inputs(options)?;

        prepare_output(&options.output_dir, options.clean_output)?;

        let mut document = MergedDocument::new();
        let mut diagnostics = document
            .merge_directory(&options.log_dir)
            .with_context(|| format!("cannot read log directory {}", options.log_dir.display()))?;

        let issues = extract::extract_all(&document, &extractors)?;
        tracing::info!(issues = issues.len(), "extracted issues");
        if issues.is_empty() && !document.is_empty() {
            diagnostics.push(Diagnostic::warn(
                DiagnosticKind::EmptyInput,
                options.log_dir.display().to_string(),
                "no issues found in the log files",
            ));
        }

        let mut registry = FileRegistry::from_issues(issues)?;
        if let Some(source_dir) = &options.source_dir {
            registry.add_source_dir(source_dir)?;
        }
        let excluded = registry.exclude_all(&options.exclude);
        tracing::info!(files = registry.len(), excluded, "collected files");

        let files = registry.sorted_files();
        let common_prefix = registry.common_path_prefix();
        let renderer = Renderer::new(&options.output_dir)?;
        let annotator = SourceAnnotator::new();

        let results: Vec<_> = files
            .par_iter()
            .map(|file| {
                annotator
                    .annotate_file(file)
                    .and_then(|source| renderer.render_review(file, &source, &common_prefix))
            })
            .collect();

        let mut entries: Vec<IndexEntry> = Vec::with_capacity(files.len());
        for (file, result) in files.iter().zip(results) {
            if let Err(e) = &result {
                diagnostics.push(render_diagnostic(file, e));
            }
            entries.push(IndexEntry {
                file,
                rendered: result.is_ok(),
            });
        }
        let rendered = entries.iter().filter(|e| e.rendered).count();

        renderer.render_index(&entries, &common_prefix)?;
        renderer.write_stylesheet()?;

        let summary = RunSummary {
            output_dir: options.output_dir.clone(),
            common_prefix,
            files: files.len(),
            rendered,
            skipped: files.len() - rendered,
            issues: files.iter().map(|f| f.issue_count()).sum(),
            errors: files.iter().map(|f| f.error_count()).sum(),
            warnings: files.iter().map(|f| f.warning_count()).sum(),
            diagnostics,
        };
        tracing::info!(
            rendered = summary.rendered,
            skipped = summary.skipped,
            output = %summary.output_dir.display(),
            "generated code browser"
        );
        Ok(summary)
    }
}

/// Fail before anything is written if an input directory is missing.
fn check_inputs(options: &RunOptions) -> anyhow::Result<()> {
    anyhow::ensure!(
        options.log_dir.is_dir(),
        "cannot read log directory {}: not a directory",
        options.log_dir.display()
    );
    if let Some(source_dir) = &options.source_dir {
        anyhow::ensure!(
            source_dir.is_dir(),
            "cannot read source directory {}: not a directory",
            source_dir.display()
        );
    }
    Ok(())
}

/// Create the output directory, deleting it first when asked to.
fn prepare_output(output_dir: &Path, clean: bool) -> anyhow::Result<()> {
    if clean && output_dir.exists() {
        tracing::info!(path = %output_dir.display(), "cleaning output directory");
        std::fs::remove_dir_all(output_dir)
            .with_context(|| format!("cannot clean {}", output_dir.display()))?;
    }
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))
}

fn render_diagnostic(file: &File, error: &Error) -> Diagnostic {
    let kind = match error {
        Error::SourceUnreadable { .. } => DiagnosticKind::SourceUnreadable,
        _ => DiagnosticKind::RenderFailed,
    };
    Diagnostic::warn(kind, file.path(), error.to_string())
}
