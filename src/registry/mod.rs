//! The set of files to render.
//!
//! The registry is built in a fixed order: aggregate the extracted issues,
//! optionally widen to every file of a source tree, then apply exclusion
//! patterns. Widening first lets the patterns also remove clean files.

mod scan;

pub use scan::collect_source_files;

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

use crate::error::Result;
use crate::model::{common_path_prefix, compare_paths, File, Issue};

/// Files keyed by absolute path.
#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    files: HashMap<String, File>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group issues into files.
    pub fn from_issues<I>(issues: I) -> Result<Self>
    where
        I: IntoIterator<Item = Issue>,
    {
        let mut registry = Self::new();
        for issue in issues {
            registry.add_issue(issue)?;
        }
        Ok(registry)
    }

    /// Add an issue to the file it belongs to, creating the file if needed.
    pub fn add_issue(&mut self, issue: Issue) -> Result<()> {
        self.files
            .entry(issue.file_path().to_string())
            .or_insert_with(|| File::new(issue.file_path()))
            .add_issue(issue)
    }

    /// Insert a file, or merge it into the registered file of the same path.
    pub fn add_file(&mut self, file: File) -> Result<()> {
        match self.files.get_mut(file.path()) {
            Some(existing) => existing.merge_with(file),
            None => {
                self.files.insert(file.path().to_string(), file);
                Ok(())
            }
        }
    }

    /// Make sure every regular file under `root` is registered. Returns the
    /// number of files that had no issues and were added.
    pub fn add_source_dir(&mut self, root: &Path) -> Result<usize> {
        let mut added = 0;
        for path in collect_source_files(root)? {
            let path = path.to_string_lossy().to_string();
            if !self.files.contains_key(&path) {
                self.files.insert(path.clone(), File::new(path));
                added += 1;
            }
        }
        tracing::debug!(root = %root.display(), added, "added source files");
        Ok(added)
    }

    /// Remove every file whose path matches `pattern`. Returns the number of
    /// removed files.
    pub fn exclude_matching(&mut self, pattern: &Regex) -> usize {
        let before = self.files.len();
        self.files.retain(|path, _| !pattern.is_match(path));
        let removed = before - self.files.len();
        if removed > 0 {
            tracing::debug!(pattern = %pattern, removed, "excluded files");
        }
        removed
    }

    /// Apply several exclusion patterns.
    pub fn exclude_all(&mut self, patterns: &[Regex]) -> usize {
        patterns.iter().map(|p| self.exclude_matching(p)).sum()
    }

    /// Longest directory prefix shared by all registered paths.
    pub fn common_path_prefix(&self) -> String {
        common_path_prefix(self.files.keys().map(String::as_str))
    }

    /// Registered files in presentation order.
    pub fn sorted_files(&self) -> Vec<&File> {
        let mut files: Vec<&File> = self.files.values().collect();
        files.sort_by(|a, b| compare_paths(a.path(), b.path()));
        files
    }

    pub fn get(&self, path: &str) -> Option<&File> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of issues over all files.
    pub fn issue_count(&self) -> usize {
        self.files.values().map(File::issue_count).sum()
    }
}
