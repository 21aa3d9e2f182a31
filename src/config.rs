//! Configuration file schema for codebrowser.
//!
//! A configuration file supplies defaults for the `generate` command; flags
//! given on the command line take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract;

/// Configuration file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codebrowser.yaml", ".codebrowser.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the XML reports
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Output directory for the generated pages
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Source tree whose clean files are rendered too
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Regular expressions; matching file paths are not rendered
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Extractor names; empty means all built-ins
    #[serde(default)]
    pub extractors: Vec<String>,
    /// Delete the output directory before generating
    #[serde(default)]
    pub clean_output: bool,
}

impl Config {
    /// Parse a configuration from a YAML file. Relative paths are resolved
    /// against the directory containing the file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Look for a configuration file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.log_dir, &mut self.output, &mut self.source]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Check patterns and extractor names.
    pub fn validate(&self) -> Result<()> {
        compile_patterns(&self.exclude)?;
        extract::resolve(&self.extractors)?;
        Ok(())
    }
}

/// Compile exclusion patterns, naming the first invalid one.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            let p = p.as_ref();
            Regex::new(p).map_err(|e| {
                Error::Validation(format!("invalid exclude pattern {:?}: {}", p, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse_str(
            r#"
log_dir: build/logs
output: build/code-browser
source: src
exclude: ["/vendor/", "Test\\.php$"]
extractors: [checkstyle, pmd]
clean_output: true
"#,
        )
        .unwrap();

        assert_eq!(config.log_dir, Some(PathBuf::from("build/logs")));
        assert_eq!(config.exclude.len(), 2);
        assert_eq!(config.extractors, vec!["checkstyle", "pmd"]);
        assert!(config.clean_output);
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(Config::parse_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::parse_str("logdir: x\n").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            exclude: vec!["(".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            extractors: vec!["padawan".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_file_resolves_paths_and_discovers() {
        let temp = TempDir::new().unwrap();
        assert!(Config::discover(temp.path()).is_none());

        let path = temp.path().join(".codebrowser.yaml");
        std::fs::write(&path, "log_dir: logs\noutput: /abs/out\n").unwrap();

        assert_eq!(Config::discover(temp.path()), Some(path.clone()));
        let config = Config::parse_file(&path).unwrap();
        assert_eq!(config.log_dir, Some(temp.path().join("logs")));
        assert_eq!(config.output, Some(PathBuf::from("/abs/out")));
        assert_eq!(config.source, None);
    }
}
