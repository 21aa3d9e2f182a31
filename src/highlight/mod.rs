//! Source tokenizers producing style-tagged lines.
//!
//! This module provides:
//! - `Tokenizer` trait: turns source text into lines of classed tokens
//! - A registry mapping file extensions to tokenizer factories
//! - `PlainTokenizer`, the fallback for unknown file types
//! - Tree-sitter tokenizers for the supported languages

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use phf::phf_map;
use serde::Serialize;

#[cfg(feature = "tree-sitter")]
pub mod treesitter;

#[cfg(feature = "tree-sitter")]
pub mod languages;

/// A piece of source text with an optional style class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub class: Option<&'static str>,
}

/// One source line as a sequence of tokens.
pub type TokenLine = Vec<Token>;

/// Tokenizer trait for syntax highlighting.
///
/// Concatenating the token texts of each line and joining the lines with
/// `\n` must reproduce the input exactly. Empty input yields one empty line.
pub trait Tokenizer: Send + Sync {
    /// Return the language this tokenizer handles (e.g., "php", "plain").
    fn language(&self) -> &str;

    /// Split source text into lines of tokens.
    fn tokenize(&self, source: &str) -> Vec<TokenLine>;
}

/// Accumulates tokens and starts a new line at every `\n`.
#[derive(Debug)]
pub struct LineBuilder {
    lines: Vec<TokenLine>,
}

impl Default for LineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuilder {
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
        }
    }

    /// Append text; line breaks inside it start new lines.
    pub fn push(&mut self, text: &str, class: Option<&'static str>) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.push_part(first, class);
        }
        for part in parts {
            self.lines.push(Vec::new());
            self.push_part(part, class);
        }
    }

    fn push_part(&mut self, text: &str, class: Option<&'static str>) {
        if text.is_empty() {
            return;
        }
        if let Some(line) = self.lines.last_mut() {
            line.push(Token {
                text: text.to_string(),
                class,
            });
        }
    }

    pub fn finish(self) -> Vec<TokenLine> {
        self.lines
    }
}

/// Fallback tokenizer: one unclassed token per non-empty line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn language(&self) -> &str {
        "plain"
    }

    fn tokenize(&self, source: &str) -> Vec<TokenLine> {
        let mut builder = LineBuilder::new();
        builder.push(source, None);
        builder.finish()
    }
}

/// Rebuild the source text from tokenized lines.
pub fn join_lines(lines: &[TokenLine]) -> String {
    lines
        .iter()
        .map(|line| line.iter().map(|t| t.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Factory function type for creating tokenizer instances.
pub type TokenizerFactory = fn() -> Box<dyn Tokenizer>;

lazy_static::lazy_static! {
    /// Global tokenizer registry mapping file extensions to tokenizer factories.
    static ref REGISTRY: RwLock<HashMap<String, TokenizerFactory>> = RwLock::new(HashMap::new());
}

/// Interpreters named on a `#!` line, mapped to the extension whose
/// tokenizer handles them.
static INTERPRETERS: phf::Map<&'static str, &'static str> = phf_map! {
    "php" => "php",
    "python" => "py",
    "python3" => "py",
    "node" => "js",
};

/// Register a tokenizer factory for a file extension (without the dot).
pub fn register(ext: &str, factory: TokenizerFactory) {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    registry.insert(ext.to_ascii_lowercase(), factory);
}

/// Get a tokenizer for the given file extension.
/// Returns None if no tokenizer is registered for the extension.
pub fn for_extension(ext: &str) -> Option<Box<dyn Tokenizer>> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    registry.get(&ext.to_ascii_lowercase()).map(|factory| factory())
}

/// Return all registered file extensions, sorted.
pub fn supported_extensions() -> Vec<String> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let mut exts: Vec<String> = registry.keys().cloned().collect();
    exts.sort();
    exts
}

/// Pick the tokenizer for a file: by extension first, then by content
/// (`<?php` opening tag or a `#!` interpreter line), else the plain one.
pub fn tokenizer_for(path: &Path, source: &str) -> Box<dyn Tokenizer> {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(for_extension);
    if let Some(tokenizer) = by_extension {
        return tokenizer;
    }

    sniff_extension(source)
        .and_then(for_extension)
        .unwrap_or_else(|| Box::new(PlainTokenizer))
}

/// Guess an extension from the first line of the source.
fn sniff_extension(source: &str) -> Option<&'static str> {
    let first_line = source.lines().next()?.trim();
    if first_line.starts_with("<?php") {
        return Some("php");
    }
    let interpreter_line = first_line.strip_prefix("#!")?;
    // "#!/usr/bin/env php" or "#!/usr/bin/php"
    let mut words = interpreter_line.split_whitespace();
    let program = words.next()?.rsplit('/').next()?;
    let program = if program == "env" { words.next()? } else { program };
    INTERPRETERS.get(program).copied()
}

/// Initialize the tokenizer registry with all available language tokenizers.
/// Call this once at startup before using tokenizers.
#[cfg(feature = "tree-sitter")]
pub fn init() {
    languages::register_all();
}

/// Initialize (no-op when tree-sitter is disabled).
#[cfg(not(feature = "tree-sitter"))]
pub fn init() {
    // Only the plain tokenizer is available
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct MockTokenizer;

    impl Tokenizer for MockTokenizer {
        fn language(&self) -> &str {
            "mock"
        }

        fn tokenize(&self, source: &str) -> Vec<TokenLine> {
            let mut builder = LineBuilder::new();
            builder.push(source, Some("mock"));
            builder.finish()
        }
    }

    fn mock_factory() -> Box<dyn Tokenizer> {
        Box::new(MockTokenizer)
    }

    #[test]
    fn test_registry() {
        register("mock", mock_factory);

        let tokenizer = for_extension("MOCK").unwrap();
        assert_eq!(tokenizer.language(), "mock");
        assert!(supported_extensions().contains(&"mock".to_string()));

        let tokenizer = tokenizer_for(Path::new("/x/file.mock"), "a");
        assert_eq!(tokenizer.language(), "mock");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_plain() {
        assert!(for_extension("unknown-ext").is_none());
        let tokenizer = tokenizer_for(Path::new("/x/data.unknown-ext"), "text");
        assert_eq!(tokenizer.language(), "plain");
    }

    #[test]
    fn test_sniff_extension() {
        assert_eq!(sniff_extension("<?php\necho 1;"), Some("php"));
        assert_eq!(sniff_extension("#!/usr/bin/env php\n<?php"), Some("php"));
        assert_eq!(sniff_extension("#!/usr/bin/python3\n"), Some("py"));
        assert_eq!(sniff_extension("#!/bin/sh\n"), None);
        assert_eq!(sniff_extension(""), None);
    }

    #[test]
    fn test_plain_empty_source() {
        let lines = PlainTokenizer.tokenize("");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn test_plain_lines() {
        let lines = PlainTokenizer.tokenize("a <b>\n\nc\n");
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            vec![Token {
                text: "a <b>".to_string(),
                class: None
            }]
        );
        assert!(lines[1].is_empty());
        assert!(lines[3].is_empty());
    }

    #[test]
    fn test_line_builder_splits_tokens() {
        let mut builder = LineBuilder::new();
        builder.push("/* a\n b */", Some("comment"));
        builder.push(" x", None);
        let lines = builder.finish();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].text, "/* a");
        assert_eq!(lines[1][0].text, " b */");
        assert_eq!(lines[1][0].class, Some("comment"));
        assert_eq!(lines[1][1].text, " x");
    }

    proptest! {
        #[test]
        fn prop_plain_round_trip(source in "[a-z<>&\"' \t\r\n]{0,64}") {
            let lines = PlainTokenizer.tokenize(&source);
            prop_assert_eq!(lines.len(), source.matches('\n').count() + 1);
            prop_assert_eq!(join_lines(&lines), source);
        }
    }
}
