//! Tree-sitter based tokenizer implementation.
//!
//! The syntax tree is walked once in document order. Comments, strings and
//! numbers are taken whole, keyword and bracket leaves are classed by their
//! anonymous node kind, and everything between the collected spans is kept
//! as unclassed text so the token stream always covers the input.

use tree_sitter::{Language, Node, Parser as TsParser, Tree};

use super::{LineBuilder, PlainTokenizer, TokenLine, Tokenizer};

pub const COMMENT: &str = "comment";
pub const STRING: &str = "string";
pub const NUMBER: &str = "number";
pub const RESERVED: &str = "reserved";
pub const VAR: &str = "var";
pub const BRACKETS: &str = "brackets";
pub const SPECIAL: &str = "special";

/// Configuration for a tree-sitter language tokenizer.
#[derive(Clone)]
pub struct Config {
    /// The tree-sitter language
    pub language: Language,
    /// Language name (e.g., "php", "go")
    pub language_name: &'static str,
    /// Node kinds rendered as one token including their children
    pub atomic_kinds: &'static [(&'static str, &'static str)],
    /// Leaf kinds with a fixed class, checked before the generic rules
    pub leaf_kinds: &'static [(&'static str, &'static str)],
}

/// What to do with a node during the walk.
enum Visit {
    /// Emit the node's byte range with a class.
    Span(&'static str),
    /// Look at the children.
    Descend,
    /// Leave the node's text unclassed.
    Skip,
}

/// A classified byte range of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    class: &'static str,
}

/// Tree-sitter based tokenizer.
pub struct TreeSitterTokenizer {
    config: Config,
}

impl TreeSitterTokenizer {
    /// Create a new tree-sitter tokenizer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Parse source code and return the tree.
    fn parse(&self, source: &str) -> anyhow::Result<Tree> {
        let mut parser = TsParser::new();
        parser.set_language(&self.config.language)?;
        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse source"))
    }

    fn classify(&self, node: &Node) -> Visit {
        let kind = node.kind();

        if let Some((_, class)) = self.config.atomic_kinds.iter().find(|(k, _)| *k == kind) {
            return Visit::Span(*class);
        }
        if kind.contains("comment") {
            return Visit::Span(COMMENT);
        }
        if node.is_named() && is_string_kind(kind) {
            return Visit::Span(STRING);
        }
        if node.is_named() && is_number_kind(kind) {
            return Visit::Span(NUMBER);
        }
        if node.child_count() > 0 {
            return Visit::Descend;
        }

        if let Some((_, class)) = self.config.leaf_kinds.iter().find(|(k, _)| *k == kind) {
            return Visit::Span(*class);
        }
        if node.is_named() {
            return Visit::Skip;
        }
        if is_bracket(kind) {
            Visit::Span(BRACKETS)
        } else if is_keyword(kind) {
            Visit::Span(RESERVED)
        } else {
            Visit::Skip
        }
    }

    /// Collect classified spans in document order.
    fn spans(&self, tree: &Tree) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        let mut cursor = tree.walk();

        'walk: loop {
            let node = cursor.node();
            let descend = if node.start_byte() >= node.end_byte() {
                false
            } else {
                match self.classify(&node) {
                    Visit::Span(class) => {
                        let start = node.start_byte();
                        let overlaps = spans.last().is_some_and(|last| start < last.end);
                        if !overlaps {
                            spans.push(Span {
                                start,
                                end: node.end_byte(),
                                class,
                            });
                        }
                        false
                    }
                    Visit::Descend => true,
                    Visit::Skip => false,
                }
            };

            if descend && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        spans
    }

    /// Turn spans into lines, filling the gaps with unclassed text.
    fn build_lines(source: &str, spans: &[Span]) -> Option<Vec<TokenLine>> {
        let mut builder = LineBuilder::new();
        let mut pos = 0;
        for span in spans {
            builder.push(source.get(pos..span.start)?, None);
            builder.push(source.get(span.start..span.end)?, Some(span.class));
            pos = span.end;
        }
        builder.push(source.get(pos..)?, None);
        Some(builder.finish())
    }
}

impl Tokenizer for TreeSitterTokenizer {
    fn language(&self) -> &str {
        self.config.language_name
    }

    fn tokenize(&self, source: &str) -> Vec<TokenLine> {
        let tree = match self.parse(source) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::debug!(
                    language = self.config.language_name,
                    error = %e,
                    "falling back to plain tokens"
                );
                return PlainTokenizer.tokenize(source);
            }
        };

        let spans = self.spans(&tree);
        Self::build_lines(source, &spans).unwrap_or_else(|| PlainTokenizer.tokenize(source))
    }
}

fn is_string_kind(kind: &str) -> bool {
    kind.ends_with("string")
        || kind.ends_with("string_literal")
        || kind.ends_with("char_literal")
        || kind == "character_literal"
        || kind == "rune_literal"
        || kind == "heredoc"
        || kind == "nowdoc"
}

fn is_number_kind(kind: &str) -> bool {
    !kind.contains("string")
        && !kind.ends_with("_type")
        && (kind.contains("integer")
            || kind.contains("float")
            || kind.contains("number")
            || kind == "int_literal"
            || kind == "imaginary_literal")
}

fn is_bracket(kind: &str) -> bool {
    matches!(kind, "(" | ")" | "[" | "]" | "{" | "}")
}

fn is_keyword(kind: &str) -> bool {
    kind.len() > 1 && kind.chars().all(|c| c.is_ascii_alphabetic() || c == '_')
}
