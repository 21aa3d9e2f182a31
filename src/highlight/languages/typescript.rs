//! TypeScript tokenizer configuration.

use crate::highlight::treesitter::{Config, RESERVED, STRING, TreeSitterTokenizer, VAR};
use crate::highlight::Tokenizer;

const ATOMIC_KINDS: &[(&str, &str)] = &[("regex", STRING)];

const LEAF_KINDS: &[(&str, &str)] = &[
    ("this", VAR),
    ("true", RESERVED),
    ("false", RESERVED),
    ("null", RESERVED),
    ("undefined", RESERVED),
];

/// Create a new TypeScript tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        language_name: "typescript",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the TypeScript tokenizer.
pub fn register() {
    crate::highlight::register("ts", new_tokenizer);
}
