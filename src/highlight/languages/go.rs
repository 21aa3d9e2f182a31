//! Go tokenizer configuration.

use crate::highlight::treesitter::{Config, RESERVED, TreeSitterTokenizer};
use crate::highlight::Tokenizer;

const ATOMIC_KINDS: &[(&str, &str)] = &[];

const LEAF_KINDS: &[(&str, &str)] = &[
    ("true", RESERVED),
    ("false", RESERVED),
    ("nil", RESERVED),
    ("iota", RESERVED),
];

/// Create a new Go tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_go::LANGUAGE.into(),
        language_name: "go",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the Go tokenizer.
pub fn register() {
    crate::highlight::register("go", new_tokenizer);
}
