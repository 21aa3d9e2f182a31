//! Rust tokenizer configuration.

use crate::highlight::treesitter::{Config, TreeSitterTokenizer, SPECIAL, VAR};
use crate::highlight::Tokenizer;

const ATOMIC_KINDS: &[(&str, &str)] = &[("lifetime", SPECIAL)];

const LEAF_KINDS: &[(&str, &str)] = &[("self", VAR)];

/// Create a new Rust tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_rust::LANGUAGE.into(),
        language_name: "rust",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the Rust tokenizer.
pub fn register() {
    crate::highlight::register("rs", new_tokenizer);
}
