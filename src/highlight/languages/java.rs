//! Java tokenizer configuration.

use crate::highlight::treesitter::{Config, RESERVED, SPECIAL, TreeSitterTokenizer, VAR};
use crate::highlight::Tokenizer;

/// Annotations such as `@Override` are highlighted as one token.
const ATOMIC_KINDS: &[(&str, &str)] = &[("marker_annotation", SPECIAL)];

const LEAF_KINDS: &[(&str, &str)] = &[
    ("this", VAR),
    ("true", RESERVED),
    ("false", RESERVED),
    ("null_literal", RESERVED),
];

/// Create a new Java tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_java::LANGUAGE.into(),
        language_name: "java",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the Java tokenizer.
pub fn register() {
    crate::highlight::register("java", new_tokenizer);
}
