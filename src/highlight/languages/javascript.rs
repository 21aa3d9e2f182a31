//! JavaScript tokenizer configuration.

use crate::highlight::treesitter::{Config, RESERVED, STRING, TreeSitterTokenizer, VAR};
use crate::highlight::Tokenizer;

/// Regular expression literals are highlighted like strings.
const ATOMIC_KINDS: &[(&str, &str)] = &[("regex", STRING)];

const LEAF_KINDS: &[(&str, &str)] = &[
    ("this", VAR),
    ("true", RESERVED),
    ("false", RESERVED),
    ("null", RESERVED),
    ("undefined", RESERVED),
];

/// Create a new JavaScript tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_javascript::LANGUAGE.into(),
        language_name: "javascript",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the JavaScript tokenizer.
pub fn register() {
    crate::highlight::register("js", new_tokenizer);
    crate::highlight::register("jsx", new_tokenizer);
    crate::highlight::register("mjs", new_tokenizer);
    crate::highlight::register("cjs", new_tokenizer);
}
