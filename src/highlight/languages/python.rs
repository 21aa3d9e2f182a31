//! Python tokenizer configuration.

use crate::highlight::treesitter::{Config, RESERVED, SPECIAL, TreeSitterTokenizer};
use crate::highlight::Tokenizer;

/// Decorators are highlighted as one token.
const ATOMIC_KINDS: &[(&str, &str)] = &[("decorator", SPECIAL)];

const LEAF_KINDS: &[(&str, &str)] = &[("true", RESERVED), ("false", RESERVED), ("none", RESERVED)];

/// Create a new Python tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_python::LANGUAGE.into(),
        language_name: "python",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the Python tokenizer.
pub fn register() {
    crate::highlight::register("py", new_tokenizer);
    crate::highlight::register("pyi", new_tokenizer);
}
