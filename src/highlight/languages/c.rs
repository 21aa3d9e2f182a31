//! C tokenizer configuration.

use crate::highlight::treesitter::{Config, RESERVED, SPECIAL, STRING, TreeSitterTokenizer};
use crate::highlight::Tokenizer;

/// Preprocessor arguments such as `<stdio.h>` keep their own class.
const ATOMIC_KINDS: &[(&str, &str)] = &[("system_lib_string", STRING)];

/// Preprocessor directives.
const LEAF_KINDS: &[(&str, &str)] = &[
    ("#include", SPECIAL),
    ("#define", SPECIAL),
    ("#if", SPECIAL),
    ("#ifdef", SPECIAL),
    ("#ifndef", SPECIAL),
    ("#else", SPECIAL),
    ("#endif", SPECIAL),
    ("null", RESERVED),
];

/// Create a new C tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_c::LANGUAGE.into(),
        language_name: "c",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the C tokenizer.
pub fn register() {
    crate::highlight::register("c", new_tokenizer);
    crate::highlight::register("h", new_tokenizer);
}
