//! C++ tokenizer configuration.

use crate::highlight::treesitter::{Config, RESERVED, SPECIAL, STRING, TreeSitterTokenizer, VAR};
use crate::highlight::Tokenizer;

const ATOMIC_KINDS: &[(&str, &str)] = &[("system_lib_string", STRING)];

const LEAF_KINDS: &[(&str, &str)] = &[
    ("#include", SPECIAL),
    ("#define", SPECIAL),
    ("#if", SPECIAL),
    ("#ifdef", SPECIAL),
    ("#ifndef", SPECIAL),
    ("#endif", SPECIAL),
    ("this", VAR),
    ("nullptr", RESERVED),
];

/// Create a new C++ tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_cpp::LANGUAGE.into(),
        language_name: "cpp",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the C++ tokenizer.
pub fn register() {
    crate::highlight::register("cpp", new_tokenizer);
    crate::highlight::register("cc", new_tokenizer);
    crate::highlight::register("cxx", new_tokenizer);
    crate::highlight::register("hpp", new_tokenizer);
    crate::highlight::register("hh", new_tokenizer);
}
