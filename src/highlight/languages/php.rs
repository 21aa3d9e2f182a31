//! PHP tokenizer configuration.

use crate::highlight::treesitter::{Config, SPECIAL, TreeSitterTokenizer, VAR};
use crate::highlight::Tokenizer;

/// Variables are taken whole so the `$` sigil shares the class.
const ATOMIC_KINDS: &[(&str, &str)] = &[("variable_name", VAR)];

/// Open and close tags around embedded code.
const LEAF_KINDS: &[(&str, &str)] = &[("php_tag", SPECIAL), ("?>", SPECIAL)];

/// Create a new PHP tokenizer.
pub fn new_tokenizer() -> Box<dyn Tokenizer> {
    Box::new(TreeSitterTokenizer::new(Config {
        language: tree_sitter_php::LANGUAGE_PHP.into(),
        language_name: "php",
        atomic_kinds: ATOMIC_KINDS,
        leaf_kinds: LEAF_KINDS,
    }))
}

/// Register the PHP tokenizer.
pub fn register() {
    crate::highlight::register("php", new_tokenizer);
    crate::highlight::register("php3", new_tokenizer);
    crate::highlight::register("php4", new_tokenizer);
    crate::highlight::register("php5", new_tokenizer);
    crate::highlight::register("phtml", new_tokenizer);
    crate::highlight::register("inc", new_tokenizer);
}
