//! Language-specific tree-sitter tokenizer configurations.
//!
//! Each language module provides the node kinds that need a class beyond
//! the generic comment/string/number/keyword rules, and a factory that
//! registers the tokenizer for the language's file extensions.

pub mod c;
pub mod cpp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod php;
pub mod python;
pub mod rust_lang;
pub mod typescript;

use std::sync::Once;

static REGISTER: Once = Once::new();

/// Register all available language tokenizers. Safe to call repeatedly.
pub fn register_all() {
    REGISTER.call_once(|| {
        c::register();
        cpp::register();
        go::register();
        java::register();
        javascript::register();
        php::register();
        python::register();
        rust_lang::register();
        typescript::register();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{for_extension, join_lines, Token};
    use proptest::prelude::*;

    fn classes<'a>(line: &'a [Token]) -> Vec<(&'a str, Option<&'static str>)> {
        line.iter()
            .filter(|t| t.class.is_some())
            .map(|t| (t.text.as_str(), t.class))
            .collect()
    }

    #[test]
    fn test_register_all_covers_extensions() {
        register_all();
        register_all();
        for ext in ["php", "rs", "py", "go", "java", "js", "ts", "tsx", "c", "h", "cpp"] {
            assert!(for_extension(ext).is_some(), "no tokenizer for {}", ext);
        }
    }

    #[test]
    fn test_php_tokens() {
        register_all();
        let source = "<?php\n// note\nfunction f($a) {\n    return \"x\" . 42;\n}\n";
        let lines = for_extension("php").unwrap().tokenize(source);

        assert_eq!(join_lines(&lines), source);
        assert_eq!(lines.len(), 6);
        assert_eq!(classes(&lines[0]), vec![("<?php", Some("special"))]);
        assert_eq!(classes(&lines[1]), vec![("// note", Some("comment"))]);

        let line2 = classes(&lines[2]);
        assert!(line2.contains(&("function", Some("reserved"))));
        assert!(line2.contains(&("$a", Some("var"))));
        assert!(line2.contains(&("{", Some("brackets"))));

        let line3 = classes(&lines[3]);
        assert!(line3.contains(&("return", Some("reserved"))));
        assert!(line3.contains(&("\"x\"", Some("string"))));
        assert!(line3.contains(&("42", Some("number"))));
    }

    #[test]
    fn test_multiline_comment_splits_into_lines() {
        register_all();
        let source = "fn main() {\n    /* a\n       b */\n}\n";
        let lines = for_extension("rs").unwrap().tokenize(source);

        assert_eq!(join_lines(&lines), source);
        assert_eq!(classes(&lines[1]), vec![("/* a", Some("comment"))]);
        assert_eq!(classes(&lines[2]), vec![("       b */", Some("comment"))]);
    }

    #[test]
    fn test_broken_source_still_round_trips() {
        register_all();
        let source = "def f(:\n    'unterminated\n\t\n";
        let lines = for_extension("py").unwrap().tokenize(source);
        assert_eq!(join_lines(&lines), source);
    }

    proptest! {
        #[test]
        fn prop_tree_sitter_round_trip(
            ext in prop::sample::select(vec!["php", "rs"]),
            prefix in prop::sample::select(vec!["", "<?php\n", "fn f() {\n"]),
            body in "(\\PC|[\n\t\r]){0,80}",
        ) {
            register_all();
            let source = format!("{}{}", prefix, body);
            let tokenizer = for_extension(ext).unwrap();
            let lines = tokenizer.tokenize(&source);
            prop_assert_eq!(lines.len(), source.matches('\n').count() + 1);
            prop_assert_eq!(join_lines(&lines), source);
        }
    }
}
