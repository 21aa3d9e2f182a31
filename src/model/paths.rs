//! Path helpers shared by the registry and the file ordering.
//!
//! Paths are handled as strings with `/` separators, the form produced by
//! extractors and the source scan.

use std::cmp::Ordering;

pub const SEPARATOR: char = '/';

/// Directory part of a path including the trailing separator, or "" for a
/// bare file name.
fn dir_with_separator(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[..=idx],
        None => "",
    }
}

/// Longest leading directory path shared by all paths.
///
/// The result always ends in a separator, or is empty when the set is empty
/// or the paths share no directory.
pub fn common_path_prefix<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut iter = paths.into_iter();
    let mut prefix = match iter.next() {
        Some(first) => dir_with_separator(first),
        None => return String::new(),
    };

    for path in iter {
        let dir = dir_with_separator(path);
        let shared = prefix
            .bytes()
            .zip(dir.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        prefix = &prefix[..shared];
        // Align on the last separator inside the shared bytes.
        prefix = match prefix.rfind(SEPARATOR) {
            Some(idx) => &prefix[..=idx],
            None => "",
        };
        if prefix.is_empty() {
            break;
        }
    }

    prefix.to_string()
}

/// Ordering used for registry iteration and the index page.
///
/// After removing the directory prefix both paths share, an entry that still
/// sits inside a subdirectory sorts before an entry located directly in the
/// shared directory. Otherwise the full paths compare byte-wise.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    let prefix_len = common_path_prefix([a, b]).len();
    let a_nested = a[prefix_len..].contains(SEPARATOR);
    let b_nested = b[prefix_len..].contains(SEPARATOR);

    match (a_nested, b_nested) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.as_bytes().cmp(b.as_bytes()),
    }
}
