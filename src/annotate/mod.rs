//! Overlaying issues on tokenized source lines.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::highlight::{self, Token, TokenLine};
use crate::model::{File, Issue};

/// Line class used when more than one issue touches a line.
pub const MULTIPLE_ISSUES_CLASS: &str = "moreErrors";

/// One source line with its tokens and the issues covering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedLine {
    /// 1-based line number
    pub number: usize,
    pub class: String,
    pub tokens: Vec<Token>,
    pub issues: Vec<Issue>,
    /// `"{found_by}: {description}"` per issue, in issue order
    pub summaries: Vec<String>,
}

impl AnnotatedLine {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// A whole file ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedSource {
    pub path: String,
    pub language: String,
    pub lines: Vec<AnnotatedLine>,
}

impl AnnotatedSource {
    /// Source text rebuilt from the tokens.
    pub fn to_plain_text(&self) -> String {
        let lines: Vec<TokenLine> = self.lines.iter().map(|l| l.tokens.clone()).collect();
        highlight::join_lines(&lines)
    }
}

/// Group issues by every line they cover. Issues keep their relative order
/// within a line.
pub fn bucket_issues(issues: &[Issue]) -> BTreeMap<usize, Vec<Issue>> {
    let mut buckets: BTreeMap<usize, Vec<Issue>> = BTreeMap::new();
    for issue in issues {
        for line in issue.lines() {
            buckets.entry(line).or_default().push(issue.clone());
        }
    }
    buckets
}

/// Class of a line given the issues on it.
pub fn line_class(number: usize, issues: &[Issue]) -> String {
    match issues {
        [] if number % 2 == 1 => "odd".to_string(),
        [] => "even".to_string(),
        [single] => single.found_by().to_string(),
        _ => MULTIPLE_ISSUES_CLASS.to_string(),
    }
}

/// Like [`bucket_issues`], but only for lines `1..=line_count`. Ranges are
/// cut at the last line and issues starting after it are left out.
fn bucket_visible_issues(issues: &[Issue], line_count: usize) -> BTreeMap<usize, Vec<Issue>> {
    let mut buckets: BTreeMap<usize, Vec<Issue>> = BTreeMap::new();
    for issue in issues.iter().filter(|i| i.line_start() <= line_count) {
        for line in issue.line_start()..=issue.line_end().min(line_count) {
            buckets.entry(line).or_default().push(issue.clone());
        }
    }
    buckets
}

/// Tokenize `source` for `file` and attach the file's issues per line.
pub fn annotate(file: &File, source: &str) -> AnnotatedSource {
    let tokenizer = highlight::tokenizer_for(Path::new(file.path()), source);
    let token_lines = tokenizer.tokenize(source);
    let line_count = token_lines.len();
    let mut buckets = bucket_visible_issues(file.issues(), line_count);

    let lines: Vec<AnnotatedLine> = token_lines
        .into_iter()
        .enumerate()
        .map(|(index, tokens)| {
            let number = index + 1;
            let issues = buckets.remove(&number).unwrap_or_default();
            AnnotatedLine {
                number,
                class: line_class(number, &issues),
                summaries: issues.iter().map(Issue::summary).collect(),
                tokens,
                issues,
            }
        })
        .collect();

    let past_end = file.issues().iter().filter(|i| i.line_end() > line_count).count();
    if past_end > 0 {
        tracing::debug!(
            path = file.path(),
            issues = past_end,
            lines = line_count,
            "issues reported past the end of the file"
        );
    }

    AnnotatedSource {
        path: file.path().to_string(),
        language: tokenizer.language().to_string(),
        lines,
    }
}

/// Loads sources from disk and annotates them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceAnnotator;

impl SourceAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Read the file's source (invalid UTF-8 is replaced) and annotate it.
    pub fn annotate_file(&self, file: &File) -> Result<AnnotatedSource> {
        let bytes = std::fs::read(file.path()).map_err(|source| Error::SourceUnreadable {
            path: file.path().to_string(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);
        Ok(annotate(file, &source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn issue(start: usize, end: usize, found_by: &str, description: &str) -> Issue {
        Issue::new("/p/a.txt", start, end, found_by, description, "error").unwrap()
    }

    #[test]
    fn test_bucket_issues_spans_lines() {
        let issues = vec![
            issue(50, 52, "Checkstyle", "long"),
            issue(51, 51, "PMD", "short"),
        ];
        let buckets = bucket_issues(&issues);

        assert_eq!(buckets.keys().copied().collect::<Vec<_>>(), vec![50, 51, 52]);
        assert_eq!(buckets[&50].len(), 1);
        assert_eq!(buckets[&51].len(), 2);
        assert_eq!(buckets[&51][0].found_by(), "Checkstyle");
        assert_eq!(buckets[&52].len(), 1);
    }

    #[test]
    fn test_line_classes() {
        assert_eq!(line_class(1, &[]), "odd");
        assert_eq!(line_class(2, &[]), "even");
        assert_eq!(line_class(2, &[issue(2, 2, "PMD", "x")]), "PMD");
        assert_eq!(
            line_class(2, &[issue(2, 2, "PMD", "x"), issue(2, 2, "PMD", "y")]),
            MULTIPLE_ISSUES_CLASS
        );
    }

    #[test]
    fn test_annotate_attaches_issues() {
        let file = File::with_issues(
            "/p/a.txt",
            vec![issue(2, 3, "Checkstyle", "bad"), issue(3, 3, "PMD", "worse")],
        )
        .unwrap();
        let annotated = annotate(&file, "one\ntwo\nthree\nfour");

        assert_eq!(annotated.language, "plain");
        assert_eq!(annotated.lines.len(), 4);
        let classes: Vec<&str> = annotated.lines.iter().map(|l| l.class.as_str()).collect();
        assert_eq!(classes, vec!["odd", "Checkstyle", "moreErrors", "even"]);
        assert_eq!(
            annotated.lines[2].summaries,
            vec!["Checkstyle: bad".to_string(), "PMD: worse".to_string()]
        );
        assert!(!annotated.lines[0].has_issues());
        assert_eq!(annotated.to_plain_text(), "one\ntwo\nthree\nfour");
    }

    #[test]
    fn test_annotate_empty_source() {
        let file = File::new("/p/empty.txt");
        let annotated = annotate(&file, "");

        assert_eq!(annotated.lines.len(), 1);
        assert_eq!(annotated.lines[0].number, 1);
        assert!(annotated.lines[0].tokens.is_empty());
        assert_eq!(annotated.lines[0].class, "odd");
    }

    #[test]
    fn test_issues_past_end_are_dropped() {
        let file = File::with_issues("/p/a.txt", vec![issue(9, 9, "PMD", "x")]).unwrap();
        let annotated = annotate(&file, "a\nb");
        assert!(annotated.lines.iter().all(|l| l.issues.is_empty()));
    }

    #[test]
    fn test_huge_range_is_cut_at_last_line() {
        let file = File::with_issues(
            "/p/a.txt",
            vec![issue(2, usize::MAX, "PMD", "x"), issue(1, 1_000_000_000, "Checkstyle", "y")],
        )
        .unwrap();
        let annotated = annotate(&file, "one\ntwo");

        assert_eq!(annotated.lines.len(), 2);
        assert_eq!(annotated.lines[0].class, "Checkstyle");
        assert_eq!(annotated.lines[1].class, MULTIPLE_ISSUES_CLASS);
        assert_eq!(annotated.lines[1].issues[0].line_end(), usize::MAX);
    }

    #[test]
    fn test_annotate_file_reads_lossy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.txt");
        std::fs::write(&path, b"ok\n\xff\n").unwrap();

        let file = File::new(path.to_string_lossy());
        let annotated = SourceAnnotator::new().annotate_file(&file).unwrap();
        assert_eq!(annotated.lines.len(), 3);
        assert_eq!(annotated.lines[1].tokens[0].text, "\u{FFFD}");
    }

    #[test]
    fn test_annotate_file_unreadable() {
        let temp = TempDir::new().unwrap();
        let file = File::new(temp.path().join("missing.txt").to_string_lossy());
        let err = SourceAnnotator::new().annotate_file(&file).unwrap_err();
        assert!(matches!(err, Error::SourceUnreadable { .. }));
    }

    proptest! {
        #[test]
        fn prop_bucket_covers_every_line(ranges in proptest::collection::vec((1usize..40, 0usize..5), 0..12)) {
            let issues: Vec<Issue> = ranges
                .iter()
                .map(|(start, len)| issue(*start, start + len, "T", "d"))
                .collect();
            let buckets = bucket_issues(&issues);

            let expected: usize = ranges.iter().map(|(_, len)| len + 1).sum();
            let actual: usize = buckets.values().map(Vec::len).sum();
            prop_assert_eq!(actual, expected);
            for (start, len) in &ranges {
                for line in *start..=start + len {
                    prop_assert!(buckets.contains_key(&line));
                }
            }
        }
    }
}
