//! Clover coverage report extractor.
//!
//! Statements never executed become issues; runs of consecutive uncovered
//! lines are reported as one range.

use super::{normalize_path, parse_line, Extractor};
use crate::error::Result;
use crate::merge::MergedDocument;
use crate::model::Issue;

const FOUND_BY: &str = "Coverage";
const SEVERITY: &str = "notice";
const DESCRIPTION: &str = "Not covered";

pub struct CoverageExtractor;

impl Extractor for CoverageExtractor {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn description(&self) -> &'static str {
        "Clover coverage XML reports (uncovered statements)"
    }

    fn extract(&self, document: &MergedDocument) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for file in document.query("/codebrowser/coverage/project//file[@name]")? {
            let Some(name) = file.attribute("name") else {
                continue;
            };
            let path = normalize_path(name);

            let mut lines: Vec<usize> = document
                .query_from(file, "line[@type='stmt'][@count='0']")?
                .into_iter()
                .filter_map(|line| parse_line(line.attribute("num")))
                .collect();
            lines.sort_unstable();
            lines.dedup();

            for (start, end) in contiguous_ranges(&lines) {
                issues.push(Issue::new(
                    path.clone(),
                    start,
                    end,
                    FOUND_BY,
                    DESCRIPTION,
                    SEVERITY,
                )?);
            }
        }

        Ok(issues)
    }
}

/// Group sorted line numbers into inclusive runs.
fn contiguous_ranges(lines: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &line in lines {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == line => *end = line,
            _ => ranges.push((line, line)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_ranges() {
        assert!(contiguous_ranges(&[]).is_empty());
        assert_eq!(
            contiguous_ranges(&[3, 4, 5, 9, 11, 12]),
            vec![(3, 5), (9, 9), (11, 12)]
        );
    }

    #[test]
    fn test_extract_uncovered_statements() {
        let mut doc = MergedDocument::new();
        doc.merge_str(
            r#"<coverage generated="1">
  <project timestamp="1">
    <file name="/nonexistent/A.php">
      <line num="3" type="method" count="0"/>
      <line num="4" type="stmt" count="0"/>
      <line num="5" type="stmt" count="0"/>
      <line num="6" type="stmt" count="2"/>
      <line num="8" type="stmt" count="0"/>
    </file>
    <package name="p">
      <file name="/nonexistent/B.php">
        <line num="1" type="stmt" count="1"/>
      </file>
    </package>
  </project>
</coverage>"#,
            "clover.xml",
        )
        .unwrap();

        let issues = CoverageExtractor.extract(&doc).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].lines(), 4..=5);
        assert_eq!(issues[1].lines(), 8..=8);
        assert!(issues.iter().all(|i| i.file_path() == "/nonexistent/A.php"));
        assert!(issues.iter().all(|i| i.found_by() == "Coverage"));
    }
}
