//! PMD copy/paste detector (CPD) report extractor.
//!
//! A duplication lists every location of the duplicated fragment; each
//! location becomes one issue whose description points at the others.

use super::{normalize_path, parse_line, Extractor};
use crate::error::Result;
use crate::merge::MergedDocument;
use crate::model::Issue;

const FOUND_BY: &str = "Duplication";
const SEVERITY: &str = "notice";

pub struct CpdExtractor;

impl Extractor for CpdExtractor {
    fn name(&self) -> &'static str {
        "cpd"
    }

    fn description(&self) -> &'static str {
        "PMD copy/paste detector (CPD) XML reports"
    }

    fn extract(&self, document: &MergedDocument) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for duplication in document.query("/codebrowser/pmd-cpd/duplication")? {
            let length = parse_line(duplication.attribute("lines")).unwrap_or(1);

            let locations: Vec<(String, usize, usize)> = document
                .query_from(duplication, "file[@path][@line]")?
                .into_iter()
                .filter_map(|file| {
                    let path = normalize_path(file.attribute("path")?);
                    let line = parse_line(file.attribute("line"))?;
                    let Some(end) = line.checked_add(length - 1) else {
                        tracing::debug!(path = %path, line, length, "duplication range overflows");
                        return None;
                    };
                    Some((path, line, end))
                })
                .collect();

            for (idx, (path, line, end)) in locations.iter().enumerate() {
                let others: Vec<String> = locations
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != idx)
                    .map(|(_, (other_path, other_line, other_end))| {
                        format!("{} ({}-{})", other_path, other_line, other_end)
                    })
                    .collect();

                let description = if others.is_empty() {
                    format!("Duplicate code: {} lines", length)
                } else {
                    format!("Copy paste from: {}", others.join(", "))
                };

                match Issue::new(path.clone(), *line, *end, FOUND_BY, description, SEVERITY) {
                    Ok(issue) => issues.push(issue),
                    Err(e) => tracing::debug!(path = %path, error = %e, "skipping duplication"),
                }
            }
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_duplications() {
        let mut doc = MergedDocument::new();
        doc.merge_str(
            r#"<pmd-cpd>
  <duplication lines="12" tokens="60">
    <file path="/nonexistent/A.php" line="10"/>
    <file path="/nonexistent/B.php" line="40"/>
    <codefragment><![CDATA[function a() {}]]></codefragment>
  </duplication>
</pmd-cpd>"#,
            "cpd.xml",
        )
        .unwrap();

        let issues = CpdExtractor.extract(&doc).unwrap();
        assert_eq!(issues.len(), 2);

        assert_eq!(issues[0].file_path(), "/nonexistent/A.php");
        assert_eq!(issues[0].lines(), 10..=21);
        assert_eq!(issues[0].description(), "Copy paste from: /nonexistent/B.php (40-51)");
        assert_eq!(issues[0].found_by(), "Duplication");

        assert_eq!(issues[1].lines(), 40..=51);
        assert_eq!(issues[1].description(), "Copy paste from: /nonexistent/A.php (10-21)");
    }

    #[test]
    fn test_overflowing_length_skips_duplication() {
        let mut doc = MergedDocument::new();
        doc.merge_str(
            r#"<pmd-cpd>
  <duplication lines="18446744073709551615">
    <file path="/nonexistent/A.php" line="10"/>
    <file path="/nonexistent/B.php" line="1"/>
  </duplication>
  <duplication lines="3">
    <file path="/nonexistent/C.php" line="5"/>
  </duplication>
</pmd-cpd>"#,
            "cpd.xml",
        )
        .unwrap();

        let issues = CpdExtractor.extract(&doc).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].file_path(), "/nonexistent/B.php");
        assert_eq!(issues[0].lines(), 1..=usize::MAX);
        assert_eq!(issues[1].file_path(), "/nonexistent/C.php");
        assert_eq!(issues[1].lines(), 5..=7);
    }
}
