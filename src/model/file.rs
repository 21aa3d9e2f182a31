//! Per-file issue aggregate.

use serde::Serialize;

use super::{compare_paths, Issue, SEPARATOR};
use crate::error::{Error, Result};

/// All issues reported for one source path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    path: String,
    issues: Vec<Issue>,
}

impl File {
    /// Create a file without issues.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            issues: Vec::new(),
        }
    }

    /// Create a file pre-populated with issues, all of which must belong to
    /// `path`.
    pub fn with_issues(path: impl Into<String>, issues: Vec<Issue>) -> Result<Self> {
        let mut file = Self::new(path);
        for issue in issues {
            file.add_issue(issue)?;
        }
        Ok(file)
    }

    /// Absolute path of the file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path component.
    pub fn basename(&self) -> &str {
        match self.path.rfind(SEPARATOR) {
            Some(idx) => &self.path[idx + 1..],
            None => &self.path,
        }
    }

    /// Path without the last component.
    pub fn dir_name(&self) -> &str {
        match self.path.rfind(SEPARATOR) {
            Some(0) => "/",
            Some(idx) => &self.path[..idx],
            None => ".",
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Append an issue. Fails without modifying the file if the issue
    /// belongs to another path.
    pub fn add_issue(&mut self, issue: Issue) -> Result<()> {
        if issue.file_path() != self.path {
            return Err(Error::Validation(format!(
                "issue for {} cannot be added to file {}",
                issue.file_path(),
                self.path
            )));
        }
        self.issues.push(issue);
        Ok(())
    }

    /// Append the issues of another file of the same path after our own.
    pub fn merge_with(&mut self, other: File) -> Result<()> {
        if other.path != self.path {
            return Err(Error::Validation(format!(
                "cannot merge file {} into file {}",
                other.path, self.path
            )));
        }
        self.issues.extend(other.issues);
        Ok(())
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Issues whose severity is exactly `"error"`.
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    /// Issues whose severity is exactly `"warning"`.
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_warning()).count()
    }
}

/// Sort files into presentation order, see [`compare_paths`].
pub fn sort_files(files: &mut [File]) {
    files.sort_by(|a, b| compare_paths(&a.path, &b.path));
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/some/file/name.php";

    fn issues() -> Vec<Issue> {
        vec![
            Issue::new(PATH, 39, 39, "Checkstyle", "m3", "error").unwrap(),
            Issue::new(PATH, 50, 52, "Checkstyle", "m4", "warning").unwrap(),
            Issue::new(PATH, 40, 40, "Checkstyle", "m4", "error").unwrap(),
        ]
    }

    #[test]
    fn test_instantiation() {
        let file = File::new(PATH);
        assert_eq!(file.path(), PATH);
        assert!(file.issues().is_empty());

        let file = File::with_issues(PATH, issues()).unwrap();
        assert_eq!(file.issues(), issues().as_slice());
    }

    #[test]
    fn test_basename_and_dir_name() {
        let file = File::new(PATH);
        assert_eq!(file.basename(), "name.php");
        assert_eq!(file.dir_name(), "/some/file");
        assert_eq!(File::new("name.php").dir_name(), ".");
        assert_eq!(File::new("/name.php").dir_name(), "/");
    }

    #[test]
    fn test_add_issue_counts() {
        let mut file = File::new(PATH);
        assert_eq!(file.issue_count(), 0);

        file.add_issue(issues()[0].clone()).unwrap();
        assert_eq!(file.issue_count(), 1);
        assert_eq!(file.issues(), &issues()[..1]);

        file.add_issue(issues()[1].clone()).unwrap();
        assert_eq!(file.issue_count(), 2);
    }

    #[test]
    fn test_add_issue_to_wrong_file() {
        let mut file = File::with_issues(PATH, issues()).unwrap();
        let issue = Issue::new("/the/wrong/file/name.php", 39, 39, "Checkstyle", "m3", "error")
            .unwrap();

        let err = file.add_issue(issue).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(file.issue_count(), 3);
    }

    #[test]
    fn test_error_and_warning_counts() {
        let file = File::with_issues(PATH, issues()).unwrap();
        assert_eq!(file.error_count(), 2);
        assert_eq!(file.warning_count(), 1);
    }

    #[test]
    fn test_other_severities_are_not_counted() {
        let file = File::with_issues(
            PATH,
            vec![
                Issue::new(PATH, 1, 1, "PMD", "a", "1").unwrap(),
                Issue::new(PATH, 2, 2, "PMD", "b", "Error").unwrap(),
                Issue::new(PATH, 3, 3, "PMD", "c", "warning").unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(file.issue_count(), 3);
        assert_eq!(file.error_count() + file.warning_count(), 1);
    }

    #[test]
    fn test_merge_with() {
        let all = issues();
        let mut file = File::with_issues(PATH, vec![all[0].clone(), all[1].clone()]).unwrap();
        let other = File::with_issues(PATH, vec![all[2].clone()]).unwrap();

        file.merge_with(other).unwrap();

        assert_eq!(file.error_count(), 2);
        assert_eq!(file.warning_count(), 1);
        assert_eq!(file.issues(), all.as_slice());
    }

    #[test]
    fn test_merge_with_different_file() {
        let mut file = File::with_issues(PATH, issues()).unwrap();
        let err = file
            .merge_with(File::new("/the/wrong/file/name.php"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(file.issue_count(), 3);
    }

    #[test]
    fn test_sort() {
        let sorted = [
            "src/Helper/IOHelper.php",
            "src/Plugins/ErrorCPD.php",
            "src/Plugins/ErrorCheckstyle.php",
            "src/Plugins/ErrorCoverage.php",
            "src/Plugins/ErrorPMD.php",
            "src/Plugins/ErrorPadawan.php",
            "src/Util/Autoloader.php",
            "src/Util/Logger.php",
            "src/View/ViewAbstract.php",
            "src/View/ViewReview.php",
            "src/AbstractPlugin.php",
            "src/CLIController.php",
            "src/File.php",
            "src/Issue.php",
            "src/IssueXML.php",
            "src/SourceHandler.php",
            "src/SourceIterator.php",
        ];
        let mixed = [
            "src/AbstractPlugin.php",
            "src/Plugins/ErrorCheckstyle.php",
            "src/CLIController.php",
            "src/Plugins/ErrorPadawan.php",
            "src/SourceIterator.php",
            "src/SourceHandler.php",
            "src/Issue.php",
            "src/View/ViewReview.php",
            "src/File.php",
            "src/Util/Autoloader.php",
            "src/Helper/IOHelper.php",
            "src/IssueXML.php",
            "src/Plugins/ErrorCoverage.php",
            "src/View/ViewAbstract.php",
            "src/Util/Logger.php",
            "src/Plugins/ErrorPMD.php",
            "src/Plugins/ErrorCPD.php",
        ];

        let mut files: Vec<File> = mixed.iter().map(|p| File::new(*p)).collect();
        sort_files(&mut files);

        let names: Vec<&str> = files.iter().map(|f| f.path()).collect();
        assert_eq!(names, sorted);
    }
}
