//! Source tree scanning.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Collect every regular file under `root`, canonicalized and sorted.
///
/// Entries that cannot be read are logged and skipped. Symlinks are not
/// followed so every returned path is canonical.
pub fn collect_source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let root = root.canonicalize().map_err(|e| Error::io(root, e))?;
    if !root.is_dir() {
        return Err(Error::io(
            &root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "skipping unreadable source entry"),
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collects_nested_regular_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("lib/util")).unwrap();
        std::fs::write(temp.path().join("a.php"), "<?php").unwrap();
        std::fs::write(temp.path().join("lib/util/b.php"), "<?php").unwrap();
        std::fs::write(temp.path().join("lib/README"), "docs").unwrap();

        let files = collect_source_files(temp.path()).unwrap();
        let root = temp.path().canonicalize().unwrap();
        let relative: Vec<PathBuf> = files
            .iter()
            .map(|f| f.strip_prefix(&root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.php"),
                PathBuf::from("lib/README"),
                PathBuf::from("lib/util/b.php"),
            ]
        );
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        assert!(collect_source_files(&temp.path().join("missing")).is_err());
    }
}
