//! Integration tests for the codebrowser binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn codebrowser(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codebrowser"))
        .args(args)
        .current_dir(cwd)
        .env_remove("CODEBROWSER_LOG")
        .output()
        .expect("should run codebrowser")
}

fn write_report(logs: &Path, source: &Path) {
    std::fs::create_dir_all(logs).unwrap();
    std::fs::write(
        logs.join("checkstyle.xml"),
        format!(
            r#"<checkstyle><file name="{}"><error line="1" severity="error" message="m"/></file></checkstyle>"#,
            source.display()
        ),
    )
    .unwrap();
}

#[test]
fn test_extractors_lists_builtins() {
    let temp = TempDir::new().unwrap();
    let output = codebrowser(&["extractors"], temp.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["checkstyle", "pmd", "cpd", "coverage"] {
        assert!(stdout.contains(name), "missing {}", name);
    }
}

#[test]
fn test_generate_json_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    let source = root.join("a.php");
    std::fs::write(&source, "<?php\necho 1;\n").unwrap();
    write_report(&root.join("logs"), &source);

    let output = codebrowser(
        &["generate", "--log", "logs", "--output", "out", "--format", "json"],
        &root,
    );

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["files"], 1);
    assert_eq!(report["errors"], 1);
    assert!(root.join("out/a.php.html").is_file());
}

#[test]
fn test_generate_uses_discovered_config() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    let source = root.join("src/b.php");
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::write(&source, "<?php\n").unwrap();
    write_report(&root.join("build/logs"), &source);
    std::fs::write(
        root.join("codebrowser.yaml"),
        "log_dir: build/logs\noutput: build/browser\nextractors: [checkstyle]\n",
    )
    .unwrap();

    let output = codebrowser(&["run"], &root);

    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(root.join("build/browser/index.html").is_file());
    assert!(root.join("build/browser/b.php.html").is_file());
}

#[test]
fn test_generate_errors_exit_with_two() {
    let temp = TempDir::new().unwrap();

    let missing_output = codebrowser(&["generate", "--log", "logs"], temp.path());
    assert_eq!(missing_output.status.code(), Some(2));

    let bad_format = codebrowser(
        &["generate", "--log", "logs", "--output", "out", "--format", "xml"],
        temp.path(),
    );
    assert_eq!(bad_format.status.code(), Some(2));

    let bad_pattern = codebrowser(
        &["generate", "--log", "logs", "--output", "out", "--exclude", "("],
        temp.path(),
    );
    assert_eq!(bad_pattern.status.code(), Some(2));

    let missing_logs = codebrowser(&["generate", "--log", "logs", "--output", "out"], temp.path());
    assert_eq!(missing_logs.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&missing_logs.stderr).contains("log directory"));
}
