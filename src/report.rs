//! Output formatting for run summaries.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::runner::RunSummary;

/// JSON report structure.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub log_dir: &'a str,
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

/// Write a summary in JSON format.
pub fn write_json(log_dir: &str, summary: &RunSummary) -> anyhow::Result<()> {
    println!("{}", to_json(log_dir, summary)?);
    Ok(())
}

pub fn to_json(log_dir: &str, summary: &RunSummary) -> anyhow::Result<String> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        log_dir,
        summary,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write a summary for humans.
pub fn write_pretty(log_dir: &str, summary: &RunSummary) {
    // Header
    println!();
    print!("  ");
    print!("{}", "codebrowser".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Logs:   ".dimmed());
    println!("{}", log_dir);
    print!("  {}", "Output: ".dimmed());
    println!("{}", summary.output_dir.display());
    println!();

    write_counts(summary);
    println!();

    if !summary.diagnostics.is_empty() {
        write_diagnostics(&summary.diagnostics);
        println!();
    }

    write_final_status(summary);
    println!();
}

fn write_counts(summary: &RunSummary) {
    println!(
        "  {} {} files ({} rendered, {} skipped)",
        "Files:".bold(),
        summary.files,
        summary.rendered,
        summary.skipped
    );
    print!("  {} {}  ", "Issues:".bold(), summary.issues);
    print!("{}", format!("{} errors", summary.errors).red());
    print!("  ");
    println!("{}", format!("{} warnings", summary.warnings).yellow());
}

fn write_diagnostics(diagnostics: &[Diagnostic]) {
    println!("  {} ({}):", "Diagnostics".bold(), diagnostics.len());
    println!();

    for d in diagnostics {
        write_kind_tag(d.kind);
        println!("{}", d.path.blue());
        println!("            {}", d.message);
    }
}

fn write_kind_tag(kind: DiagnosticKind) {
    match kind {
        DiagnosticKind::MalformedInput => print!("    {} ", "BAD  ".red()),
        DiagnosticKind::EmptyInput => print!("    {} ", "EMPTY".yellow()),
        DiagnosticKind::SourceUnreadable => print!("    {} ", "SKIP ".yellow()),
        DiagnosticKind::RenderFailed => print!("    {} ", "FAIL ".red()),
    }
}

fn write_final_status(summary: &RunSummary) {
    if summary.skipped == 0 {
        print!("  {}", "✓ DONE".green());
    } else {
        print!("  {}", "✓ DONE WITH SKIPPED FILES".yellow());
    }
    println!("  {}", summary.output_dir.join("index.html").display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_json_report_shape() {
        let summary = RunSummary {
            output_dir: PathBuf::from("/out"),
            common_prefix: "/src/".to_string(),
            files: 2,
            rendered: 1,
            skipped: 1,
            issues: 3,
            errors: 2,
            warnings: 1,
            diagnostics: vec![Diagnostic {
                kind: DiagnosticKind::SourceUnreadable,
                path: "/src/gone.php".to_string(),
                message: "missing".to_string(),
            }],
        };

        let json = to_json("/logs", &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["log_dir"], "/logs");
        assert_eq!(value["files"], 2);
        assert_eq!(value["skipped"], 1);
        assert_eq!(value["diagnostics"][0]["kind"], "source_unreadable");
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    }
}
