//! Command-line interface for codebrowser.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::extract;
use crate::logging;
use crate::report;
use crate::runner::{RunOptions, Runner};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Render static-analysis reports as a browsable, annotated copy of the
/// source tree.
///
/// Reads the XML reports of tools such as Checkstyle, PMD, CPD and code
/// coverage, groups the issues per source file and writes one HTML page per
/// file with every issue marked on the lines it covers.
#[derive(Parser)]
#[command(name = "codebrowser")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the code browser from a directory of reports
    #[command(visible_alias = "run")]
    Generate(GenerateArgs),
    /// List the available report extractors
    Extractors,
}

/// Arguments for the generate command.
#[derive(Parser)]
pub struct GenerateArgs {
    /// Directory containing the XML report files
    #[arg(short, long = "log")]
    pub log: Option<PathBuf>,

    /// Output directory for the generated pages
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Source directory; files without issues are rendered too
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Regular expression of paths to leave out (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Extractor to run (repeatable, default: all)
    #[arg(long = "extractor")]
    pub extractors: Vec<String>,

    /// Path to a configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Log filter, e.g. "debug" or "codebrowser=trace"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write log output to a file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Delete the output directory before generating
    #[arg(long)]
    pub clean: bool,
}

/// Load the configuration file named on the command line, or the one found
/// in the working directory, or nothing.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::parse_file(path);
    }
    match Config::discover(Path::new(".")) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using discovered configuration");
            Config::parse_file(&path)
        }
        None => Ok(Config::default()),
    }
}

/// Apply command-line flags on top of the file configuration.
pub fn merge_args(mut config: Config, args: &GenerateArgs) -> Config {
    if let Some(log) = &args.log {
        config.log_dir = Some(log.clone());
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if let Some(source) = &args.source {
        config.source = Some(source.clone());
    }
    config.exclude.extend(args.exclude.iter().cloned());
    if !args.extractors.is_empty() {
        config.extractors = args.extractors.clone();
    }
    config.clean_output |= args.clean;
    config
}

/// Run the generate command.
pub fn run_generate(args: &GenerateArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    logging::init(args.log_level.as_deref(), args.log_file.as_deref())?;

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => merge_args(c, args),
        Err(e) => {
            eprintln!("Error parsing configuration: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let options = match RunOptions::from_config(&config) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let log_dir = options.log_dir.display().to_string();
    let summary = Runner::new(options).run()?;

    match args.format.as_str() {
        "json" => report::write_json(&log_dir, &summary)?,
        _ => report::write_pretty(&log_dir, &summary),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the extractors command.
pub fn run_extractors() -> anyhow::Result<i32> {
    println!("Available extractors:");
    println!();

    for extractor in extract::all() {
        println!("  {:<14} {}", extractor.name(), extractor.description());
    }

    println!();
    println!("Usage:");
    println!("  codebrowser generate --log <dir> --output <dir> --extractor <name>");
    println!();
    println!(
        "Configuration files: {}",
        config::DEFAULT_CONFIG_NAMES.join(", ")
    );

    Ok(EXIT_SUCCESS)
}
