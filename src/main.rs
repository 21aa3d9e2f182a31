//! Codebrowser CLI entry point.

use clap::Parser;
use codebrowser::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Generate(args) => cli::run_generate(args),
        Commands::Extractors => cli::run_extractors(),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
