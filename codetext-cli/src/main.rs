//! Codetext CLI - literate programming tangler

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use codetext::interface::Context;

#[derive(Parser)]
#[command(name = "codetext")]
#[command(author, version, about = "Literate programming tangler", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the files declared in a document
    Tangle {
        /// Directory to write generated files to
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Dry run - list the files without writing them
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Document to tangle
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Map a line of a generated file back to the document
    Locate {
        /// Document the file was generated from
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Generated file and 1-indexed line, as GENFILE:LINE
        #[arg(value_name = "GENFILE:LINE")]
        target: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved chunk tree of a document
    Tree {
        /// Document to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut ctx = match Context::from_dir(base_dir, cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Tangle {
            output,
            dry_run,
            file,
        } => {
            let options = commands::TangleOptions {
                file,
                output,
                dry_run,
            };
            commands::tangle(&mut ctx, options)
        }

        Commands::Locate { file, target, json } => {
            commands::LocateOptions::parse(file, &target, json)
                .and_then(|options| commands::locate(&ctx, options))
        }

        Commands::Tree { file } => {
            let options = commands::TreeOptions { file };
            commands::tree(&ctx, options)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
