mod commands;
mod info;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use tvtms::diagnostics;

/// Exit code for configuration and I/O failures.
const RUNTIME_ERROR: u8 = 3;

/// Command-line interface.
#[derive(Parser)]
#[command(name = "tvtms", version, about = "Parse STEPBible TVTMS versification references")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Normalize a free-text category label
    Category {
        /// Label as written in the source row
        raw: String,
    },
    /// Scan reference lists (one field per line) and report unparseable fields
    Check {
        /// Files or directories; defaults to the current directory
        paths: Vec<PathBuf>,
    },
    /// Show syntax, known books, and current configuration
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize a free-text mapping type label
    MappingType {
        /// Label as written in the source row
        raw: String,
    },
    /// Parse reference fields and print the resulting records
    Parse {
        /// Reference fields, parsed in order
        #[arg(required = true)]
        refs: Vec<String>,
        /// Current book for references without a book prefix
        #[arg(long)]
        book: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Category { raw } => {
            commands::cmd_category(&raw);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Check { paths } => commands::cmd_check(&paths),
        Commands::Info { json } => {
            info::run(json);
            Ok(ExitCode::SUCCESS)
        },
        Commands::MappingType { raw } => {
            commands::cmd_mapping_type(&raw);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Parse { refs, book, json } => commands::cmd_parse(&refs, book.as_deref(), json),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(RUNTIME_ERROR)
        },
    };
}

/// Warnings by default; each `-v` raises one level. `RUST_LOG` wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
