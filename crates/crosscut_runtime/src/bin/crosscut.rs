//! crosscut CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crosscut_foundation::Error;
use crosscut_model::SyntaxIndex;
use crosscut_runtime::{GeneratorConfig, Pipeline, logging};
use tracing::{info, warn};

/// Generates locking, semaphore, and scheduling wrappers from a syntax index.
#[derive(Parser)]
#[command(name = "crosscut")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one round per index file
    Generate {
        /// Syntax index files (JSON), one round each
        #[arg(required = true)]
        indexes: Vec<PathBuf>,

        /// Output root, overriding the configuration file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Configuration file (defaults to ./crosscut.toml if present)
        #[arg(short, long, env = "CROSSCUT_CONFIG")]
        config: Option<PathBuf>,

        /// Fail instead of writing if any output is out of date
        #[arg(long)]
        check: bool,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            indexes,
            out,
            config,
            check,
            verbose,
        } => {
            logging::init(verbose);
            match generate(&indexes, out, config, check) {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(e) => {
                    eprintln!("{}", e.diagnostic());
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Returns `Ok(false)` when `--check` finds stale output.
fn generate(
    indexes: &[PathBuf],
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    check: bool,
) -> Result<bool, Error> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = GeneratorConfig::discover(config.as_deref(), &cwd)?;
    if let Some(out) = out {
        config = config.with_output_dir(out);
    }
    let pipeline = Pipeline::new(config);

    let mut up_to_date = true;
    for path in indexes {
        let index = SyntaxIndex::load(path)?;
        if check {
            let report = pipeline.check_round(&index)?;
            for unit in report.with_outcome(crosscut_emit::EmitOutcome::Stale) {
                warn!(path = %unit.relative_path.display(), "out of date");
            }
            up_to_date &= report.stale() == 0;
        } else {
            let report = pipeline.run_round(&index)?;
            info!(
                index = %path.display(),
                written = report.written(),
                unchanged = report.unchanged(),
                "generated"
            );
        }
    }
    Ok(up_to_date)
}
