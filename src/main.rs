mod commands;

use crate::commands::{info, tabulate};
use clap::{Parser, Subcommand};
use ranked_tally::TabulatorConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and dump info about a ballot file.
    Info {
        /// Ballot file (.json, or the text format).
        input: PathBuf,
    },
    /// Run instant-runoff tabulation over a ballot file.
    Tabulate {
        /// Ballot file (.json, or the text format).
        input: PathBuf,
        /// Decide rounds by Borda score with this weight
        #[clap(long)]
        borda: Option<u32>,
        /// Decide rounds by number of mentions at any rank
        #[clap(long)]
        tally: bool,
        /// Write a JSON report to this path
        #[clap(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ranked_tally=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let result = match opts.command {
        Command::Info { input } => info(&input),
        Command::Tabulate {
            input,
            borda,
            tally,
            out,
        } => {
            let config = TabulatorConfig {
                borda_weight: borda.unwrap_or(0),
                use_tally: tally,
            };
            tabulate(&input, config, out.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
