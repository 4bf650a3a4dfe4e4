mod cmd_diff;
mod cmd_info;
mod cmd_show;
mod cmd_walk;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snapview")]
#[command(about = "Inspect recorded reducer snapshot traces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a trace file
    Info {
        /// Input file (plain or gzip-compressed JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one step's action and state
    Show {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// 1-based step number
        #[arg(long)]
        step: usize,

        /// Mark properties that changed since the previous step
        #[arg(long)]
        diff: bool,
    },
    /// Print one line per record
    Walk {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Only user-initiated input actions
        #[arg(long)]
        user_only: bool,

        /// User-action marker prefix
        #[arg(long, default_value = ".user(")]
        marker: String,
    },
    /// Character diff of one property across a step
    Diff {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// 1-based step number (diffed against its predecessor)
        #[arg(long)]
        step: usize,

        /// Property name
        #[arg(long)]
        property: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input, json } => cmd_info::run(input, json),
        Commands::Show { input, step, diff } => cmd_show::run(input, step, diff),
        Commands::Walk {
            input,
            user_only,
            marker,
        } => cmd_walk::run(input, user_only, marker),
        Commands::Diff {
            input,
            step,
            property,
        } => cmd_diff::run(input, step, property),
    }
}
