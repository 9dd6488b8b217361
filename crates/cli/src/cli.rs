use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fairsim_tree::{HeapType, TimelineKind};

/// Fair-share scheduling simulator.
///
/// Runs task files through a virtual-runtime scheduler whose ready queue can
/// be any of four ordered structures, and renders those structures on demand.
#[derive(Parser, Debug)]
#[command(name = "fairsim", about = "Fair-share scheduling simulator", version)]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/fairsim/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Schedule a task file and print the report
    Run(RunArgs),
    /// Write a random task file
    Generate(GenerateArgs),
    /// Parse a task file and print it back
    Read {
        file: PathBuf,
    },
    /// Run randomly generated sets of 2^P tasks for P in FROM..=TO
    Sweep(SweepArgs),
    /// Print the per-tick fairness CSV for a task file
    Fairness {
        file: PathBuf,
        #[arg(long)]
        timeline: Option<TimelineKind>,
    },
    /// Insert integers into a structure and print it as Graphviz DOT
    Tree {
        #[arg(long)]
        timeline: Option<TimelineKind>,
        #[arg(long)]
        heap: Option<HeapType>,
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    pub file: PathBuf,

    /// Ready-queue backend: bst, rbt, heaptree or heaparray
    #[arg(long)]
    pub timeline: Option<TimelineKind>,

    /// min (fair) or max (inverted policy)
    #[arg(long)]
    pub heap: Option<HeapType>,

    /// Include one line per tick
    #[arg(long)]
    pub detailed: bool,

    /// Print the results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Validate the ready queue after every tick
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    pub file: PathBuf,

    #[arg(long)]
    pub tasks: usize,

    #[arg(long)]
    pub start: Option<u64>,

    #[arg(long)]
    pub duration: Option<u64>,

    #[arg(long)]
    pub start_max: Option<u64>,

    #[arg(long)]
    pub duration_max: Option<u64>,

    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[arg(long)]
    pub from: u32,

    #[arg(long)]
    pub to: u32,

    #[arg(long)]
    pub timeline: Option<TimelineKind>,

    #[arg(long)]
    pub seed: Option<u64>,
}
