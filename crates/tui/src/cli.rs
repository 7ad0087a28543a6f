use clap::{value_parser, Args, Parser, Subcommand};

use crate::registry::DemoId;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "demodeck",
    version,
    about = "A keyboard-first terminal gallery of simulated platform capability demos.",
    after_help = "Examples:\n  demodeck                     Launch the gallery (same as `demodeck tui`)\n  demodeck --panel location    Open the location panel directly\n  demodeck --seed 42           Replay a deterministic session\n  demodeck simulate --batches 5 --json\n  demodeck list"
)]
pub struct Cli {
    /// Open this panel instead of the landing view
    #[arg(long, value_enum, value_name = "DEMO", global = true)]
    pub panel: Option<DemoId>,

    /// Fix the simulation RNG seed (overrides DEMODECK_SEED)
    #[arg(long, value_name = "SEED", global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal gallery (default command)
    Tui,
    /// Print the demo registry
    List(ListArgs),
    /// Run the idle task queue headlessly and print a completion report
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Emit the registry as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of task batches to enqueue before processing
    #[arg(long, default_value_t = 3, value_parser = value_parser!(u32).range(1..=64))]
    pub batches: u32,

    /// Emit the report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}
