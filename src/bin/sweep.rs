//! Sweep Runner
//!
//! Plays every combination of shortcut table, snack budget, snack rule and
//! strategy, and prints one JSON line of statistics per combination.

use std::io::Write;

use cat_chase::simulation::{run_sweep_with, SweepConfig};
use cat_chase::strategy::Strategy;
use cat_chase::{GameConfig, SnackRule};
use clap::Parser;

/// Sweep Runner - aggregate outcomes of many chase games
#[derive(Parser, Debug)]
#[command(name = "cat-chase-sweep")]
#[command(about = "Play a grid of chase game configurations and print JSON statistics")]
struct Args {
    /// Games per combination
    #[arg(long, default_value_t = 100)]
    repetitions: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads per combination
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Strategy tag to include (repeatable; default: all)
    #[arg(long = "strategy")]
    strategies: Vec<Strategy>,

    /// Snack rule to include: disabled, close_at_2 or close_at_2_reset
    /// (repeatable; default: all)
    #[arg(long = "snack-rule")]
    snack_rules: Vec<SnackRule>,

    /// Snack budget to include (repeatable; default: 0, 3, 4, 5, 6)
    #[arg(long = "snack-budget")]
    snack_budgets: Vec<u32>,

    /// Turns before a game is abandoned
    #[arg(long, default_value_t = 10_000)]
    max_turns: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "Starting sweep");

    let mut config = SweepConfig::default()
        .with_repetitions(args.repetitions)
        .with_seed(seed)
        .with_threads(args.threads)
        .with_base(GameConfig::default().with_max_turns(args.max_turns));
    if !args.strategies.is_empty() {
        config = config.with_strategies(args.strategies);
    }
    if !args.snack_rules.is_empty() {
        config = config.with_snack_rules(args.snack_rules);
    }
    if !args.snack_budgets.is_empty() {
        config = config.with_snack_budgets(args.snack_budgets);
    }

    let stdout = std::io::stdout();
    run_sweep_with(&config, |stats| {
        let line = match serde_json::to_string(stats) {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(%err, "could not serialize statistics");
                return;
            }
        };
        if let Err(err) = writeln!(stdout.lock(), "{line}") {
            tracing::error!(%err, "could not write statistics");
        }
    });
}
