//! Command-line interface for ListLotto

use crate::config::Settings;
use crate::error::{CliError, CliResult};
use crate::report;
use crate::spin::{self, LoadedList};
use clap::{Args, Parser, Subcommand};
use lotto_picker::{Picker, RandomSource, RngSource};
use lotto_reveal::presentation::{ready_summary, selection_summary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ListLotto CLI
#[derive(Parser, Debug)]
#[command(name = "listlotto")]
#[command(about = "Let a weighted lottery pick from your list", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// List file and weighting override shared by every command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// List file (saved list JSON or an array of items)
    #[arg(long, value_name = "FILE")]
    pub list: PathBuf,

    /// Use item weights regardless of the list setting
    #[arg(long, conflicts_with = "no_weights")]
    pub weights: bool,

    /// Ignore item weights regardless of the list setting
    #[arg(long)]
    pub no_weights: bool,
}

impl ListArgs {
    fn use_weights(&self, list: &LoadedList) -> bool {
        if self.weights {
            true
        } else if self.no_weights {
            false
        } else {
            list.use_weights
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the animated reveal
    Spin {
        #[command(flatten)]
        list: ListArgs,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the delays
        #[arg(long)]
        instant: bool,
    },

    /// Pick immediately, or tally many draws
    Pick {
        #[command(flatten)]
        list: ListArgs,

        #[arg(long)]
        seed: Option<u64>,

        /// Number of draws to tally
        #[arg(long, default_value = "1")]
        draws: usize,
    },

    /// Show each item's chance of winning
    Odds {
        #[command(flatten)]
        list: ListArgs,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

/// Parse CLI arguments
pub fn parse() -> Cli {
    Cli::parse()
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    init_logging(&cli.log_level)?;

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Spin { list, seed, instant } => {
            cmd_spin(&settings, list, seed, instant).await?;
        }
        Commands::Pick { list, seed, draws } => {
            cmd_pick(&settings, list, seed, draws)?;
        }
        Commands::Odds { list, format } => {
            cmd_odds(list, &format)?;
        }
    }

    Ok(())
}

/// Initialize logging
fn init_logging(level: &str) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

fn random_source(settings: &Settings, seed: Option<u64>) -> impl RandomSource + Send + 'static {
    match seed.or(settings.seed) {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    }
}

async fn cmd_spin(settings: &Settings, args: ListArgs, seed: Option<u64>, instant: bool) -> CliResult<()> {
    let list = spin::load_list(&args.list)?;
    let use_weights = args.use_weights(&list);
    let count = list.candidates.len();
    let rng = random_source(settings, seed);

    println!("{}: {}", list.title, ready_summary(count));

    let print = |event: &lotto_reveal::RevealEvent| {
        if let Some(line) = report::describe_event(event) {
            println!("{}", line);
        }
    };

    if instant {
        let observer = lotto_reveal::FnObserver(print);
        spin::spin_instant(settings.reveal.clone(), rng, list.candidates, use_weights, observer)?;
    } else {
        spin::spin_live(settings.reveal.clone(), rng, list.candidates, use_weights, print).await?;
    }

    println!("{}", selection_summary(count));
    Ok(())
}

fn cmd_pick(settings: &Settings, args: ListArgs, seed: Option<u64>, draws: usize) -> CliResult<()> {
    let list = spin::load_list(&args.list)?;
    let use_weights = args.use_weights(&list);
    let mut picker = Picker::new(random_source(settings, seed));

    if draws <= 1 {
        let item = picker.pick(&list.candidates, use_weights)?;
        println!("{}", item.text);
    } else {
        let counts = picker.tally(&list.candidates, use_weights, draws)?;
        print!("{}", report::tally_text(&list.candidates, &counts, draws));
    }
    Ok(())
}

fn cmd_odds(args: ListArgs, format: &str) -> CliResult<()> {
    let list = spin::load_list(&args.list)?;
    let rows = report::odds_rows(&list.candidates, args.use_weights(&list));

    match format {
        "text" => print!("{}", report::odds_text(&rows)),
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        other => return Err(CliError::UnknownFormat(other.to_string())),
    }
    Ok(())
}
