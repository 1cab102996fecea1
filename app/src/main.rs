#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod command;

use command::{
    CommandStrategy, InfoStrategy, InitStrategy, InteractiveInput, InteractiveStrategy,
    MAX_WATCH_SECS, SearchInput, SearchStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "tripfinder")]
#[command(about = "Keyword search over a travel recommendation dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the rendered cards
    Search {
        /// Keyword, e.g. "beaches", "temple" or a country name
        keyword: String,

        /// Dataset path or URL (overrides config)
        #[arg(short = 'd', long)]
        dataset: Option<String>,

        /// Keep clocks running and reprint the results every second for N seconds (max one day)
        #[arg(short = 'w', long, value_parser = clap::value_parser!(u64).range(1..=MAX_WATCH_SECS))]
        watch: Option<u64>,
    },
    /// Search repeatedly from stdin
    Interactive {
        /// Dataset path or URL (overrides config)
        #[arg(short = 'd', long)]
        dataset: Option<String>,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and dataset status
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            keyword,
            dataset,
            watch,
        } => {
            SearchStrategy
                .execute(SearchInput {
                    keyword,
                    dataset,
                    watch_secs: watch,
                })
                .await
        }
        Commands::Interactive { dataset } => {
            InteractiveStrategy
                .execute(InteractiveInput { dataset })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
