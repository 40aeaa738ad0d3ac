use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reading-machine", about = "Daily commodity market-force stage")]
pub struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the market force of every commodity and replace the published table
    ComputeMarketForce {
        /// Comma separated commodities, in processing order
        #[arg(long)]
        commodities: Option<String>,
        /// Destination table (default: MarketForce)
        #[arg(long)]
        table: Option<String>,
        /// Ridge penalty of the weight estimator
        #[arg(long)]
        alpha: Option<f64>,
        /// Directory for diagnostic SVG plots
        #[arg(long)]
        plot_dir: Option<PathBuf>,
    },
    /// Import daily prices from CSV (date,commodity,price)
    ImportPrices {
        path: PathBuf,
    },
    /// Import harmonised sentiment from CSV (date,commodity,sentiment)
    ImportSentiments {
        path: PathBuf,
    },
    /// Print the published market force rows
    Show {
        #[arg(long)]
        table: Option<String>,
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Print the pipeline graph and its execution order
    Dag,
}
