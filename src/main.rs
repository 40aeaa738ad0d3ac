use clap::Parser;
use reading_machine::cli::commands::{Cli, Commands};
use reading_machine::config::{db_path_from_env, MarketForceConfig};
use reading_machine::domain::values::commodity::Commodity;
use reading_machine::ReadingMachine;
use std::fs::File;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error initializing logging: {e}");
    }

    let db_path = db_path_from_env();
    let rm = match ReadingMachine::new(&db_path) {
        Ok(rm) => rm,
        Err(e) => {
            eprintln!("Error opening {db_path}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(rm, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(rm: ReadingMachine, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::ComputeMarketForce {
            commodities,
            table,
            alpha,
            plot_dir,
        } => {
            let mut config = MarketForceConfig::from_env()?;
            if let Some(list) = commodities {
                config.commodities = Commodity::parse_list(&list)?;
            }
            if let Some(table) = table {
                config.target_table = table;
            }
            if let Some(alpha) = alpha {
                config.ridge_alpha = alpha;
            }
            if plot_dir.is_some() {
                config.plot_dir = plot_dir;
            }

            let report = rm.compute_market_force(&config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::ImportPrices { path } => {
            let count = rm.import_prices(File::open(&path)?)?;
            println!("Imported {count} prices from {}", path.display());
        }
        Commands::ImportSentiments { path } => {
            let count = rm.import_sentiments(File::open(&path)?)?;
            println!("Imported {count} sentiment scores from {}", path.display());
        }
        Commands::Show { table, limit } => {
            let config = MarketForceConfig::from_env()?;
            let table = table.unwrap_or(config.target_table);
            let rows = rm.market_force(&table, &config.date_column, Some(limit))?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Commands::Dag => {
            let graph = rm.pipeline();
            let order = graph.topological_order()?;
            let out = serde_json::json!({
                "graph": &graph,
                "order": order,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
