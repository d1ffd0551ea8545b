mod export;
mod query;
mod simulate;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "firmenfinder")]
#[command(about = "Simulate and query company listings around Austrian state capitals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate fake company listings and store them
    Simulate(simulate::SimulateArgs),
    /// List all stored listings, newest run first
    List {
        /// Maximum number of rows to print
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Substring search over name/address/industry/types
    Search(query::SearchArgs),
    /// Resolve a clicked map coordinate back to its record
    Resolve {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
    },
    /// Export the record set as CSV
    Export(export::ExportArgs),
    /// Delete all stored listings
    Clear,
    /// Print the available state capitals
    Capitals,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let pool = firmenfinder_db::connect_pool_from_env().await?;
    let applied = firmenfinder_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }

    match cli.command {
        Commands::Simulate(args) => simulate::run_simulate(&pool, args).await,
        Commands::List { limit } => query::run_list(&pool, limit).await,
        Commands::Search(args) => query::run_search(&pool, args).await,
        Commands::Resolve { lat, lng } => query::run_resolve(&pool, lat, lng).await,
        Commands::Export(args) => export::run_export(&pool, args).await,
        Commands::Clear => {
            let removed = firmenfinder_db::clear_places(&pool).await?;
            println!("removed {removed} listings");
            Ok(())
        }
        Commands::Capitals => {
            let header = format!("{:<14}{:>10}{:>10}  AREA CODE", "CAPITAL", "LAT", "LNG");
            println!("{header}");
            for capital in firmenfinder_core::CAPITALS {
                println!(
                    "{:<14}{:>10.4}{:>10.4}  {}",
                    capital.name, capital.lat, capital.lng, capital.area_code
                );
            }
            Ok(())
        }
    }
}
