use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use sqlx::SqlitePool;

use firmenfinder_core::{write_places_csv, Place};
use firmenfinder_db::{list_places, search_places, WebsiteFilter};

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Export only listings matching this substring
    #[arg(long)]
    query: Option<String>,
}

/// Export the (optionally filtered) record set as CSV.
///
/// # Errors
///
/// Returns an error if the database query, serialization, or file write fails.
pub(crate) async fn run_export(pool: &SqlitePool, args: ExportArgs) -> anyhow::Result<()> {
    let rows = match &args.query {
        Some(query) => search_places(pool, query, WebsiteFilter::All).await?,
        None => list_places(pool).await?,
    };
    let places: Vec<Place> = rows.into_iter().map(Place::from).collect();

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_places_csv(file, &places)?;
            println!("exported {} listings to {}", places.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_places_csv(&mut handle, &places)?;
            handle.flush()?;
        }
    }
    Ok(())
}
