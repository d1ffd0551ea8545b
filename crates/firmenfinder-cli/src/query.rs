use clap::Args;
use sqlx::SqlitePool;

use firmenfinder_core::{resolve_clicked_place, Place};
use firmenfinder_db::{list_places, search_places, PlaceRow, WebsiteFilter};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Substring to match in name/address/industry/types
    query: String,
    /// Only listings with a website
    #[arg(long, conflicts_with = "without_website")]
    with_website: bool,
    /// Only listings without a website
    #[arg(long)]
    without_website: bool,
    #[arg(long, default_value_t = 50)]
    limit: usize,
}

/// Print all stored listings, up to `limit` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list(pool: &SqlitePool, limit: usize) -> anyhow::Result<()> {
    let rows = list_places(pool).await?;
    print_rows(&rows, limit);
    Ok(())
}

/// Run a substring search with an optional website-presence filter.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_search(pool: &SqlitePool, args: SearchArgs) -> anyhow::Result<()> {
    let website = if args.with_website {
        WebsiteFilter::WithWebsite
    } else if args.without_website {
        WebsiteFilter::WithoutWebsite
    } else {
        WebsiteFilter::All
    };

    let rows = search_places(pool, &args.query, website).await?;
    print_rows(&rows, args.limit);
    Ok(())
}

/// Resolve a clicked coordinate to its record and print the details.
///
/// A miss is informational, not an error — the coordinate simply matched no
/// marker.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_resolve(pool: &SqlitePool, lat: f64, lng: f64) -> anyhow::Result<()> {
    let places: Vec<Place> = list_places(pool).await?.into_iter().map(Place::from).collect();

    match resolve_clicked_place(&places, lat, lng) {
        Some(place) => print_details(place),
        None => println!("no listing at ({lat}, {lng}); run `simulate` first or click a marker"),
    }
    Ok(())
}

fn print_rows(rows: &[PlaceRow], limit: usize) {
    if rows.is_empty() {
        println!("no listings found; run `simulate` first");
        return;
    }

    let header = format!(
        "{:<34}{:<18}{:>7}  {:<9}ADDRESS",
        "NAME", "INDUSTRY", "RATING", "WEBSITE"
    );
    println!("{header}");
    for row in rows.iter().take(limit) {
        let name = truncate(&row.name, 32);
        let industry = truncate(row.industry.as_deref().unwrap_or("\u{2014}"), 16);
        let website = if row.has_website { "yes" } else { "no" };
        println!(
            "{:<34}{:<18}{:>7.1}  {:<9}{}",
            name, industry, row.rating, website, row.address
        );
    }
    if rows.len() > limit {
        println!("... and {} more (raise --limit)", rows.len() - limit);
    }
}

fn print_details(place: &Place) {
    println!("Name:     {}", place.name);
    println!(
        "Industry: {}",
        place.industry.as_deref().unwrap_or("\u{2014}")
    );
    println!("Address:  {}", place.address);
    println!("Location: ({}, {})", place.lat, place.lng);
    println!(
        "Rating:   {} ({} reviews)",
        place.rating, place.user_ratings_total
    );
    println!("Phone:    {}", place.phone);
    println!(
        "Website:  {}",
        place.website.as_deref().unwrap_or("\u{2014}")
    );
    println!("Types:    {}", place.types);
    println!("Fetched:  {}", place.fetched_at);
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
