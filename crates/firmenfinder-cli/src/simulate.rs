use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::SqlitePool;

use firmenfinder_core::{find_capital, load_industries, GeoPoint};
use firmenfinder_sim::{generate_places, SimulationParams};

#[derive(Debug, Args)]
pub(crate) struct SimulateArgs {
    /// State capital to center on (see `capitals`)
    #[arg(long, conflicts_with_all = ["label", "lat", "lng"])]
    capital: Option<String>,
    /// Free-text locality label for a custom center
    #[arg(long, requires = "lat", requires = "lng")]
    label: Option<String>,
    #[arg(long)]
    lat: Option<f64>,
    #[arg(long)]
    lng: Option<f64>,
    /// Scatter radius in meters
    #[arg(long, default_value_t = 2_000.0)]
    radius: f64,
    /// Number of records to generate
    #[arg(long, default_value_t = 80)]
    count: usize,
    /// Restrict to these industries; defaults to the configured vocabulary
    #[arg(long = "industry")]
    industries: Vec<String>,
    /// Probability in percent that a record gets a website
    #[arg(long, default_value_t = 70)]
    website_pct: u8,
    /// Seed the generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Industries vocabulary file
    #[arg(long, env = "FIRMENFINDER_INDUSTRIES_PATH", default_value = "./config/industries.yaml")]
    industries_path: PathBuf,
}

/// Run one simulation: resolve the center, generate records, upsert them.
///
/// # Errors
///
/// Returns an error if the center cannot be resolved, the parameters fail
/// validation, or the database write fails.
pub(crate) async fn run_simulate(pool: &SqlitePool, args: SimulateArgs) -> anyhow::Result<()> {
    let (label, center, area_code) = resolve_center(&args)?;

    let industries = if args.industries.is_empty() {
        match load_industries(&args.industries_path) {
            Ok(file) => file.industries,
            Err(e) => {
                tracing::warn!(error = %e, "industries file unavailable; using fallback label");
                Vec::new()
            }
        }
    } else {
        args.industries
    };

    let params = SimulationParams {
        location_label: label,
        center,
        radius_m: args.radius,
        industries,
        count: args.count,
        website_pct: args.website_pct,
        phone_area_code: area_code,
    };
    params.validate()?;

    let places = match args.seed {
        Some(seed) => generate_places(&mut StdRng::seed_from_u64(seed), &params),
        None => generate_places(&mut rand::rng(), &params),
    };

    let (new, updated) = firmenfinder_db::upsert_places(pool, &places).await?;
    println!(
        "simulated {} listings around {} ({new} new, {updated} updated)",
        places.len(),
        params.location_label
    );
    Ok(())
}

/// Pick the simulation center: a named capital, or an explicit label plus
/// coordinates. Defaults to Graz when nothing is given, like the original
/// interface did.
fn resolve_center(args: &SimulateArgs) -> anyhow::Result<(String, GeoPoint, String)> {
    if let Some(name) = &args.capital {
        let capital = find_capital(name)
            .ok_or_else(|| anyhow::anyhow!("unknown capital '{name}'; see `capitals`"))?;
        return Ok((
            capital.label(),
            capital.center(),
            capital.area_code.to_string(),
        ));
    }

    if let (Some(label), Some(lat), Some(lng)) = (&args.label, args.lat, args.lng) {
        return Ok((label.clone(), GeoPoint { lat, lng }, "316".to_string()));
    }

    let graz = find_capital("Graz").expect("Graz is always present");
    Ok((graz.label(), graz.center(), graz.area_code.to_string()))
}
