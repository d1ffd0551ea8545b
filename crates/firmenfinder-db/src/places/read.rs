//! Read operations for the `places` table.

use sqlx::SqlitePool;

use super::types::{PlacePinRow, PlaceRow, WebsiteFilter};

const PLACE_COLUMNS: &str = "place_id, name, industry, address, lat, lng, types, \
                             rating, user_ratings_total, phone, website, has_website, fetched_at";

/// List all places, newest simulation run first.
///
/// Ordered by `fetched_at DESC, place_id ASC` — the secondary key keeps the
/// ordering stable within a run, which makes the click resolver's
/// first-match tie-break deterministic.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_places(pool: &SqlitePool) -> Result<Vec<PlaceRow>, sqlx::Error> {
    sqlx::query_as::<_, PlaceRow>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places ORDER BY fetched_at DESC, place_id ASC"
    ))
    .fetch_all(pool)
    .await
}

/// Substring search over name/address/industry/types, with an optional
/// website-presence filter.
///
/// The query is matched case-insensitively as a literal substring; `%` and
/// `_` in the input are escaped so they have no pattern meaning. An empty
/// query matches everything (useful to filter by website presence alone).
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn search_places(
    pool: &SqlitePool,
    query: &str,
    website: WebsiteFilter,
) -> Result<Vec<PlaceRow>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(&query.trim().to_lowercase()));
    let website_clause = match website {
        WebsiteFilter::All => "",
        WebsiteFilter::WithWebsite => " AND has_website = 1",
        WebsiteFilter::WithoutWebsite => " AND has_website = 0",
    };

    sqlx::query_as::<_, PlaceRow>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places \
         WHERE (LOWER(name)                   LIKE ?1 ESCAPE '\\' \
             OR LOWER(address)                LIKE ?1 ESCAPE '\\' \
             OR LOWER(COALESCE(industry, '')) LIKE ?1 ESCAPE '\\' \
             OR LOWER(types)                  LIKE ?1 ESCAPE '\\'){website_clause} \
         ORDER BY fetched_at DESC, place_id ASC"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await
}

/// Total number of stored places.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_places(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM places")
        .fetch_one(pool)
        .await
}

/// Return the fields a map marker needs, for every place.
///
/// Same ordering as [`list_places`], so pin indices line up with the full
/// listing.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_place_pins(pool: &SqlitePool) -> Result<Vec<PlacePinRow>, sqlx::Error> {
    sqlx::query_as::<_, PlacePinRow>(
        "SELECT place_id, name, lat, lng, rating, user_ratings_total \
         FROM places \
         ORDER BY fetched_at DESC, place_id ASC",
    )
    .fetch_all(pool)
    .await
}

/// Escape LIKE pattern metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
