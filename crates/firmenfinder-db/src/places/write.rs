//! Write operations for the `places` table.

use std::collections::HashSet;

use sqlx::SqlitePool;

use firmenfinder_core::Place;

/// Insert new places and overwrite existing ones by `place_id`.
///
/// Returns `(new_count, updated_count)`. Ids are freshly random each
/// simulation run, so in practice every row is new — the update arm exists
/// for the upsert contract, not the common path.
///
/// The whole batch runs inside a single transaction; the new/updated split
/// comes from diffing against the id set fetched before writing (SQLite has
/// no insert-vs-update signal on `ON CONFLICT DO UPDATE`).
///
/// # Errors
///
/// Returns [`sqlx::Error`] if any query fails.
pub async fn upsert_places(pool: &SqlitePool, places: &[Place]) -> Result<(u64, u64), sqlx::Error> {
    if places.is_empty() {
        return Ok((0, 0));
    }

    let existing: HashSet<String> = sqlx::query_scalar("SELECT place_id FROM places")
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect();

    let mut tx = pool.begin().await?;
    let mut new_count: u64 = 0;
    let mut updated_count: u64 = 0;

    for place in places {
        sqlx::query(
            "INSERT INTO places \
                 (place_id, name, industry, address, lat, lng, types, \
                  rating, user_ratings_total, phone, website, has_website, fetched_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13) \
             ON CONFLICT(place_id) DO UPDATE SET \
                 name               = excluded.name, \
                 industry           = excluded.industry, \
                 address            = excluded.address, \
                 lat                = excluded.lat, \
                 lng                = excluded.lng, \
                 types              = excluded.types, \
                 rating             = excluded.rating, \
                 user_ratings_total = excluded.user_ratings_total, \
                 phone              = excluded.phone, \
                 website            = excluded.website, \
                 has_website        = excluded.has_website, \
                 fetched_at         = excluded.fetched_at",
        )
        .bind(&place.place_id)
        .bind(&place.name)
        .bind(&place.industry)
        .bind(&place.address)
        .bind(place.lat)
        .bind(place.lng)
        .bind(&place.types)
        .bind(place.rating)
        .bind(place.user_ratings_total)
        .bind(&place.phone)
        .bind(&place.website)
        .bind(place.has_website)
        .bind(&place.fetched_at)
        .execute(&mut *tx)
        .await?;

        if existing.contains(&place.place_id) {
            updated_count += 1;
        } else {
            new_count += 1;
        }
    }

    tx.commit().await?;

    Ok((new_count, updated_count))
}

/// Delete all rows. Returns the number of rows removed.
///
/// The only destructive operation — records are otherwise immutable once
/// written.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn clear_places(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let rows_affected = sqlx::query("DELETE FROM places")
        .execute(pool)
        .await?
        .rows_affected();

    Ok(rows_affected)
}
