//! Row types for the `places` table.

use firmenfinder_core::Place;

/// A row from the `places` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlaceRow {
    pub place_id: String,
    pub name: String,
    pub industry: Option<String>,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub types: String,
    pub rating: f64,
    pub user_ratings_total: i64,
    pub phone: String,
    pub website: Option<String>,
    pub has_website: bool,
    pub fetched_at: String,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Place {
            place_id: row.place_id,
            name: row.name,
            industry: row.industry,
            address: row.address,
            lat: row.lat,
            lng: row.lng,
            types: row.types,
            rating: row.rating,
            user_ratings_total: row.user_ratings_total,
            phone: row.phone,
            website: row.website,
            has_website: row.has_website,
            fetched_at: row.fetched_at,
        }
    }
}

/// A pin row for the map — just the fields a marker and its tooltip need.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlacePinRow {
    pub place_id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub rating: f64,
    pub user_ratings_total: i64,
}

/// Website-presence filter for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebsiteFilter {
    #[default]
    All,
    WithWebsite,
    WithoutWebsite,
}
