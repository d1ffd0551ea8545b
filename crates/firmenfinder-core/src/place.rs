//! The place record — one synthesized company listing.

use serde::{Deserialize, Serialize};

/// A coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// One simulated company listing.
///
/// Field order matches the `places` table columns and the CSV header row.
/// `has_website` is derived state: it must always equal `website.is_some()`.
/// The synthesizer is the only producer of these records; they are never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub industry: Option<String>,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Comma-joined tags from the fixed type vocabulary.
    pub types: String,
    pub rating: f64,
    pub user_ratings_total: i64,
    pub phone: String,
    pub website: Option<String>,
    pub has_website: bool,
    /// UTC timestamp, `YYYY-MM-DDTHH:MM:SSZ`.
    pub fetched_at: String,
}

impl Place {
    /// The coordinate this record was generated at.
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}
