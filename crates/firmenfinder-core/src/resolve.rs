//! Maps a clicked map coordinate back to the record it was rendered from.
//!
//! The map frontend re-emits the exact stored floats on a marker click, so
//! equality after rounding to 6 decimal digits (~0.11 m at the equator) is a
//! safe substitute for nearest-neighbor search. This only holds because the
//! coordinate is round-tripped unchanged, not independently measured.

use crate::place::Place;

const COORD_DECIMALS_FACTOR: f64 = 1e6;

/// Round a coordinate to 6 decimal digits.
#[must_use]
pub fn round_coord(value: f64) -> f64 {
    (value * COORD_DECIMALS_FACTOR).round() / COORD_DECIMALS_FACTOR
}

/// Find the record whose stored coordinates match the clicked point.
///
/// Both sides are rounded to 6 decimals and compared on both axes. Returns
/// `None` for an empty slice or when nothing matches — a normal miss, not an
/// error. If two records round to the same pair, the first in `places` wins.
#[must_use]
pub fn resolve_clicked_place(places: &[Place], lat: f64, lng: f64) -> Option<&Place> {
    let lat_r = round_coord(lat);
    let lng_r = round_coord(lng);
    places
        .iter()
        .find(|p| round_coord(p.lat) == lat_r && round_coord(p.lng) == lng_r)
}
