//! The record synthesizer: fabricates pseudo-realistic company listings
//! around a center point.

use chrono::Utc;
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;

use firmenfinder_core::{GeoPoint, Place};

use crate::jitter::sample_point;
use crate::vocab::{FALLBACK_INDUSTRY, LEGAL_SUFFIXES, NAME_MODIFIERS, STREET_POOL, TYPE_POOL};

/// Upper bound on the simulation radius, matching the interactive slider.
pub const MAX_RADIUS_M: f64 = 5_000.0;
/// Upper bound on records per simulation run.
pub const MAX_COUNT: usize = 300;

const ID_TAIL_LEN: usize = 20;
const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Error)]
pub enum SimError {
    #[error("location label must be non-empty")]
    EmptyLabel,
    #[error("center coordinate ({lat}, {lng}) is outside valid degrees")]
    CenterOutOfRange { lat: f64, lng: f64 },
    #[error("radius {0} m is outside [0, {MAX_RADIUS_M}]")]
    RadiusOutOfRange(f64),
    #[error("count {0} is outside [1, {MAX_COUNT}]")]
    CountOutOfRange(usize),
    #[error("website percentage {0} exceeds 100")]
    WebsitePctOutOfRange(u8),
}

/// Inputs for one simulation run.
///
/// The widget layer that used to pre-constrain these values is gone, so
/// [`SimulationParams::validate`] enforces the same bounds explicitly at the
/// CLI/API boundary.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    /// Locality appended to every synthesized address, e.g. "Graz, Austria".
    pub location_label: String,
    pub center: GeoPoint,
    pub radius_m: f64,
    /// Industry names to draw from; empty means the generic fallback label.
    pub industries: Vec<String>,
    pub count: usize,
    /// Probability in percent that a record gets a website.
    pub website_pct: u8,
    /// Austrian area code used in synthesized phone numbers.
    pub phone_area_code: String,
}

impl SimulationParams {
    /// Check the interactive surface's bounds.
    ///
    /// Radius 0 is allowed — it pins every record to the center exactly.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] naming the first violated bound.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.location_label.trim().is_empty() {
            return Err(SimError::EmptyLabel);
        }
        if !(-90.0..=90.0).contains(&self.center.lat) || !(-180.0..=180.0).contains(&self.center.lng)
        {
            return Err(SimError::CenterOutOfRange {
                lat: self.center.lat,
                lng: self.center.lng,
            });
        }
        if !self.radius_m.is_finite() || !(0.0..=MAX_RADIUS_M).contains(&self.radius_m) {
            return Err(SimError::RadiusOutOfRange(self.radius_m));
        }
        if self.count == 0 || self.count > MAX_COUNT {
            return Err(SimError::CountOutOfRange(self.count));
        }
        if self.website_pct > 100 {
            return Err(SimError::WebsitePctOutOfRange(self.website_pct));
        }
        Ok(())
    }
}

/// Generate `params.count` fully-populated place records.
///
/// Each record gets a fresh random id and the current UTC timestamp. The
/// routine itself is not seeded — callers wanting reproducible output pass a
/// seeded [`rand::rngs::StdRng`]. Randomness consumption is the only side
/// effect.
pub fn generate_places<R: Rng + ?Sized>(rng: &mut R, params: &SimulationParams) -> Vec<Place> {
    let fetched_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let mut places = Vec::with_capacity(params.count);
    for _ in 0..params.count {
        let industry_label = params
            .industries
            .choose(rng)
            .map_or(FALLBACK_INDUSTRY, String::as_str);
        let point = sample_point(rng, params.center, params.radius_m);
        let types = random_types(rng);
        let rating = (rng.random_range(3.2..4.9_f64) * 10.0).round() / 10.0;
        let user_ratings_total = rng.random_range(5..=1_200_i64);

        let modifier = NAME_MODIFIERS.choose(rng).copied().unwrap_or("Service");
        let suffix = LEGAL_SUFFIXES.choose(rng).copied().unwrap_or("GmbH");
        let name = format!("{industry_label} {modifier} {suffix}");

        let street = STREET_POOL.choose(rng).copied().unwrap_or("Hauptstraße");
        let house_number = rng.random_range(1..=220_u32);
        let address = format!("{street} {house_number}, {}", params.location_label);

        let phone = format!(
            "+43 {} {}",
            params.phone_area_code,
            rng.random_range(100_000..=999_999_u32)
        );

        let website = if rng.random_range(1..=100_u32) <= u32::from(params.website_pct) {
            Some(format!(
                "https://{}-{}.example.com",
                industry_slug(industry_label),
                rng.random_range(10..=999_u32)
            ))
        } else {
            None
        };

        places.push(Place {
            place_id: random_place_id(rng),
            name,
            industry: if params.industries.is_empty() {
                None
            } else {
                Some(industry_label.to_string())
            },
            address,
            lat: point.lat,
            lng: point.lng,
            types,
            rating,
            user_ratings_total,
            phone,
            has_website: website.is_some(),
            website,
            fetched_at: fetched_at.clone(),
        });
    }
    places
}

/// 1–3 distinct tags from the type vocabulary, comma-joined.
fn random_types<R: Rng + ?Sized>(rng: &mut R) -> String {
    let k = rng.random_range(1..=3_usize);
    TYPE_POOL
        .choose_multiple(rng, k)
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}

fn random_place_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let tail: String = (0..ID_TAIL_LEN)
        .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
        .collect();
    format!("sim_{tail}")
}

fn industry_slug(industry: &str) -> String {
    industry.to_lowercase().replace(' ', "-")
}
