//! Spatial sampling around a center coordinate.
//!
//! Scatters points uniformly by area within a radius and converts the planar
//! meter offset to degrees. Longitude degrees shrink with latitude, so the
//! east-west conversion divides by the cosine of the center latitude.

use std::f64::consts::PI;

use rand::Rng;

use firmenfinder_core::GeoPoint;

pub const METERS_PER_LAT_DEGREE: f64 = 111_000.0;

/// Floor for the longitude cosine scale. Near the poles `cos(lat)` approaches
/// zero and would blow the longitude spread up without bound; the clamp caps
/// it instead.
pub const MIN_LNG_COS_SCALE: f64 = 0.2;

/// Draw a random point within `radius_m` meters of `center`.
///
/// The radius is drawn as `radius_m * sqrt(u)` with `u` uniform on [0, 1),
/// which distributes points uniformly by area over the disc — drawing the
/// radius uniformly would cluster points at the center. A radius of 0 returns
/// the center exactly.
pub fn sample_point<R: Rng + ?Sized>(rng: &mut R, center: GeoPoint, radius_m: f64) -> GeoPoint {
    let r = radius_m * rng.random_range(0.0..1.0_f64).sqrt();
    let theta = rng.random_range(0.0..2.0 * PI);
    let dx = r * theta.cos();
    let dy = r * theta.sin();

    let dlat = dy / METERS_PER_LAT_DEGREE;
    let lng_scale = center.lat.to_radians().cos().max(MIN_LNG_COS_SCALE);
    let dlng = dx / (METERS_PER_LAT_DEGREE * lng_scale);

    GeoPoint {
        lat: center.lat + dlat,
        lng: center.lng + dlng,
    }
}
