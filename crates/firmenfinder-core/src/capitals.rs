//! The nine Austrian state capitals used as simulation centers.

use crate::place::GeoPoint;

/// An Austrian state capital: simulation center plus the local phone area
/// code used when synthesizing phone numbers for that city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capital {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub area_code: &'static str,
}

impl Capital {
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }

    /// Location label as it appears in synthesized addresses.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, Austria", self.name)
    }
}

/// Approximate center coordinates of the nine Landeshauptstädte.
pub const CAPITALS: &[Capital] = &[
    Capital {
        name: "Wien",
        lat: 48.2082,
        lng: 16.3738,
        area_code: "1",
    },
    Capital {
        name: "St. Pölten",
        lat: 48.2036,
        lng: 15.6243,
        area_code: "2742",
    },
    Capital {
        name: "Linz",
        lat: 48.3069,
        lng: 14.2858,
        area_code: "732",
    },
    Capital {
        name: "Salzburg",
        lat: 47.8095,
        lng: 13.0550,
        area_code: "662",
    },
    Capital {
        name: "Innsbruck",
        lat: 47.2692,
        lng: 11.4041,
        area_code: "512",
    },
    Capital {
        name: "Bregenz",
        lat: 47.5031,
        lng: 9.7471,
        area_code: "5574",
    },
    Capital {
        name: "Graz",
        lat: 47.0707,
        lng: 15.4395,
        area_code: "316",
    },
    Capital {
        name: "Klagenfurt",
        lat: 46.6247,
        lng: 14.3053,
        area_code: "463",
    },
    Capital {
        name: "Eisenstadt",
        lat: 47.8456,
        lng: 16.5232,
        area_code: "2682",
    },
];

/// Look up a capital by name, case-insensitively.
#[must_use]
pub fn find_capital(name: &str) -> Option<&'static Capital> {
    let needle = name.trim();
    CAPITALS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(needle))
}
