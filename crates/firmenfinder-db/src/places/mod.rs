//! Database operations for the `places` table.

mod read;
mod types;
mod write;

pub use read::{count_places, list_place_pins, list_places, search_places};
pub use types::{PlacePinRow, PlaceRow, WebsiteFilter};
pub use write::{clear_places, upsert_places};
