//! CSV export/import of place record sets.
//!
//! The header row matches the `places` schema field names; absent
//! `industry`/`website` values serialize as empty fields and parse back to
//! `None`.

use std::io::{Read, Write};

use thiserror::Error;

use crate::place::Place;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the record set as UTF-8 comma-separated text with a header row.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the underlying writer fails.
pub fn write_places_csv<W: Write>(writer: W, places: &[Place]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for place in places {
        wtr.serialize(place)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the record set to an in-memory CSV buffer.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization fails.
pub fn places_to_csv_bytes(places: &[Place]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_places_csv(&mut buf, places)?;
    Ok(buf)
}

/// Parse a CSV document produced by [`write_places_csv`] back into records.
///
/// # Errors
///
/// Returns [`ExportError`] if the input is not valid CSV or a row fails to
/// deserialize.
pub fn read_places_csv<R: Read>(reader: R) -> Result<Vec<Place>, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut places = Vec::new();
    for row in rdr.deserialize() {
        places.push(row?);
    }
    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_places() -> Vec<Place> {
        vec![
            Place {
                place_id: "sim_a1b2c3d4e5f6g7h8i9j0".to_string(),
                name: "Steuerberater Plus GmbH".to_string(),
                industry: Some("Steuerberater".to_string()),
                address: "Herrengasse 12, Graz, Austria".to_string(),
                lat: 47.071_234_56,
                lng: 15.438_765_43,
                types: "accounting,store".to_string(),
                rating: 4.3,
                user_ratings_total: 211,
                phone: "+43 316 123456".to_string(),
                website: Some("https://steuerberater-42.example.com".to_string()),
                has_website: true,
                fetched_at: "2026-08-07T12:00:00Z".to_string(),
            },
            Place {
                place_id: "sim_z9y8x7w6v5u4t3s2r1q0".to_string(),
                name: "Firma Service OG".to_string(),
                industry: None,
                address: "Grieskai 7, Graz, Austria".to_string(),
                lat: 47.065_4,
                lng: 15.432_1,
                types: "store".to_string(),
                rating: 3.8,
                user_ratings_total: 27,
                phone: "+43 316 654321".to_string(),
                website: None,
                has_website: false,
                fetched_at: "2026-08-07T12:00:01Z".to_string(),
            },
        ]
    }

    #[test]
    fn header_row_matches_schema_field_names() {
        let bytes = places_to_csv_bytes(&sample_places()).expect("export");
        let text = String::from_utf8(bytes).expect("utf-8");
        let header = text.lines().next().expect("header row");
        assert_eq!(
            header,
            "place_id,name,industry,address,lat,lng,types,rating,\
             user_ratings_total,phone,website,has_website,fetched_at"
        );
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let places = sample_places();
        let bytes = places_to_csv_bytes(&places).expect("export");
        let parsed = read_places_csv(bytes.as_slice()).expect("parse");
        assert_eq!(parsed, places);
    }

    #[test]
    fn absent_optionals_become_empty_fields() {
        let places = sample_places();
        let bytes = places_to_csv_bytes(&places).expect("export");
        let text = String::from_utf8(bytes).expect("utf-8");
        let no_website_row = text
            .lines()
            .find(|l| l.contains("sim_z9y8x7w6v5u4t3s2r1q0"))
            .expect("row present");
        assert!(no_website_row.contains(",,false,"), "row: {no_website_row}");
    }

    #[test]
    fn empty_record_set_exports_empty_document() {
        let bytes = places_to_csv_bytes(&[]).expect("export");
        // csv::Writer only learns the header from the first serialized row,
        // so an empty set produces an empty document.
        assert!(bytes.is_empty());
        let parsed = read_places_csv(bytes.as_slice()).expect("parse");
        assert!(parsed.is_empty());
    }
}
