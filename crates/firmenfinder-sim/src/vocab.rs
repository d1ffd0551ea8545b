//! Fixed vocabularies the synthesizer draws from.

/// Tag vocabulary for the comma-joined `types` column.
pub const TYPE_POOL: &[&str] = &[
    "accounting",
    "restaurant",
    "electrician",
    "plumber",
    "real_estate_agency",
    "dentist",
    "lawyer",
    "hair_care",
    "gym",
    "store",
    "car_repair",
];

/// Street names used in synthesized addresses.
pub const STREET_POOL: &[&str] = &[
    "Hauptstraße",
    "Bahnhofstraße",
    "Herrengasse",
    "Annenstraße",
    "Keplerstraße",
    "Grieskai",
    "Idlhofgasse",
];

/// Legal-entity suffixes for company names.
pub const LEGAL_SUFFIXES: &[&str] = &["GmbH", "OG", "KG", "e.U.", "AG"];

/// Name modifiers slotted between industry and legal suffix.
pub const NAME_MODIFIERS: &[&str] = &["Plus", "Pro", "Center", "Studio", "Service", "Partner"];

/// Industry label used when the caller selects no industries.
pub const FALLBACK_INDUSTRY: &str = "Firma";
