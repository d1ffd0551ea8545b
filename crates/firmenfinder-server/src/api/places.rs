use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use firmenfinder_core::{
    find_capital, load_industries, places_to_csv_bytes, resolve_clicked_place, GeoPoint, Place,
};
use firmenfinder_db::{PlaceRow, WebsiteFilter};
use firmenfinder_sim::{generate_places, SimulationParams};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct PlaceItem {
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

impl From<Place> for PlaceItem {
    fn from(place: Place) -> Self {
        Self {
            place_id: place.place_id,
            name: place.name,
            industry: place.industry,
            address: place.address,
            lat: place.lat,
            lng: place.lng,
            types: place.types,
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            phone: place.phone,
            website: place.website,
            has_website: place.has_website,
            fetched_at: place.fetched_at,
        }
    }
}

impl From<PlaceRow> for PlaceItem {
    fn from(row: PlaceRow) -> Self {
        Place::from(row).into()
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PlacePinItem {
    pub place_id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub rating: f64,
    pub user_ratings_total: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlacesQuery {
    /// Substring to match in name/address/industry/types.
    q: Option<String>,
    /// Website-presence filter: `all`, `with`, or `without`.
    website: Option<String>,
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResolveQuery {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct SimulateRequest {
    /// State capital to center on; mutually exclusive with a custom center.
    capital: Option<String>,
    label: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    radius_m: Option<f64>,
    count: Option<usize>,
    industries: Option<Vec<String>>,
    website_pct: Option<u8>,
}

#[derive(Debug, Serialize)]
pub(super) struct SimulateData {
    generated: usize,
    new: u64,
    updated: u64,
    location_label: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ClearData {
    removed: u64,
}

pub(super) async fn list_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PlacesQuery>,
) -> Result<Json<ApiResponse<Vec<PlaceItem>>>, ApiError> {
    let website = parse_website_filter(query.website.as_deref())
        .map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;
    let limit = normalize_limit(query.limit);

    let rows = match query.q.as_deref() {
        Some(q) if !q.trim().is_empty() => {
            firmenfinder_db::search_places(&state.pool, q, website).await
        }
        _ if website != WebsiteFilter::All => {
            firmenfinder_db::search_places(&state.pool, "", website).await
        }
        _ => firmenfinder_db::list_places(&state.pool).await,
    }
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows.into_iter().take(limit).map(PlaceItem::from).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_place_pins(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<PlacePinItem>>>, ApiError> {
    let rows = firmenfinder_db::list_place_pins(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| PlacePinItem {
            place_id: row.place_id,
            name: row.name,
            lat: row.lat,
            lng: row.lng,
            rating: row.rating,
            user_ratings_total: row.user_ratings_total,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Map a clicked marker coordinate back to its record.
///
/// A miss is a plain 404 `not_found` — the frontend shows an informational
/// message, not an error state.
pub(super) async fn resolve_place(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ApiResponse<PlaceItem>>, ApiError> {
    let places: Vec<Place> = firmenfinder_db::list_places(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .into_iter()
        .map(Place::from)
        .collect();

    match resolve_clicked_place(&places, query.lat, query.lng) {
        Some(place) => Ok(Json(ApiResponse {
            data: PlaceItem::from(place.clone()),
            meta: ResponseMeta::new(req_id.0),
        })),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            "no listing at the clicked coordinates",
        )),
    }
}

pub(super) async fn export_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let places: Vec<Place> = firmenfinder_db::list_places(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .into_iter()
        .map(Place::from)
        .collect();

    let csv = places_to_csv_bytes(&places).map_err(|e| {
        tracing::error!(error = %e, "CSV export failed");
        ApiError::new(req_id.0.clone(), "internal_error", "CSV export failed")
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"places.csv\"",
            ),
        ],
        csv,
    ))
}

pub(super) async fn simulate(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<ApiResponse<SimulateData>>, ApiError> {
    let (location_label, center, area_code) = resolve_request_center(&request)
        .map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;

    let industries = match request.industries {
        Some(industries) => industries,
        None => match load_industries(&state.config.industries_path) {
            Ok(file) => file.industries,
            Err(e) => {
                tracing::warn!(error = %e, "industries file unavailable; using fallback label");
                Vec::new()
            }
        },
    };

    let params = SimulationParams {
        location_label,
        center,
        radius_m: request.radius_m.unwrap_or(state.config.sim_default_radius_m),
        industries,
        count: request.count.unwrap_or(state.config.sim_default_count),
        website_pct: request
            .website_pct
            .unwrap_or(state.config.sim_default_website_pct),
        phone_area_code: area_code,
    };
    params
        .validate()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let places = generate_places(&mut rand::rng(), &params);
    let (new, updated) = firmenfinder_db::upsert_places(&state.pool, &places)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(
        generated = places.len(),
        new,
        updated,
        label = %params.location_label,
        "simulation run stored"
    );

    Ok(Json(ApiResponse {
        data: SimulateData {
            generated: places.len(),
            new,
            updated,
            location_label: params.location_label,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn clear_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ClearData>>, ApiError> {
    let removed = firmenfinder_db::clear_places(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ClearData { removed },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn parse_website_filter(raw: Option<&str>) -> Result<WebsiteFilter, String> {
    match raw {
        None | Some("all") => Ok(WebsiteFilter::All),
        Some("with") => Ok(WebsiteFilter::WithWebsite),
        Some("without") => Ok(WebsiteFilter::WithoutWebsite),
        Some(other) => Err(format!(
            "invalid website filter '{other}'; expected all, with, or without"
        )),
    }
}

/// Pick the simulation center from the request: a named capital, a custom
/// label + coordinates, or the Graz default.
fn resolve_request_center(
    request: &SimulateRequest,
) -> Result<(String, GeoPoint, String), String> {
    if let Some(name) = &request.capital {
        let capital = find_capital(name).ok_or_else(|| format!("unknown capital '{name}'"))?;
        return Ok((
            capital.label(),
            capital.center(),
            capital.area_code.to_string(),
        ));
    }

    match (&request.label, request.lat, request.lng) {
        (Some(label), Some(lat), Some(lng)) => {
            Ok((label.clone(), GeoPoint { lat, lng }, "316".to_string()))
        }
        (None, None, None) => {
            let graz = find_capital("Graz").expect("Graz is always present");
            Ok((graz.label(), graz.center(), graz.area_code.to_string()))
        }
        _ => Err("custom center requires label, lat, and lng together".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn website_filter_parses_all_variants() {
        assert_eq!(parse_website_filter(None).unwrap(), WebsiteFilter::All);
        assert_eq!(
            parse_website_filter(Some("all")).unwrap(),
            WebsiteFilter::All
        );
        assert_eq!(
            parse_website_filter(Some("with")).unwrap(),
            WebsiteFilter::WithWebsite
        );
        assert_eq!(
            parse_website_filter(Some("without")).unwrap(),
            WebsiteFilter::WithoutWebsite
        );
        assert!(parse_website_filter(Some("sometimes")).is_err());
    }

    #[test]
    fn request_center_defaults_to_graz() {
        let request = SimulateRequest {
            capital: None,
            label: None,
            lat: None,
            lng: None,
            radius_m: None,
            count: None,
            industries: None,
            website_pct: None,
        };
        let (label, center, area_code) = resolve_request_center(&request).expect("center");
        assert_eq!(label, "Graz, Austria");
        assert!((center.lat - 47.0707).abs() < 1e-9);
        assert_eq!(area_code, "316");
    }

    #[test]
    fn request_center_rejects_partial_custom_center() {
        let request = SimulateRequest {
            capital: None,
            label: Some("Leoben, Austria".to_string()),
            lat: Some(47.3817),
            lng: None,
            radius_m: None,
            count: None,
            industries: None,
            website_pct: None,
        };
        assert!(resolve_request_center(&request).is_err());
    }
}
