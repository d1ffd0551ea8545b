mod places;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use firmenfinder_core::AppConfig;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<i64>) -> usize {
    usize::try_from(limit.unwrap_or(100).clamp(1, 500)).unwrap_or(100)
}

pub(super) fn map_db_error(request_id: String, error: &sqlx::Error) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::new(request_id, "internal_error", "database query failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/places",
            get(places::list_places).delete(places::clear_places),
        )
        .route("/api/v1/places/pins", get(places::list_place_pins))
        .route("/api/v1/places/resolve", get(places::resolve_place))
        .route("/api/v1/places/export", get(places::export_places))
        .route("/api/v1/simulate", post(places::simulate))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match firmenfinder_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::places::PlaceItem;
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state(pool: SqlitePool) -> AppState {
        let config = firmenfinder_core::load_app_config_from_env().expect("config");
        AppState {
            pool,
            config: Arc::new(config),
        }
    }

    fn simulate_body(count: usize, website_pct: u8) -> String {
        format!(
            r#"{{"capital":"Graz","radius_m":1500,"count":{count},"website_pct":{website_pct},"industries":["Steuerberater","Friseur"]}}"#
        )
    }

    async fn json_response(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[test]
    fn place_item_is_serializable() {
        let item = PlaceItem {
            place_id: "sim_abc".to_string(),
            name: "Steuerberater Plus GmbH".to_string(),
            industry: Some("Steuerberater".to_string()),
            address: "Herrengasse 12, Graz, Austria".to_string(),
            lat: 47.0707,
            lng: 15.4395,
            types: "accounting".to_string(),
            rating: 4.3,
            user_ratings_total: 211,
            phone: "+43 316 123456".to_string(),
            website: None,
            has_website: false,
            fetched_at: "2026-08-07T12:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&item).expect("serialize PlaceItem");
        assert!(json.contains("\"place_id\":\"sim_abc\""));
        assert!(json.contains("\"has_website\":false"));
    }

    #[test]
    fn normalize_limit_applies_defaults_and_bounds() {
        assert_eq!(normalize_limit(None), 100);
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(10_000)), 500);
        assert_eq!(normalize_limit(Some(25)), 25);
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_not_found_maps_to_404() {
        let response = ApiError::new("req-1", "not_found", "no such record").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn health_returns_ok(pool: SqlitePool) {
        let app = build_app(test_state(pool));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn simulate_then_list_then_resolve(pool: SqlitePool) {
        let app = build_app(test_state(pool));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/simulate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(simulate_body(30, 70)))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["data"]["generated"], 30);
        assert_eq!(json["data"]["new"], 30);
        assert_eq!(json["data"]["location_label"], "Graz, Austria");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/places")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 30);

        let lat = data[5]["lat"].as_f64().expect("lat");
        let lng = data[5]["lng"].as_f64().expect("lng");
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/places/resolve?lat={lat}&lng={lng}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["data"]["place_id"], data[5]["place_id"]);

        // A coordinate matching no marker is an informational miss.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/places/resolve?lat=0.0&lng=0.0")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_response(response).await;
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn simulate_rejects_out_of_range_radius(pool: SqlitePool) {
        let app = build_app(test_state(pool));
        let body = r#"{"capital":"Graz","radius_m":9999,"count":10,"website_pct":50}"#;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/simulate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_response(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn simulate_rejects_unknown_capital(pool: SqlitePool) {
        let app = build_app(test_state(pool));
        let body = r#"{"capital":"Berlin","count":10}"#;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/simulate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_response(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn places_rejects_invalid_website_filter(pool: SqlitePool) {
        let app = build_app(test_state(pool));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/places?website=sometimes")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_response(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn website_filter_narrows_listing(pool: SqlitePool) {
        let app = build_app(test_state(pool));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/simulate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(simulate_body(20, 0)))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/places?website=with")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let json = json_response(response).await;
        assert_eq!(json["data"].as_array().map(Vec::len), Some(0));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/places?website=without")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let json = json_response(response).await;
        assert_eq!(json["data"].as_array().map(Vec::len), Some(20));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn clear_empties_the_table(pool: SqlitePool) {
        let app = build_app(test_state(pool));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/simulate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(simulate_body(10, 50)))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/places")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_response(response).await;
        assert_eq!(json["data"]["removed"], 10);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/places")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let json = json_response(response).await;
        assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn export_returns_csv_attachment(pool: SqlitePool) {
        let app = build_app(test_state(pool));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/simulate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(simulate_body(5, 50)))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/places/export")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/csv; charset=utf-8")
        );

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let text = String::from_utf8(body.to_vec()).expect("utf-8");
        let header_row = text.lines().next().expect("header row");
        assert!(header_row.starts_with("place_id,name,industry,address,lat,lng"));
        assert_eq!(text.lines().count(), 6, "header plus five rows");
    }
}
