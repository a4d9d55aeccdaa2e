use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mandi_catalog::{CatalogError, CatalogSource, InMemorySource};
use mandi_core::{CatalogEntry, Shop, ShopCatalog};
use mandi_recipes::{RecipeClient, RetryPolicy};

use super::{build_app, AppState};
use crate::middleware::RateLimitState;

fn entry(id: &str, name: &str, shop: Option<(&str, &str)>) -> CatalogEntry {
    CatalogEntry {
        id: id.to_owned(),
        name: name.to_owned(),
        price: 42.0,
        image: None,
        shop_id: shop.map(|(sid, _)| sid.to_owned()),
        shop_name: shop.map(|(_, sname)| sname.to_owned()),
    }
}

fn seeded_source() -> InMemorySource {
    let shop = Shop {
        id: "s1".to_owned(),
        name: "Sharma Kirana".to_owned(),
        address: None,
        latitude: Some(28.6519),
        longitude: Some(77.1909),
    };
    let far_shop = Shop {
        id: "s2".to_owned(),
        name: "Far Away Store".to_owned(),
        address: None,
        latitude: Some(19.0760),
        longitude: Some(72.8777),
    };
    let entries = vec![
        entry("p1", "Fresh Onions 1kg", Some(("s1", "Sharma Kirana"))),
        entry("p2", "Cherry Tomatoes 500g", Some(("s1", "Sharma Kirana"))),
    ];
    InMemorySource {
        shop_catalogs: vec![
            ShopCatalog {
                shop,
                entries: entries.clone(),
            },
            ShopCatalog {
                shop: far_shop,
                entries: Vec::new(),
            },
        ],
        flat: entries,
    }
}

/// A source whose every fetch fails, for the degraded paths.
struct DeadSource;

impl CatalogSource for DeadSource {
    fn shop_catalogs(
        &self,
    ) -> impl Future<Output = Result<Vec<ShopCatalog>, CatalogError>> + Send {
        async { Err(CatalogError::Unavailable("backend down".to_owned())) }
    }

    fn flat_catalog(&self) -> impl Future<Output = Result<Vec<CatalogEntry>, CatalogError>> + Send {
        async { Err(CatalogError::Unavailable("backend down".to_owned())) }
    }

    fn shops(&self) -> impl Future<Output = Result<Vec<Shop>, CatalogError>> + Send {
        async { Err(CatalogError::Unavailable("backend down".to_owned())) }
    }
}

fn app_with<C: CatalogSource + 'static>(source: C, recipe_base_url: &str) -> axum::Router {
    let state = AppState {
        catalog: Arc::new(source),
        recipes: Arc::new(
            RecipeClient::with_base_url(None, 5, recipe_base_url)
                .expect("client construction should not fail"),
        ),
        retry: RetryPolicy {
            max_retries: 0,
            backoff_base_ms: 0,
        },
    };
    build_app(state, RateLimitState::new(100, Duration::from_secs(60)))
}

async fn mock_generator(ingredients: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "recipe": {
                "title": "Quick Sabzi",
                "description": "Weeknight vegetable stir-fry.",
                "ingredients": ingredients,
            }
        })))
        .mount(&server)
        .await;
    server
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test]
async fn health_reports_ok_with_readable_catalog() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::get("/api/v1/health")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "ok");
    assert!(body["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn health_degrades_when_catalog_unreadable() {
    let app = app_with(DeadSource, "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::get("/api/v1/health")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn suggest_matches_generated_ingredients() {
    let generator = mock_generator(&["onions", "tomatoes", "paneer"]).await;
    let app = app_with(seeded_source(), &generator.uri());

    let response = app
        .oneshot(
            Request::post("/api/v1/recipes/suggest")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query":"quick sabzi"}"#))
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["recipe"]["title"], "Quick Sabzi");
    assert_eq!(body["data"]["available"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["unavailable"], serde_json::json!(["paneer"]));
}

#[tokio::test]
async fn suggest_with_dead_catalog_degrades_to_all_unavailable() {
    let generator = mock_generator(&["onions", "tomatoes"]).await;
    let app = app_with(DeadSource, &generator.uri());

    let response = app
        .oneshot(
            Request::post("/api/v1/recipes/suggest")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query":"quick sabzi"}"#))
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]["available"].as_array().unwrap().is_empty());
    assert_eq!(
        body["data"]["unavailable"],
        serde_json::json!(["onions", "tomatoes"])
    );
}

#[tokio::test]
async fn suggest_maps_generator_failure_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ERROR",
            "error": "model overloaded"
        })))
        .mount(&server)
        .await;
    let app = app_with(seeded_source(), &server.uri());

    let response = app
        .oneshot(
            Request::post("/api/v1/recipes/suggest")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query":"quick sabzi"}"#))
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "upstream_error");
}

#[tokio::test]
async fn suggest_rejects_blank_query() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::post("/api/v1/recipes/suggest")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query":"  "}"#))
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stock_check_splits_in_stock_and_missing() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::post("/api/v1/stock/check")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"ingredients":["onions","paneer"]}"#))
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["in_stock"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["in_stock"][0]["shop_name"], "Sharma Kirana");
    assert_eq!(body["data"]["missing"], serde_json::json!(["paneer"]));
}

#[tokio::test]
async fn stock_check_rejects_empty_ingredient_list() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::post("/api/v1/stock/check")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"ingredients":[]}"#))
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearby_returns_annotated_shops_sorted() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::get("/api/v1/shops/nearby?lat=28.6519&lng=77.1909&radius_km=20")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = body["data"].as_array().unwrap();
    // Far Away Store (Mumbai) is well outside a 20 km radius of Karol Bagh.
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], "s1");
    assert!(data[0]["distance"].is_f64());
}

#[tokio::test]
async fn nearby_zoom_controls_radius() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    // Zoom 15 -> 3 km radius; Connaught Place is ~3.4 km from Sharma Kirana
    // and ~1150 km from the Mumbai shop, so both fall outside.
    let response = app
        .oneshot(
            Request::get("/api/v1/shops/nearby?lat=28.6315&lng=77.2167&zoom=15")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn nearby_without_center_returns_empty_list() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::get("/api/v1/shops/nearby?radius_km=20")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn nearby_with_single_coordinate_returns_empty_list() {
    // A shop sitting on the prime meridian would be in range of the
    // defaulted half of a one-coordinate center.
    let source = InMemorySource {
        shop_catalogs: vec![ShopCatalog {
            shop: Shop {
                id: "s9".to_owned(),
                name: "Meridian Store".to_owned(),
                address: None,
                latitude: Some(28.65),
                longitude: Some(0.0),
            },
            entries: Vec::new(),
        }],
        flat: Vec::new(),
    };
    let app = app_with(source, "http://127.0.0.1:9");

    let response = app
        .oneshot(
            Request::get("/api/v1/shops/nearby?lat=28.65&radius_km=20")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn nearby_rejects_non_positive_radius() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::get("/api/v1/shops/nearby?lat=28.6&lng=77.2&radius_km=0")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rate_limit_kicks_in_after_budget_exhausted() {
    let state = AppState {
        catalog: Arc::new(seeded_source()),
        recipes: Arc::new(
            RecipeClient::with_base_url(None, 5, "http://127.0.0.1:9")
                .expect("client construction should not fail"),
        ),
        retry: RetryPolicy {
            max_retries: 0,
            backoff_base_ms: 0,
        },
    };
    let app = build_app(state, RateLimitState::new(1, Duration::from_secs(60)));

    let first = app
        .clone()
        .oneshot(
            Request::get("/api/v1/shops/nearby?lat=28.6&lng=77.2&radius_km=5")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(
            Request::get("/api/v1/shops/nearby?lat=28.6&lng=77.2&radius_km=5")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let app = app_with(seeded_source(), "http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::get("/api/v1/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        &"abc-123"
    );
}
