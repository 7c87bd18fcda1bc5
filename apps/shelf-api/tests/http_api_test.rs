//! HTTP contract tests: drive the full router with `oneshot`, no socket.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shelf_api::{router, AppState};
use shelf_core::ReservationStore;
use shelf_db::{Database, DbConfig};

// =============================================================================
// Helpers
// =============================================================================

struct TestApp {
    router: Router,
    db: Database,
}

impl TestApp {
    async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = AppState::new(db.clone(), ReservationStore::with_demo_inventory());
        TestApp {
            router: router(state),
            db,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    /// Creates an item and returns its id.
    async fn create(&self, body: Value) -> String {
        let (status, item) = self.send(Method::POST, "/api/v1/items", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{item}");
        item["id"].as_str().unwrap().to_string()
    }
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect()
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_create_then_get_returns_same_record() {
    let app = TestApp::new().await;

    let (status, created) = app
        .send(
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965,
                "price": 19.99,
                "category": "Sci-Fi",
                "rating": 4.7
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["price"], 19.99);
    assert_eq!(created["created_at"], created["updated_at"]);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = app.get(&format!("/api/v1/items/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, summary) = app.get(&format!("/api/v1/items/{id}/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        summary,
        json!({"id": id, "title": "Dune", "author": "Frank Herbert"})
    );
}

#[tokio::test]
async fn test_absent_and_zero_pages_are_distinct() {
    let app = TestApp::new().await;

    let absent = app
        .create(json!({"title": "A", "author": "X", "price": 1}))
        .await;
    let zero = app
        .create(json!({"title": "B", "author": "X", "price": 1, "pages": 0, "original_price": 0}))
        .await;

    let (_, absent) = app.get(&format!("/api/v1/items/{absent}")).await;
    assert!(absent.get("pages").is_none());
    assert!(absent.get("original_price").is_none());

    let (_, zero) = app.get(&format!("/api/v1/items/{zero}")).await;
    assert_eq!(zero["pages"], 0);
    assert_eq!(zero["original_price"], 0.0);
}

#[tokio::test]
async fn test_invalid_bodies_answer_400() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/items",
            Some(json!({"title": "", "author": "X", "price": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/items",
            Some(json!({"title": "T", "author": "X", "price": 1, "year": 3000})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send_request(malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Nothing was written
    let (_, all) = app.get("/api/v1/items").await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_update() {
    let app = TestApp::new().await;
    let id = app
        .create(json!({"title": "Dune", "author": "Frank Herbert", "price": 10, "pages": 412}))
        .await;

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/api/v1/items/{id}"),
            Some(json!({"title": "Dune Messiah", "author": "Frank Herbert", "price": 12.5})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Dune Messiah");
    assert_eq!(updated["price"], 12.5);
    // Full replace
    assert!(updated.get("pages").is_none());
    assert!(updated["updated_at"].as_str().unwrap() >= updated["created_at"].as_str().unwrap());

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/v1/items/missing",
            Some(json!({"title": "X", "author": "Y", "price": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new().await;
    let id = app
        .create(json!({"title": "Dune", "author": "Frank Herbert", "price": 10}))
        .await;

    let uri = format!("/api/v1/items/{id}");
    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Listing, search, views
// =============================================================================

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new().await;
    app.create(json!({"title": "Alpha", "author": "A", "price": 1, "year": 2020, "category": "Fiction"}))
        .await;
    app.create(json!({"title": "Beta", "author": "B", "price": 1, "year": 2020, "category": "History"}))
        .await;
    app.create(json!({"title": "Gamma", "author": "C", "price": 1, "year": 2021, "category": "Fiction"}))
        .await;

    let (status, body) = app.get("/api/v1/items?year=2020&category=Fiction").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Alpha"]);

    let (_, body) = app.get("/api/v1/items").await;
    assert_eq!(titles(&body), vec!["Alpha", "Beta", "Gamma"]);

    let (status, body) = app.get("/api/v1/items?category=Sneakers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // Empty values are no filter at all
    let (status, body) = app.get("/api/v1/items?year=&category=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Alpha", "Beta", "Gamma"]);

    let (_, body) = app.get("/api/v1/items?category=&year=2021").await;
    assert_eq!(titles(&body), vec!["Gamma"]);

    let (status, _) = app.get("/api/v1/items?year=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/v1/items?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/api/v1/categories").await;
    assert_eq!(body, json!(["Fiction", "History"]));
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new().await;
    app.create(json!({"title": "Air Force 1", "author": "Nike", "price": 3500}))
        .await;
    app.create(json!({"title": "Ultraboost 22", "author": "Adidas", "price": 4200}))
        .await;

    let (status, body) = app.get("/api/v1/items/search?q=nike").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Air Force 1"]);

    app.create(json!({"title": "Über Alles", "author": "Émile Zola", "price": 12}))
        .await;
    for uri in [
        "/api/v1/items/search?q=%C3%BCber",
        "/api/v1/items/search?q=%C3%89MILE",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(titles(&body), vec!["Über Alles"], "{uri}");
    }

    for uri in ["/api/v1/items/search?q=", "/api/v1/items/search"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_views() {
    let app = TestApp::new().await;
    app.create(json!({"title": "Old Classic", "author": "A", "price": 1, "rating": 4.9, "reviews_count": 10}))
        .await;
    app.create(json!({"title": "Sale", "author": "B", "price": 1, "rating": 3.0, "discount": 40}))
        .await;
    app.create(json!({"title": "Fresh", "author": "C", "price": 1, "rating": 4.2, "is_new": true, "discount": 5}))
        .await;

    let (_, body) = app.get("/api/v1/items/featured").await;
    assert_eq!(titles(&body), vec!["Old Classic", "Fresh"]);

    let (_, body) = app.get("/api/v1/items/discounted").await;
    assert_eq!(titles(&body), vec!["Sale", "Fresh"]);

    let (_, body) = app.get("/api/v1/items/discounted?limit=1").await;
    assert_eq!(titles(&body), vec!["Sale"]);

    let (_, body) = app.get("/api/v1/items/new").await;
    assert_eq!(titles(&body), vec!["Fresh"]);

    for uri in ["/api/v1/items/new?limit=0", "/api/v1/items/featured?limit=abc"] {
        let (status, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

// =============================================================================
// Reservations
// =============================================================================

#[tokio::test]
async fn test_reserve_flow() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/reserve?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit"]["id"], "1");
    assert_eq!(body["unit"]["reserved"], true);
    assert_eq!(body["unit"]["stock"], 10);

    let (status, body) = app.get("/api/v1/reserve?id=1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = app.send(Method::POST, "/api/v1/reserve?id=2", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/v1/reserve").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = app.get("/api/v1/reserve?id=42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_inventory_listing() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/inventory").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let (_, body) = app.get("/api/v1/inventory?id=3").await;
    assert_eq!(body[0]["brand"], "New Balance");
    assert_eq!(body[0]["price"], 2800.0);

    let (_, body) = app.get("/api/v1/inventory?id=99").await;
    assert_eq!(body, json!([]));
}

// =============================================================================
// Health and fallback
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));

    app.db.close().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "unhealthy"}));
}

#[tokio::test]
async fn test_unknown_route_uses_error_shape() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
