//! End-to-end tests exercising the full router: module APIs, document
//! hooks, error envelopes and the server-rendered storefront.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;
use vitrin_app::build_registry;
use vitrin_kernel::{AppState, Settings};

/// Build a router backed by a fresh in-memory database with the full
/// schema applied.
async fn test_app() -> Router {
    let mut settings = Settings::default();
    settings.database.path = ":memory:".to_string();

    let registry = build_registry();
    let pool = vitrin_db::connect(&settings.database).await.unwrap();
    vitrin_db::run_migrations(&pool, &registry.collect_migrations())
        .await
        .unwrap();

    let state = AppState::new(settings, pool);
    vitrin_http::build_router(&registry, state).await.unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

async fn get_page(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

async fn create_category(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/categories",
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn create_product(app: &Router, category_id: &str, title: &str, mrp: Value) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/products",
        Some(json!({
            "title": title,
            "category_id": category_id,
            "description": "Factory-tested unit",
            "mrp": mrp,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn category_create_derives_slug() {
    let app = test_app().await;

    let created = create_category(&app, "  Control   Panels ").await;
    assert_eq!(created["name"], "Control   Panels");
    assert_eq!(created["slug"], "control-panels");

    let (status, listed) = send(&app, Method::GET, "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["docs"][0]["slug"], "control-panels");

    let (status, fetched) = send(&app, Method::GET, "/api/categories/control-panels", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn category_name_conflict_is_409() {
    let app = test_app().await;
    create_category(&app, "Cables").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/categories",
        Some(json!({"name": "Cables"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");
    assert!(body["error"]["trace_id"].as_str().unwrap().len() == 36);
}

#[tokio::test]
async fn product_create_materializes_slug_and_price() {
    let app = test_app().await;
    let category = create_category(&app, "Panels").await;

    let (status, product) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({
            "title": "HT Panel 11kV",
            "category_id": category["id"],
            "description": "Outdoor switchboard",
            "mrp": "1000",
            "discount": "10",
            "price": "5",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{product}");
    assert_eq!(product["slug"], "ht-panel-11kv");
    // The client-sent price is ignored; the stored one is derived.
    assert_eq!(decimal(&product["price"]), dec!(1062.00));
    assert_eq!(product["gst_rate"], "18");

    let (status, fetched) = send(&app, Method::GET, "/api/products/ht-panel-11kv", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], product["id"]);
    assert_eq!(decimal(&fetched["price"]), dec!(1062.00));
}

#[tokio::test]
async fn product_without_mrp_has_no_price() {
    let app = test_app().await;
    let category = create_category(&app, "Panels").await;

    let product = create_product(&app, category["id"].as_str().unwrap(), "LT Panel", Value::Null).await;
    assert!(product["price"].is_null());
    assert!(product["mrp"].is_null());
}

#[tokio::test]
async fn product_requires_title_category_description() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/products", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let details = body["error"]["details"].as_array().unwrap();
    let fields: Vec<_> = details.iter().map(|d| d["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["title", "category_id", "description"]);
}

#[tokio::test]
async fn product_with_unknown_category_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({
            "title": "Orphan",
            "category_id": "0190b5a8-0000-7000-8000-000000000000",
            "description": "No such category",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "category_id");
}

#[tokio::test]
async fn product_patch_recomputes_price() {
    let app = test_app().await;
    let category = create_category(&app, "Panels").await;

    let (_, product) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({
            "title": "MCB 16A",
            "category_id": category["id"],
            "description": "Type C breaker",
            "mrp": "1000",
            "discount": "10",
        })),
    )
    .await;
    let id = product["id"].as_str().unwrap();

    // Dropping the discount reprices from the stored MRP.
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/products/{id}"),
        Some(json!({"discount": "0"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(decimal(&updated["price"]), dec!(1180.00));

    // An explicit null clears the MRP and with it the price.
    let (status, cleared) = send(
        &app,
        Method::PATCH,
        &format!("/api/products/{id}"),
        Some(json!({"mrp": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["mrp"].is_null());
    assert!(cleared["price"].is_null());

    // A retitle keeps pricing untouched but re-derives the slug.
    let (status, renamed) = send(
        &app,
        Method::PATCH,
        &format!("/api/products/{id}"),
        Some(json!({"title": "MCB 16A Type C"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["slug"], "mcb-16a-type-c");
    assert!(renamed["price"].is_null());
}

#[tokio::test]
async fn product_listing_filters_and_paginates() {
    let app = test_app().await;
    let switchgear = create_category(&app, "Switchgear").await;
    let cables = create_category(&app, "Cables").await;
    let switchgear_id = switchgear["id"].as_str().unwrap();
    let cables_id = cables["id"].as_str().unwrap();

    for title in ["MCB 16A", "MCB 32A", "MCB 63A"] {
        create_product(&app, switchgear_id, title, json!("500")).await;
    }
    create_product(&app, cables_id, "Armoured Cable", json!("900")).await;

    let (status, all) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["total"], 4);
    assert_eq!(all["docs"][0]["title"], "Armoured Cable");

    let (status, first) = send(
        &app,
        Method::GET,
        "/api/products?category=switchgear&limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["total"], 3);
    assert_eq!(first["total_pages"], 2);
    assert_eq!(first["docs"].as_array().unwrap().len(), 2);
    assert_eq!(first["docs"][0]["title"], "MCB 63A");

    let (_, second) = send(
        &app,
        Method::GET,
        "/api/products?category=switchgear&limit=2&page=2",
        None,
    )
    .await;
    assert_eq!(second["docs"].as_array().unwrap().len(), 1);
    assert_eq!(second["docs"][0]["title"], "MCB 16A");

    let (status, missing) = send(&app, Method::GET, "/api/products?category=nope", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(missing["total"], 0);
    assert!(missing["docs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_document_id_is_400() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/products/not-a-uuid",
        Some(json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn unknown_slug_returns_404_envelope() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/products/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert!(body["error"]["timestamp"].is_string());
}

#[tokio::test]
async fn category_with_products_cannot_be_deleted() {
    let app = test_app().await;
    let category = create_category(&app, "Panels").await;
    let category_id = category["id"].as_str().unwrap();
    let product = create_product(&app, category_id, "HT Panel", json!("1000")).await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/categories/{category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");

    let product_id = product["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/products/{product_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/categories/{category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/categories/panels", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn video_lifecycle_by_id() {
    let app = test_app().await;

    let (status, video) = send(
        &app,
        Method::POST,
        "/api/videos",
        Some(json!({
            "title": "Panel walkthrough",
            "url": "https://youtu.be/dQw4w9WgXcQ",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{video}");
    let id = video["id"].as_str().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/videos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(fetched["description"].is_null());

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/videos/{id}"),
        Some(json!({"description": "Factory tour"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Factory tour");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/videos/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/videos/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn company_settings_default_and_replace() {
    let app = test_app().await;

    let (status, defaults) = send(&app, Method::GET, "/api/company-settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(defaults["site_title"], "Demo Electricals");
    assert!(defaults["updated_at"].is_null());

    let (status, saved) = send(
        &app,
        Method::PUT,
        "/api/company-settings",
        Some(json!({
            "site_title": "Acme Power",
            "gst_no": "27AAAAA0000A1Z5",
            "contact": {"phone": "+91 98765-43210, +91 11 2345 6789"},
            "social_links": [{"platform": "YouTube", "url": "https://youtube.com/@acme"}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{saved}");
    assert_eq!(saved["site_title"], "Acme Power");
    assert!(saved["updated_at"].is_string());

    let (_, reloaded) = send(&app, Method::GET, "/api/company-settings", None).await;
    assert_eq!(reloaded["gst_no"], "27AAAAA0000A1Z5");
    assert_eq!(reloaded["social_links"][0]["platform"], "YouTube");

    let (status, rejected) = send(
        &app,
        Method::PUT,
        "/api/company-settings",
        Some(json!({"site_title": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(rejected["error"]["details"][0]["field"], "site_title");
}

#[tokio::test]
async fn storefront_pages_render() {
    let app = test_app().await;

    let (status, home) = get_page(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(home.contains("Quality Electrical Panels for Every Need"));
    assert!(home.contains("No Featured Products"));
    assert!(home.contains("Demo Electricals"));

    let (status, catalog) = get_page(&app, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert!(catalog.contains("All Products"));
    assert!(catalog.contains("No Products Found"));

    let (status, videos) = get_page(&app, "/videos").await;
    assert_eq!(status, StatusCode::OK);
    assert!(videos.contains("No Videos Available"));

    let (status, contact) = get_page(&app, "/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert!(contact.contains("Business Hours"));

    let (status, missing) = get_page(&app, "/no-such-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(missing.contains("Page Not Found"));
}

#[tokio::test]
async fn storefront_detail_shows_grouped_price() {
    let app = test_app().await;
    let category = create_category(&app, "Panels").await;
    let category_id = category["id"].as_str().unwrap();

    let priced = create_product(&app, category_id, "HT Panel 11kV", json!("100000")).await;
    let (status, page) = get_page(
        &app,
        &format!("/products/{}", priced["slug"].as_str().unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("₹1,18,000.00"), "price missing in page");
    assert!(page.contains("Incl. 18% GST"));
    assert!(page.contains("Panels"));

    let unpriced = create_product(&app, category_id, "Custom Busbar", Value::Null).await;
    let (_, page) = get_page(
        &app,
        &format!("/products/{}", unpriced["slug"].as_str().unwrap()),
    )
    .await;
    assert!(page.contains("Price on request"));

    let (status, page) = get_page(&app, "/products/there-is-no-such-product").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(page.contains("Page Not Found"));
}

#[tokio::test]
async fn catalog_page_filters_by_category() {
    let app = test_app().await;
    let switchgear = create_category(&app, "Switchgear").await;
    let cables = create_category(&app, "Cables").await;
    create_product(&app, switchgear["id"].as_str().unwrap(), "MCB 16A", json!("500")).await;
    create_product(&app, cables["id"].as_str().unwrap(), "Armoured Cable", json!("900")).await;

    let (status, page) = get_page(&app, "/products?category=switchgear").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Browse our Switchgear collection"));
    assert!(page.contains("MCB 16A"));
    assert!(!page.contains("Armoured Cable"));
}

#[tokio::test]
async fn openapi_document_covers_modules() {
    let app = test_app().await;

    let (status, spec) = send(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(spec["info"]["title"], "VITRIN API");
    assert!(spec["paths"]["/api/products/{slug}"].is_object());
    assert!(spec["paths"]["/api/company-settings/"].is_object());
    assert!(spec["components"]["schemas"]["ProductDraft"].is_object());
}
