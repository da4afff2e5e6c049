//! Handler tests against the in-memory backend; no database required.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::pagination::PageLimits;
use serde_json::{json, Value};
use server::routes::{build_router, ServerState};
use service::beer::{BeerService, InMemoryBeerRepository};
use service::customer::{CustomerService, InMemoryCustomerRepository};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

fn test_router() -> Router {
    let limits = PageLimits::default();
    let state = ServerState {
        beers: Arc::new(BeerService::new(Arc::new(InMemoryBeerRepository::new()), limits)),
        customers: Arc::new(CustomerService::new(
            Arc::new(InMemoryCustomerRepository::new()),
            limits,
        )),
    };
    build_router(state, CorsLayer::very_permissive())
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn new_beer_body(name: &str, upc: &str) -> Value {
    json!({
        "beerName": name,
        "beerStyle": "IPA",
        "upc": upc,
        "quantityOnHand": 50,
        "price": "11.99"
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = test_router();
    let res = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_beer_returns_location_and_get_resolves_it() {
    let app = test_router();

    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/beer", new_beer_body("New Beer", "0631234200036")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/api/v1/beer/"));
    let id: Uuid = location.rsplit('/').next().unwrap().parse().expect("well-formed id");

    let res = app.oneshot(get_request(&format!("/api/v1/beer/{id}"))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["beerName"], "New Beer");
    assert_eq!(body["version"], 1);
    assert_eq!(body["id"], id.to_string());
}

#[tokio::test]
async fn get_unknown_beer_is_404() {
    let app = test_router();
    let res = app
        .oneshot(get_request(&format!("/api/v1/beer/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_beer_with_missing_fields_returns_violation_array() {
    let app = test_router();
    let res = app
        .oneshot(json_request("POST", "/api/v1/beer", json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    let violations = body.as_array().expect("array of field errors");
    assert!(violations.len() >= 4);
    assert!(violations.iter().all(|v| v.get("field").is_some() && v.get("message").is_some()));
}

#[tokio::test]
async fn update_beer_returns_204_and_applies_changes() {
    let app = test_router();
    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/beer", new_beer_body("Before", "upc-u1")))
        .await
        .unwrap();
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(json_request("PUT", &location, new_beer_body("After", "upc-u1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.oneshot(get_request(&location)).await.unwrap();
    let body = body_json(res).await;
    assert_eq!(body["beerName"], "After");
    assert_eq!(body["version"], 2);
}

#[tokio::test]
async fn update_unknown_beer_is_404() {
    let app = test_router();
    let res = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/beer/{}", Uuid::new_v4()),
            new_beer_body("Ghost", "upc-u2"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stale_version_update_is_409() {
    let app = test_router();
    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/beer", new_beer_body("Versioned", "upc-v1")))
        .await
        .unwrap();
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();

    let mut stale = new_beer_body("Too Late", "upc-v1");
    stale["version"] = json!(42);
    let res = app.clone().oneshot(json_request("PUT", &location, stale)).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app.oneshot(get_request(&location)).await.unwrap();
    let body = body_json(res).await;
    assert_eq!(body["beerName"], "Versioned");
}

#[tokio::test]
async fn patch_changes_only_named_fields() {
    let app = test_router();
    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/beer", new_beer_body("Galaxy Cat", "upc-p1")))
        .await
        .unwrap();
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(json_request("PATCH", &location, json!({"beerName": "Renamed"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.oneshot(get_request(&location)).await.unwrap();
    let body = body_json(res).await;
    assert_eq!(body["beerName"], "Renamed");
    assert_eq!(body["beerStyle"], "IPA");
    assert_eq!(body["upc"], "upc-p1");
    assert_eq!(body["quantityOnHand"], 50);
}

#[tokio::test]
async fn patch_with_blank_name_leaves_name_untouched() {
    let app = test_router();
    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/beer", new_beer_body("Keep Me", "upc-p2")))
        .await
        .unwrap();
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(json_request("PATCH", &location, json!({"beerName": "  "})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.oneshot(get_request(&location)).await.unwrap();
    let body = body_json(res).await;
    assert_eq!(body["beerName"], "Keep Me");
}

#[tokio::test]
async fn patch_unknown_beer_is_404() {
    let app = test_router();
    let res = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/beer/{}", Uuid::new_v4()),
            json!({"beerName": "X"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_beer_then_get_is_404() {
    let app = test_router();
    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/beer", new_beer_body("Doomed", "upc-d1")))
        .await
        .unwrap();
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(
            Request::builder().method("DELETE").uri(&location).body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app
        .clone()
        .oneshot(get_request(&location))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // deleting again reports absence, not success
    let res = app
        .oneshot(
            Request::builder().method("DELETE").uri(&location).body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_beers_supports_filters_and_paging() {
    let app = test_router();
    for (name, upc) in [("Crank IPA", "upc-l1"), ("Sunshine City", "upc-l2"), ("Crank Twice", "upc-l3")] {
        let res = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/beer", new_beer_body(name, upc)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app
        .clone()
        .oneshot(get_request("/api/v1/beer?beerName=crank"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 2);

    let res = app
        .oneshot(get_request("/api/v1/beer?pageNumber=2&pageSize=2"))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 3);
    assert_eq!(body["content"].as_array().unwrap().len(), 1);
    assert_eq!(body["pageNumber"], 2);
}

#[tokio::test]
async fn list_beers_can_hide_inventory() {
    let app = test_router();
    app.clone()
        .oneshot(json_request("POST", "/api/v1/beer", new_beer_body("Hidden", "upc-h1")))
        .await
        .unwrap();

    let res = app
        .oneshot(get_request("/api/v1/beer?showInventory=false"))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["content"][0]["quantityOnHand"], Value::Null);
}

#[tokio::test]
async fn customer_lifecycle_mirrors_beer() {
    let app = test_router();

    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/customer", json!({"name": "John Doe"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert!(location.starts_with("/api/v1/customer/"));

    let res = app.clone().oneshot(get_request(&location)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["version"], 1);

    let res = app
        .clone()
        .oneshot(json_request("PATCH", &location, json!({"name": "Jane Doe"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app
        .clone()
        .oneshot(
            Request::builder().method("DELETE").uri(&location).body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.oneshot(get_request(&location)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_unknown_customer_is_404() {
    let app = test_router();
    let res = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/customer/{}", Uuid::new_v4()),
            json!({"name": "X"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_customer_without_name_is_400_with_field_errors() {
    let app = test_router();
    let res = app
        .oneshot(json_request("POST", "/api/v1/customer", json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body[0]["field"], "name");
}
