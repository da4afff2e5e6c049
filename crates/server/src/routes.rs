use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::{beer::BeerService, customer::CustomerService};

pub mod beer;
pub mod customer;

/// Shared handler state. Both services sit behind repository trait objects,
/// so the same router serves the database and the in-memory backend.
#[derive(Clone)]
pub struct ServerState {
    pub beers: Arc<BeerService>,
    pub customers: Arc<CustomerService>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/beer", get(beer::list).post(beer::create))
        .route(
            "/api/v1/beer/:id",
            get(beer::get_by_id)
                .put(beer::update)
                .patch(beer::patch)
                .delete(beer::delete),
        )
        .route("/api/v1/customer", get(customer::list).post(customer::create))
        .route(
            "/api/v1/customer/:id",
            get(customer::get_by_id)
                .put(customer::update)
                .patch(customer::patch)
                .delete(customer::delete),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
