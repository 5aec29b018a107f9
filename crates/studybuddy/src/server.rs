use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{BoxError, Router};
use tower::ServiceBuilder;
use tower::timeout::error::Elapsed;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::relay::Relay;
use crate::response;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

pub fn build_app(state: AppState, request_timeout_secs: u64) -> Router {
    let api = Router::new()
        .route("/chat", post(handlers::chat).options(handlers::preflight))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(Duration::from_secs(request_timeout_secs)),
        )
        .layer(cors)
}

/// Turns a timed-out request into a `500 {error}` so it still carries CORS headers.
async fn handle_timeout(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        response::internal_error("request timed out").into_response()
    } else {
        response::internal_error(format!("unhandled internal error: {err}")).into_response()
    }
}
