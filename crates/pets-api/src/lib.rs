//! pets-api - REST layer of the pets aggregation gateway
//!
//! Exposes the aggregate listing and the detail lookup over HTTP. The
//! handlers are thin: they open a server span, call into `pets-gateway`,
//! and map [`pets_core::GatewayError`] onto status codes.
//!
//! # Usage
//!
//! ```ignore
//! use pets_api::{create_router, AppState};
//!
//! let state = AppState::from_backends(settings, backends, Arc::new(client), true);
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod span;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use span::ServerSpan;
pub use state::AppState;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Methods advertised on every response
pub const ALLOWED_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE";

/// Request headers advertised on every response
pub const ALLOWED_HEADERS: &str =
    "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");

/// Create the gateway router with the given application state
///
/// The aggregate is served at `/{route}` and detail lookups at
/// `/{route}/{backend}/{version}/{collection}/{id}`.
pub fn create_router(state: AppState) -> Router {
    let route = state.route().trim_matches('/').to_string();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            X_CSRF_TOKEN,
            header::AUTHORIZATION,
        ]);

    Router::new()
        .route("/readiness", get(handlers::health::readiness))
        .route("/liveness", get(handlers::health::liveness))
        .route(&format!("/{}", route), get(handlers::pets::list_pets))
        .route(&format!("/{}/{{*rest}}", route), get(handlers::pets::get_pet))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Browsers that skip preflight still see the CORS contract
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
}
