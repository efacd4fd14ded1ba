//! HTTP API Layer
//!
//! This crate provides the REST API for the claims façade using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: list, create and delete claims; health checks
//! - **Middleware**: request ids, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let adapter = Arc::new(RestClaimsAdapter::new(&store_config)?);
//! let app = create_router(adapter);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, delete},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::{ClaimsPort, ClaimsService};

use crate::middleware::request_logging_middleware;
use crate::handlers::{claims, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: ClaimsService,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `port` - The claims table the façade forwards to
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(port: Arc<dyn ClaimsPort>) -> Router {
    let state = AppState {
        claims: ClaimsService::new(port),
    };

    // Health
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", get(claims::list_claims).post(claims::create_claim))
        .route("/:claim_number", delete(claims::delete_claim));

    Router::new()
        .merge(health_routes)
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
