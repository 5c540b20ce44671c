//! HTTP application wiring (Axum router + injected store).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request body shape and mapping into store types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{middleware, Extension, Router};

use cookbook_store::RecipeStore;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router around the injected recipe store (public
/// entrypoint used by `main.rs` and the black-box tests).
pub fn build_app(store: Arc<dyn RecipeStore>) -> Router {
    // The CORS layer sits outermost so OPTIONS pre-flights short-circuit
    // before method routing can answer 405.
    routes::router()
        .layer(Extension(store))
        .layer(middleware::from_fn(crate::middleware::cors_middleware))
}
