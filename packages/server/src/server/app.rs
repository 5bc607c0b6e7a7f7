//! Application setup and server configuration.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::domains::auth::{CredentialVerifier, JwtService};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{health_handler, identity_handler, login_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub credential_verifier: Arc<dyn CredentialVerifier>,
}

/// Build the Axum application router.
///
/// The auth middleware runs on every route and writes verified claims into
/// the request extensions; it never rejects by itself - route gating is the
/// policy evaluator's concern.
pub fn build_app(
    pool: PgPool,
    jwt_service: Arc<JwtService>,
    credential_verifier: Arc<dyn CredentialVerifier>,
) -> Router {
    let state = AppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
        credential_verifier,
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/user/login", post(login_handler))
        .route("/api/user/identity", get(identity_handler))
        .layer(middleware::from_fn(move |request, next| {
            jwt_auth_middleware(jwt_service.clone(), request, next)
        }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
