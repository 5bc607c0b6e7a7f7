use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Authentication errors for the Clusterdeck API.
///
/// Every variant here means "the caller is not who they claim to be" and maps
/// to HTTP 401. Authorization denials (wrong authority tier) are rendered as
/// 403 by the policy-evaluation layer, so clients can tell "log in again"
/// apart from "insufficient privilege".
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("request carries no token")]
    MissingToken,

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("token has expired")]
    ExpiredToken,

    #[error("token not yet valid")]
    NotYetValidToken,

    #[error("invalid token: {0}")]
    OtherInvalidToken(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token signing failed: {0}")]
    Signing(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            // Signing failures happen on our side of the trust boundary.
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Policy store bootstrap errors.
///
/// All of these are fatal at startup: the server must not accept traffic
/// against a policy store that failed to migrate or seed.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("policy table migration failed: {0}")]
    Migration(#[source] sqlx::Error),

    #[error("policy store not initialized: login permit rule is missing")]
    Uninitialized,

    #[error("policy store query failed: {0}")]
    Database(#[from] sqlx::Error),
}
