use axum::extract::{Request, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::common::auth::AuthError;
use crate::domains::auth::CustomClaims;
use crate::server::app::AppState;
use crate::server::auth::{get_claims, get_user_authority_id};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct IdentityResponse {
    pub uuid: Uuid,
    pub username: String,
    pub nick_name: String,
    pub authority_id: u32,
}

/// Login endpoint - verifies credentials and issues a session token.
///
/// A new login always produces a new token; claims are never mutated after
/// issuance.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let base = state
        .credential_verifier
        .verify(&body.username, &body.password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    info!(username = %base.username, "login succeeded");

    let token = state.jwt_service.generate_token(base)?;
    Ok(Json(LoginResponse { token }))
}

/// Identity echo endpoint - reports who the token says the caller is.
///
/// The authority tier comes through `get_user_authority_id`, the same path
/// downstream access control uses; the display fields come from the
/// memoized claims when the auth middleware already resolved them.
pub async fn identity_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<IdentityResponse>, AuthError> {
    let authority_id = get_user_authority_id(&request, &state.jwt_service)?;

    let claims = match request.extensions().get::<CustomClaims>() {
        Some(claims) => claims.clone(),
        None => get_claims(&request, &state.jwt_service)?,
    };

    Ok(Json(IdentityResponse {
        uuid: claims.base.uuid,
        username: claims.base.username,
        nick_name: claims.base.nick_name,
        authority_id,
    }))
}
