use std::sync::Arc;

use axum::{middleware::Next, response::Response};
use tracing::debug;

use crate::common::auth::AuthError;
use crate::domains::auth::JwtService;
use crate::server::auth::get_claims;

/// JWT authentication middleware.
///
/// Verifies the token once per request and stores the claims in the request
/// extensions, so downstream resolution reads the memo instead of
/// re-parsing. Requests without a valid token continue unauthenticated -
/// gating individual routes is the policy evaluator's job.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match get_claims(&request, &jwt_service) {
        Ok(claims) => {
            debug!(
                username = %claims.base.username,
                authority_id = claims.base.authority_id,
                "authenticated request"
            );
            request.extensions_mut().insert(claims);
        }
        Err(AuthError::MissingToken) => {
            debug!("request carries no token");
        }
        Err(err) => {
            debug!(error = %err, "token rejected");
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::{BaseClaims, CustomClaims};
    use crate::server::auth::TOKEN_HEADER;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;
    use uuid::Uuid;

    /// Echoes the authority tier from the memo slot, or "anonymous".
    async fn probe(request: axum::extract::Request) -> String {
        match request.extensions().get::<CustomClaims>() {
            Some(claims) => claims.base.authority_id.to_string(),
            None => "anonymous".to_string(),
        }
    }

    fn app(jwt_service: Arc<JwtService>) -> Router {
        Router::new()
            .route("/probe", get(probe))
            .layer(middleware::from_fn(move |request, next| {
                jwt_auth_middleware(jwt_service.clone(), request, next)
            }))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn base_claims() -> BaseClaims {
        BaseClaims {
            uuid: Uuid::new_v4(),
            id: 5,
            username: "alice".to_string(),
            nick_name: "Alice".to_string(),
            authority_id: 2,
        }
    }

    #[tokio::test]
    async fn test_valid_token_populates_claims_slot() {
        let jwt_service = Arc::new(JwtService::new("test_secret"));
        let token = jwt_service.generate_token(base_claims()).unwrap();

        let response = app(jwt_service)
            .oneshot(
                Request::builder()
                    .uri("/probe")
                    .header(TOKEN_HEADER, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_string(response).await, "2");
    }

    #[tokio::test]
    async fn test_missing_token_passes_through_unauthenticated() {
        let jwt_service = Arc::new(JwtService::new("test_secret"));

        let response = app(jwt_service)
            .oneshot(Request::builder().uri("/probe").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(body_string(response).await, "anonymous");
    }

    #[tokio::test]
    async fn test_invalid_token_leaves_slot_empty() {
        let jwt_service = Arc::new(JwtService::new("test_secret"));

        let response = app(jwt_service)
            .oneshot(
                Request::builder()
                    .uri("/probe")
                    .header(TOKEN_HEADER, "garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_string(response).await, "anonymous");
    }
}
