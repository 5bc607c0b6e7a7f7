use axum::http::Request;

use crate::common::auth::AuthError;
use crate::domains::auth::{CustomClaims, JwtService};

/// Fixed request header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

/// Resolve the caller's claims from the request's token header.
///
/// The codec's error kind is surfaced as-is - an expired token reports
/// `ExpiredToken` here too, so callers can tell "log in again" from
/// "this token was never valid".
pub fn get_claims<B>(request: &Request<B>, jwt_service: &JwtService) -> Result<CustomClaims, AuthError> {
    let header = request
        .headers()
        .get(TOKEN_HEADER)
        .ok_or(AuthError::MissingToken)?;

    let token = header
        .to_str()
        .map_err(|e| AuthError::MalformedToken(e.to_string()))?;

    jwt_service.parse_token(token)
}

/// Resolve the caller's authority tier.
///
/// Reads the per-request memo slot first - an upstream authentication step
/// stores verified claims in the request extensions - and only falls back
/// to parsing the token when no resolution happened yet. The slot lives and
/// dies with the request; nothing is shared across requests.
pub fn get_user_authority_id<B>(
    request: &Request<B>,
    jwt_service: &JwtService,
) -> Result<u32, AuthError> {
    if let Some(claims) = request.extensions().get::<CustomClaims>() {
        return Ok(claims.base.authority_id);
    }

    get_claims(request, jwt_service).map(|claims| claims.base.authority_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::{BaseClaims, ISSUER};
    use axum::body::Body;
    use uuid::Uuid;

    fn base_claims(authority_id: u32) -> BaseClaims {
        BaseClaims {
            uuid: Uuid::new_v4(),
            id: 7,
            username: "alice".to_string(),
            nick_name: "Alice".to_string(),
            authority_id,
        }
    }

    #[test]
    fn test_missing_token_header() {
        let jwt_service = JwtService::new("test_secret");
        let request = Request::builder().body(Body::empty()).unwrap();

        let err = get_claims(&request, &jwt_service).unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[test]
    fn test_valid_token_resolves_claims() {
        let jwt_service = JwtService::new("test_secret");
        let token = jwt_service.generate_token(base_claims(1)).unwrap();

        let request = Request::builder()
            .header(TOKEN_HEADER, token)
            .body(Body::empty())
            .unwrap();

        let claims = get_claims(&request, &jwt_service).unwrap();
        assert_eq!(claims.base.username, "alice");
        assert_eq!(claims.base.authority_id, 1);
        assert_eq!(claims.iss, ISSUER);
    }

    #[test]
    fn test_error_kind_survives_the_resolver() {
        let jwt_service = JwtService::new("test_secret");
        let other_service = JwtService::new("other_secret");
        let token = other_service.generate_token(base_claims(1)).unwrap();

        let request = Request::builder()
            .header(TOKEN_HEADER, token)
            .body(Body::empty())
            .unwrap();

        let err = get_claims(&request, &jwt_service).unwrap_err();
        assert!(matches!(err, AuthError::MalformedToken(_)));
    }

    #[test]
    fn test_authority_id_from_token() {
        let jwt_service = JwtService::new("test_secret");
        let token = jwt_service.generate_token(base_claims(3)).unwrap();

        let request = Request::builder()
            .header(TOKEN_HEADER, token)
            .body(Body::empty())
            .unwrap();

        let authority_id = get_user_authority_id(&request, &jwt_service).unwrap();
        assert_eq!(authority_id, 3);
    }

    #[test]
    fn test_memoized_claims_bypass_the_codec() {
        // The header token was signed by a different secret, so any parse
        // attempt would fail; a successful lookup proves the memo slot
        // short-circuits the codec.
        let jwt_service = JwtService::new("test_secret");
        let other_service = JwtService::new("other_secret");
        let token = other_service.generate_token(base_claims(1)).unwrap();

        let memoized = other_service
            .parse_token(&other_service.generate_token(base_claims(7)).unwrap())
            .unwrap();

        let request = Request::builder()
            .header(TOKEN_HEADER, token)
            .extension(memoized)
            .body(Body::empty())
            .unwrap();

        let authority_id = get_user_authority_id(&request, &jwt_service).unwrap();
        assert_eq!(authority_id, 7);
    }

    #[test]
    fn test_missing_token_without_memo_fails() {
        let jwt_service = JwtService::new("test_secret");
        let request = Request::builder().body(Body::empty()).unwrap();

        let err = get_user_authority_id(&request, &jwt_service).unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }
}
