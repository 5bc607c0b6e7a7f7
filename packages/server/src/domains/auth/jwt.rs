use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{BaseClaims, CustomClaims};
use crate::common::auth::AuthError;

/// Fixed issuer written into every token and validated on decode.
pub const ISSUER: &str = "clusterdeck";

/// How far in the past `nbf` is set at issuance, to tolerate clock drift
/// between the issuing and verifying hosts.
const NOT_BEFORE_SKEW_SECS: i64 = 1000;

/// Fixed validity window for every issued token.
const TOKEN_TTL_HOURS: i64 = 24;

/// JWT service - issues and verifies signed session tokens.
///
/// Holds the single symmetric HS256 secret for the process lifetime. There
/// is no rotation support: changing the secret invalidates all outstanding
/// tokens. Consumers receive an explicit instance, never a global.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_nbf = true;
        // Skew tolerance lives in the issued nbf, not in verification.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for the given identity.
    ///
    /// The validity window is fixed: valid from 1000 seconds in the past
    /// until 24 hours from now. Fails only if the signing primitive fails.
    pub fn generate_token(&self, base: BaseClaims) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = CustomClaims {
            base,
            nbf: now.timestamp() - NOT_BEFORE_SKEW_SECS,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token and return the embedded claims.
    ///
    /// Rejects signature mismatches, structural damage, tokens used before
    /// `nbf`, tokens past `exp`, wrong issuers, and wrong algorithms - each
    /// as its own error kind. Structure and signature are checked before the
    /// temporal claims, so a tampered-with token that is also expired
    /// reports `MalformedToken`.
    pub fn parse_token(&self, token: &str) -> Result<CustomClaims, AuthError> {
        decode::<CustomClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => AuthError::MalformedToken(e.to_string()),
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                ErrorKind::ImmatureSignature => AuthError::NotYetValidToken,
                _ => AuthError::OtherInvalidToken(e.to_string()),
            })
    }
}
