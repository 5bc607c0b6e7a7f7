use async_trait::async_trait;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::claims::BaseClaims;
use crate::common::auth::AuthError;

/// Authority tier granted to the bootstrap administrator. The policy store
/// is seeded with permits for this tier, so a fresh deployment is operable
/// before any real accounts exist.
pub const BOOTSTRAP_AUTHORITY_ID: u32 = 111;

/// Credential verification seam.
///
/// The real user store lives outside this core; login only needs something
/// that can turn a credential pair into identity facts. Returns `Ok(None)`
/// when the credentials simply don't match.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<BaseClaims>, AuthError>;
}

/// Single-account verifier for the bootstrap administrator configured via
/// environment. Compares SHA-256 digests rather than the raw strings.
pub struct BootstrapAdminVerifier {
    username: String,
    password_digest: [u8; 32],
    admin_uuid: Uuid,
}

impl BootstrapAdminVerifier {
    pub fn new(username: String, password: &str) -> Self {
        Self {
            username,
            password_digest: digest(password),
            admin_uuid: Uuid::new_v4(),
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

#[async_trait]
impl CredentialVerifier for BootstrapAdminVerifier {
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<BaseClaims>, AuthError> {
        if username != self.username || digest(password) != self.password_digest {
            return Ok(None);
        }

        Ok(Some(BaseClaims {
            uuid: self.admin_uuid,
            id: 1,
            username: self.username.clone(),
            nick_name: "Administrator".to_string(),
            authority_id: BOOTSTRAP_AUTHORITY_ID,
        }))
    }
}
