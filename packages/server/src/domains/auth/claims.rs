use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity facts embedded in every token.
///
/// `authority_id` is the only field downstream access-control decisions
/// consume; the display fields are carried for UI and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseClaims {
    /// Opaque caller identifier, immutable once issued.
    pub uuid: Uuid,
    /// Numeric account identifier.
    pub id: i64,
    pub username: String,
    pub nick_name: String,
    /// Role/authority tier gating access-control decisions.
    pub authority_id: u32,
}

/// Full claim set carried on the wire: identity plus the registered
/// temporal claims. A token is a pure function of these fields and the
/// signing secret; it carries no server-side state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(flatten)]
    pub base: BaseClaims,
    /// Not valid before (unix timestamp), set slightly in the past at
    /// issuance to tolerate clock drift between issuer and verifier.
    pub nbf: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
    /// Issuer, validated on decode.
    pub iss: String,
}
