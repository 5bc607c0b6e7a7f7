use sqlx::PgPool;

use crate::domains::auth::BOOTSTRAP_AUTHORITY_ID;

/// Table name, fixed by the policy-adapter schema convention. The policy
/// evaluator reads the same table; migrations are additive only.
pub const POLICY_TABLE: &str = "casbin_rule";

/// Route that must stay reachable without a session, or a fresh deployment
/// locks itself out of logging in.
pub const LOGIN_ROUTE: &str = "/api/user/login";

/// One persisted access-control rule: `(ptype, subject, object, action)`.
///
/// Matching semantics belong to the policy evaluator; this core only
/// guarantees the table exists and holds the seed set.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct PolicyRule {
    pub ptype: String,
    /// Subject - authority tier, as text.
    pub v0: String,
    /// Object - route path.
    pub v1: String,
    /// Action - HTTP verb.
    pub v2: String,
}

impl PolicyRule {
    /// Permission rule binding a subject to a route and verb.
    pub fn permit(subject: &str, object: &str, action: &str) -> Self {
        Self {
            ptype: "p".to_string(),
            v0: subject.to_string(),
            v1: object.to_string(),
            v2: action.to_string(),
        }
    }

    /// Whether this exact rule is present in the store.
    pub async fn exists(&self, pool: &PgPool) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM casbin_rule
                WHERE ptype = $1 AND v0 = $2 AND v1 = $3 AND v2 = $4
             )",
        )
        .bind(&self.ptype)
        .bind(&self.v0)
        .bind(&self.v1)
        .bind(&self.v2)
        .fetch_one(pool)
        .await
    }

    /// Insert this rule, ignoring an already-present duplicate.
    pub async fn insert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO casbin_rule (ptype, v0, v1, v2)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (ptype, v0, v1, v2) DO NOTHING",
        )
        .bind(&self.ptype)
        .bind(&self.v0)
        .bind(&self.v1)
        .bind(&self.v2)
        .execute(pool)
        .await
        .map(|_| ())
    }
}

/// The rule whose presence marks the store as initialized.
pub fn login_seed_rule() -> PolicyRule {
    PolicyRule::permit(&BOOTSTRAP_AUTHORITY_ID.to_string(), LOGIN_ROUTE, "POST")
}

/// Seed rule set inserted at first boot: the login permit plus the initial
/// resource-route permits for the bootstrap authority. After first boot
/// these rows are owned by the administrative API.
pub fn seed_rules() -> Vec<PolicyRule> {
    let subject = BOOTSTRAP_AUTHORITY_ID.to_string();

    let mut rules = vec![
        login_seed_rule(),
        PolicyRule::permit(&subject, "/api/user/identity", "GET"),
    ];

    for resource in ["namespace", "secret", "persistentvolumeclaim"] {
        rules.push(PolicyRule::permit(
            &subject,
            &format!("/api/k8s/{resource}/create"),
            "PUT",
        ));
        rules.push(PolicyRule::permit(
            &subject,
            &format!("/api/k8s/{resource}/del"),
            "DELETE",
        ));
        rules.push(PolicyRule::permit(
            &subject,
            &format!("/api/k8s/{resource}/list"),
            "GET",
        ));
        rules.push(PolicyRule::permit(
            &subject,
            &format!("/api/k8s/{resource}/detail"),
            "GET",
        ));
    }

    rules
}
