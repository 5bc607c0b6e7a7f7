use sqlx::PgPool;
use tracing::info;

use super::rule::{login_seed_rule, seed_rules, POLICY_TABLE};
use crate::common::auth::PolicyError;

/// Whether the policy table already exists in storage. Idempotence probe
/// for the startup orchestrator; driver failures surface as errors rather
/// than reading as "table missing".
pub async fn table_created(pool: &PgPool) -> Result<bool, PolicyError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
         )",
    )
    .bind(POLICY_TABLE)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Create or update the policy table schema. Additive and safe to run when
/// the table already exists; failure is fatal to startup.
pub async fn migrate_table(pool: &PgPool) -> Result<(), PolicyError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS casbin_rule (
            id    BIGSERIAL PRIMARY KEY,
            ptype VARCHAR(100) NOT NULL DEFAULT '',
            v0    VARCHAR(100) NOT NULL DEFAULT '',
            v1    VARCHAR(100) NOT NULL DEFAULT '',
            v2    VARCHAR(100) NOT NULL DEFAULT ''
         )",
    )
    .execute(pool)
    .await
    .map_err(PolicyError::Migration)?;

    // Uniqueness over the rule tuple; also the conflict target for seeding.
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_casbin_rule
         ON casbin_rule (ptype, v0, v1, v2)",
    )
    .execute(pool)
    .await
    .map_err(PolicyError::Migration)?;

    Ok(())
}

/// Whether the mandatory seed rule - the login permit - is present.
/// `Ok(false)` on a migrated-but-unseeded table.
pub async fn is_init_data(pool: &PgPool) -> Result<bool, PolicyError> {
    Ok(login_seed_rule().exists(pool).await?)
}

/// Insert the seed rule set. Idempotent: duplicates conflict against the
/// rule-tuple index and are ignored, so a repeated call leaves exactly one
/// row per rule.
pub async fn init_data(pool: &PgPool) -> Result<(), PolicyError> {
    for rule in seed_rules() {
        rule.insert(pool).await?;
    }
    Ok(())
}

/// Startup orchestration: `table_created -> migrate_table -> (is_init_data
/// ? skip : init_data)`, then re-verify the login permit. Runs once, before
/// the listener binds; any error here must abort the process.
///
/// A missing login permit after a successful seed is a configuration error
/// requiring operator attention, not a retry condition.
pub async fn bootstrap(pool: &PgPool) -> Result<(), PolicyError> {
    if table_created(pool).await? {
        info!("policy table already present");
    }

    migrate_table(pool).await?;

    if is_init_data(pool).await? {
        info!("policy store already seeded");
        return Ok(());
    }

    init_data(pool).await?;

    if !is_init_data(pool).await? {
        return Err(PolicyError::Uninitialized);
    }

    info!(rules = seed_rules().len(), "policy store seeded");
    Ok(())
}
