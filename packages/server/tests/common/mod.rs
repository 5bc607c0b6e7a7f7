//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container is started on first use and shared by every test
//! in the binary; each test gets its own pool against it.

use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::{Mutex, OnceCell};

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

/// All bootstrap tests mutate the single policy table; hold this lock for
/// the duration of each test body so they don't interleave.
pub static POLICY_TABLE_LOCK: Mutex<()> = Mutex::const_new(());

impl SharedTestInfra {
    async fn init() -> Self {
        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .expect("Failed to start Postgres container");

        let host = postgres.get_host().await.expect("container host");
        let port = postgres
            .get_host_port_ipv4(5432)
            .await
            .expect("container port");
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        Self {
            db_url,
            _postgres: postgres,
        }
    }

    async fn get() -> &'static Self {
        SHARED_INFRA.get_or_init(Self::init).await
    }
}

pub async fn test_pool() -> PgPool {
    let infra = SharedTestInfra::get().await;
    PgPool::connect(&infra.db_url)
        .await
        .expect("Failed to connect to test database")
}

/// Put the store back to its pre-migration state.
pub async fn drop_policy_table(pool: &PgPool) {
    sqlx::query("DROP TABLE IF EXISTS casbin_rule")
        .execute(pool)
        .await
        .expect("Failed to drop policy table");
}
