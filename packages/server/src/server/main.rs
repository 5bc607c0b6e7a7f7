// Main entry point for the Clusterdeck API server

use std::sync::Arc;

use anyhow::{Context, Result};
use deck_core::domains::auth::{BootstrapAdminVerifier, JwtService};
use deck_core::domains::policy;
use deck_core::server::build_app;
use deck_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,deck_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Clusterdeck API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Bootstrap the policy store before accepting any traffic. A server
    // without a seeded policy store cannot authorize anything, so failure
    // here aborts startup.
    tracing::info!("Bootstrapping policy store...");
    policy::bootstrap(&pool)
        .await
        .context("Policy store bootstrap failed")?;
    tracing::info!("Policy store ready");

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));
    let credential_verifier = Arc::new(BootstrapAdminVerifier::new(
        config.bootstrap_admin_username.clone(),
        &config.bootstrap_admin_password,
    ));

    let app = build_app(pool, jwt_service, credential_verifier);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
