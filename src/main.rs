use chrono::Duration;
use dotenvy::dotenv;
use laundry_hub::{
    api::{self, AppState},
    auth::TokenKeys,
    config::{database, packages, settings},
    core::{admin, package},
    errors::Result,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load settings
    let settings = settings::load_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!("Settings loaded, listening on {}", settings.bind_addr);

    // 4. Initialize database
    database::ensure_database_dir(&settings.database_url)?;
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the initial admin
    match &settings.initial_admin {
        Some(seed) => {
            admin::ensure_admin(&db, &seed.username, &seed.password).await?;
        }
        None => warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set, no admin account seeded"),
    }

    // 6. Seed packages and repair zero prices
    let config = packages::load_optional_config(&settings.config_path)?;
    package::seed_default_packages(&db, &config.packages).await?;
    let repaired = package::repair_zero_prices(&db).await?;
    if !repaired.is_empty() {
        info!("Repaired {} zero-priced packages", repaired.len());
    }

    // 7. Serve
    let state = Arc::new(AppState {
        db,
        tokens: TokenKeys::new(
            settings.jwt_secret.as_bytes(),
            Duration::hours(settings.token_ttl_hours),
        ),
    });

    api::serve(settings.bind_addr, state)
        .await
        .inspect_err(|e| error!("Server stopped: {}", e))
}
