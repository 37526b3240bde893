use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use banner_feed_backend::controllers::feed::FeedController;
use banner_feed_backend::domain::feed::{
    CategoryLookup, FeedService, ProfileInterestResolver, SelectionPolicy,
};
use banner_feed_backend::infrastructure::config::{Config, LogFormat};
use banner_feed_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use banner_feed_backend::infrastructure::http::start_http_server;
use banner_feed_backend::infrastructure::repositories::{
    PgCategoryRepository, PgContentRepository, PgUserInterestRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting banner feed backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    if config.is_development() {
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    tracing::info!("Instantiating repositories...");
    let content_repo = Arc::new(PgContentRepository::new(pool.clone()));
    let category_repo = Arc::new(PgCategoryRepository::new(pool.clone()));
    let interest_repo = Arc::new(PgUserInterestRepository::new(pool.clone()));

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let interest_resolver = Arc::new(ProfileInterestResolver::new(interest_repo));
    let selection_policy = Arc::new(SelectionPolicy::new(content_repo, interest_resolver));
    let category_cache_ttl = config
        .category_cache_enabled
        .then(|| Duration::from_secs(config.category_cache_ttl_seconds));
    tracing::info!(
        cache_enabled = config.category_cache_enabled,
        ttl_seconds = config.category_cache_ttl_seconds,
        "Category lookup configured"
    );
    let category_lookup = Arc::new(CategoryLookup::new(category_repo, category_cache_ttl));
    let feed_service = Arc::new(FeedService::new(selection_policy, category_lookup));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let feed_controller = Arc::new(FeedController::new(
        feed_service,
        config.feed_default_page_size,
    ));

    // Start HTTP server with all routes
    start_http_server(pool, config, feed_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "banner_feed_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "banner_feed_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
