use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use travelbunk_match::config::{Settings, StorageBackend};
use travelbunk_match::core::Matcher;
use travelbunk_match::models::CompatibilityWeights;
use travelbunk_match::routes::{self, error::{handle_json_payload_error, handle_query_payload_error}, AppState, Limits};
use travelbunk_match::services::{Authenticator, CacheManager, MemoryStore, PostgresClient};

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging.level, &logging.format);

    info!("Starting TravelBunk match service...");

    let settings = settings.map_err(|e| startup_error("Configuration error", e))?;

    info!("Configuration loaded successfully");

    // Cache: Redis is optional, the in-process tier always exists
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);
    let cache = Arc::new(
        CacheManager::connect(settings.cache.redis_url.as_deref(), l1_cache_size, cache_ttl).await,
    );

    info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);

    let auth = Arc::new(Authenticator::new(
        settings.auth.jwt_secret.clone(),
        settings.auth.firebase_project_id.clone(),
        settings.auth.jwks_url.clone(),
        settings.auth.jwks_ttl_secs,
    ));
    if !auth.jwt_enabled() {
        tracing::warn!("No JWT secret configured; bearer tokens will be rejected");
    }

    info!("Firebase verification {}", if auth.firebase_enabled() { "enabled" } else { "disabled" });

    let weights = CompatibilityWeights::from(&settings.scoring.weights);
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let limits = Limits {
        companions: settings.matching.page_limits(),
        ..Limits::default()
    };

    let app_state = match settings.storage.backend {
        StorageBackend::Postgres => {
            let db_max_conn = settings.database.max_connections.unwrap_or(10);
            let postgres = PostgresClient::from_settings(
                &settings.database.url,
                Some(db_max_conn),
                settings.database.min_connections,
                settings.database.acquire_timeout_secs,
                settings.database.idle_timeout_secs,
            )
            .await
            .map_err(|e| startup_error("PostgreSQL connection error", e))?;

            info!("PostgreSQL storage initialized (max: {} connections)", db_max_conn);
            AppState::with_store(Arc::new(postgres), cache, auth, matcher, limits)
        }
        StorageBackend::Memory => {
            let store = match &settings.storage.seed_file {
                Some(path) => MemoryStore::from_seed_file(path)
                    .await
                    .map_err(|e| startup_error("Failed to load seed data", e))?,
                None => MemoryStore::new(),
            };

            info!("In-memory storage initialized");
            AppState::with_store(Arc::new(store), cache, auth, matcher, limits)
        }
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
