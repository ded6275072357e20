// Weathermap API v0.1
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod errors;
mod helpers;
mod routes;
mod services;

use config::AppConfig;
use db::memory::MemoryCityStore;
use db::store::{CityStore, PgCityStore};
use routes::AppState;
use services::openweather::OpenWeatherClient;
use services::weather::WeatherService;

/// Maximum number of connections in the database pool.
const DB_POOL_MAX_CONNECTIONS: u32 = 5;
/// Minimum number of connections kept alive in the database pool.
const DB_POOL_MIN_CONNECTIONS: u32 = 1;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weathermap_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    let (store, seed): (Arc<dyn CityStore>, bool) = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(DB_POOL_MAX_CONNECTIONS)
                .min_connections(DB_POOL_MIN_CONNECTIONS)
                .connect(database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run database migrations");

            tracing::info!("Database migrations completed");
            let store: Arc<dyn CityStore> = Arc::new(PgCityStore::new(pool));
            (store, config.seed_on_startup)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory city store");
            // The in-memory store starts empty on every run; always seed it.
            let store: Arc<dyn CityStore> = Arc::new(MemoryCityStore::new());
            (store, true)
        }
    };

    if seed {
        let seed_path = std::path::Path::new(&config.data_dir).join(services::seed::SEED_FILE_NAME);
        match services::seed::load_seed_file(&seed_path) {
            Ok(records) => {
                if let Err(e) = services::seed::seed_cities(store.as_ref(), &records).await {
                    tracing::error!("Failed to seed cities: {}", e);
                }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load seed data from {}: {}",
                    seed_path.display(),
                    e
                );
            }
        }
    }

    let client = OpenWeatherClient::new(&config.weather_api_url, &config.weather_api_key)
        .expect("Failed to build HTTP client");

    let app_state = AppState {
        store: store.clone(),
        weather: WeatherService::new(store, client),
    };

    let app = routes::build_router(app_state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
