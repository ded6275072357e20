use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::db::store::CityStore;
use crate::services::weather::WeatherService;

pub mod cities;
pub mod health;
pub mod page;
pub mod weather;

/// Shared application state for all routes.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<dyn CityStore>,
    pub(crate) weather: WeatherService,
}

/// Weathermap API: OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weathermap API",
        version = "0.1.0",
        description = "Cities on a map with current weather from OpenWeatherMap. \
            Weather is fetched live for each request; nothing is cached.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Page", description = "Server-rendered map page"),
        (name = "Cities", description = "City catalog"),
        (name = "Weather", description = "Current weather lookup"),
        (name = "Health", description = "Service health check"),
    ),
    paths(
        page::map_page,
        cities::list_cities,
        weather::get_weather,
        health::health_check,
    ),
    components(
        schemas(
            crate::services::catalog::CityListItem,
            crate::services::weather::WeatherSnapshot,
            health::HealthResponse,
            crate::errors::ErrorResponse,
        )
    )
)]
pub(crate) struct ApiDoc;

/// Build the application router with CORS, request tracing and Swagger UI.
pub(crate) fn build_router(state: AppState) -> Router {
    // Read-only API: GET from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(page::map_page))
        .route("/api/cities/", get(cities::list_cities))
        .route("/api/weather/:city_id/", get(weather::get_weather))
        // Clients that drop the trailing slash get the same handlers.
        .route("/api/cities", get(cities::list_cities))
        .route("/api/weather/:city_id", get(weather::get_weather))
        .route("/api/health", get(health::health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
