//! Weather lookup service.
//!
//! Resolves a city through the store, asks the provider for current
//! conditions at its coordinates and reshapes the answer into a
//! `WeatherSnapshot`. Nothing is cached: every call hits the provider.

use serde::Serialize;
use serde_json::Number;
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::store::{CityStore, StoreError};
use crate::services::openweather::OpenWeatherClient;

/// Why a weather lookup failed.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("City not found")]
    CityNotFound,

    /// Network error, timeout or non-success HTTP status from the provider.
    #[error("API request failed: {0}")]
    ProviderUnavailable(String),

    /// The provider answered, but without the fields we need.
    #[error("Unexpected API response format: {0}")]
    ProviderResponseInvalid(String),

    #[error("{0}")]
    Store(StoreError),
}

impl From<StoreError> for LookupError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => LookupError::CityNotFound,
            other => LookupError::Store(other),
        }
    }
}

/// Current weather for a city, as returned by GET /api/weather/{city_id}/.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeatherSnapshot {
    /// City name
    pub city: String,
    /// Country name
    pub country: String,
    /// Air temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage
    #[schema(value_type = f64)]
    pub humidity: Number,
    /// Atmospheric pressure in hPa
    #[schema(value_type = f64)]
    pub pressure: Number,
    /// Wind speed in metres per second
    pub wind_speed: f64,
    /// Textual condition (e.g. "light rain")
    pub description: String,
    /// Provider icon code (e.g. "10d")
    pub icon: String,
}

#[derive(Clone)]
pub struct WeatherService {
    store: Arc<dyn CityStore>,
    client: OpenWeatherClient,
}

impl WeatherService {
    pub fn new(store: Arc<dyn CityStore>, client: OpenWeatherClient) -> Self {
        Self { store, client }
    }

    /// Look up current weather for a stored city.
    ///
    /// The provider is only contacted once the city is known to exist.
    pub async fn get_weather(&self, city_id: i64) -> Result<WeatherSnapshot, LookupError> {
        let city = self.store.get_by_id(city_id).await?;

        tracing::debug!(
            "Fetching weather for {} ({}, {})",
            city.name,
            city.latitude,
            city.longitude
        );

        let conditions = self
            .client
            .fetch_current(city.latitude, city.longitude)
            .await
            .inspect_err(|e| tracing::warn!("Weather lookup for {} failed: {}", city.name, e))?;

        Ok(WeatherSnapshot {
            city: city.name,
            country: city.country,
            temperature: conditions.temperature,
            feels_like: conditions.feels_like,
            humidity: conditions.humidity,
            pressure: conditions.pressure,
            wind_speed: conditions.wind_speed,
            description: conditions.description,
            icon: conditions.icon,
        })
    }
}
