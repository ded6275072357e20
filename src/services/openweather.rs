//! OpenWeatherMap "current weather" client.
//!
//! See: https://openweathermap.org/current
//!
//! Only the fields the service exposes are deserialized. Anything missing is
//! reported as `ProviderResponseInvalid` before a snapshot is built.

use serde::Deserialize;
use serde_json::Number;
use std::time::Duration;

use crate::services::weather::LookupError;

/// Upper bound on a single provider call, connect through body.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the OpenWeatherMap current weather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// The subset of a current-weather observation used by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: Number,
    pub pressure: Number,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

// --- OpenWeatherMap JSON response types ---

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    wind: OwmWind,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    // Integers in practice; any JSON number is passed through unchanged.
    humidity: Number,
    pressure: Number,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, api_key, PROVIDER_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch current conditions at a coordinate, in metric units.
    pub async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, LookupError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(request_failed)?;

        let body = response.text().await.map_err(request_failed)?;

        parse_current_conditions(&body)
    }
}

/// Parse a current-weather response body.
///
/// Pure function (no I/O). Fails when the body is not JSON, when any required
/// field is absent or mistyped, or when the condition list is empty.
pub fn parse_current_conditions(body: &str) -> Result<CurrentConditions, LookupError> {
    let parsed: OwmResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::ProviderResponseInvalid(e.to_string()))?;

    let condition = parsed.weather.into_iter().next().ok_or_else(|| {
        LookupError::ProviderResponseInvalid("`weather` contains no conditions".to_string())
    })?;

    Ok(CurrentConditions {
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        humidity: parsed.main.humidity,
        pressure: parsed.main.pressure,
        wind_speed: parsed.wind.speed,
        description: condition.description,
        icon: condition.icon,
    })
}

/// Convert a transport or status error, dropping the URL (it carries the API key).
fn request_failed(err: reqwest::Error) -> LookupError {
    use std::error::Error;

    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    LookupError::ProviderUnavailable(message)
}
