use serde::Deserialize;
use sqlx::FromRow;

/// A city shown on the map.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Input for creating a city during seeding.
///
/// Seed files use the short `lat` / `lon` keys. `population` is accepted so
/// existing seed data parses, but it is not stored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub country: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(default)]
    #[allow(dead_code)] // Parsed from seed files, never stored
    pub population: Option<u64>,
}

impl NewCity {
    pub fn new(name: &str, country: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            latitude,
            longitude,
            population: None,
        }
    }

    /// Check the record before insertion. Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.country.trim().is_empty() {
            return Err("country must not be empty".to_string());
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            ));
        }
        Ok(())
    }
}
