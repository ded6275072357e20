//! City seeding.
//!
//! Reads the fixed city list from `<data_dir>/cities.json` and replaces the
//! store's contents with it. Per-record outcomes go to the log.

use std::path::Path;
use thiserror::Error;

use crate::db::models::NewCity;
use crate::db::store::{CityStore, SeedReport, StoreError};

/// File name of the seed data inside the data directory.
pub const SEED_FILE_NAME: &str = "cities.json";

/// Errors that can occur while loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("IO error reading seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse seed data from a JSON file.
pub fn load_seed_file(path: &Path) -> Result<Vec<NewCity>, SeedError> {
    let content = std::fs::read_to_string(path)?;
    parse_seed(&content)
}

/// Parse seed data from a JSON array of `{name, country, lat, lon, population?}`.
pub fn parse_seed(content: &str) -> Result<Vec<NewCity>, SeedError> {
    Ok(serde_json::from_str(content)?)
}

/// Replace all cities with `records`, logging each created city, each failure and a summary.
pub async fn seed_cities(
    store: &dyn CityStore,
    records: &[NewCity],
) -> Result<SeedReport, StoreError> {
    let report = store.replace_all(records).await?;

    tracing::info!("Deleted {} existing cities", report.deleted);
    for city in &report.created {
        tracing::info!("Created city {}, {} (id={})", city.name, city.country, city.id);
    }
    for failure in &report.failures {
        tracing::error!("Failed to create city '{}': {}", failure.name, failure.reason);
    }
    tracing::info!(
        "Seeded {} of {} cities ({} failed)",
        report.created.len(),
        records.len(),
        report.failures.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryCityStore;

    #[test]
    fn test_parse_seed() {
        let records = parse_seed(
            r#"[
                {"name": "Dublin", "country": "Ireland", "population": 1388000, "lat": 53.349805, "lon": -6.26031},
                {"name": "Tokyo", "country": "Japan", "lat": 35.6762, "lon": 139.6503}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Dublin");
        assert_eq!(records[0].population, Some(1388000));
        assert_eq!(records[1].population, None);
    }

    #[test]
    fn test_parse_seed_rejects_missing_coordinates() {
        let err = parse_seed(r#"[{"name": "Dublin", "country": "Ireland"}]"#).unwrap_err();
        assert!(matches!(err, SeedError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_seed_file(Path::new("/nonexistent/cities.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io(_)));
    }

    #[test]
    fn test_bundled_seed_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join(SEED_FILE_NAME);
        let records = load_seed_file(&path).unwrap();

        assert!(!records.is_empty());
        for record in &records {
            assert!(record.validate().is_ok(), "invalid seed record: {:?}", record);
        }
        assert!(records.iter().any(|r| r.name == "Dublin"));
    }

    #[tokio::test]
    async fn test_seed_cities_reports_failures() {
        let store = MemoryCityStore::new();
        let records = vec![
            NewCity::new("Berlin", "Germany", 52.52, 13.405),
            NewCity::new("", "Germany", 52.52, 13.405),
        ];

        let report = seed_cities(&store, &records).await.unwrap();
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].name, "Berlin");
        assert_eq!(report.created[0].country, "Germany");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reason, "name must not be empty");

        let stored = store.list_all().await.unwrap();
        assert_eq!(stored, report.created);
    }
}
