//! In-process city store.
//!
//! Used when no `DATABASE_URL` is configured, and by tests. Identifiers come
//! from a counter that is never reset, matching a database sequence.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{City, NewCity};
use super::store::{CityStore, SeedFailure, SeedReport, StoreError};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    cities: Vec<City>,
}

#[derive(Debug, Default)]
pub struct MemoryCityStore {
    inner: RwLock<Inner>,
}

impl MemoryCityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding the given cities with their IDs as-is.
    #[cfg(test)]
    pub fn with_cities(cities: Vec<City>) -> Self {
        let next_id = cities.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(Inner { next_id, cities }),
        }
    }
}

#[async_trait]
impl CityStore for MemoryCityStore {
    async fn list_all(&self) -> Result<Vec<City>, StoreError> {
        let inner = self.inner.read().await;
        let mut cities = inner.cities.clone();
        cities.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(cities)
    }

    async fn get_by_id(&self, id: i64) -> Result<City, StoreError> {
        let inner = self.inner.read().await;
        inner
            .cities
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn replace_all(&self, records: &[NewCity]) -> Result<SeedReport, StoreError> {
        let mut inner = self.inner.write().await;
        let deleted = inner.cities.len() as u64;
        inner.cities.clear();

        let mut report = SeedReport {
            deleted,
            ..SeedReport::default()
        };

        for record in records {
            if let Err(reason) = record.validate() {
                report.failures.push(SeedFailure {
                    name: record.name.clone(),
                    reason,
                });
                continue;
            }
            inner.next_id += 1;
            let city = City {
                id: inner.next_id,
                name: record.name.clone(),
                country: record.country.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
            };
            inner.cities.push(city.clone());
            report.created.push(city);
        }

        Ok(report)
    }

    async fn ping(&self) -> bool {
        true
    }
}
