//! City store abstraction.
//!
//! `CityStore` is the seam between the HTTP/service layer and persistence.
//! `PgCityStore` is the production implementation; `MemoryCityStore`
//! (see `db::memory`) backs development runs without a database and tests.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use super::models::{City, NewCity};
use super::queries;

/// Errors raised by a city store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("City {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A seed record that could not be created.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of a replace-all run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    /// Rows removed by the clear step.
    pub deleted: u64,
    /// Rows inserted, with their assigned IDs, in input order.
    pub created: Vec<City>,
    /// Records skipped, in input order.
    pub failures: Vec<SeedFailure>,
}

#[async_trait]
pub trait CityStore: Send + Sync {
    /// All cities, sorted by name ascending.
    async fn list_all(&self) -> Result<Vec<City>, StoreError>;

    /// A single city, or `StoreError::NotFound`.
    async fn get_by_id(&self, id: i64) -> Result<City, StoreError>;

    /// Delete every city, then insert `records` in order.
    ///
    /// A record that fails validation or insertion is reported in
    /// `SeedReport::failures` and the remaining records are still inserted.
    /// Only a failure of the clear step aborts the call.
    async fn replace_all(&self, records: &[NewCity]) -> Result<SeedReport, StoreError>;

    /// Whether the backing store is reachable.
    async fn ping(&self) -> bool;
}

/// PostgreSQL-backed city store.
#[derive(Debug, Clone)]
pub struct PgCityStore {
    pool: PgPool,
}

impl PgCityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityStore for PgCityStore {
    async fn list_all(&self) -> Result<Vec<City>, StoreError> {
        Ok(queries::list_cities(&self.pool).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<City, StoreError> {
        queries::get_city(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn replace_all(&self, records: &[NewCity]) -> Result<SeedReport, StoreError> {
        // Inserts run outside a transaction: one rejected row must not roll back the rest.
        let deleted = queries::delete_all_cities(&self.pool).await?;
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
            match queries::insert_city(&self.pool, record).await {
                Ok(city) => report.created.push(city),
                Err(e) => report.failures.push(SeedFailure {
                    name: record.name.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        Ok(report)
    }

    async fn ping(&self) -> bool {
        queries::ping(&self.pool).await
    }
}
