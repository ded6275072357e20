use sqlx::PgPool;

use super::models::{City, NewCity};

/// List all cities, ordered by name.
pub async fn list_cities(pool: &PgPool) -> Result<Vec<City>, sqlx::Error> {
    sqlx::query_as::<_, City>(
        "SELECT id, name, country, latitude, longitude FROM cities ORDER BY name, id",
    )
    .fetch_all(pool)
    .await
}

/// Get a single city by ID.
pub async fn get_city(pool: &PgPool, id: i64) -> Result<Option<City>, sqlx::Error> {
    sqlx::query_as::<_, City>(
        "SELECT id, name, country, latitude, longitude FROM cities WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete every city. Returns the number of rows removed.
pub async fn delete_all_cities(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cities").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Insert a new city and return it with its assigned ID.
pub async fn insert_city(pool: &PgPool, city: &NewCity) -> Result<City, sqlx::Error> {
    sqlx::query_as::<_, City>(
        "INSERT INTO cities (name, country, latitude, longitude)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, country, latitude, longitude",
    )
    .bind(&city.name)
    .bind(&city.country)
    .bind(city.latitude)
    .bind(city.longitude)
    .fetch_one(pool)
    .await
}

/// Cheap connectivity probe.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}
