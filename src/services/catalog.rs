use serde::Serialize;
use utoipa::ToSchema;

use crate::db::models::City;
use crate::db::store::{CityStore, StoreError};

/// Response item for GET /api/cities/.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CityListItem {
    /// City identifier, used in /api/weather/{city_id}/
    pub id: i64,
    /// City name (e.g. "Dublin")
    pub name: String,
    /// Country name (e.g. "Ireland")
    pub country: String,
    /// Latitude (WGS84)
    pub latitude: f64,
    /// Longitude (WGS84)
    pub longitude: f64,
}

impl From<City> for CityListItem {
    fn from(c: City) -> Self {
        Self {
            id: c.id,
            name: c.name,
            country: c.country,
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

/// All cities in store order (name ascending), projected for transport.
pub async fn list_cities_for_transport(
    store: &dyn CityStore,
) -> Result<Vec<CityListItem>, StoreError> {
    let cities = store.list_all().await?;
    Ok(cities.into_iter().map(CityListItem::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryCityStore;
    use crate::db::models::NewCity;

    #[tokio::test]
    async fn test_matches_store_order() {
        let store = MemoryCityStore::new();
        store
            .replace_all(&[
                NewCity::new("Tokyo", "Japan", 35.6762, 139.6503),
                NewCity::new("Cairo", "Egypt", 30.0444, 31.2357),
                NewCity::new("Moscow", "Russia", 55.7558, 37.6173),
            ])
            .await
            .unwrap();

        let items = list_cities_for_transport(&store).await.unwrap();
        let expected: Vec<CityListItem> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(CityListItem::from)
            .collect();

        assert_eq!(items, expected);
        let names: Vec<&str> = items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cairo", "Moscow", "Tokyo"]);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryCityStore::new();
        assert!(list_cities_for_transport(&store).await.unwrap().is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let item = CityListItem::from(City {
            id: 1,
            name: "Dublin".to_string(),
            country: "Ireland".to_string(),
            latitude: 53.349805,
            longitude: -6.26031,
        });
        assert_eq!(
            serde_json::to_value(item).unwrap(),
            serde_json::json!({
                "id": 1,
                "name": "Dublin",
                "country": "Ireland",
                "latitude": 53.349805,
                "longitude": -6.26031
            })
        );
    }
}
