use axum::extract::State;
use axum::Json;

use crate::errors::{AppError, ErrorResponse};
use crate::routes::AppState;
use crate::services::catalog::{list_cities_for_transport, CityListItem};

/// List all cities, sorted by name.
#[utoipa::path(
    get,
    path = "/api/cities/",
    tag = "Cities",
    responses(
        (status = 200, description = "All cities, sorted by name", body = Vec<CityListItem>),
        (status = 500, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn list_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityListItem>>, AppError> {
    let items = list_cities_for_transport(state.store.as_ref()).await?;
    Ok(Json(items))
}
