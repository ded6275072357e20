use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::errors::{AppError, ErrorResponse};
use crate::routes::AppState;
use crate::services::weather::WeatherSnapshot;

/// Get current weather for a city.
///
/// Calls the weather provider on every request; results are not cached.
#[utoipa::path(
    get,
    path = "/api/weather/{city_id}/",
    tag = "Weather",
    params(
        ("city_id" = i64, Path, description = "City identifier"),
    ),
    responses(
        (status = 200, description = "Current weather for the city", body = WeatherSnapshot),
        (status = 400, description = "City id is not an integer", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Provider request failed or returned an unexpected format", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    city_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<WeatherSnapshot>, AppError> {
    let Path(city_id) =
        city_id.map_err(|e| AppError::BadRequest(format!("Invalid city id: {}", e.body_text())))?;
    let snapshot = state.weather.get_weather(city_id).await?;
    Ok(Json(snapshot))
}
