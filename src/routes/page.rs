//! Server-rendered map page (GET /).
//!
//! The city list is rendered into the page; the Leaflet map loads markers
//! from /api/cities/ and weather from /api/weather/{id}/ in the browser.

use axum::extract::State;
use axum::response::Html;

use crate::db::models::City;
use crate::errors::AppError;
use crate::helpers::escape_html;
use crate::routes::AppState;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const MAP_SCRIPT: &str = r#"
const map = L.map("map").setView([48.8566, 2.3522], 3);
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
  attribution: "&copy; OpenStreetMap contributors",
  maxZoom: 19,
}).addTo(map);

function showWeather(marker, id) {
  marker.setPopupContent("Loading weather...").openPopup();
  fetch(`api/weather/${id}/`)
    .then((r) => r.json())
    .then((w) => {
      if (w.error) {
        marker.setPopupContent(w.error);
        return;
      }
      const box = document.createElement("div");
      const title = document.createElement("strong");
      title.textContent = `${w.city}, ${w.country}`;
      const icon = document.createElement("img");
      icon.src = `https://openweathermap.org/img/wn/${w.icon}@2x.png`;
      icon.alt = w.description;
      const details = document.createElement("div");
      details.textContent =
        `${w.temperature} °C (feels like ${w.feels_like} °C), ${w.description}; ` +
        `humidity ${w.humidity}%, pressure ${w.pressure} hPa, wind ${w.wind_speed} m/s`;
      box.append(title, icon, details);
      marker.setPopupContent(box);
    })
    .catch((e) => marker.setPopupContent(`Weather unavailable: ${e}`));
}

fetch("api/cities/")
  .then((r) => r.json())
  .then((cities) => {
    for (const c of cities) {
      const marker = L.marker([c.latitude, c.longitude]).addTo(map).bindPopup(c.name);
      marker.on("click", () => showWeather(marker, c.id));
      const item = document.querySelector(`li[data-city-id="${c.id}"]`);
      if (item) {
        item.addEventListener("click", () => {
          map.setView([c.latitude, c.longitude], 8);
          showWeather(marker, c.id);
        });
      }
    }
  });
"#;

/// Render the map page with the given cities listed alongside the map.
pub fn render_map_page(cities: &[City]) -> String {
    let items: String = cities
        .iter()
        .map(|c| {
            format!(
                "      <li data-city-id=\"{}\">{}, {}</li>\n",
                c.id,
                escape_html(&c.name),
                escape_html(&c.country)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Weather Map</title>
  <link rel="stylesheet" href="{css}">
  <style>
    body {{ margin: 0; display: flex; font-family: sans-serif; height: 100vh; }}
    aside {{ width: 260px; overflow-y: auto; padding: 1rem; }}
    aside li {{ cursor: pointer; padding: 0.25rem 0; }}
    #map {{ flex: 1; }}
  </style>
</head>
<body>
  <aside>
    <h1>Cities ({count})</h1>
    <ul>
{items}    </ul>
  </aside>
  <div id="map"></div>
  <script src="{js}"></script>
  <script>{script}</script>
</body>
</html>
"#,
        css = LEAFLET_CSS,
        js = LEAFLET_JS,
        count = cities.len(),
        items = items,
        script = MAP_SCRIPT,
    )
}

/// Render the main map page.
#[utoipa::path(
    get,
    path = "/",
    tag = "Page",
    responses(
        (status = 200, description = "HTML map page listing all cities", content_type = "text/html", body = String),
    )
)]
pub async fn map_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let cities = state.store.list_all().await?;
    Ok(Html(render_map_page(&cities)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: i64, name: &str, country: &str) -> City {
        City {
            id,
            name: name.to_string(),
            country: country.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    #[test]
    fn test_render_lists_cities() {
        let html = render_map_page(&[city(1, "Cork", "Ireland"), city(2, "Dublin", "Ireland")]);
        assert!(html.contains("Cities (2)"));
        assert!(html.contains(r#"<li data-city-id="1">Cork, Ireland</li>"#));
        assert!(html.contains(r#"<li data-city-id="2">Dublin, Ireland</li>"#));
        assert!(html.contains(r#"<div id="map"></div>"#));
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render_map_page(&[city(1, "<b>Evil</b>", "A & B")]);
        assert!(html.contains("&lt;b&gt;Evil&lt;/b&gt;, A &amp; B"));
        assert!(!html.contains("<b>Evil</b>"));
    }

    #[test]
    fn test_render_empty() {
        let html = render_map_page(&[]);
        assert!(html.contains("Cities (0)"));
    }
}
