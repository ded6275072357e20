/// Default OpenWeatherMap "current weather" endpoint.
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub weather_api_key: String,
    pub weather_api_url: String,
    pub port: u16,
    /// Directory containing `cities.json` for seeding.
    pub data_dir: String,
    /// Replace the city table with the seed data at startup.
    pub seed_on_startup: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            weather_api_key: std::env::var("OPENWEATHERMAP_API_KEY")
                .expect("OPENWEATHERMAP_API_KEY must be set"),
            weather_api_url: std::env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            seed_on_startup: std::env::var("SEED_ON_STARTUP")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

/// Interpret an environment flag ("1", "true", "yes", "on" are truthy).
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // set_var/remove_var are unsafe when other threads read the environment.
        // This is the only test in the crate that touches process env.
        unsafe {
            std::env::set_var("OPENWEATHERMAP_API_KEY", "test-key");
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("WEATHER_API_URL");
            std::env::remove_var("PORT");
            std::env::remove_var("DATA_DIR");
            std::env::remove_var("SEED_ON_STARTUP");
        }

        let config = AppConfig::from_env();

        assert_eq!(config.weather_api_key, "test-key");
        assert_eq!(config.database_url, None);
        assert_eq!(config.weather_api_url, DEFAULT_WEATHER_API_URL);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, "./data");
        assert!(!config.seed_on_startup);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
