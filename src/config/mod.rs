use std::env;
use std::fmt;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    pub store_url: Option<String>,
    pub store_api_key: Option<String>,
    pub store_fixture_path: Option<String>,
    pub store_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub display_utc_offset_minutes: i32,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("store_url", &self.store_url)
            .field("store_api_key", &redacted(&self.store_api_key))
            .field("store_fixture_path", &self.store_fixture_path)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("frontend_url", &self.frontend_url)
            .field("display_utc_offset_minutes", &self.display_utc_offset_minutes)
            .finish()
    }
}

/// Secret placeholder for `Debug` output.
pub fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

/// Configuration could not be assembled from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("either STORE_URL or STORE_FIXTURE_PATH must be set")]
    MissingStore,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_url = non_empty_var("STORE_URL");
        let store_fixture_path = non_empty_var("STORE_FIXTURE_PATH");
        if store_url.is_none() && store_fixture_path.is_none() {
            return Err(ConfigError::MissingStore);
        }

        Ok(Self {
            store_url,
            store_api_key: non_empty_var("STORE_API_KEY"),
            store_fixture_path,
            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            display_utc_offset_minutes: env::var("DISPLAY_UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .unwrap_or(0),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_api_key() {
        let config = AppConfig {
            store_url: Some("https://store.example.com".into()),
            store_api_key: Some("sk-live-123".into()),
            store_fixture_path: None,
            store_timeout_secs: 30,
            host: "0.0.0.0".into(),
            port: 3000,
            frontend_url: "http://localhost:5173".into(),
            display_utc_offset_minutes: 0,
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-live-123"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("https://store.example.com"));
    }
}
