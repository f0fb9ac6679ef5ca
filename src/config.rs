use std::env;
use std::time::Duration;

use thiserror::Error;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "TravelPlanner";
const DEV_JWT_SECRET: &str = "default_secret";

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

impl WeatherConfig {
    pub fn new(api_key: Option<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: credential(api_key),
            api_url: api_url.into(),
            timeout: DEFAULT_WEATHER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl AiConfig {
    pub fn new(api_key: Option<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: credential(api_key),
            api_url: api_url.into(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            timeout: DEFAULT_AI_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub jwt_secret: String,
    pub weather: WeatherConfig,
    pub ai: AiConfig,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv` first if a `.env` file
    /// should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            Err(_) => PORT,
        };

        let mongodb_uri = env::var("MONGODB_URI").map_err(|_| ConfigError::Missing("MONGODB_URI"))?;
        let database = env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                log::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
            _ => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let weather = WeatherConfig::new(
            env::var("OPENWEATHER_API_KEY").ok(),
            env::var("OPENWEATHER_API_URL").unwrap_or_else(|_| DEFAULT_WEATHER_URL.to_string()),
        );

        let mut ai = AiConfig::new(
            env::var("GROQ_API_KEY").ok(),
            env::var("GROQ_API_URL").unwrap_or_else(|_| DEFAULT_GROQ_URL.to_string()),
        );
        if let Ok(model) = env::var("GROQ_MODEL") {
            ai.model = model;
        }
        if let Ok(raw) = env::var("AI_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                key: "AI_TIMEOUT_SECS",
                value: raw,
            })?;
            ai.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            host,
            port,
            mongodb_uri,
            database,
            jwt_secret,
            weather,
            ai,
        })
    }
}

// Blank credentials count as absent.
fn credential(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_are_absent() {
        let config = WeatherConfig::new(Some("   ".to_string()), DEFAULT_WEATHER_URL);
        assert!(config.api_key.is_none());

        let config = AiConfig::new(Some(String::new()), DEFAULT_GROQ_URL);
        assert!(config.api_key.is_none());
    }

    #[test]
    #[serial_test::serial]
    fn from_env_applies_defaults() {
        for key in [
            "HOST",
            "PORT",
            "MONGODB_DATABASE",
            "OPENWEATHER_API_KEY",
            "OPENWEATHER_API_URL",
            "GROQ_API_URL",
            "GROQ_MODEL",
            "AI_TIMEOUT_SECS",
        ] {
            env::remove_var(key);
        }
        env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        env::set_var("JWT_SECRET", "secret");
        env::set_var("GROQ_API_KEY", "gsk_env");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database, "TravelPlanner");
        assert!(config.weather.api_key.is_none());
        assert_eq!(config.weather.api_url, DEFAULT_WEATHER_URL);
        assert_eq!(config.ai.api_key.as_deref(), Some("gsk_env"));
        assert_eq!(config.ai.model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.ai.timeout, DEFAULT_AI_TIMEOUT);

        env::set_var("AI_TIMEOUT_SECS", "soon");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Invalid { key: "AI_TIMEOUT_SECS", .. })
        ));

        env::remove_var("AI_TIMEOUT_SECS");
        env::remove_var("MONGODB_URI");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Missing("MONGODB_URI"))
        ));
        env::remove_var("JWT_SECRET");
        env::remove_var("GROQ_API_KEY");
    }

    #[test]
    fn present_credentials_are_kept() {
        let config = WeatherConfig::new(Some("abc123".to_string()), DEFAULT_WEATHER_URL);
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
