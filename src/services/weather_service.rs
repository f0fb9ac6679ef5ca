use reqwest::{Client, StatusCode};

use crate::config::WeatherConfig;
use crate::models::weather::{CurrentWeather, OpenWeatherResponse, WeatherFailure, WeatherReport};

/// OpenWeatherMap current-weather lookup. Every outcome, including a missing
/// API key, comes back as a `WeatherReport`.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn current_weather(&self, city: &str) -> WeatherReport {
        let Some(api_key) = self.api_key.as_deref() else {
            return WeatherReport::Unavailable(WeatherFailure::NotConfigured);
        };

        match self.fetch(city, api_key).await {
            Ok(current) => WeatherReport::Current(current),
            Err(failure) => {
                log::warn!("Weather lookup for {} failed: {}", city, failure.message());
                WeatherReport::Unavailable(failure)
            }
        }
    }

    async fn fetch(&self, city: &str, api_key: &str) -> Result<CurrentWeather, WeatherFailure> {
        log::debug!("Fetching weather for {}", city);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(transport_failure)?;

        match response.status() {
            StatusCode::OK => {
                let data: OpenWeatherResponse = response
                    .json()
                    .await
                    .map_err(|e| WeatherFailure::Unexpected(e.to_string()))?;
                CurrentWeather::try_from(data)
            }
            StatusCode::NOT_FOUND => Err(WeatherFailure::CityNotFound {
                city: city.to_string(),
            }),
            StatusCode::UNAUTHORIZED => Err(WeatherFailure::InvalidCredential),
            status => Err(WeatherFailure::Status(status.as_u16())),
        }
    }
}

fn transport_failure(err: reqwest::Error) -> WeatherFailure {
    if err.is_timeout() {
        WeatherFailure::Timeout
    } else {
        WeatherFailure::Connection(err.to_string())
    }
}
