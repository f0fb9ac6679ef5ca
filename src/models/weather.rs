use serde::{Deserialize, Serialize, Serializer};

pub const PLACEHOLDER_TEMP: &str = "N/A";
pub const PLACEHOLDER_ICON: &str = "01d";

/// Current conditions for a city, already normalized for display.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temp: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    pub feels_like: i64,
    pub humidity: i64,
    pub pressure: i64,
    pub description: String,
    pub icon: String,
    pub wind_speed: f64,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherFailure {
    NotConfigured,
    CityNotFound { city: String },
    InvalidCredential,
    Status(u16),
    Timeout,
    Connection(String),
    Unexpected(String),
}

impl WeatherFailure {
    pub fn message(&self) -> String {
        match self {
            WeatherFailure::NotConfigured => {
                "Weather API key not configured. Please set OPENWEATHER_API_KEY in .env file."
                    .to_string()
            }
            WeatherFailure::CityNotFound { city } => {
                format!("City \"{}\" not found in weather database.", city)
            }
            WeatherFailure::InvalidCredential => {
                "Invalid API key. Please check OPENWEATHER_API_KEY in .env file.".to_string()
            }
            WeatherFailure::Status(code) => {
                format!("Weather service error (Status: {})", code)
            }
            WeatherFailure::Timeout => "Weather service timeout. Please try again later.".to_string(),
            WeatherFailure::Connection(detail) => format!("Error fetching weather data: {}", detail),
            WeatherFailure::Unexpected(detail) => format!("Unexpected error: {}", detail),
        }
    }

    /// Short text shown where the conditions would normally be.
    pub fn description(&self) -> &'static str {
        match self {
            WeatherFailure::NotConfigured => "API key not configured",
            WeatherFailure::CityNotFound { .. } => "City not found",
            WeatherFailure::InvalidCredential => "Invalid API key",
            WeatherFailure::Status(_) => "Service unavailable",
            WeatherFailure::Timeout => "Request timeout",
            WeatherFailure::Connection(_) => "Connection error",
            WeatherFailure::Unexpected(_) => "Error",
        }
    }
}

/// Outcome of a weather lookup. Both variants serialize to the record shape
/// templates and API clients render, discriminated by `error`.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherReport {
    Current(CurrentWeather),
    Unavailable(WeatherFailure),
}

impl WeatherReport {
    pub fn icon(&self) -> &str {
        match self {
            WeatherReport::Current(current) => &current.icon,
            WeatherReport::Unavailable(_) => PLACEHOLDER_ICON,
        }
    }

    pub fn icon_url(&self) -> String {
        icon_url(self.icon())
    }
}

impl Serialize for WeatherReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Available<'a> {
            error: bool,
            #[serde(flatten)]
            weather: &'a CurrentWeather,
        }

        #[derive(Serialize)]
        struct Placeholder<'a> {
            error: bool,
            message: String,
            temp: &'a str,
            description: &'a str,
            icon: &'a str,
        }

        match self {
            WeatherReport::Current(weather) => Available {
                error: false,
                weather,
            }
            .serialize(serializer),
            WeatherReport::Unavailable(failure) => Placeholder {
                error: true,
                message: failure.message(),
                temp: PLACEHOLDER_TEMP,
                description: failure.description(),
                icon: PLACEHOLDER_ICON,
            }
            .serialize(serializer),
        }
    }
}

pub fn icon_url(icon_code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", icon_code)
}

/// Body of a successful OpenWeatherMap current-weather response.
#[derive(Debug, Deserialize)]
pub struct OpenWeatherResponse {
    pub main: OpenWeatherMain,
    pub weather: Vec<OpenWeatherCondition>,
    pub wind: OpenWeatherWind,
    pub name: String,
    pub sys: OpenWeatherSys,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherSys {
    pub country: String,
}

impl TryFrom<OpenWeatherResponse> for CurrentWeather {
    type Error = WeatherFailure;

    fn try_from(data: OpenWeatherResponse) -> Result<Self, Self::Error> {
        let condition = data
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherFailure::Unexpected("response has no weather conditions".to_string()))?;

        Ok(CurrentWeather {
            temp: round_half_even(data.main.temp),
            temp_min: round_half_even(data.main.temp_min),
            temp_max: round_half_even(data.main.temp_max),
            feels_like: round_half_even(data.main.feels_like),
            humidity: data.main.humidity,
            pressure: data.main.pressure,
            description: capitalize(&condition.description),
            icon: condition.icon,
            wind_speed: data.wind.speed,
            city: data.name,
            country: data.sys.country,
        })
    }
}

fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Upper-cases the first character and lower-cases the remainder.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
