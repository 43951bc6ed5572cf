use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Primary weather condition, as named by the provider's `main` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConditionCategory {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    /// Anything the provider reports that we don't have a category for
    /// (Haze, Smoke, Dust, Tornado, ...)
    #[serde(other)]
    Other,
}

/// Where to fetch weather for
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Free-text city name, trimmed and non-empty
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl Location {
    /// Build a city location, rejecting blank input
    pub fn city(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::City(trimmed.to_string()))
        }
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(name) => write!(f, "{}", name),
            Location::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{:.4}, {:.4}", latitude, longitude),
        }
    }
}

/// Current conditions in provider units (Celsius, m/s, meters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Display name the provider resolved the location to
    pub city_name: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub condition: ConditionCategory,
    /// Free-text description, e.g. "scattered clouds"
    pub description: String,
    pub wind_speed: f64,
    pub visibility: f64,
}

/// One entry of the provider's 3-hourly forecast feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temp_max: f64,
    pub temp_min: f64,
    pub condition: ConditionCategory,
}

/// The representative forecast point for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub point: ForecastPoint,
}

/// Everything one fetch cycle produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastPoint>,
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location permission query failed: {0}")]
    PermissionQuery(String),
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors. Any of these fails the whole fetch.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Provider returned {status} for {endpoint}")]
    Status { status: u16, endpoint: &'static str },
    #[error("Parse error: {0}")]
    Parse(String),
}
