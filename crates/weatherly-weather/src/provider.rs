//! OpenWeatherMap client for current conditions and the 5-day/3-hour feed.

use crate::demo;
use crate::types::{
    ConditionCategory, CurrentConditions, ForecastPoint, WeatherError, WeatherReport,
};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const UNITS: &str = "metric";

/// How to reach the provider
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// `None` serves canned demo data instead of calling the provider
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    /// Simulated latency for demo data
    pub demo_delay: Duration,
    /// Display name for coordinate lookups in demo mode
    pub demo_city: String,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    settings: Arc<ProviderSettings>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    main: ConditionCategory,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    name: String,
    main: ApiMain,
    weather: Vec<ApiCondition>,
    wind: ApiWind,
    /// Omitted by the provider when visibility is unlimited
    #[serde(default = "max_visibility")]
    visibility: f64,
}

fn max_visibility() -> f64 {
    10_000.0
}

#[derive(Debug, Deserialize)]
struct ApiForecastMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct ApiForecastItem {
    dt: i64,
    main: ApiForecastMain,
    weather: Vec<ApiCondition>,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    list: Vec<ApiForecastItem>,
}

impl TryFrom<ApiCurrent> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(api: ApiCurrent) -> Result<Self, Self::Error> {
        let primary = api
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("current conditions missing weather".into()))?;

        Ok(Self {
            city_name: api.name,
            temperature: api.main.temp,
            feels_like: api.main.feels_like,
            humidity: api.main.humidity,
            condition: primary.main,
            description: primary.description,
            wind_speed: api.wind.speed,
            visibility: api.visibility,
        })
    }
}

impl TryFrom<ApiForecastItem> for ForecastPoint {
    type Error = WeatherError;

    fn try_from(item: ApiForecastItem) -> Result<Self, Self::Error> {
        let timestamp = DateTime::<Utc>::from_timestamp(item.dt, 0)
            .ok_or_else(|| WeatherError::Parse(format!("invalid timestamp {}", item.dt)))?;
        let condition = item
            .weather
            .first()
            .map(|w| w.main)
            .ok_or_else(|| WeatherError::Parse(format!("forecast at {} missing weather", item.dt)))?;

        Ok(Self {
            timestamp,
            temp_max: item.main.temp_max,
            temp_min: item.main.temp_min,
            condition,
        })
    }
}

impl WeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            settings: Arc::new(settings),
        })
    }

    /// Whether requests are served from demo data
    pub fn is_demo(&self) -> bool {
        self.settings.api_key.is_none()
    }

    /// Fetch current conditions and forecast for a city name
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_by_city(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        if self.is_demo() {
            return Ok(self.demo_report(city).await);
        }

        self.fetch(&[("q", city.to_string())]).await
    }

    /// Fetch current conditions and forecast for a coordinate pair
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, WeatherError> {
        if self.is_demo() {
            return Ok(self.demo_report(&self.settings.demo_city).await);
        }

        self.fetch(&[("lat", latitude.to_string()), ("lon", longitude.to_string())])
            .await
    }

    async fn demo_report(&self, city: &str) -> WeatherReport {
        tracing::debug!("No API key configured, serving demo data for {}", city);
        if !self.settings.demo_delay.is_zero() {
            tokio::time::sleep(self.settings.demo_delay).await;
        }
        demo::report(city, Utc::now())
    }

    /// Issue both requests; either failing fails the whole fetch
    async fn fetch(&self, location: &[(&str, String)]) -> Result<WeatherReport, WeatherError> {
        let (current, forecast) = tokio::try_join!(
            self.get_json::<ApiCurrent>(CURRENT_PATH, location),
            self.get_json::<ApiForecast>(FORECAST_PATH, location),
        )?;

        let current = CurrentConditions::try_from(current)?;
        let forecast = forecast
            .list
            .into_iter()
            .map(ForecastPoint::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Fetched weather for {}: {} forecast points",
            current.city_name,
            forecast.len()
        );

        Ok(WeatherReport { current, forecast })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &'static str,
        location: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.settings.base_url.trim_end_matches('/'), endpoint);
        let api_key = self.settings.api_key.as_deref().unwrap_or_default();

        let response = self
            .client
            .get(&url)
            .query(location)
            .query(&[("appid", api_key), ("units", UNITS)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Provider returned {} for {}", status, endpoint);
            return Err(WeatherError::Status {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| WeatherError::Parse(format!("{}: {}", endpoint, e)))
    }
}
