//! Weather pipeline for Weatherly
//!
//! Provides current conditions and a daily forecast via OpenWeatherMap,
//! location resolution with a default-city fallback, and the pure mapping
//! from provider data to display values.

pub mod demo;
pub mod forecast;
pub mod location;
pub mod provider;
pub mod render;
pub mod types;

pub use forecast::{daily, reduce_daily, reduce_daily_in, MAX_FORECAST_DAYS};
pub use location::{Geolocation, IpGeolocation, LocationResolver, PermissionState};
pub use provider::{ProviderSettings, WeatherProvider};
pub use render::{icon_for, render_current, render_day, CurrentDisplay, DayDisplay, WeatherIcon};
pub use types::*;
