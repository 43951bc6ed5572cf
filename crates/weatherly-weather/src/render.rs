//! Pure mapping from provider data to display values.

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::types::{ConditionCategory, CurrentConditions, DailyForecast};

/// Icons available to the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    Sun,
    Cloud,
    CloudRain,
    Bolt,
    Snowflake,
    Smog,
}

impl WeatherIcon {
    /// Icon font name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Cloud => "cloud",
            Self::CloudRain => "cloud-rain",
            Self::Bolt => "bolt",
            Self::Snowflake => "snowflake",
            Self::Smog => "smog",
        }
    }

    /// Single-glyph rendering for plain-text views
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Cloud => "☁",
            Self::CloudRain => "🌧",
            Self::Bolt => "⚡",
            Self::Snowflake => "❄",
            Self::Smog => "🌫",
        }
    }
}

/// Icon for a condition. Unrecognized conditions get the clear-sky icon.
pub fn icon_for(condition: ConditionCategory) -> WeatherIcon {
    match condition {
        ConditionCategory::Clear => WeatherIcon::Sun,
        ConditionCategory::Clouds => WeatherIcon::Cloud,
        ConditionCategory::Rain | ConditionCategory::Drizzle => WeatherIcon::CloudRain,
        ConditionCategory::Thunderstorm => WeatherIcon::Bolt,
        ConditionCategory::Snow => WeatherIcon::Snowflake,
        ConditionCategory::Mist | ConditionCategory::Fog => WeatherIcon::Smog,
        ConditionCategory::Other => WeatherIcon::Sun,
    }
}

/// Display fields for the current-conditions card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentDisplay {
    pub location: String,
    pub temperature_c: i64,
    pub condition: String,
    pub icon: WeatherIcon,
    pub feels_like_c: i64,
    pub humidity_pct: u8,
    pub wind_kmh: i64,
    pub visibility_km: i64,
}

/// Display fields for one forecast card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDisplay {
    /// Abbreviated weekday, e.g. "Mon"
    pub day: String,
    pub icon: WeatherIcon,
    pub high_c: i64,
    pub low_c: i64,
}

/// Round to the nearest integer, halves toward positive infinity
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Convert m/s to whole km/h
pub fn wind_kmh(meters_per_second: f64) -> i64 {
    round_half_up(meters_per_second * 3.6)
}

/// Convert meters to whole kilometers
pub fn visibility_km(meters: f64) -> i64 {
    round_half_up(meters / 1000.0)
}

pub fn render_current(current: &CurrentConditions) -> CurrentDisplay {
    CurrentDisplay {
        location: current.city_name.clone(),
        temperature_c: round_half_up(current.temperature),
        condition: current.description.clone(),
        icon: icon_for(current.condition),
        feels_like_c: round_half_up(current.feels_like),
        humidity_pct: current.humidity,
        wind_kmh: wind_kmh(current.wind_speed),
        visibility_km: visibility_km(current.visibility),
    }
}

/// Render a forecast day, labelling it with the weekday in `tz`
pub fn render_day_in<Tz: TimeZone>(day: &DailyForecast, tz: &Tz) -> DayDisplay
where
    Tz::Offset: std::fmt::Display,
{
    DayDisplay {
        day: day
            .point
            .timestamp
            .with_timezone(tz)
            .format("%a")
            .to_string(),
        icon: icon_for(day.point.condition),
        high_c: round_half_up(day.point.temp_max),
        low_c: round_half_up(day.point.temp_min),
    }
}

/// Render a forecast day in the viewer's local timezone
pub fn render_day(day: &DailyForecast) -> DayDisplay {
    render_day_in(day, &Local)
}

impl std::fmt::Display for CurrentDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}  {}", self.icon.glyph(), self.location)?;
        writeln!(f, "{}°C  {}", self.temperature_c, self.condition)?;
        write!(
            f,
            "Feels like {}°C · Humidity {}% · Wind {} km/h · Visibility {} km",
            self.feels_like_c, self.humidity_pct, self.wind_kmh, self.visibility_km
        )
    }
}

impl std::fmt::Display for DayDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}° / {}°",
            self.day,
            self.icon.glyph(),
            self.high_c,
            self.low_c
        )
    }
}
