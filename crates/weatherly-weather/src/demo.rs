//! Canned data served when no API key is configured.

use chrono::{DateTime, Duration, Utc};

use crate::types::{ConditionCategory, CurrentConditions, ForecastPoint, WeatherReport};

/// (high, low, condition) for each of the next five days
const DEMO_DAYS: [(f64, f64, ConditionCategory); 5] = [
    (25.0, 18.0, ConditionCategory::Clouds),
    (28.0, 20.0, ConditionCategory::Rain),
    (23.0, 16.0, ConditionCategory::Clear),
    (26.0, 19.0, ConditionCategory::Clouds),
    (24.0, 17.0, ConditionCategory::Clear),
];

/// Demo report for `city`, with forecast days counted from `now`
pub fn report(city: &str, now: DateTime<Utc>) -> WeatherReport {
    let current = CurrentConditions {
        city_name: city.to_string(),
        temperature: 22.0,
        feels_like: 25.0,
        humidity: 65,
        condition: ConditionCategory::Clear,
        description: "clear sky".to_string(),
        wind_speed: 3.5,
        visibility: 10_000.0,
    };

    let forecast = DEMO_DAYS
        .iter()
        .zip(1..)
        .map(|(&(temp_max, temp_min, condition), day)| ForecastPoint {
            timestamp: now + Duration::days(day),
            temp_max,
            temp_min,
            condition,
        })
        .collect();

    WeatherReport { current, forecast }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::reduce_daily_in;

    #[test]
    fn test_demo_forecast_is_five_distinct_days() {
        let now = DateTime::<Utc>::from_timestamp(1_709_553_600, 0).unwrap();
        let report = report("Kolkata", now);

        assert_eq!(report.current.city_name, "Kolkata");
        assert_eq!(reduce_daily_in(&report.forecast, 5, Utc).len(), 5);
        assert_eq!(report.forecast[0].timestamp, now + Duration::days(1));
        assert_eq!(report.forecast[1].condition, ConditionCategory::Rain);
    }
}
