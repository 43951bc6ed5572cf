use crate::services::weather_service::WeatherError as UiWeatherError;
use weatherly_core::{AppError, WeatherError};
use weatherly_weather::Location;

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::EmptyCity => AppError::Weather(WeatherError::EmptyCity),
            UiWeatherError::Fetch {
                location: Location::City(city),
                message,
            } => AppError::Weather(WeatherError::CityFetchFailed {
                city,
                reason: message,
            }),
            UiWeatherError::Fetch {
                location: Location::Coordinates { .. },
                message,
            } => AppError::Weather(WeatherError::LocationFetchFailed(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_city_maps_to_prompt() {
        let app: AppError = UiWeatherError::EmptyCity.into();
        assert_eq!(app.user_message(), "Please enter a city name");
    }

    #[test]
    fn city_fetch_maps_to_city_message() {
        let app: AppError = UiWeatherError::Fetch {
            location: Location::City("Atlantis".into()),
            message: "Provider returned 404".into(),
        }
        .into();
        assert!(matches!(
            &app,
            AppError::Weather(WeatherError::CityFetchFailed { city, .. }) if city == "Atlantis"
        ));
        assert_eq!(
            app.user_message(),
            "Unable to fetch weather data. Please check the city name and try again."
        );
    }

    #[test]
    fn coordinate_fetch_maps_to_location_message() {
        let app: AppError = UiWeatherError::Fetch {
            location: Location::coordinates(1.0, 2.0),
            message: "timeout".into(),
        }
        .into();
        assert_eq!(
            app.user_message(),
            "Unable to fetch weather data for your location."
        );
    }
}
