use weatherly_weather::{CurrentConditions, DailyForecast};

/// Data behind the content state
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherContent {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}

/// Exactly one of these is on screen at a time
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Content(WeatherContent),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&WeatherContent> {
        match self {
            UiState::Content(content) => Some(content),
            _ => None,
        }
    }
}

/// Remembers the last location that fetched successfully, for refresh
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_city: Option<String>,
}

impl Session {
    pub fn current_city(&self) -> Option<&str> {
        self.current_city.as_deref()
    }

    pub fn remember(&mut self, city: impl Into<String>) {
        let city = city.into();
        tracing::debug!("Session city is now {}", city);
        self.current_city = Some(city);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = UiState::default();
        assert_eq!(state, UiState::Idle);
        assert!(!state.is_loading());
        assert!(state.error_message().is_none());
        assert!(state.content().is_none());
    }

    #[test]
    fn test_error_accessor() {
        let state = UiState::Error("Please enter a city name".into());
        assert_eq!(state.error_message(), Some("Please enter a city name"));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_session_starts_empty() {
        let mut session = Session::default();
        assert_eq!(session.current_city(), None);

        session.remember("Paris");
        assert_eq!(session.current_city(), Some("Paris"));

        session.remember(String::from("Lyon"));
        assert_eq!(session.current_city(), Some("Lyon"));
    }
}
