//! Weather backend: one fetch cycle per request.
//! Network work runs on a spawned task; results come back over a channel.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use weatherly_core::ReqwestErrorExt;
use weatherly_weather::{Location, WeatherReport};

use crate::app_services::WeatherServices;

/// What a fetch cycle should query
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    /// A specific city, already trimmed and non-empty
    City(String),
    /// Ask the location resolver
    Resolve,
}

/// Error type for weather operations
#[derive(Debug, Clone)]
pub enum WeatherError {
    EmptyCity,
    Fetch { location: Location, message: String },
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::EmptyCity => write!(f, "City name is empty"),
            WeatherError::Fetch { location, message } => {
                write!(f, "Weather error for {}: {}", location, message)
            }
        }
    }
}

impl std::error::Error for WeatherError {}

/// Messages sent from fetch cycles back to the controller
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of one fetch cycle, tagged with the cycle that started it
    FetchDone {
        generation: u64,
        location: Location,
        result: Result<WeatherReport, WeatherError>,
    },
}

/// Sends a failed `FetchDone` if the cycle's task panics or is dropped
/// before it produced a result.
struct CycleGuard {
    tx: UnboundedSender<WeatherServiceMessage>,
    generation: u64,
    /// Best known location; the resolver's fallback until resolution finishes
    location: Location,
    sent: bool,
}

impl CycleGuard {
    fn finish(mut self, result: Result<WeatherReport, WeatherError>) {
        self.sent = true;
        let _ = self.tx.send(WeatherServiceMessage::FetchDone {
            generation: self.generation,
            location: self.location.clone(),
            result,
        });
    }
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        if self.sent {
            return;
        }
        tracing::warn!("Fetch cycle {} ended without a result", self.generation);
        let _ = self.tx.send(WeatherServiceMessage::FetchDone {
            generation: self.generation,
            location: self.location.clone(),
            result: Err(WeatherError::Fetch {
                location: self.location.clone(),
                message: "fetch cycle aborted".to_string(),
            }),
        });
    }
}

/// Run one fetch cycle asynchronously.
/// Sends exactly one `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &UnboundedSender<WeatherServiceMessage>,
    services: Arc<WeatherServices>,
    generation: u64,
    request: FetchRequest,
) {
    let mut guard = CycleGuard {
        tx: tx.clone(),
        generation,
        location: match &request {
            FetchRequest::City(city) => Location::City(city.clone()),
            FetchRequest::Resolve => Location::City(services.resolver().default_city().to_string()),
        },
        sent: false,
    };

    tokio::spawn(async move {
        let location = match request {
            FetchRequest::City(city) => Location::City(city),
            FetchRequest::Resolve => services.resolver().resolve().await,
        };
        guard.location = location.clone();

        tracing::info!("Fetching weather for {} (cycle {})", location, generation);

        let result = match &location {
            Location::City(city) => services.provider().fetch_by_city(city).await,
            Location::Coordinates {
                latitude,
                longitude,
            } => {
                services
                    .provider()
                    .fetch_by_coords(*latitude, *longitude)
                    .await
            }
        };

        let result = result.map_err(|e| {
            let message = e.to_string();
            match e {
                weatherly_weather::WeatherError::Network(source) => tracing::warn!(
                    "Weather fetch for {} failed: {}",
                    location,
                    source.into_network_error()
                ),
                _ => tracing::warn!("Weather fetch for {} failed: {}", location, message),
            }
            WeatherError::Fetch {
                location: location.clone(),
                message,
            }
        });

        guard.finish(result);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_error_display() {
        assert!(WeatherError::EmptyCity.to_string().contains("empty"));
        let err = WeatherError::Fetch {
            location: Location::City("Paris".into()),
            message: "timeout".into(),
        };
        assert!(err.to_string().contains("Paris"));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn dropped_cycle_reports_failure() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let guard = CycleGuard {
            tx,
            generation: 7,
            location: Location::City("Kolkata".into()),
            sent: false,
        };
        drop(guard);

        let WeatherServiceMessage::FetchDone {
            generation, result, ..
        } = rx.try_recv().unwrap();
        assert_eq!(generation, 7);
        assert!(matches!(result, Err(WeatherError::Fetch { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn finished_cycle_sends_once() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let guard = CycleGuard {
            tx,
            generation: 1,
            location: Location::City("Paris".into()),
            sent: false,
        };
        guard.finish(Err(WeatherError::EmptyCity));

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
