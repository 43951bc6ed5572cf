//! Presentation layer for Weatherly: the loading/error/content state
//! machine, the session that remembers the last location, and the render
//! sinks a view implements.

pub mod app_services;
pub mod controller;
mod error_mapping;
pub mod services;
pub mod sink;
pub mod state;

pub use app_services::WeatherServices;
pub use controller::WeatherController;
pub use services::{FetchRequest, WeatherError, WeatherServiceMessage};
pub use sink::{ContentView, ViewSink};
pub use state::{Session, UiState, WeatherContent};
