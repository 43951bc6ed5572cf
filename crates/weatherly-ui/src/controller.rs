//! The single owner of UI state. Exposes the two view entry points (search
//! and refresh) plus startup, and drives the render sinks.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use weatherly_core::AppError;
use weatherly_weather::{reduce_daily, Location, WeatherReport, MAX_FORECAST_DAYS};

use crate::app_services::WeatherServices;
use crate::services::{request_weather_fetch, FetchRequest, WeatherError, WeatherServiceMessage};
use crate::sink::{ContentView, ViewSink};
use crate::state::{Session, UiState, WeatherContent};

pub struct WeatherController<V: ViewSink> {
    services: Arc<WeatherServices>,
    view: V,
    state: UiState,
    session: Session,
    /// Id of the most recently started fetch cycle
    generation: u64,
    in_flight: usize,
    tx: UnboundedSender<WeatherServiceMessage>,
    rx: UnboundedReceiver<WeatherServiceMessage>,
}

impl<V: ViewSink> WeatherController<V> {
    pub fn new(services: Arc<WeatherServices>, view: V) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            services,
            view,
            state: UiState::Idle,
            session: Session::default(),
            generation: 0,
            in_flight: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Number of fetch cycles started but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Initial load: resolve a location and fetch it
    pub fn start(&mut self) {
        self.begin(FetchRequest::Resolve);
    }

    /// Search entry point. Blank input shows an error without fetching.
    pub fn search_weather(&mut self, input: &str) {
        match Location::city(input) {
            Some(Location::City(city)) => self.begin(FetchRequest::City(city)),
            _ => self.enter_error(WeatherError::EmptyCity),
        }
    }

    /// Refresh entry point: the remembered city, or resolve from scratch
    pub fn refresh(&mut self) {
        let request = match self.session.current_city() {
            Some(city) => FetchRequest::City(city.to_string()),
            None => FetchRequest::Resolve,
        };
        self.begin(request);
    }

    fn begin(&mut self, request: FetchRequest) {
        self.generation += 1;
        self.in_flight += 1;
        tracing::debug!("Starting fetch cycle {}: {:?}", self.generation, request);

        self.enter_loading();
        request_weather_fetch(&self.tx, self.services.clone(), self.generation, request);
    }

    /// Wait for the next completed cycle and apply it. Returns false if the
    /// result belonged to a superseded cycle, or nothing is in flight.
    pub async fn next_outcome(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        let message = self.rx.recv().await;
        match message {
            Some(message) => self.apply(message),
            None => false,
        }
    }

    /// Apply every cycle that has already completed, without waiting.
    /// Meant to be called from the view's frame/tick loop.
    pub fn poll(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message);
        }
    }

    /// Wait until every started cycle has completed
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            self.next_outcome().await;
        }
    }

    fn apply(&mut self, message: WeatherServiceMessage) -> bool {
        let WeatherServiceMessage::FetchDone {
            generation,
            location,
            result,
        } = message;
        self.in_flight = self.in_flight.saturating_sub(1);

        if generation != self.generation {
            tracing::debug!(
                "Discarding result of superseded cycle {} (current {})",
                generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(report) => {
                let city = match &location {
                    Location::City(city) => city.clone(),
                    Location::Coordinates { .. } => report.current.city_name.clone(),
                };
                self.session.remember(city);
                self.enter_content(report);
            }
            Err(e) => self.enter_error(e),
        }
        true
    }

    fn enter_loading(&mut self) {
        self.state = UiState::Loading;
        self.view.set_error(None);
        self.view.set_content(None);
        self.view.set_loading(true);
    }

    fn enter_content(&mut self, report: WeatherReport) {
        let daily = reduce_daily(&report.forecast, MAX_FORECAST_DAYS);
        let content = WeatherContent {
            current: report.current,
            daily,
        };
        tracing::info!(
            "Showing weather for {} ({} forecast days)",
            content.current.city_name,
            content.daily.len()
        );

        let rendered = ContentView::render(&content);
        self.state = UiState::Content(content);
        self.view.set_loading(false);
        self.view.set_error(None);
        self.view.set_content(Some(&rendered));
    }

    fn enter_error(&mut self, error: WeatherError) {
        let message = AppError::from(error).user_message();
        self.state = UiState::Error(message.to_string());
        self.view.set_loading(false);
        self.view.set_content(None);
        self.view.set_error(Some(message));
    }
}
