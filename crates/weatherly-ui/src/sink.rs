//! Render sinks the view layer implements.

use weatherly_weather::{render_current, render_day, CurrentDisplay, DayDisplay};

use crate::state::WeatherContent;

/// Display fields for the content state
#[derive(Debug, Clone, PartialEq)]
pub struct ContentView {
    pub current: CurrentDisplay,
    pub forecast: Vec<DayDisplay>,
}

impl ContentView {
    pub fn render(content: &WeatherContent) -> Self {
        Self {
            current: render_current(&content.current),
            forecast: content.daily.iter().map(render_day).collect(),
        }
    }
}

/// Three independent indicators. The controller keeps at most one of them
/// visible.
pub trait ViewSink {
    fn set_loading(&mut self, visible: bool);

    /// `None` hides the error panel
    fn set_error(&mut self, message: Option<&str>);

    /// `None` hides the content panel
    fn set_content(&mut self, content: Option<&ContentView>);
}
