//! Line-oriented terminal rendition of the three render sinks.

use weatherly_ui::{ContentView, ViewSink};

#[derive(Debug, Default)]
pub struct TerminalView {
    loading: bool,
}

impl ViewSink for TerminalView {
    fn set_loading(&mut self, visible: bool) {
        if visible && !self.loading {
            println!("Loading weather...");
        }
        self.loading = visible;
    }

    fn set_error(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            println!("\n! {}\n", message);
        }
    }

    fn set_content(&mut self, content: Option<&ContentView>) {
        let Some(content) = content else {
            return;
        };

        println!("\n{}\n", content.current);
        if !content.forecast.is_empty() {
            println!("{}-day forecast", content.forecast.len());
            for day in &content.forecast {
                println!("  {}", day);
            }
        }
        println!();
    }
}
