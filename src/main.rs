mod view;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use weatherly_core::Config;
use weatherly_ui::{WeatherController, WeatherServices};

use crate::view::TerminalView;

const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Search(&'a str),
    Refresh,
    Quit,
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        ":refresh" | ":r" => Command::Refresh,
        ":quit" => Command::Quit,
        _ => Command::Search(line),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    weatherly_core::init()?;

    let (config, _) = Config::load_validated()?;
    let services = Arc::new(WeatherServices::from_config(&config)?);
    let mut controller = WeatherController::new(services, TerminalView::default());

    tracing::info!("Weatherly started");
    println!("Weatherly - type a city name, :refresh to reload, :quit to exit");

    controller.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(TICK);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Refresh => controller.refresh(),
                    Command::Search(input) => controller.search_weather(input),
                }
            }
            _ = tick.tick() => controller.poll(),
        }
    }

    tracing::info!("Weatherly shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(":r"), Command::Refresh);
        assert_eq!(parse_command(" :refresh "), Command::Refresh);
        assert_eq!(parse_command(":quit"), Command::Quit);
        assert_eq!(parse_command("New York"), Command::Search("New York"));
        assert_eq!(parse_command("   "), Command::Search("   "));
    }
}
