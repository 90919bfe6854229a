//! Weather query tool — static conditions for the known cities.
//!
//! There is no live weather feed behind this tool: each known city maps to a
//! fixed report, and anything else gets general travel-weather advice.

use async_trait::async_trait;
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::{Tool, ToolArgs};

use crate::city::City;

pub struct WeatherQueryTool;

struct Report {
    temperature_c: i32,
    conditions: &'static str,
    humidity: u8,
    wind: &'static str,
}

fn report_for(city: City) -> Report {
    match city {
        City::Beijing => Report {
            temperature_c: 15,
            conditions: "Sunny",
            humidity: 45,
            wind: "Light breeze",
        },
        City::Shanghai => Report {
            temperature_c: 18,
            conditions: "Cloudy",
            humidity: 60,
            wind: "Southeast, force 3",
        },
        City::Guangzhou => Report {
            temperature_c: 25,
            conditions: "Light rain",
            humidity: 75,
            wind: "South, force 2",
        },
        City::Shenzhen => Report {
            temperature_c: 26,
            conditions: "Sunny",
            humidity: 65,
            wind: "Sea breeze",
        },
        City::Chengdu => Report {
            temperature_c: 20,
            conditions: "Overcast",
            humidity: 70,
            wind: "Calm",
        },
        City::Hangzhou => Report {
            temperature_c: 22,
            conditions: "Sunny",
            humidity: 55,
            wind: "East, force 2",
        },
    }
}

#[async_trait]
impl Tool for WeatherQueryTool {
    fn name(&self) -> &str {
        "weather_query"
    }

    fn description(&self) -> &str {
        "Look up the weather for a city, including current conditions, temperature, humidity and wind."
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let query = args.require_text("query")?;

        let Some(city) = City::find_in(query) else {
            tracing::debug!(query, "No weather table entry for query");
            return Ok(format!(
                "Sorry, no reliable weather data for '{query}' right now. Suggestions:\n\
                 1. Check the local forecast before you set off\n\
                 2. Pack rain gear in case the weather turns\n\
                 3. Dress for the season"
            ));
        };

        let report = report_for(city);
        Ok(format!(
            "Weather in {}:\n\
             Temperature: {}°C\n\
             Conditions: {}\n\
             Humidity: {}%\n\
             Wind: {}\n\
             Updated: {}",
            city.label(),
            report.temperature_c,
            report.conditions,
            report.humidity,
            report.wind,
            chrono::Utc::now().format("%Y-%m-%d %H:%M UTC"),
        ))
    }
}
