//! Structured weather data and the narrative rendering of a report.

use serde::{Deserialize, Serialize};

/// Courtesy line appended whenever a weather report is rendered.
pub const WEATHER_DISCLAIMER: &str = "This weather report courtesy of wttr.in and IBM Watson.";

/// Unit reports are requested and rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C")]
    Celsius,
    #[default]
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

/// High/low pair for one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub high: f64,
    pub low: f64,
}

/// Weather data for one location, as returned by the weather service.
///
/// A valid report carries at least one forecast day; providers reject
/// responses that have none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub city_name: String,
    pub current_temperature: f64,
    pub temperature_unit: String,
    pub condition_text: String,
    pub forecast_days: Vec<ForecastDay>,
}

impl WeatherReport {
    /// One-sentence summary of the current conditions and today's range.
    #[must_use]
    pub fn narrative(&self) -> String {
        self.forecast_days.first().map_or_else(
            || {
                format!(
                    "It is currently {} º{} and {} in {}.",
                    self.current_temperature,
                    self.temperature_unit,
                    self.condition_text,
                    self.city_name
                )
            },
            |today| {
                format!(
                    "It is currently {} º{} and {} in {}, with a high of {} and a low of {}.",
                    self.current_temperature,
                    self.temperature_unit,
                    self.condition_text,
                    self.city_name,
                    today.high,
                    today.low
                )
            },
        )
    }
}
