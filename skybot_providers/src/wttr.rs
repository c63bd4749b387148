use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use skybot_core::{ForecastDay, TemperatureUnit, WeatherReport, WeatherService};
use tracing::info;

use crate::retry::retry_with_backoff;

/// Client for the wttr.in JSON weather endpoint.
pub struct WttrProvider {
    client: Client,
    base_url: String,
    units: TemperatureUnit,
}

impl WttrProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: "https://wttr.in".to_string(),
            units: TemperatureUnit::default(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub const fn with_units(mut self, units: TemperatureUnit) -> Self {
        self.units = units;
        self
    }

    async fn try_lookup(&self, location: &str) -> anyhow::Result<WeatherReport> {
        // wttr.in takes the location in the path; "+" stands in for spaces.
        let location = location.replace(' ', "+");

        let response = self
            .client
            .get(format!("{}/{location}", self.base_url))
            .query(&[("format", "j1")])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Self::parse_report(&response, self.units)
    }

    /// Map a `format=j1` response onto a report. All temperatures arrive as
    /// strings; a response without a single forecast day is rejected.
    fn parse_report(response: &Value, units: TemperatureUnit) -> anyhow::Result<WeatherReport> {
        let (temp_key, max_key, min_key) = match units {
            TemperatureUnit::Celsius => ("temp_C", "maxtempC", "mintempC"),
            TemperatureUnit::Fahrenheit => ("temp_F", "maxtempF", "mintempF"),
        };

        let current = &response["current_condition"][0];
        let current_temperature = parse_temp(&current[temp_key])?;
        let condition_text = current["weatherDesc"][0]["value"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing weatherDesc"))?
            .to_string();

        let city_name = response["nearest_area"][0]["areaName"][0]["value"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing areaName"))?
            .to_string();

        let forecast_days = response["weather"]
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing weather"))?
            .iter()
            .map(|day| {
                Ok(ForecastDay {
                    high: parse_temp(&day[max_key])?,
                    low: parse_temp(&day[min_key])?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        anyhow::ensure!(
            !forecast_days.is_empty(),
            "weather response carried no forecast days"
        );

        Ok(WeatherReport {
            city_name,
            current_temperature,
            temperature_unit: units.letter().to_string(),
            condition_text,
            forecast_days,
        })
    }
}

impl Default for WttrProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_temp(value: &Value) -> anyhow::Result<f64> {
    value
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: bad temperature value"))
}

#[async_trait]
impl WeatherService for WttrProvider {
    async fn lookup(&self, location: &str) -> anyhow::Result<WeatherReport> {
        info!("Looking up wttr.in weather for {location}");

        let report = retry_with_backoff(|| self.try_lookup(location), &[1, 2]).await?;

        info!(
            "Received weather for {}: {} º{}",
            report.city_name, report.current_temperature, report.temperature_unit
        );
        Ok(report)
    }
}
