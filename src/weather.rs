//! Weather adapter
//!
//! One HTTP GET per frame composition. Every failure degrades to the
//! [`WEATHER_UNAVAILABLE`] sentinel so the ambient panel always has
//! something to show and the caller never handles an error.

use crate::{Error, Result};

/// Sentinel shown in the ambient panel when the weather call degrades
pub const WEATHER_UNAVAILABLE: &str = "Weather Error";

/// Provides the current temperature as a display-ready string
pub trait WeatherProvider {
    /// Fetch the current temperature, degrading to [`WEATHER_UNAVAILABLE`]
    /// on any failure
    fn current_temperature(&self) -> String;
}

/// Current-weather response body (only the field the panel needs)
#[derive(serde::Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
}

#[derive(serde::Deserialize)]
struct WeatherMain {
    temp: f64,
}

/// OpenWeatherMap current-weather client
pub struct OpenWeather {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
    location: String,
}

impl OpenWeather {
    /// Create a weather client for a fixed location
    #[must_use]
    pub fn new(url: String, api_key: String, location: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url,
            api_key,
            location,
        }
    }

    /// Issue the request and format the temperature
    fn request(&self) -> Result<String> {
        let url = format!(
            "{}?q={}&appid={}&units=metric",
            self.url,
            urlencoding::encode(&self.location),
            self.api_key
        );

        let response = self.client.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Weather(format!("weather API error {status}")));
        }

        parse_temperature(&response.text()?)
    }
}

impl WeatherProvider for OpenWeather {
    fn current_temperature(&self) -> String {
        self.request().unwrap_or_else(|e| {
            tracing::warn!(error = %e, location = %self.location, "weather fetch degraded");
            WEATHER_UNAVAILABLE.to_string()
        })
    }
}

/// Parse a current-weather body into a display temperature string
fn parse_temperature(body: &str) -> Result<String> {
    let parsed: WeatherResponse = serde_json::from_str(body)?;
    Ok(format!("{:.1}°C", parsed.main.temp))
}
