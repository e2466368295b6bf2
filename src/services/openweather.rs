// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OpenWeatherMap client for current weather, forecasts and geocoding.
//!
//! Handles:
//! - Current conditions by city name
//! - 5-day / 3-hour forecasts by city or coordinates
//! - Direct geocoding (city name to coordinates)
//! - Grouping forecast entries into daily summaries

use crate::error::AppError;
use crate::models::{Coordinates, DailyForecast, WeatherSnapshot};
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenWeatherMap API client.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client for the given API root (e.g. `https://api.openweathermap.org`).
    pub fn new(base_url: &str, api_key: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed building OpenWeather HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Current weather for a city (metric units).
    pub async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, AppError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        self.get_json(&url, &[("q", city.to_string())]).await
    }

    /// 5-day / 3-hour forecast for a city (metric units).
    pub async fn forecast_by_city(&self, city: &str) -> Result<Forecast, AppError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        self.get_json(&url, &[("q", city.to_string())]).await
    }

    /// 5-day / 3-hour forecast for a coordinate pair (metric units).
    pub async fn forecast_by_coords(&self, coords: Coordinates) -> Result<Forecast, AppError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        self.get_json(
            &url,
            &[("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())],
        )
        .await
    }

    /// Resolve a city name to its best match, or `None` if nothing matches.
    pub async fn geocode(&self, city: &str) -> Result<Option<GeocodeMatch>, AppError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let matches: Vec<GeocodeMatch> = self
            .get_json(&url, &[("q", city.to_string()), ("limit", "1".to_string())])
            .await?;

        tracing::debug!(city, matches = matches.len(), "Geocoded city");
        Ok(matches.into_iter().next())
    }

    /// Generic GET with the API key and metric units, parsing a JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Errors arrive as {"cod": "404", "message": "city not found"}
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);

            return Err(AppError::Upstream(format!(
                "Weather service returned {}: {}",
                status, message
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather JSON parse error: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// `/data/2.5/weather` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub coord: Coord,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    #[serde(default)]
    pub wind: Wind,
}

impl CurrentWeather {
    /// Primary condition, e.g. "Clouds".
    pub fn condition(&self) -> Result<&Condition, AppError> {
        self.weather.first().ok_or_else(|| {
            AppError::Upstream("Weather response did not include any conditions".to_string())
        })
    }

    /// Shape into the public snapshot.
    pub fn snapshot(&self) -> Result<WeatherSnapshot, AppError> {
        Ok(WeatherSnapshot {
            location: self.name.clone(),
            temperature: self.main.temp,
            description: self.condition()?.description.clone(),
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coord> for Coordinates {
    fn from(c: Coord) -> Self {
        Coordinates {
            lat: c.lat,
            lon: c.lon,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    /// Condition group ("Clear", "Rain", ...)
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub humidity: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
}

/// `/data/2.5/forecast` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCity {
    pub name: String,
}

/// One 3-hour forecast step.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    /// Local timestamp text, "YYYY-MM-DD HH:MM:SS"
    pub dt_txt: String,
}

impl ForecastEntry {
    fn date(&self) -> &str {
        self.dt_txt
            .split_once(' ')
            .map(|(date, _)| date)
            .unwrap_or(self.dt_txt.as_str())
    }
}

/// `/geo/1.0/direct` match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Group forecast steps by calendar date.
///
/// Per date: lowest `temp_min`, highest `temp_max`, and the first step's
/// description. Dates keep the order in which they first appear.
pub fn group_daily(entries: &[ForecastEntry]) -> Vec<DailyForecast> {
    // At most ~6 dates per forecast; a Vec keeps first-seen order where a
    // BTreeMap would re-sort by key.
    let mut days: Vec<DailyForecast> = Vec::new();

    for entry in entries {
        let date = entry.date();
        match days.iter_mut().find(|d| d.date == date) {
            Some(day) => {
                day.temp_min = day.temp_min.min(entry.main.temp_min);
                day.temp_max = day.temp_max.max(entry.main.temp_max);
            }
            None => days.push(DailyForecast {
                date: date.to_string(),
                temp_min: entry.main.temp_min,
                temp_max: entry.main.temp_max,
                description: entry
                    .weather
                    .first()
                    .map(|w| w.description.clone())
                    .unwrap_or_default(),
            }),
        }
    }

    days
}
