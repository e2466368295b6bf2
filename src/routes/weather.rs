// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public weather, recommendation and venue routes.

use crate::error::{AppError, Result};
use crate::routes::extract::AppJson;
use crate::models::{Coordinates, DailyForecast, RecommendationSet, Venue, WeatherSnapshot};
use crate::services::legacy_favorites::CityAction;
use crate::services::openweather::{group_daily, Forecast};
use crate::services::{categories_for, recommend};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/weather", get(weather_by_city))
        .route("/api/7-day-forecast", get(daily_forecast))
        .route("/api/weather-activities", get(weather_activities))
        .route("/api/location", get(location_details))
        .route("/api/current-location", get(current_location_details))
        .route("/api/favorites", post(legacy_favorites))
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    city: Option<String>,
}

impl CityQuery {
    fn require_city(&self) -> Result<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::BadRequest("City name is required".to_string()))
    }
}

/// Coordinates arrive as text so bad input maps to a JSON 400.
#[derive(Debug, Deserialize)]
pub struct CoordsQuery {
    latitude: Option<String>,
    longitude: Option<String>,
}

impl CoordsQuery {
    fn coordinates(&self) -> Result<Coordinates> {
        let lat = parse_degrees(self.latitude.as_deref(), "latitude", 90.0)?;
        let lon = parse_degrees(self.longitude.as_deref(), "longitude", 180.0)?;
        Ok(Coordinates { lat, lon })
    }
}

fn parse_degrees(raw: Option<&str>, name: &str, limit: f64) -> Result<f64> {
    let value: f64 = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", name)))?
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{} must be a number", name)))?;

    if !value.is_finite() || value.abs() > limit {
        return Err(AppError::BadRequest(format!(
            "{} must be between -{} and {}",
            name, limit, limit
        )));
    }
    Ok(value)
}

// ─── Current weather and forecast ────────────────────────────

async fn weather_by_city(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<WeatherSnapshot>> {
    let city = query.require_city()?;
    let current = state.openweather.current_by_city(city).await?;
    Ok(Json(current.snapshot()?))
}

#[derive(Serialize)]
pub struct DailyForecastResponse {
    pub city: String,
    pub forecast: Vec<DailyForecast>,
}

async fn daily_forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<DailyForecastResponse>> {
    let city = query.require_city()?;
    let forecast = state.openweather.forecast_by_city(city).await?;

    Ok(Json(DailyForecastResponse {
        forecast: group_daily(&forecast.list),
        city: forecast.city.name,
    }))
}

// ─── Weather + activities ────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDetails {
    pub temperature: f64,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub condition: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherActivitiesResponse {
    pub location: String,
    pub coordinates: Coordinates,
    pub weather: WeatherDetails,
    pub recommended_activities: RecommendationSet,
}

async fn weather_activities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<WeatherActivitiesResponse>> {
    let city = query.require_city()?;
    let current = state.openweather.current_by_city(city).await?;
    let condition = current.condition()?.clone();

    let recommended_activities = recommend(current.main.temp, &condition.main);

    tracing::debug!(
        city,
        temperature = current.main.temp,
        condition = %condition.main,
        "Built activity recommendations"
    );

    Ok(Json(WeatherActivitiesResponse {
        location: current.name.clone(),
        coordinates: current.coord.into(),
        weather: WeatherDetails {
            temperature: current.main.temp,
            description: condition.description,
            humidity: current.main.humidity,
            wind_speed: current.wind.speed,
            condition: condition.main,
        },
        recommended_activities,
    }))
}

// ─── Location details ────────────────────────────────────────

#[derive(Serialize)]
pub struct LocationInfo {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub description: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetailsResponse {
    pub location: LocationInfo,
    pub current_weather: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub venue_categories: Vec<String>,
    pub venues: Vec<Venue>,
}

async fn location_details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<LocationDetailsResponse>> {
    let city = query.require_city()?;

    let place = state
        .openweather
        .geocode(city)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location {} not found", city)))?;

    let coords = Coordinates {
        lat: place.lat,
        lon: place.lon,
    };
    let forecast = state.openweather.forecast_by_coords(coords).await?;

    build_location_details(&state, place.name, coords, forecast)
        .await
        .map(Json)
}

async fn current_location_details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoordsQuery>,
) -> Result<Json<LocationDetailsResponse>> {
    let coords = query.coordinates()?;
    let forecast = state.openweather.forecast_by_coords(coords).await?;
    let name = forecast.city.name.clone();

    build_location_details(&state, name, coords, forecast)
        .await
        .map(Json)
}

/// Shared tail of both location routes: summarize the forecast, pick venue
/// categories from the first forecast step and search nearby.
async fn build_location_details(
    state: &AppState,
    name: String,
    coords: Coordinates,
    forecast: Forecast,
) -> Result<LocationDetailsResponse> {
    let first = forecast.list.first();
    let first_condition = first.and_then(|entry| entry.weather.first());

    let current_weather = CurrentConditions {
        condition: first_condition
            .map(|c| c.main.clone())
            .unwrap_or_default(),
        temperature: first.map(|entry| entry.main.temp),
        description: first_condition
            .map(|c| c.description.clone())
            .unwrap_or_default(),
    };

    let categories = categories_for(&current_weather.condition);
    let venues = state.places.search_nearby(coords, &categories).await?;

    tracing::info!(
        location = %name,
        condition = %current_weather.condition,
        venues = venues.len(),
        "Built location details"
    );

    Ok(LocationDetailsResponse {
        location: LocationInfo {
            name,
            lat: coords.lat,
            lon: coords.lon,
        },
        current_weather,
        forecast: group_daily(&forecast.list),
        venue_categories: categories.iter().map(|c| c.to_string()).collect(),
        venues,
    })
}

// ─── Legacy in-memory favorites ──────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFavoritesRequest {
    user_id: Option<String>,
    city: Option<String>,
    action: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFavoritesResponse {
    pub user_id: String,
    pub favorites: Vec<String>,
}

async fn legacy_favorites(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LegacyFavoritesRequest>,
) -> Result<Json<LegacyFavoritesResponse>> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
    let (Some(user_id), Some(city), Some(action)) = (
        non_empty(req.user_id),
        non_empty(req.city),
        non_empty(req.action),
    ) else {
        return Err(AppError::BadRequest(
            "Missing required parameters".to_string(),
        ));
    };

    let favorites = state
        .legacy_favorites
        .apply(&user_id, &city, CityAction::parse(&action));

    Ok(Json(LegacyFavoritesResponse { user_id, favorites }))
}
