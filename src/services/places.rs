// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Foursquare Places client for nearby venue search.

use crate::error::AppError;
use crate::models::{Coordinates, Venue};
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum venues returned per search.
pub const VENUE_LIMIT: u32 = 10;

/// Category label used when a venue lists none.
const DEFAULT_CATEGORY: &str = "Venue";

/// Places API client.
#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    pub fn new(base_url: &str, api_key: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed building Places HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Venues near `coords` in any of `categories`, at most [`VENUE_LIMIT`].
    pub async fn search_nearby(
        &self,
        coords: Coordinates,
        categories: &[&str],
    ) -> Result<Vec<Venue>, AppError> {
        let url = format!("{}/v3/places/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("ll", format!("{},{}", coords.lat, coords.lon)),
                ("categories", categories.join(",")),
                ("limit", VENUE_LIMIT.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Places request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Places service returned {}: {}",
                status, body
            )));
        }

        let search: PlaceSearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Places JSON parse error: {}", e)))?;

        tracing::debug!(
            lat = coords.lat,
            lon = coords.lon,
            categories = %categories.join(","),
            count = search.results.len(),
            "Fetched nearby venues"
        );

        Ok(search
            .results
            .into_iter()
            .take(VENUE_LIMIT as usize)
            .map(Venue::from)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct PlaceSearchResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: String,
    #[serde(default)]
    categories: Vec<PlaceCategory>,
    #[serde(default)]
    location: PlaceLocation,
    #[serde(default)]
    geocodes: Option<PlaceGeocodes>,
}

#[derive(Debug, Deserialize)]
struct PlaceCategory {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceLocation {
    formatted_address: Option<String>,
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeocodes {
    main: Option<PlacePoint>,
}

#[derive(Debug, Deserialize)]
struct PlacePoint {
    latitude: f64,
    longitude: f64,
}

impl From<Place> for Venue {
    fn from(place: Place) -> Self {
        Venue {
            name: place.name,
            category: place
                .categories
                .into_iter()
                .next()
                .map(|c| c.name)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            address: place
                .location
                .formatted_address
                .or(place.location.address)
                .unwrap_or_default(),
            coordinates: place
                .geocodes
                .and_then(|g| g.main)
                .map(|p| Coordinates {
                    lat: p.latitude,
                    lon: p.longitude,
                }),
        }
    }
}
