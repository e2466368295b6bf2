// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weather Planner: weather-aware activity and venue recommendations
//!
//! This crate provides the backend API for user accounts and profiles,
//! favorite places, and recommendations derived from current weather.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{IdTokenVerifier, IdentityClient, LegacyFavorites, OpenWeatherClient, PlacesClient};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub openweather: OpenWeatherClient,
    pub places: PlacesClient,
    pub identity: IdentityClient,
    pub id_token_verifier: Arc<IdTokenVerifier>,
    pub legacy_favorites: LegacyFavorites,
}

impl AppState {
    /// Build upstream clients from `config`.
    pub fn new(
        config: Config,
        db: FirestoreDb,
        id_token_verifier: Arc<IdTokenVerifier>,
    ) -> anyhow::Result<Self> {
        let openweather = OpenWeatherClient::new(
            &config.openweather_base_url,
            config.openweather_api_key.clone(),
        )?;
        let places = PlacesClient::new(
            &config.foursquare_base_url,
            config.foursquare_api_key.clone(),
        )?;
        let identity =
            IdentityClient::new(&config.identity_base_url, config.firebase_api_key.clone())?;

        Ok(Self {
            config,
            db,
            openweather,
            places,
            identity,
            id_token_verifier,
            legacy_favorites: LegacyFavorites::new(),
        })
    }
}
