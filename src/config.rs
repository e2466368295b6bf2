// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! API credentials for the identity provider, weather and places services
//! are read once at startup and kept in memory.

use std::env;

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_FOURSQUARE_BASE_URL: &str = "https://api.foursquare.com";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_ID_TOKEN_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Firebase project ID (Firestore project and ID token audience)
    pub firebase_project_id: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// OpenWeatherMap API base URL
    pub openweather_base_url: String,
    /// Foursquare Places API base URL
    pub foursquare_base_url: String,
    /// Identity Toolkit REST base URL
    pub identity_base_url: String,
    /// JWKS endpoint publishing the ID token signing keys
    pub id_token_jwks_url: String,

    // --- Secrets ---
    /// Firebase web API key (used for sign-up / sign-in)
    pub firebase_api_key: String,
    /// OpenWeatherMap API key
    pub openweather_api_key: String,
    /// Foursquare Places API key
    pub foursquare_api_key: String,
}

impl Config {
    /// Config for tests only. Upstream URLs point nowhere useful until a
    /// test overrides them with a mock server.
    pub fn test_default() -> Self {
        Self {
            firebase_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 5000,
            openweather_base_url: "http://127.0.0.1:9".to_string(),
            foursquare_base_url: "http://127.0.0.1:9".to_string(),
            identity_base_url: "http://127.0.0.1:9".to_string(),
            id_token_jwks_url: "http://127.0.0.1:9/jwks".to_string(),
            firebase_api_key: "test_firebase_key".to_string(),
            openweather_api_key: "test_openweather_key".to_string(),
            foursquare_api_key: "test_foursquare_key".to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            firebase_project_id: required("FIREBASE_PROJECT_ID")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            openweather_base_url: base_url("OPENWEATHER_BASE_URL", DEFAULT_OPENWEATHER_BASE_URL),
            foursquare_base_url: base_url("FOURSQUARE_BASE_URL", DEFAULT_FOURSQUARE_BASE_URL),
            identity_base_url: base_url("IDENTITY_BASE_URL", DEFAULT_IDENTITY_BASE_URL),
            id_token_jwks_url: env::var("ID_TOKEN_JWKS_URL")
                .unwrap_or_else(|_| DEFAULT_ID_TOKEN_JWKS_URL.to_string()),

            firebase_api_key: required("FIREBASE_API_KEY")?,
            openweather_api_key: required("OPENWEATHER_API_KEY")?,
            foursquare_api_key: required("FOURSQUARE_API_KEY")?,
        })
    }
}

/// Read a required variable, trimming stray whitespace from secret bindings.
fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn base_url(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
