// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client for email/password accounts.
//!
//! Talks to the Identity Toolkit REST API (`accounts:signUp`,
//! `accounts:signInWithPassword`). Issued ID tokens are verified separately
//! by [`crate::services::IdTokenVerifier`].

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity provider errors.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider refused the request (e.g. `EMAIL_EXISTS`, `INVALID_PASSWORD`).
    #[error("{0}")]
    Rejected(String),

    /// Transport failure or provider-side error.
    #[error("Identity service error: {0}")]
    Upstream(String),
}

/// Identity Toolkit client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(base_url: &str, api_key: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed building identity HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create an email/password account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        self.post_credentials("accounts:signUp", email, password)
            .await
    }

    /// Verify an email/password pair and obtain fresh tokens.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        self.post_credentials("accounts:signInWithPassword", email, password)
            .await
    }

    async fn post_credentials(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, IdentityError> {
        let url = format!("{}/v1/{}", self.base_url, method);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&CredentialsRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| IdentityError::Upstream(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| IdentityError::Upstream(format!("JSON parse error: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));

        if status.is_client_error() {
            Err(IdentityError::Rejected(message))
        } else {
            Err(IdentityError::Upstream(message))
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Tokens and account id returned by sign-up / sign-in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Provider user id (profile document id)
    pub local_id: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Token lifetime in seconds, as a decimal string
    pub expires_in: String,
}

/// `{"error": {"code": 400, "message": "EMAIL_EXISTS"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
