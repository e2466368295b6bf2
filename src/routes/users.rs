// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration and login routes.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::routes::extract::AppJson;
use crate::models::UserProfile;
use crate::services::IdentityError;
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

/// Registration request. Missing fields deserialize empty and fail validation.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
}

/// Create an identity account and its profile document.
async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    let session = state
        .identity
        .sign_up(&req.email, &req.password)
        .await
        .map_err(|e| match e {
            IdentityError::Rejected(msg) => AppError::BadRequest(msg),
            IdentityError::Upstream(msg) => AppError::Upstream(msg),
        })?;

    tracing::info!(uid = %session.local_id, "Identity account created");

    let profile = UserProfile {
        name: req.name,
        email: req.email,
        phone: req.phone,
        photo_url: None,
        favorites: Vec::new(),
        created_at: now_rfc3339(),
    };
    state.db.create_profile(&session.local_id, &profile).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: session.local_id,
        }),
    ))
}

/// Exchange email/password for an ID token.
async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    req.validate()?;

    let session = state
        .identity
        .sign_in(&req.email, &req.password)
        .await
        .map_err(|e| match e {
            IdentityError::Rejected(msg) => {
                tracing::info!(reason = %msg, "Login rejected");
                AppError::InvalidCredentials(msg)
            }
            IdentityError::Upstream(msg) => AppError::Upstream(msg),
        })?;

    tracing::info!(uid = %session.local_id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: session.local_id,
        id_token: session.id_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
    }))
}
