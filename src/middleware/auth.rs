// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer ID token authentication middleware.

use crate::error::AppError;
use crate::services::id_token::TokenError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated user extracted from a verified ID token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity provider user id (profile document id)
    pub uid: String,
    pub email: Option<String>,
}

/// Middleware that requires a valid `Authorization: Bearer <id token>`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let verified = state
        .id_token_verifier
        .verify_header(request.headers().get(header::AUTHORIZATION))
        .await
        .map_err(|e| match e {
            TokenError::Missing => AppError::Unauthorized,
            TokenError::Invalid(reason) => {
                tracing::debug!(reason = %reason, "Rejected ID token");
                AppError::InvalidToken
            }
            TokenError::Transient(reason) => {
                tracing::error!(reason = %reason, "ID token verification unavailable");
                AppError::InvalidToken
            }
        })?;

    request.extensions_mut().insert(AuthUser {
        uid: verified.uid,
        email: verified.email,
    });

    Ok(next.run(request).await)
}
