// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile and favorites routes for authenticated users.

use crate::error::{AppError, Result};
use crate::routes::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::models::favorite::sort_newest_first;
use crate::models::{Coordinates, FavoritePlace, ProfileUpdate, UserProfile};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Profile routes (require authentication).
/// The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile/get-profile", get(get_profile))
        .route("/profile/update-profile", post(update_profile))
        .route("/profile/add-favorites", post(add_favorite))
        .route("/profile/favorites", get(list_favorites))
        .route("/profile/favorites/{place_id}", delete(remove_favorite))
}

async fn load_profile(state: &AppState, uid: &str) -> Result<UserProfile> {
    state
        .db
        .get_profile(uid)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

// ─── Profile ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = load_profile(&state, &user.uid).await?;
    tracing::debug!(
        uid = %user.uid,
        token_email = user.email.as_deref().unwrap_or_default(),
        "Fetched profile"
    );
    Ok(Json(ProfileResponse { profile }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub updated_fields: Vec<String>,
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(update): AppJson<ProfileUpdate>,
) -> Result<Json<UpdateProfileResponse>> {
    update.validate()?;
    load_profile(&state, &user.uid).await?;

    let fields = state.db.update_profile_fields(&user.uid, &update).await?;

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        updated_fields: fields.into_iter().map(str::to_string).collect(),
    }))
}

// ─── Favorites ───────────────────────────────────────────────

/// Place to save. The id and timestamp are assigned server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub address: String,
    pub coordinates: Coordinates,
}

#[derive(Serialize)]
pub struct AddFavoriteResponse {
    pub message: String,
    pub favorite: FavoritePlace,
}

async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(req): AppJson<AddFavoriteRequest>,
) -> Result<Json<AddFavoriteResponse>> {
    req.validate()?;
    load_profile(&state, &user.uid).await?;

    let favorite = FavoritePlace::new(
        req.name,
        req.category,
        req.address,
        req.coordinates,
        now_rfc3339(),
    );

    if favorite.id.is_empty() {
        return Err(AppError::BadRequest(
            "name must contain at least one letter or digit".to_string(),
        ));
    }

    state.db.add_favorite(&user.uid, &favorite).await?;

    Ok(Json(AddFavoriteResponse {
        message: "Favorite added successfully".to_string(),
        favorite,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFavoriteResponse {
    pub message: String,
    pub place_id: String,
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(place_id): Path<String>,
) -> Result<Json<RemoveFavoriteResponse>> {
    if place_id.trim().is_empty() {
        return Err(AppError::BadRequest("placeId is required".to_string()));
    }

    let profile = load_profile(&state, &user.uid).await?;

    let matching: Vec<FavoritePlace> = profile
        .favorites
        .into_iter()
        .filter(|f| f.id == place_id)
        .collect();

    if matching.is_empty() {
        return Err(AppError::NotFound(format!("Favorite {} not found", place_id)));
    }

    state.db.remove_favorites(&user.uid, &matching).await?;

    Ok(Json(RemoveFavoriteResponse {
        message: "Favorite removed successfully".to_string(),
        place_id,
    }))
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoritePlace>,
}

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FavoritesResponse>> {
    let mut favorites = load_profile(&state, &user.uid).await?.favorites;
    sort_newest_first(&mut favorites);
    Ok(Json(FavoritesResponse { favorites }))
}
