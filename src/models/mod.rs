// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod favorite;
pub mod user;
pub mod weather;

pub use activity::{Activity, ConditionLabel, RecommendationSet};
pub use favorite::{Coordinates, FavoritePlace};
pub use user::{ProfileUpdate, UserProfile};
pub use weather::{DailyForecast, Venue, WeatherSnapshot};
