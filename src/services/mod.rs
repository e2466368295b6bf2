// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic and upstream clients.

pub mod id_token;
pub mod identity;
pub mod legacy_favorites;
pub mod openweather;
pub mod places;
pub mod recommend;
pub mod venues;

pub use id_token::{IdTokenVerifier, TokenError, VerifiedUser};
pub use identity::{AuthSession, IdentityClient, IdentityError};
pub use legacy_favorites::{CityAction, LegacyFavorites};
pub use openweather::OpenWeatherClient;
pub use places::PlacesClient;
pub use recommend::recommend;
pub use venues::categories_for;
