// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Favorite places stored on a user's profile.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A place saved to a user's favorites.
///
/// Stored as an element of the `favorites` array on `users/{uid}`.
/// The array is mutated with atomic union/remove transforms, so two entries
/// are the same favorite only when every field matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FavoritePlace {
    /// Slug derived from the place name
    pub id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub coordinates: Coordinates,
    /// When the favorite was added (RFC 3339, millisecond precision)
    pub added_at: String,
}

impl FavoritePlace {
    pub fn new(
        name: String,
        category: String,
        address: String,
        coordinates: Coordinates,
        added_at: String,
    ) -> Self {
        Self {
            id: slugify(&name),
            name,
            category,
            address,
            coordinates,
            added_at,
        }
    }
}

/// Derive a lowercase, hyphenated identifier from a display name.
///
/// Runs of non-alphanumeric characters collapse to a single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Sort favorites newest first.
pub fn sort_newest_first(favorites: &mut [FavoritePlace]) {
    favorites.sort_by(|a, b| b.added_at.cmp(&a.added_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, added_at: &str) -> FavoritePlace {
        FavoritePlace::new(
            name.to_string(),
            "Park".to_string(),
            "New York, NY".to_string(),
            Coordinates {
                lat: 40.78,
                lon: -73.96,
            },
            added_at.to_string(),
        )
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Central Park"), "central-park");
        assert_eq!(slugify("  Joe's  Café & Bar!  "), "joe-s-café-bar");
        assert_eq!(slugify("MoMA"), "moma");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_same_name_shares_id() {
        let first = place("Central Park", "2024-01-01T10:00:00.000Z");
        let second = place("Central Park", "2024-01-02T10:00:00.000Z");

        assert_eq!(first.id, "central-park");
        assert_eq!(first.id, second.id);
        // Distinct timestamps keep them distinct array values.
        assert_ne!(first, second);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut favorites = vec![
            place("A", "2024-01-01T10:00:00.000Z"),
            place("C", "2024-03-01T10:00:00.000Z"),
            place("B", "2024-02-01T10:00:00.000Z"),
        ];

        sort_newest_first(&mut favorites);

        let names: Vec<&str> = favorites.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(place("Central Park", "2024-01-01T10:00:00.000Z")).unwrap();
        assert_eq!(json["id"], "central-park");
        assert_eq!(json["addedAt"], "2024-01-01T10:00:00.000Z");
        assert_eq!(json["coordinates"]["lat"], 40.78);
    }
}
