// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local favorite cities, keyed by caller-supplied user id.
//!
//! Entries live only in memory: they are never evicted and do not survive a
//! restart. Durable favorites are stored on the user profile instead.

use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Mutation requested for a favorite city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityAction {
    Add,
    Remove,
    /// Anything else; leaves the set unchanged.
    Unknown,
}

impl CityAction {
    pub fn parse(action: &str) -> Self {
        match action {
            "add" => CityAction::Add,
            "remove" => CityAction::Remove,
            _ => CityAction::Unknown,
        }
    }
}

/// Shared user → favorite cities map.
#[derive(Clone, Default)]
pub struct LegacyFavorites {
    cities: Arc<DashMap<String, BTreeSet<String>>>,
}

impl LegacyFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` for `city` and return the user's cities, sorted.
    pub fn apply(&self, user_id: &str, city: &str, action: CityAction) -> Vec<String> {
        let mut entry = self.cities.entry(user_id.to_string()).or_default();

        match action {
            CityAction::Add => {
                entry.insert(city.to_string());
            }
            CityAction::Remove => {
                entry.remove(city);
            }
            CityAction::Unknown => {
                tracing::debug!(user_id, "Ignoring unknown favorites action");
            }
        }

        entry.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent_and_sorted() {
        let favorites = LegacyFavorites::new();
        favorites.apply("u1", "Paris", CityAction::Add);
        favorites.apply("u1", "Berlin", CityAction::Add);
        let cities = favorites.apply("u1", "Paris", CityAction::Add);
        assert_eq!(cities, vec!["Berlin", "Paris"]);
    }

    #[test]
    fn test_remove_and_unknown_action() {
        let favorites = LegacyFavorites::new();
        favorites.apply("u1", "Paris", CityAction::Add);

        let cities = favorites.apply("u1", "Paris", CityAction::parse("toggle"));
        assert_eq!(cities, vec!["Paris"]);

        let cities = favorites.apply("u1", "Paris", CityAction::parse("remove"));
        assert!(cities.is_empty());
    }

    #[test]
    fn test_users_are_isolated() {
        let favorites = LegacyFavorites::new();
        favorites.apply("u1", "Oslo", CityAction::Add);
        assert!(favorites.apply("u2", "Oslo", CityAction::Unknown).is_empty());
        assert_eq!(favorites.apply("u1", "Oslo", CityAction::Unknown), vec!["Oslo"]);
    }

    #[test]
    fn test_clones_share_state() {
        let favorites = LegacyFavorites::new();
        let other = favorites.clone();
        other.apply("u1", "Rome", CityAction::Add);
        assert_eq!(favorites.apply("u1", "Rome", CityAction::Unknown), vec!["Rome"]);
    }
}
