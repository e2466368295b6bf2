// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity catalog entries and the recommendation set built from them.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Weather condition tag used to filter the activity catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConditionLabel {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
}

impl ConditionLabel {
    pub const ALL: [ConditionLabel; 5] = [
        ConditionLabel::Clear,
        ConditionLabel::Clouds,
        ConditionLabel::Rain,
        ConditionLabel::Snow,
        ConditionLabel::Thunderstorm,
    ];

    /// Exact-match lookup of a provider condition name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Clear" => Some(ConditionLabel::Clear),
            "Clouds" => Some(ConditionLabel::Clouds),
            "Rain" => Some(ConditionLabel::Rain),
            "Snow" => Some(ConditionLabel::Snow),
            "Thunderstorm" => Some(ConditionLabel::Thunderstorm),
            _ => None,
        }
    }

    /// Normalize a provider condition, falling back to `Clear`.
    pub fn normalize(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(ConditionLabel::Clear)
    }
}

/// A single catalog activity with its applicability rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: &'static str,
    pub conditions: &'static [ConditionLabel],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,
}

impl Activity {
    /// Activity that applies at any temperature.
    pub const fn any_temp(name: &'static str, conditions: &'static [ConditionLabel]) -> Self {
        Self {
            name,
            conditions,
            min_temp: None,
            max_temp: None,
        }
    }

    /// Activity restricted to an inclusive temperature range (°C).
    pub const fn ranged(
        name: &'static str,
        min_temp: f64,
        max_temp: f64,
        conditions: &'static [ConditionLabel],
    ) -> Self {
        Self {
            name,
            conditions,
            min_temp: Some(min_temp),
            max_temp: Some(max_temp),
        }
    }

    /// Whether this activity suits the given temperature and condition.
    ///
    /// The range only applies when both bounds are declared.
    pub fn is_suitable(&self, temperature: f64, condition: ConditionLabel) -> bool {
        if !self.conditions.contains(&condition) {
            return false;
        }
        match (self.min_temp, self.max_temp) {
            (Some(min), Some(max)) => temperature >= min && temperature <= max,
            _ => true,
        }
    }
}

/// Top-level catalog grouping (e.g. "outdoor").
#[derive(Debug)]
pub struct CatalogCategory {
    pub name: &'static str,
    pub subcategories: &'static [CatalogSubcategory],
}

/// Second-level catalog grouping (e.g. "active").
#[derive(Debug)]
pub struct CatalogSubcategory {
    pub name: &'static str,
    pub activities: &'static [Activity],
}

/// Activities matching one subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcategoryRecommendation {
    pub name: &'static str,
    pub activities: Vec<&'static Activity>,
}

/// Subcategory matches for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecommendation {
    pub name: &'static str,
    pub subcategories: Vec<SubcategoryRecommendation>,
}

/// Filtered catalog, mirroring the catalog's category/subcategory shape.
///
/// Serializes as `{ category: { subcategory: [activity, ...] } }` in catalog
/// order. Subcategories without matches serialize as empty arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecommendationSet {
    pub categories: Vec<CategoryRecommendation>,
}

impl RecommendationSet {
    /// Matches for a category/subcategory pair, if the pair exists.
    pub fn get(&self, category: &str, subcategory: &str) -> Option<&[&'static Activity]> {
        self.categories
            .iter()
            .find(|c| c.name == category)?
            .subcategories
            .iter()
            .find(|s| s.name == subcategory)
            .map(|s| s.activities.as_slice())
    }

    /// All matched activity names, in catalog order.
    pub fn activity_names(&self) -> Vec<&'static str> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .flat_map(|s| s.activities.iter().map(|a| a.name))
            .collect()
    }
}

struct SubcategoryMap<'a>(&'a [SubcategoryRecommendation]);

impl Serialize for SubcategoryMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for sub in self.0 {
            map.serialize_entry(sub.name, &sub.activities)?;
        }
        map.end()
    }
}

impl Serialize for RecommendationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(category.name, &SubcategoryMap(&category.subcategories))?;
        }
        map.end()
    }
}
