// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather-driven activity recommendations.
//!
//! The catalog is static. `recommend` filters it by the observed condition and
//! temperature, keeping the catalog's category/subcategory shape.

use crate::models::activity::{
    Activity, CatalogCategory, CatalogSubcategory, CategoryRecommendation, ConditionLabel,
    RecommendationSet, SubcategoryRecommendation,
};

use ConditionLabel::{Clear, Clouds, Rain, Snow, Thunderstorm};

const FAIR: &[ConditionLabel] = &[Clear, Clouds];
const SUNNY: &[ConditionLabel] = &[Clear];
const ANY_WEATHER: &[ConditionLabel] = &[Rain, Thunderstorm, Snow, Clear, Clouds];
const WINTRY: &[ConditionLabel] = &[Snow, Clear, Clouds];

/// The activity catalog, in response order.
pub static CATALOG: &[CatalogCategory] = &[
    CatalogCategory {
        name: "outdoor",
        subcategories: &[
            CatalogSubcategory {
                name: "active",
                activities: &[
                    Activity::ranged("Hiking", 10.0, 30.0, FAIR),
                    Activity::ranged("Cycling", 10.0, 28.0, FAIR),
                    Activity::ranged("Beach activities", 20.0, 35.0, SUNNY),
                    Activity::ranged("Outdoor photography", 5.0, 30.0, FAIR),
                ],
            },
            CatalogSubcategory {
                name: "relaxed",
                activities: &[
                    Activity::ranged("Picnic in the park", 15.0, 28.0, FAIR),
                    Activity::ranged("Sightseeing", 10.0, 30.0, FAIR),
                    Activity::ranged("Garden visits", 12.0, 28.0, FAIR),
                ],
            },
        ],
    },
    CatalogCategory {
        name: "indoor",
        subcategories: &[
            CatalogSubcategory {
                name: "cultural",
                activities: &[
                    Activity::any_temp("Museum visit", ANY_WEATHER),
                    Activity::any_temp("Art gallery tour", ANY_WEATHER),
                    Activity::any_temp("Local history exhibition", ANY_WEATHER),
                ],
            },
            CatalogSubcategory {
                name: "entertainment",
                activities: &[
                    Activity::any_temp("Cinema", ANY_WEATHER),
                    Activity::any_temp("Theater show", ANY_WEATHER),
                    Activity::any_temp("Indoor concerts", ANY_WEATHER),
                ],
            },
        ],
    },
    CatalogCategory {
        name: "seasonal",
        subcategories: &[
            CatalogSubcategory {
                name: "winter",
                activities: &[
                    Activity::ranged("Skiing", -10.0, 5.0, WINTRY),
                    Activity::ranged("Ice skating", -5.0, 10.0, WINTRY),
                    Activity::ranged("Winter hiking", -5.0, 10.0, WINTRY),
                ],
            },
            CatalogSubcategory {
                name: "summer",
                activities: &[
                    Activity::ranged("Water parks", 25.0, 35.0, SUNNY),
                    Activity::ranged("Beach volleyball", 20.0, 35.0, SUNNY),
                    Activity::ranged("Outdoor swimming", 23.0, 35.0, SUNNY),
                ],
            },
        ],
    },
];

/// Filter the catalog for a temperature (°C) and provider condition name.
///
/// Unrecognized conditions are treated as `Clear`.
pub fn recommend(temperature: f64, condition: &str) -> RecommendationSet {
    recommend_from(CATALOG, temperature, ConditionLabel::normalize(condition))
}

/// Filter an arbitrary catalog for a normalized condition.
pub fn recommend_from(
    catalog: &'static [CatalogCategory],
    temperature: f64,
    condition: ConditionLabel,
) -> RecommendationSet {
    let categories = catalog
        .iter()
        .map(|category| CategoryRecommendation {
            name: category.name,
            subcategories: category
                .subcategories
                .iter()
                .map(|sub| SubcategoryRecommendation {
                    name: sub.name,
                    activities: sub
                        .activities
                        .iter()
                        .filter(|a| a.is_suitable(temperature, condition))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    RecommendationSet { categories }
}
