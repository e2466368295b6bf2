// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather condition to places-API category mapping.

// museum, movie theater, café
const RAIN_CODES: [&str; 3] = ["10027", "10024", "13032"];

/// Known condition keys and their category codes.
///
/// Order matters: matching is by substring, so an input containing several
/// keys (e.g. "Clear after Rain") takes the first entry listed here.
pub const CATEGORY_TABLE: [(&str, [&str; 3]); 4] = [
    // park, hiking trail, restaurant
    ("Clear", ["16032", "16019", "13065"]),
    ("Rain", RAIN_CODES),
    // arts & entertainment, park, café
    ("Clouds", ["10000", "16032", "13032"]),
    // museum, café, shopping mall
    ("Snow", ["10027", "13032", "17114"]),
];

/// Place category codes suited to a weather condition.
///
/// Case-insensitive substring match against the table keys; unmatched
/// conditions get the `Rain` categories.
pub fn categories_for(condition: &str) -> [&'static str; 3] {
    let needle = condition.to_lowercase();

    CATEGORY_TABLE
        .iter()
        .find(|(key, _)| needle.contains(&key.to_lowercase()))
        .map(|(_, codes)| *codes)
        .unwrap_or(RAIN_CODES)
}
