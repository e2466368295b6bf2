// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather, recommendation and venue routes against mocked upstream APIs.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use weather_planner::config::Config;
use weather_planner::services::CityAction;
use wiremock::matchers::{header as header_eq, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{create_test_app, create_test_app_with, json_body};

/// App whose weather and places clients point at `server`.
fn app_for(server: &MockServer) -> axum::Router {
    let mut config = Config::test_default();
    config.openweather_base_url = server.uri();
    config.foursquare_base_url = server.uri();
    create_test_app_with(config).0
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn current_weather(name: &str, main: &str, temp: f64) -> serde_json::Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 800, "main": main, "description": format!("{} sky", main.to_lowercase()), "icon": "01d"}],
        "main": {"temp": temp, "feels_like": temp, "temp_min": temp - 1.0, "temp_max": temp + 1.0, "humidity": 40},
        "wind": {"speed": 3.5, "deg": 200},
        "name": name,
        "cod": 200
    })
}

fn forecast(city: &str) -> serde_json::Value {
    json!({
        "cod": "200",
        "list": [
            {"dt": 1, "main": {"temp": 3.5, "temp_min": 2.0, "temp_max": 5.0, "humidity": 80},
             "weather": [{"main": "Snow", "description": "light snow"}], "dt_txt": "2024-01-01 03:00:00"},
            {"dt": 2, "main": {"temp": 6.0, "temp_min": 4.0, "temp_max": 9.0, "humidity": 70},
             "weather": [{"main": "Clouds", "description": "overcast clouds"}], "dt_txt": "2024-01-01 15:00:00"},
            {"dt": 3, "main": {"temp": 1.0, "temp_min": -1.0, "temp_max": 3.0, "humidity": 90},
             "weather": [{"main": "Snow", "description": "snow"}], "dt_txt": "2024-01-02 00:00:00"}
        ],
        "city": {"id": 1, "name": city, "coord": {"lat": 59.91, "lon": 10.75}}
    })
}

fn places() -> serde_json::Value {
    json!({
        "results": [
            {"fsq_id": "a", "name": "National Museum", "categories": [{"id": 10027, "name": "Museum"}],
             "location": {"formatted_address": "Brynjulf Bulls plass 3, Oslo"},
             "geocodes": {"main": {"latitude": 59.91, "longitude": 10.73}}},
            {"fsq_id": "b", "name": "Corner Spot", "location": {"address": "Main St 1"}}
        ]
    })
}

#[tokio::test]
async fn test_city_routes_require_city() {
    for uri in [
        "/api/weather",
        "/api/7-day-forecast",
        "/api/weather-activities",
        "/api/location",
        "/api/weather-activities?city=",
    ] {
        let (app, _) = create_test_app();
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body = json_body(response).await;
        assert_eq!(body["error"], "bad_request");
    }
}

#[tokio::test]
async fn test_weather_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test_openweather_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather("London", "Rain", 11.3)))
        .mount(&server)
        .await;

    let response = get(app_for(&server), "/api/weather?city=London").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["location"], "London");
    assert_eq!(body["temperature"], 11.3);
    assert_eq!(body["humidity"], 40.0);
    assert_eq!(body["windSpeed"], 3.5);
}

#[tokio::test]
async fn test_daily_forecast_grouping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "Oslo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast("Oslo")))
        .mount(&server)
        .await;

    let response = get(app_for(&server), "/api/7-day-forecast?city=Oslo").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["city"], "Oslo");
    let days = body["forecast"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-01-01");
    assert_eq!(days[0]["temp_min"], 2.0);
    assert_eq!(days[0]["temp_max"], 9.0);
    assert_eq!(days[0]["description"], "light snow");
}

#[tokio::test]
async fn test_weather_activities_warm_clear_day() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather("Nice", "Clear", 26.0)))
        .mount(&server)
        .await;

    let response = get(app_for(&server), "/api/weather-activities?city=Nice").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["location"], "Nice");
    assert_eq!(body["coordinates"]["lat"], 51.5085);
    assert_eq!(body["weather"]["condition"], "Clear");

    let activities = &body["recommendedActivities"];
    let names = |cat: &str, sub: &str| -> Vec<String> {
        activities[cat][sub]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap().to_string())
            .collect()
    };

    assert!(names("outdoor", "active").contains(&"Beach activities".to_string()));
    assert!(names("seasonal", "summer").contains(&"Water parks".to_string()));
    assert!(names("seasonal", "winter").is_empty());
    assert_eq!(names("indoor", "cultural").len(), 3);
}

#[tokio::test]
async fn test_weather_activities_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let response = get(app_for(&server), "/api/weather-activities?city=Atlantis").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"], "upstream_error");
    assert!(body["details"].as_str().unwrap().contains("city not found"));
}

#[tokio::test]
async fn test_location_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Oslo"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Oslo", "lat": 59.91, "lon": 10.75, "country": "NO"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "59.91"))
        .and(query_param("lon", "10.75"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast("Oslo")))
        .mount(&server)
        .await;
    // First forecast step is Snow
    Mock::given(method("GET"))
        .and(path("/v3/places/search"))
        .and(query_param("categories", "10027,13032,17114"))
        .and(query_param("limit", "10"))
        .and(header_eq(header::AUTHORIZATION.as_str(), "test_foursquare_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places()))
        .mount(&server)
        .await;

    let response = get(app_for(&server), "/api/location?city=Oslo").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["location"]["name"], "Oslo");
    assert_eq!(body["location"]["lat"], 59.91);
    assert_eq!(body["currentWeather"]["condition"], "Snow");
    assert_eq!(body["currentWeather"]["temperature"], 3.5);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 2);
    assert_eq!(body["venueCategories"], json!(["10027", "13032", "17114"]));

    let venues = body["venues"].as_array().unwrap();
    assert_eq!(venues.len(), 2);
    assert_eq!(venues[0]["category"], "Museum");
    assert_eq!(venues[0]["address"], "Brynjulf Bulls plass 3, Oslo");
    assert_eq!(venues[1]["category"], "Venue");
    assert_eq!(venues[1]["address"], "Main St 1");
}

#[tokio::test]
async fn test_location_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let response = get(app_for(&server), "/api/location?city=Nowhereville").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_current_location_empty_forecast_uses_rain_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [],
            "city": {"name": "Somewhere"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/places/search"))
        .and(query_param("categories", "10027,10024,13032"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let response = get(
        app_for(&server),
        "/api/current-location?latitude=12.5&longitude=-45.25",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["location"]["name"], "Somewhere");
    assert_eq!(body["location"]["lon"], -45.25);
    assert_eq!(body["currentWeather"]["condition"], "");
    assert!(body["currentWeather"].get("temperature").is_none());
    assert_eq!(body["venueCategories"], json!(["10027", "10024", "13032"]));
    assert!(body["venues"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_current_location_invalid_coordinates() {
    for uri in [
        "/api/current-location",
        "/api/current-location?latitude=10",
        "/api/current-location?latitude=91&longitude=0",
        "/api/current-location?latitude=0&longitude=-180.5",
        "/api/current-location?latitude=north&longitude=0",
    ] {
        let (app, _) = create_test_app();
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_places_failure_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast("Oslo")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/places/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let response = get(
        app_for(&server),
        "/api/current-location?latitude=59.91&longitude=10.75",
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["details"].as_str().unwrap().contains("invalid api key"));
}

#[tokio::test]
async fn test_legacy_favorites() {
    let (app, state) = create_test_app();

    let post = |body: serde_json::Value| {
        Request::builder()
            .method("POST")
            .uri("/api/favorites")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(post(json!({"userId": "u1", "city": "Paris", "action": "add"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post(json!({"userId": "u1", "city": "Berlin", "action": "add"})))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["favorites"], json!(["Berlin", "Paris"]));

    let response = app
        .clone()
        .oneshot(post(json!({"userId": "u1", "city": "Paris"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(
        state
            .legacy_favorites
            .apply("u1", "Paris", CityAction::Unknown),
        vec!["Berlin", "Paris"]
    );
}

#[tokio::test]
async fn test_legacy_favorites_without_content_type_is_json_error() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/favorites")
                .body(Body::from(r#"{"userId":"u1","city":"Paris","action":"add"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body = json_body(response).await;
    assert_eq!(body["error"], "bad_request");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Content-Type"));
}
