// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use weather_planner::config::Config;
use weather_planner::db::FirestoreDb;
use weather_planner::routes::create_router;
use weather_planner::services::IdTokenVerifier;
use weather_planner::AppState;

/// Key id the test verifier trusts.
#[allow(dead_code)]
pub const TEST_KID: &str = "test-key-1";

#[allow(dead_code)]
const TEST_PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/test_signing_key.pem");
#[allow(dead_code)]
const TEST_PUBLIC_KEY: &[u8] = include_bytes!("../fixtures/test_signing_key.pub.pem");

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Verifier trusting only the fixture public key under [`TEST_KID`].
#[allow(dead_code)]
pub fn test_verifier(config: &Config) -> Arc<IdTokenVerifier> {
    let key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY).expect("fixture public key");
    Arc::new(IdTokenVerifier::new_with_static_key(config, TEST_KID, key).expect("verifier"))
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

/// Like [`create_test_app`], with caller-supplied config (e.g. mock server URLs).
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let verifier = test_verifier(&config);
    let state = Arc::new(
        AppState::new(config, test_db_offline(), verifier).expect("Failed to build state"),
    );

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
#[derive(Serialize)]
pub struct TestClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
    pub email: Option<String>,
}

impl TestClaims {
    /// Claims a valid token for `uid` in the test project would carry.
    #[allow(dead_code)]
    pub fn valid(uid: &str) -> Self {
        let now = now_secs();
        Self {
            iss: "https://securetoken.google.com/test-project".to_string(),
            aud: "test-project".to_string(),
            sub: uid.to_string(),
            iat: now,
            exp: now + 3600,
            email: Some(format!("{}@example.com", uid)),
        }
    }
}

/// Sign `claims` with the fixture private key.
#[allow(dead_code)]
pub fn sign_id_token(claims: &TestClaims, kid: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());

    encode(
        &header,
        claims,
        &EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY).expect("fixture private key"),
    )
    .expect("Failed to sign test token")
}

/// A valid ID token for `uid`.
#[allow(dead_code)]
pub fn create_test_id_token(uid: &str) -> String {
    sign_id_token(&TestClaims::valid(uid), TEST_KID)
}

#[allow(dead_code)]
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
