use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use tempfile::TempDir;

use shared_config::AppConfig;
use shared_storage::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-validation-must-be-long-enough";

pub fn test_config(data_dir: &str) -> AppConfig {
    AppConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        data_dir: data_dir.to_string(),
        port: 0,
        stt_endpoint: String::new(),
        llm_endpoint: String::new(),
        llm_api_key: String::new(),
    }
}

/// App state over a throwaway data directory. Keep the env alive for the
/// duration of the test; dropping it deletes the directory.
pub struct TestEnv {
    pub state: Arc<AppState>,
    pub data_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let data_dir = TempDir::new().expect("failed to create temp data dir");
        let config = test_config(data_dir.path().to_str().expect("non-utf8 temp path"));
        Self {
            state: AppState::shared(config),
            data_dir,
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(doctor_id: &str, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": doctor_id,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(doctor_id: &str, secret: &str) -> String {
        Self::create_test_token(doctor_id, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(doctor_id: &str) -> String {
        Self::create_test_token(doctor_id, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}
