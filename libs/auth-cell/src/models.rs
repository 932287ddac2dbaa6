use serde::{Deserialize, Serialize};

use shared_models::records::DoctorProfile;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_specialization")]
    pub specialization: String,
}

fn default_specialization() -> String {
    "General".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub doctor: DoctorProfile,
}
