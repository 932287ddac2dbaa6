use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared_models::records::DoctorProfile;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub transcription: String,
    #[serde(rename = "patientId")]
    pub patient_id: Option<String>,
    #[serde(rename = "doctorNotes", default)]
    pub doctor_notes: String,
}

/// Draft produced by the generation collaborator. Never fabricated
/// locally: an upstream failure surfaces as a hard error instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub prescription: String,
    #[serde(rename = "aiSummary")]
    pub ai_summary: String,
    #[serde(rename = "followUp")]
    pub follow_up: String,
    pub confidence: f64,
    pub metadata: Value,
}

/// Everything the prompt is shaped from.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub transcription: String,
    pub patient_id: Option<String>,
    pub doctor_notes: String,
    pub doctor: Option<DoctorProfile>,
}
