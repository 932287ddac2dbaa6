use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

/// Fields present in the body overwrite the stored value; omitted fields
/// are left alone. Consultations are never touched by profile updates.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddConsultationRequest {
    pub date: Option<String>,
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub prescription: String,
    #[serde(rename = "aiSummary", default)]
    pub ai_summary: String,
    #[serde(default)]
    pub insights: Map<String, Value>,
}

/// Summary statistics derived from a patient's consultation history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientInsights {
    pub total_visits: usize,
    pub last_visit: Option<String>,
    pub average_duration_minutes: Option<f64>,
}
