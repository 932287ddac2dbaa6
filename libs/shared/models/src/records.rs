use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credential record as persisted in doctors.json. The `password` field
/// holds a hash (Argon2id PHC string, or a legacy hex SHA-256 digest),
/// never the plaintext. Handlers must only ever return [`DoctorProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    /// Password-stripped view safe to serialize into responses.
    pub fn profile(&self) -> DoctorProfile {
        DoctorProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            specialization: self.specialization.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
}

/// Patient aggregate: profile plus its full consultation history,
/// persisted and rewritten as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    #[serde(default)]
    pub consultations: Vec<Consultation>,
}

impl Patient {
    /// Minimal placeholder created when a consultation is recorded against
    /// an id that has no profile yet.
    pub fn stub(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: "Unknown".to_string(),
            age: None,
            gender: None,
            consultations: Vec::new(),
        }
    }
}

/// One recorded clinical encounter. Append-only: never mutated or removed
/// once attached to a patient; insertion order is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub prescription: String,
    #[serde(rename = "aiSummary", default)]
    pub ai_summary: String,
    #[serde(default)]
    pub insights: Map<String, Value>,
}
