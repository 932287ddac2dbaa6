use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{GenerationResult, PromptContext};

/// Generation collaborator. Posts a shaped prompt to the configured model
/// endpoint; without an endpoint it falls back to a canned conservative
/// draft for development.
pub struct PrescriptionGenerator {
    endpoint: String,
    api_key: String,
    http: reqwest::Client,
}

impl PrescriptionGenerator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            endpoint: config.llm_endpoint.clone(),
            api_key: config.llm_api_key.clone(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn generate(&self, ctx: &PromptContext) -> Result<GenerationResult> {
        let prompt = build_prompt(ctx);

        if self.endpoint.is_empty() {
            return Ok(mock_generation());
        }

        debug!("Requesting prescription draft from model endpoint");

        let mut request = self.http.post(&self.endpoint).json(&json!({ "prompt": prompt }));
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("generation service returned {}", response.status()));
        }

        let body: Value = response.json().await?;
        let text = body
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("generation service response had no text field"))?;

        Ok(parse_model_output(text, "remote"))
    }
}

/// Shape the clinical prompt from the consultation context.
pub fn build_prompt(ctx: &PromptContext) -> String {
    let doctor_name = ctx
        .doctor
        .as_ref()
        .map(|d| d.name.as_str())
        .unwrap_or("Doctor");
    let specialization = ctx
        .doctor
        .as_ref()
        .map(|d| d.specialization.as_str())
        .unwrap_or("General");

    format!(
        "You are a helpful and clinically conservative medical assistant. \
         The doctor ({}, specialization: {}) provided the following patient \
         conversation transcription:\n\n\
         === TRANSCRIPTION START ===\n{}\n=== TRANSCRIPTION END ===\n\n\
         Doctor notes: {}\n\n\
         Task:\n\
         1) Provide a short AI summary (1-2 sentences) of the most likely problem.\n\
         2) Produce a clear, concise prescription and instructions (drug name, dose, \
         frequency, duration), plus non-pharmacological advice if relevant.\n\
         3) Provide follow-up recommendations and red-flag signs for escalation.\n\
         4) Provide a short confidence estimate (0-1).\n\n\
         Output a JSON object ONLY with fields aiSummary, prescription, followUp, \
         confidence. Make the prescription conservative and include the disclaimer: \
         \"This is AI-assisted; final verification required by the doctor.\"",
        doctor_name, specialization, ctx.transcription, ctx.doctor_notes
    )
}

/// Parse raw model output. Well-formed JSON supplies the fields directly;
/// plain text falls back to a permissive shape so heterogeneous model
/// behavior never loses the draft.
pub fn parse_model_output(text: &str, provider: &str) -> GenerationResult {
    let metadata = json!({ "provider": provider, "raw": text });

    if let Ok(parsed) = serde_json::from_str::<Value>(text) {
        if parsed.is_object() {
            return GenerationResult {
                prescription: field(&parsed, "prescription"),
                ai_summary: field(&parsed, "aiSummary"),
                follow_up: field(&parsed, "followUp"),
                confidence: parsed
                    .get("confidence")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.5),
                metadata,
            };
        }
    }

    GenerationResult {
        prescription: text.to_string(),
        ai_summary: text.lines().next().unwrap_or("").chars().take(200).collect(),
        follow_up: "Follow up as needed".to_string(),
        confidence: 0.6,
        metadata,
    }
}

fn field(parsed: &Value, key: &str) -> String {
    parsed
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn mock_generation() -> GenerationResult {
    GenerationResult {
        prescription: "Paracetamol 500 mg orally, every 6 hours as needed for 3 days. \
                       Rest and hydration. This is AI-assisted; final verification \
                       required by the doctor."
            .to_string(),
        ai_summary: "Mild tension-type headache, likely benign.".to_string(),
        follow_up: "Return if the headache persists beyond 3 days or worsens suddenly."
            .to_string(),
        confidence: 0.6,
        metadata: json!({
            "provider": "mock",
            "note": "Set LLM_ENDPOINT to use a real generation service"
        }),
    }
}
