use std::path::Path;

use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;

/// Speech-to-text collaborator. With an endpoint configured this posts the
/// audio path to the remote service; without one it falls back to a canned
/// development transcription, mirroring how the hosted providers are wired
/// in only when credentials exist.
pub struct SpeechToTextClient {
    endpoint: String,
    http: reqwest::Client,
}

impl SpeechToTextClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            endpoint: config.stt_endpoint.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Returns `(transcription, metadata)` or the upstream failure. The
    /// caller decides whether to degrade; this client never retries.
    pub async fn transcribe(&self, audio_path: &str) -> Result<(String, Value)> {
        if self.endpoint.is_empty() {
            return Ok(mock_transcription(audio_path));
        }

        debug!("Requesting transcription for {}", audio_path);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "audio_path": audio_path }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "transcription service returned {}",
                response.status()
            ));
        }

        let body: Value = response.json().await?;
        let transcription = body
            .get("transcription")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let metadata = body
            .get("metadata")
            .cloned()
            .unwrap_or_else(|| json!({ "provider": "remote" }));

        Ok((transcription, metadata))
    }
}

fn mock_transcription(audio_path: &str) -> (String, Value) {
    let filename = Path::new(audio_path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| audio_path.to_string());

    let text = format!(
        "[Mock transcription for {}] Patient: I have a mild headache since morning. \
         Took paracetamol. No vomiting. Blood pressure normal.",
        filename
    );
    let metadata = json!({
        "provider": "mock",
        "note": "Set STT_ENDPOINT to use a real speech-to-text service"
    });

    (text, metadata)
}
