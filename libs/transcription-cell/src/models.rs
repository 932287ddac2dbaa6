use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeRequest {
    pub audio_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
    pub metadata: Value,
}

const ALLOWED_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "webm", "ogg"];

/// Extension allowlist check on the final path component, matching the
/// upload contract of the frontend.
pub fn allowed_audio_file(filename: &str) -> bool {
    filename
        .rsplit('.')
        .next()
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_is_case_insensitive_on_the_extension() {
        assert!(allowed_audio_file("consult.wav"));
        assert!(allowed_audio_file("consult.MP3"));
        assert!(allowed_audio_file("nested/dir/consult.ogg"));
        assert!(!allowed_audio_file("consult.pdf"));
        assert!(!allowed_audio_file("consult"));
    }
}
