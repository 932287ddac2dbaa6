use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub data_dir: String,
    pub port: u16,
    pub stt_endpoint: String,
    pub llm_endpoint: String,
    pub llm_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using development default");
                    "dev-secret".to_string()
                }),
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(3000),
            stt_endpoint: env::var("STT_ENDPOINT")
                .unwrap_or_else(|_| {
                    warn!("STT_ENDPOINT not set, transcription will use the mock provider");
                    String::new()
                }),
            llm_endpoint: env::var("LLM_ENDPOINT")
                .unwrap_or_else(|_| {
                    warn!("LLM_ENDPOINT not set, generation will use the mock provider");
                    String::new()
                }),
            llm_api_key: env::var("LLM_API_KEY")
                .unwrap_or_else(|_| String::new()),
        };

        if !config.is_configured() {
            warn!("Application running with development secrets - not suitable for production");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty() && self.jwt_secret != "dev-secret"
    }

    pub fn is_transcription_configured(&self) -> bool {
        !self.stt_endpoint.is_empty()
    }

    pub fn is_generation_configured(&self) -> bool {
        !self.llm_endpoint.is_empty()
    }
}
