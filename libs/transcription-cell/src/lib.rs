pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{TranscribeRequest, TranscriptionResponse};
pub use router::transcription_routes;
pub use services::transcriber::SpeechToTextClient;
