pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{GenerateRequest, GenerationResult, PromptContext};
pub use router::prescription_routes;
pub use services::generator::PrescriptionGenerator;
