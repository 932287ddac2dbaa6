pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AddConsultationRequest, CreatePatientRequest, PatientInsights, UpdatePatientRequest};
pub use router::patient_routes;
pub use services::insights::compute_insights;
pub use services::recorder::ConsultationRecorder;
