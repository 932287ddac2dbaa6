pub mod doctors;
pub mod ids;
pub mod json;
pub mod patients;
pub mod state;

pub use doctors::{CredentialError, CredentialStore};
pub use patients::{IfMissing, PatientStore};
pub use state::AppState;
