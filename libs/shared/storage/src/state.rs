use std::sync::Arc;

use shared_config::AppConfig;

use crate::doctors::CredentialStore;
use crate::patients::PatientStore;

/// Process-wide state handed to every router: configuration plus the two
/// persisted collections.
pub struct AppState {
    pub config: AppConfig,
    pub doctors: CredentialStore,
    pub patients: PatientStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let doctors = CredentialStore::new(&config.data_dir);
        let patients = PatientStore::new(&config.data_dir);
        Self {
            config,
            doctors,
            patients,
        }
    }

    pub fn shared(config: AppConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }
}
