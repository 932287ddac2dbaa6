use anyhow::Result;
use tracing::debug;

use shared_models::records::Patient;

use crate::json::JsonCollection;

/// What `mutate` does when the aggregate id has no record yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfMissing {
    /// Create-if-absent: start from a stub named "Unknown".
    Stub,
    /// Report the miss back to the caller.
    Reject,
}

/// Patient aggregates, persisted in patients.json. All mutation is
/// expressed as load-modify-replace over the whole aggregate; there are no
/// field-level patches.
pub struct PatientStore {
    collection: JsonCollection<Patient>,
}

impl PatientStore {
    pub fn new(data_dir: &str) -> Self {
        Self {
            collection: JsonCollection::new(data_dir, "patients.json"),
        }
    }

    /// Full snapshot, no pagination.
    pub fn list(&self) -> Result<Vec<Patient>> {
        self.collection.load()
    }

    pub fn get(&self, patient_id: &str) -> Result<Option<Patient>> {
        let patients = self.collection.load()?;
        Ok(patients.into_iter().find(|p| p.id == patient_id))
    }

    /// Insert-or-replace keyed by id, for callers that already own the
    /// whole aggregate (creation, seeding).
    pub fn upsert(&self, patient: Patient) -> Result<()> {
        debug!("Upserting patient aggregate {}", patient.id);
        self.collection.update(|patients| {
            match patients.iter_mut().find(|p| p.id == patient.id) {
                Some(existing) => *existing = patient,
                None => patients.push(patient),
            }
            Ok(())
        })
    }

    /// Read-modify-write of one aggregate inside a single lock window, so
    /// two in-flight mutations cannot drop each other's changes. Returns
    /// the aggregate as written, or `None` on a rejected miss.
    pub fn mutate(
        &self,
        patient_id: &str,
        if_missing: IfMissing,
        mutate: impl FnOnce(&mut Patient),
    ) -> Result<Option<Patient>> {
        self.collection.update(|patients| {
            let idx = match patients.iter().position(|p| p.id == patient_id) {
                Some(idx) => idx,
                None if if_missing == IfMissing::Stub => {
                    debug!("Stubbing missing patient {}", patient_id);
                    patients.push(Patient::stub(patient_id));
                    patients.len() - 1
                }
                None => return Ok(None),
            };
            mutate(&mut patients[idx]);
            Ok(Some(patients[idx].clone()))
        })
    }
}
