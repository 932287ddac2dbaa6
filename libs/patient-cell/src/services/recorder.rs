use anyhow::Result;
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;

use shared_models::records::Consultation;
use shared_storage::ids::make_id;
use shared_storage::{IfMissing, PatientStore};

/// Attaches new consultations to patient aggregates.
///
/// This is the one path that may create a patient as a side effect: if the
/// id has no profile yet, a stub named "Unknown" is created rather than
/// failing, so a generation request never dies on a missing profile.
pub struct ConsultationRecorder<'a> {
    patients: &'a PatientStore,
}

impl<'a> ConsultationRecorder<'a> {
    pub fn new(patients: &'a PatientStore) -> Self {
        Self { patients }
    }

    pub fn record(
        &self,
        patient_id: &str,
        transcription: &str,
        prescription: &str,
        ai_summary: &str,
        insights: Map<String, Value>,
    ) -> Result<Consultation> {
        let consultation = Consultation {
            id: make_id("CONS"),
            date: utc_timestamp(),
            transcription: transcription.to_string(),
            prescription: prescription.to_string(),
            ai_summary: ai_summary.to_string(),
            insights,
        };

        debug!(
            "Recording consultation {} for patient {}",
            consultation.id, patient_id
        );

        // Single locked read-modify-write, so concurrent recordings for the
        // same patient all land.
        self.patients.mutate(patient_id, IfMissing::Stub, |patient| {
            patient.consultations.push(consultation.clone());
        })?;

        Ok(consultation)
    }
}

/// Second-precision ISO-8601 UTC timestamp, the format consultation dates
/// are persisted in.
pub fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> PatientStore {
        PatientStore::new(dir.path().to_str().unwrap())
    }

    #[test]
    fn missing_patient_gets_a_stub_with_one_consultation() {
        let dir = TempDir::new().unwrap();
        let patients = store(&dir);
        let recorder = ConsultationRecorder::new(&patients);

        recorder
            .record("PAT_GHOST", "patient reports headache", "paracetamol", "", Map::new())
            .unwrap();

        let patient = patients.get("PAT_GHOST").unwrap().unwrap();
        assert_eq!(patient.name, "Unknown");
        assert_eq!(patient.consultations.len(), 1);
        assert_eq!(patient.consultations[0].prescription, "paracetamol");
    }

    #[test]
    fn repeated_records_preserve_call_order() {
        let dir = TempDir::new().unwrap();
        let patients = store(&dir);
        let recorder = ConsultationRecorder::new(&patients);

        let first = recorder
            .record("PAT_X", "first visit", "", "", Map::new())
            .unwrap();
        let second = recorder
            .record("PAT_X", "second visit", "", "", Map::new())
            .unwrap();

        let patient = patients.get("PAT_X").unwrap().unwrap();
        assert_eq!(patient.consultations.len(), 2);
        assert_eq!(patient.consultations[0].id, first.id);
        assert_eq!(patient.consultations[1].id, second.id);
        assert_eq!(patient.consultations[0].transcription, "first visit");
        assert_eq!(patient.consultations[1].transcription, "second visit");
    }

    #[test]
    fn existing_profile_is_left_intact() {
        let dir = TempDir::new().unwrap();
        let patients = store(&dir);
        patients
            .upsert(shared_models::records::Patient {
                id: "PAT_REAL".to_string(),
                name: "Jo Bloggs".to_string(),
                age: Some(52),
                gender: Some("female".to_string()),
                consultations: Vec::new(),
            })
            .unwrap();

        ConsultationRecorder::new(&patients)
            .record("PAT_REAL", "follow-up", "", "", Map::new())
            .unwrap();

        let patient = patients.get("PAT_REAL").unwrap().unwrap();
        assert_eq!(patient.name, "Jo Bloggs");
        assert_eq!(patient.age, Some(52));
        assert_eq!(patient.consultations.len(), 1);
    }

    #[test]
    fn parallel_recordings_for_one_patient_all_land() {
        let dir = TempDir::new().unwrap();
        let patients = store(&dir);

        const RECORDERS: usize = 4;
        const RECORDS_EACH: usize = 25;
        let barrier = std::sync::Barrier::new(RECORDERS);

        std::thread::scope(|scope| {
            for worker in 0..RECORDERS {
                let barrier = &barrier;
                let patients = &patients;
                scope.spawn(move || {
                    let recorder = ConsultationRecorder::new(patients);
                    barrier.wait();
                    for visit in 0..RECORDS_EACH {
                        recorder
                            .record(
                                "PAT_BUSY",
                                &format!("worker {worker} visit {visit}"),
                                "",
                                "",
                                Map::new(),
                            )
                            .unwrap();
                    }
                });
            }
        });

        let patient = patients.get("PAT_BUSY").unwrap().unwrap();
        assert_eq!(patient.consultations.len(), RECORDERS * RECORDS_EACH);
    }

    #[test]
    fn timestamp_is_second_precision_utc() {
        let ts = utc_timestamp();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[10..11], "T");
    }
}
