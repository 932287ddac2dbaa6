use anyhow::{anyhow, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use shared_models::records::{Doctor, DoctorProfile};

use crate::ids::make_id;
use crate::json::JsonCollection;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("email {0} is already registered")]
    DuplicateEmail(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Doctor identities and password hashes, persisted in doctors.json.
pub struct CredentialStore {
    collection: JsonCollection<Doctor>,
}

impl CredentialStore {
    pub fn new(data_dir: &str) -> Self {
        Self {
            collection: JsonCollection::new(data_dir, "doctors.json"),
        }
    }

    /// Create a credential record. Email matching is exact and
    /// case-sensitive; a duplicate leaves the store unchanged.
    pub fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
        specialization: &str,
    ) -> Result<DoctorProfile, CredentialError> {
        let hash = hash_password(password)?;
        let created = self.collection.update(|doctors| {
            if doctors.iter().any(|d| d.email == email) {
                return Ok(None);
            }
            let doctor = Doctor {
                id: make_id("DR"),
                name: name.to_string(),
                email: email.to_string(),
                password: hash,
                specialization: specialization.to_string(),
                created_at: Utc::now(),
            };
            let profile = doctor.profile();
            doctors.push(doctor);
            Ok(Some(profile))
        })?;

        match created {
            Some(profile) => {
                debug!("Doctor registered with id {}", profile.id);
                Ok(profile)
            }
            None => Err(CredentialError::DuplicateEmail(email.to_string())),
        }
    }

    /// Match by exact email and password. Records still carrying a legacy
    /// unsalted digest are re-hashed to Argon2id on the way through.
    pub fn verify(&self, email: &str, password: &str) -> Result<Option<DoctorProfile>> {
        let doctors = self.collection.load()?;
        let Some(doctor) = doctors.iter().find(|d| d.email == email) else {
            return Ok(None);
        };

        match check_password(password, &doctor.password) {
            PasswordCheck::NoMatch => Ok(None),
            PasswordCheck::Match => Ok(Some(doctor.profile())),
            PasswordCheck::LegacyMatch => {
                let profile = doctor.profile();
                self.migrate_legacy_hash(&profile.id, password)?;
                Ok(Some(profile))
            }
        }
    }

    pub fn find_profile(&self, doctor_id: &str) -> Result<Option<DoctorProfile>> {
        let doctors = self.collection.load()?;
        Ok(doctors
            .iter()
            .find(|d| d.id == doctor_id)
            .map(Doctor::profile))
    }

    fn migrate_legacy_hash(&self, doctor_id: &str, password: &str) -> Result<()> {
        warn!("Re-hashing legacy password digest for {}", doctor_id);
        let rehashed = hash_password(password)?;
        self.collection.update(|doctors| {
            if let Some(doctor) = doctors.iter_mut().find(|d| d.id == doctor_id) {
                doctor.password = rehashed;
            }
            Ok(())
        })
    }
}

enum PasswordCheck {
    Match,
    LegacyMatch,
    NoMatch,
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("failed to hash password: {}", e))
}

fn check_password(password: &str, stored: &str) -> PasswordCheck {
    if let Ok(parsed) = PasswordHash::new(stored) {
        return if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
        {
            PasswordCheck::Match
        } else {
            PasswordCheck::NoMatch
        };
    }

    // Anything that is not a PHC string is treated as a legacy unsalted
    // SHA-256 hex digest from older data files.
    if legacy_digest(password) == stored {
        PasswordCheck::LegacyMatch
    } else {
        PasswordCheck::NoMatch
    }
}

fn legacy_digest(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
