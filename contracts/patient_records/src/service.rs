//! Record operations over an injected world state.
//!
//! Every operation takes the acting identity explicitly, consults the
//! permission engine before revealing or mutating data, and performs at most
//! one write. Any error leaves the store exactly as it was.

use soroban_sdk::{Bytes, Env, String, Vec};

use crate::permissions::{self, AccessDecision};
use crate::record::{self, Demographics, MedicalRecord, PatientRecord};
use crate::store::{self, StateStore};
use crate::validation;
use crate::ContractError;

pub struct RecordService<'a, S: StateStore> {
    env: &'a Env,
    store: S,
}

impl<'a, S: StateStore> RecordService<'a, S> {
    pub fn new(env: &'a Env, store: S) -> Self {
        RecordService { env, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when any value is stored under `patient_id`, decodable or not.
    pub fn exists(&self, patient_id: &String) -> Result<bool, ContractError> {
        self.store.contains(patient_id)
    }

    /// Writes each record under its own ID, overwriting existing entries.
    pub fn seed(&self, patients: &Vec<PatientRecord>) -> Result<u32, ContractError> {
        let mut written = 0u32;
        for patient in patients.iter() {
            record::save(self.env, &self.store, &patient)?;
            written = written.saturating_add(1);
        }
        Ok(written)
    }

    /// Self-onboarding: an actor may only open the record carrying its own ID.
    pub fn create(
        &self,
        actor: &String,
        patient_id: &String,
        demographics: Demographics,
    ) -> Result<PatientRecord, ContractError> {
        if actor != patient_id {
            return Err(ContractError::Unauthorized);
        }
        validation::validate_id(patient_id)?;
        validation::validate_demographics(&demographics)?;

        if self.store.contains(patient_id)? {
            return Err(ContractError::RecordAlreadyExists);
        }

        let patient = PatientRecord::new(self.env, patient_id.clone(), demographics);
        record::save(self.env, &self.store, &patient)?;
        Ok(patient)
    }

    fn authorize(&self, actor: &String, patient_id: &String) -> Result<AccessDecision, ContractError> {
        validation::validate_id(patient_id)?;
        permissions::authorize(self.env, &self.store, actor, patient_id)
    }

    pub fn read_medical_info(
        &self,
        actor: &String,
        patient_id: &String,
    ) -> Result<MedicalRecord, ContractError> {
        Ok(self.read_full_info(actor, patient_id)?.record)
    }

    pub fn read_full_info(
        &self,
        actor: &String,
        patient_id: &String,
    ) -> Result<PatientRecord, ContractError> {
        self.authorize(actor, patient_id)?.require()?;
        record::load(self.env, &self.store, patient_id)
    }

    /// Records a new diagnosis and medication, returning the history length
    /// after the append.
    pub fn update(
        &self,
        actor: &String,
        patient_id: &String,
        diagnosis: String,
        medication: String,
    ) -> Result<u32, ContractError> {
        self.authorize(actor, patient_id)?.require()?;
        validation::validate_clinical_entry(&diagnosis)?;
        validation::validate_clinical_entry(&medication)?;

        let mut patient = record::load(self.env, &self.store, patient_id)?;
        patient.record.apply_update(diagnosis, medication);
        record::save(self.env, &self.store, &patient)?;

        Ok(patient.record.history_len())
    }

    pub fn delete(&self, actor: &String, patient_id: &String) -> Result<(), ContractError> {
        validation::validate_id(patient_id)?;
        if actor != patient_id {
            return Err(ContractError::Unauthorized);
        }
        self.store.delete(patient_id)
    }

    pub fn grant(
        &self,
        owner: &String,
        patient_id: &String,
        grantee_id: &String,
    ) -> Result<(), ContractError> {
        validation::validate_id(patient_id)?;
        permissions::grant(self.env, &self.store, owner, patient_id, grantee_id)
    }

    pub fn revoke(
        &self,
        owner: &String,
        patient_id: &String,
        grantee_id: &String,
    ) -> Result<(), ContractError> {
        validation::validate_id(patient_id)?;
        permissions::revoke(self.env, &self.store, owner, patient_id, grantee_id)
    }

    /// Stores `payload` for `recipient_id` under `"<patient>_<recipient>"`.
    ///
    /// Both the sender and the recipient must be authorized on the patient;
    /// a recipient without access is reported as `AccessDenied`. The patient
    /// record must exist, even when the owner shares with themselves. A later
    /// share to the same recipient replaces the earlier payload.
    pub fn share(
        &self,
        actor: &String,
        patient_id: &String,
        recipient_id: &String,
        payload: &Bytes,
    ) -> Result<String, ContractError> {
        validation::validate_id(recipient_id)?;
        validation::validate_payload(payload)?;

        self.authorize(actor, patient_id)?.require()?;
        if !self.store.contains(patient_id)? {
            return Err(ContractError::RecordNotFound);
        }
        if !self.authorize(recipient_id, patient_id)?.is_granted() {
            return Err(ContractError::AccessDenied);
        }

        let key = store::shared_key(self.env, patient_id, recipient_id);
        self.store.put(&key, payload)?;
        Ok(key)
    }

    /// Returns the payload shared with `actor` about `patient_id`.
    pub fn read_shared(&self, actor: &String, patient_id: &String) -> Result<Bytes, ContractError> {
        self.authorize(actor, patient_id)?.require()?;

        let key = store::shared_key(self.env, patient_id, actor);
        self.store
            .get(&key)?
            .ok_or(ContractError::RecordNotFound)
    }
}
