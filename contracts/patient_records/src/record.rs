use soroban_sdk::xdr::{FromXdr, ToXdr};
use soroban_sdk::{contracttype, Bytes, Env, Map, String, Vec};

use crate::store::StateStore;
use crate::ContractError;

/// Current clinical state plus the append-only histories.
///
/// Field names are the keys of the stored map and must not change.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(non_snake_case)]
pub struct MedicalRecord {
    pub diagnosis: String,
    pub medications: String,
    pub diagnosesHistory: Vec<String>,
    pub medicationsHistory: Vec<String>,
}

/// Demographic fields supplied when a patient onboards
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(non_snake_case)]
pub struct Demographics {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub bloodType: String,
    pub allergies: String,
}

/// A patient entry in the world state, keyed by `id`.
///
/// The owner never appears in `accessList`; ownership is `actor == id`.
/// `false` entries are revoked grants, kept so a revocation is
/// distinguishable from never having been granted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(non_snake_case)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub bloodType: String,
    pub allergies: String,
    pub accessList: Map<String, bool>,
    pub record: MedicalRecord,
}

impl MedicalRecord {
    pub fn empty(env: &Env) -> Self {
        MedicalRecord {
            diagnosis: String::from_str(env, ""),
            medications: String::from_str(env, ""),
            diagnosesHistory: Vec::new(env),
            medicationsHistory: Vec::new(env),
        }
    }

    /// Overwrites the current values and appends both to their histories,
    /// keeping the two histories the same length.
    pub fn apply_update(&mut self, diagnosis: String, medication: String) {
        self.diagnosesHistory.push_back(diagnosis.clone());
        self.medicationsHistory.push_back(medication.clone());
        self.diagnosis = diagnosis;
        self.medications = medication;
    }

    pub fn history_len(&self) -> u32 {
        self.diagnosesHistory.len()
    }
}

impl PatientRecord {
    pub fn new(env: &Env, id: String, demographics: Demographics) -> Self {
        PatientRecord {
            id,
            name: demographics.name,
            age: demographics.age,
            gender: demographics.gender,
            bloodType: demographics.bloodType,
            allergies: demographics.allergies,
            accessList: Map::new(env),
            record: MedicalRecord::empty(env),
        }
    }
}

pub fn encode(env: &Env, patient: &PatientRecord) -> Bytes {
    patient.clone().to_xdr(env)
}

pub fn decode(env: &Env, bytes: &Bytes) -> Result<PatientRecord, ContractError> {
    PatientRecord::from_xdr(env, bytes).map_err(|_| ContractError::Corrupt)
}

/// Loads and decodes a patient record.
pub fn load<S: StateStore>(
    env: &Env,
    store: &S,
    patient_id: &String,
) -> Result<PatientRecord, ContractError> {
    let bytes = store
        .get(patient_id)?
        .ok_or(ContractError::RecordNotFound)?;
    decode(env, &bytes)
}

/// Encodes and writes a patient record under its own ID.
pub fn save<S: StateStore>(
    env: &Env,
    store: &S,
    patient: &PatientRecord,
) -> Result<(), ContractError> {
    store.put(&patient.id, &encode(env, patient))
}
