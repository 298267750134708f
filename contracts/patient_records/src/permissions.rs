use soroban_sdk::{Env, String};

use crate::record;
use crate::store::StateStore;
use crate::validation;
use crate::ContractError;

/// Outcome of an access check against one patient record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessDecision {
    /// The actor is the patient.
    Owner,
    /// The actor holds a live grant in the patient's access list.
    Grantee,
    /// Access refused, with the reason to report.
    Denied(ContractError),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Owner | AccessDecision::Grantee)
    }

    /// Converts a denial into its error.
    pub fn require(self) -> Result<(), ContractError> {
        match self {
            AccessDecision::Owner | AccessDecision::Grantee => Ok(()),
            AccessDecision::Denied(reason) => Err(reason),
        }
    }
}

/// Decide whether `actor` may act on `patient_id`'s record.
///
/// Only infrastructure failures (`StoreFailure`, `Corrupt`) come back as
/// `Err`; every refusal is `Ok(AccessDecision::Denied(..))`.
pub fn authorize<S: StateStore>(
    env: &Env,
    store: &S,
    actor: &String,
    patient_id: &String,
) -> Result<AccessDecision, ContractError> {
    if actor == patient_id {
        return Ok(AccessDecision::Owner);
    }

    let patient = match record::load(env, store, patient_id) {
        Ok(patient) => patient,
        Err(ContractError::RecordNotFound) => {
            return Ok(AccessDecision::Denied(ContractError::RecordNotFound))
        }
        Err(e) => return Err(e),
    };

    Ok(match patient.accessList.get(actor.clone()) {
        Some(true) => AccessDecision::Grantee,
        Some(false) => AccessDecision::Denied(ContractError::AccessRevoked),
        None => AccessDecision::Denied(ContractError::NotInAccessList),
    })
}

/// Patients manage their own access list; nobody else may.
fn require_owner(owner: &String, patient_id: &String) -> Result<(), ContractError> {
    if owner != patient_id {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Give `grantee_id` access to the patient's record.
///
/// Existing entries for other actors are left untouched.
pub fn grant<S: StateStore>(
    env: &Env,
    store: &S,
    owner: &String,
    patient_id: &String,
    grantee_id: &String,
) -> Result<(), ContractError> {
    require_owner(owner, patient_id)?;
    validation::validate_id(grantee_id)?;
    if grantee_id == patient_id {
        return Err(ContractError::InvalidInput);
    }

    let mut patient = record::load(env, store, patient_id)?;
    patient.accessList.set(grantee_id.clone(), true);
    record::save(env, store, &patient)
}

/// Withdraw a grant. The entry is kept as `false` so later checks report
/// `AccessRevoked` rather than `NotInAccessList`.
pub fn revoke<S: StateStore>(
    env: &Env,
    store: &S,
    owner: &String,
    patient_id: &String,
    grantee_id: &String,
) -> Result<(), ContractError> {
    require_owner(owner, patient_id)?;
    validation::validate_id(grantee_id)?;

    let mut patient = record::load(env, store, patient_id)?;
    if !patient.accessList.contains_key(grantee_id.clone()) {
        return Err(ContractError::GranteeNotFound);
    }
    patient.accessList.set(grantee_id.clone(), false);
    record::save(env, store, &patient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Demographics, PatientRecord};
    use crate::store::MemoryStore;
    use soroban_sdk::Bytes;

    struct FailingStore;

    impl StateStore for FailingStore {
        fn get(&self, _key: &String) -> Result<Option<Bytes>, ContractError> {
            Err(ContractError::StoreFailure)
        }

        fn put(&self, _key: &String, _value: &Bytes) -> Result<(), ContractError> {
            Err(ContractError::StoreFailure)
        }

        fn delete(&self, _key: &String) -> Result<(), ContractError> {
            Err(ContractError::StoreFailure)
        }
    }

    fn s(env: &Env, value: &str) -> String {
        String::from_str(env, value)
    }

    fn store_with_patient(env: &Env, id: &str) -> MemoryStore {
        let store = MemoryStore::new(env);
        let demographics = Demographics {
            name: s(env, "Test Patient"),
            age: 30,
            gender: s(env, "female"),
            bloodType: s(env, "O+"),
            allergies: s(env, ""),
        };
        record::save(env, &store, &PatientRecord::new(env, s(env, id), demographics)).unwrap();
        store
    }

    #[test]
    fn owner_is_authorized_without_reading_the_store() {
        let env = Env::default();
        let patient = s(&env, "Patient1");

        assert_eq!(
            authorize(&env, &FailingStore, &patient, &patient),
            Ok(AccessDecision::Owner)
        );
    }

    #[test]
    fn stranger_is_not_in_access_list() {
        let env = Env::default();
        let store = store_with_patient(&env, "Patient1");

        let decision = authorize(&env, &store, &s(&env, "Doctor3"), &s(&env, "Patient1")).unwrap();
        assert!(!decision.is_granted());
        assert_eq!(decision.require(), Err(ContractError::NotInAccessList));
    }

    #[test]
    fn missing_record_is_a_denial_not_an_error() {
        let env = Env::default();
        let store = MemoryStore::new(&env);

        assert_eq!(
            authorize(&env, &store, &s(&env, "Doctor1"), &s(&env, "Patient1")),
            Ok(AccessDecision::Denied(ContractError::RecordNotFound))
        );
    }

    #[test]
    fn store_failure_propagates() {
        let env = Env::default();

        assert_eq!(
            authorize(&env, &FailingStore, &s(&env, "Doctor1"), &s(&env, "Patient1")),
            Err(ContractError::StoreFailure)
        );
    }

    #[test]
    fn grant_then_revoke() {
        let env = Env::default();
        let store = store_with_patient(&env, "Patient1");
        let patient = s(&env, "Patient1");
        let doctor = s(&env, "Doctor5");

        grant(&env, &store, &patient, &patient, &doctor).unwrap();
        assert_eq!(
            authorize(&env, &store, &doctor, &patient),
            Ok(AccessDecision::Grantee)
        );

        revoke(&env, &store, &patient, &patient, &doctor).unwrap();
        assert_eq!(
            authorize(&env, &store, &doctor, &patient),
            Ok(AccessDecision::Denied(ContractError::AccessRevoked))
        );
    }

    #[test]
    fn grant_merges_into_existing_access_list() {
        let env = Env::default();
        let store = store_with_patient(&env, "Patient1");
        let patient = s(&env, "Patient1");

        grant(&env, &store, &patient, &patient, &s(&env, "Doctor1")).unwrap();
        grant(&env, &store, &patient, &patient, &s(&env, "Doctor2")).unwrap();

        let stored = record::load(&env, &store, &patient).unwrap();
        assert_eq!(stored.accessList.len(), 2);
        assert_eq!(
            authorize(&env, &store, &s(&env, "Doctor1"), &patient),
            Ok(AccessDecision::Grantee)
        );
    }

    #[test]
    fn only_the_patient_manages_access() {
        let env = Env::default();
        let store = store_with_patient(&env, "Patient1");
        let patient = s(&env, "Patient1");
        let doctor = s(&env, "Doctor1");

        assert_eq!(
            grant(&env, &store, &doctor, &patient, &s(&env, "Doctor2")),
            Err(ContractError::Unauthorized)
        );
        assert_eq!(
            grant(&env, &store, &patient, &patient, &patient),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            grant(&env, &store, &patient, &patient, &s(&env, "Doctor_1")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            revoke(&env, &store, &doctor, &patient, &doctor),
            Err(ContractError::Unauthorized)
        );
    }

    #[test]
    fn revoke_unknown_grantee_fails() {
        let env = Env::default();
        let store = store_with_patient(&env, "Patient1");
        let patient = s(&env, "Patient1");

        assert_eq!(
            revoke(&env, &store, &patient, &patient, &s(&env, "Doctor9")),
            Err(ContractError::GranteeNotFound)
        );
    }

    #[test]
    fn grant_on_missing_record_fails() {
        let env = Env::default();
        let store = MemoryStore::new(&env);
        let patient = s(&env, "Patient7");

        assert_eq!(
            grant(&env, &store, &patient, &patient, &s(&env, "Doctor1")),
            Err(ContractError::RecordNotFound)
        );
        assert!(store.is_empty());
    }
}
