//! World-state access.
//!
//! The record service and permission engine only see [`StateStore`]: a flat
//! namespace of string keys holding opaque bytes. [`LedgerStore`] backs it
//! with persistent contract storage; [`MemoryStore`] is the in-memory fake
//! used by tests.

use soroban_sdk::{Bytes, Env, String};

use crate::validation::MAX_ID_LEN;
use crate::ContractError;

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

const SHARED_KEY_SEPARATOR: u8 = b'_';

/// Transactional key-value world state.
///
/// Writes become visible to later reads in the same invocation and commit
/// or roll back with it. Implementations report I/O failure as
/// [`ContractError::StoreFailure`].
pub trait StateStore {
    fn get(&self, key: &String) -> Result<Option<Bytes>, ContractError>;

    fn put(&self, key: &String, value: &Bytes) -> Result<(), ContractError>;

    /// Fails with [`ContractError::RecordNotFound`] when the key is absent.
    fn delete(&self, key: &String) -> Result<(), ContractError>;

    fn contains(&self, key: &String) -> Result<bool, ContractError> {
        Ok(self.get(key)?.is_some())
    }
}

/// [`StateStore`] over the contract's persistent storage.
pub struct LedgerStore {
    env: Env,
}

impl LedgerStore {
    pub fn new(env: &Env) -> Self {
        LedgerStore { env: env.clone() }
    }

    /// Extends the time-to-live (TTL) for a world-state entry so records
    /// that are still in use are not archived.
    fn extend_ttl(&self, key: &String) {
        self.env
            .storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

impl StateStore for LedgerStore {
    fn get(&self, key: &String) -> Result<Option<Bytes>, ContractError> {
        let value: Option<Bytes> = self.env.storage().persistent().get(key);
        if value.is_some() {
            self.extend_ttl(key);
        }
        Ok(value)
    }

    fn put(&self, key: &String, value: &Bytes) -> Result<(), ContractError> {
        self.env.storage().persistent().set(key, value);
        self.extend_ttl(key);
        Ok(())
    }

    fn delete(&self, key: &String) -> Result<(), ContractError> {
        if !self.env.storage().persistent().has(key) {
            return Err(ContractError::RecordNotFound);
        }
        self.env.storage().persistent().remove(key);
        Ok(())
    }

    fn contains(&self, key: &String) -> Result<bool, ContractError> {
        Ok(self.env.storage().persistent().has(key))
    }
}

/// Builds the `"<patient>_<recipient>"` key of a shared-data blob.
///
/// Both IDs must already have passed `validate_id`, so neither contains the
/// separator and neither exceeds `MAX_ID_LEN`.
pub fn shared_key(env: &Env, patient_id: &String, recipient_id: &String) -> String {
    const CAP: usize = MAX_ID_LEN as usize * 2 + 1;

    let patient_len = patient_id.len() as usize;
    let recipient_len = recipient_id.len() as usize;
    let total = patient_len + 1 + recipient_len;

    let mut buf = [0u8; CAP];
    patient_id.copy_into_slice(&mut buf[..patient_len]);
    buf[patient_len] = SHARED_KEY_SEPARATOR;
    recipient_id.copy_into_slice(&mut buf[patient_len + 1..total]);

    String::from_bytes(env, &buf[..total])
}

#[cfg(any(test, feature = "testutils"))]
pub use memory::MemoryStore;

#[cfg(any(test, feature = "testutils"))]
mod memory {
    use core::cell::RefCell;

    use soroban_sdk::{Bytes, Env, Map, String};

    use super::StateStore;
    use crate::ContractError;

    /// In-memory [`StateStore`]; needs an `Env` for host values but no
    /// deployed contract.
    pub struct MemoryStore {
        entries: RefCell<Map<String, Bytes>>,
    }

    impl MemoryStore {
        pub fn new(env: &Env) -> Self {
            MemoryStore {
                entries: RefCell::new(Map::new(env)),
            }
        }

        pub fn len(&self) -> u32 {
            self.entries.borrow().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    impl StateStore for MemoryStore {
        fn get(&self, key: &String) -> Result<Option<Bytes>, ContractError> {
            Ok(self.entries.borrow().get(key.clone()))
        }

        fn put(&self, key: &String, value: &Bytes) -> Result<(), ContractError> {
            self.entries.borrow_mut().set(key.clone(), value.clone());
            Ok(())
        }

        fn delete(&self, key: &String) -> Result<(), ContractError> {
            let mut entries = self.entries.borrow_mut();
            if !entries.contains_key(key.clone()) {
                return Err(ContractError::RecordNotFound);
            }
            entries.remove(key.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::PatientRecordsContract;

    #[test]
    fn shared_key_joins_ids_with_underscore() {
        let env = Env::default();
        let key = shared_key(
            &env,
            &String::from_str(&env, "Patient1"),
            &String::from_str(&env, "Doctor1"),
        );
        assert_eq!(key, String::from_str(&env, "Patient1_Doctor1"));
    }

    #[test]
    fn shared_key_fits_two_maximal_ids() {
        let env = Env::default();
        let patient = "p".repeat(MAX_ID_LEN as usize);
        let recipient = "r".repeat(MAX_ID_LEN as usize);
        let key = shared_key(
            &env,
            &String::from_str(&env, &patient),
            &String::from_str(&env, &recipient),
        );
        assert_eq!(key.len(), MAX_ID_LEN * 2 + 1);
    }

    #[test]
    fn memory_store_delete_requires_presence() {
        let env = Env::default();
        let store = MemoryStore::new(&env);
        let key = String::from_str(&env, "Patient1");

        assert_eq!(store.delete(&key), Err(ContractError::RecordNotFound));

        store.put(&key, &Bytes::from_slice(&env, b"{}")).unwrap();
        assert!(store.contains(&key).unwrap());
        assert_eq!(store.delete(&key), Ok(()));
        assert!(store.is_empty());
        assert_eq!(store.delete(&key), Err(ContractError::RecordNotFound));
    }

    #[test]
    fn ledger_store_round_trips_bytes_in_contract_storage() {
        let env = Env::default();
        let contract_id = env.register(PatientRecordsContract, ());
        let key = String::from_str(&env, "Patient1");
        let value = Bytes::from_slice(&env, b"opaque");

        env.as_contract(&contract_id, || {
            let store = LedgerStore::new(&env);
            assert_eq!(store.get(&key), Ok(None));

            store.put(&key, &value).unwrap();
            assert_eq!(store.get(&key), Ok(Some(value.clone())));
            assert_eq!(store.contains(&key), Ok(true));

            store.delete(&key).unwrap();
            assert_eq!(store.contains(&key), Ok(false));
            assert_eq!(store.delete(&key), Err(ContractError::RecordNotFound));
        });
    }
}
