#![no_std]

pub mod circuit_breaker;
pub mod errors;
pub mod events;
pub mod genesis;
pub mod identity;
pub mod permissions;
pub mod record;
pub mod service;
pub mod store;
pub mod validation;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, Env, String, Symbol};

pub use circuit_breaker::PauseScope;
pub use errors::{log_error, ContractError, ErrorCategory, ErrorSeverity};
pub use identity::{EnrollmentRegistry, IdentityOracle};
pub use permissions::AccessDecision;
pub use record::{Demographics, MedicalRecord, PatientRecord};
pub use service::RecordService;
pub use store::{LedgerStore, StateStore};

#[cfg(any(test, feature = "testutils"))]
pub use store::MemoryStore;

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// Per-function pause symbols accepted by `PauseScope::Function`
pub const SEED: Symbol = symbol_short!("SEED");
pub const ENROLL: Symbol = symbol_short!("ENROLL");
pub const NEW_PAT: Symbol = symbol_short!("NEW_PAT");
pub const UPD_REC: Symbol = symbol_short!("UPD_REC");
pub const DEL_PAT: Symbol = symbol_short!("DEL_PAT");
pub const GRT_ACC: Symbol = symbol_short!("GRT_ACC");
pub const REV_ACC: Symbol = symbol_short!("REV_ACC");
pub const SHARE: Symbol = symbol_short!("SHARE");

fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn require_not_paused(env: &Env, func: Symbol) -> Result<(), ContractError> {
    circuit_breaker::require_not_paused(env, &PauseScope::Function(func))
}

/// Authenticates the caller and returns the actor ID it is enrolled as.
fn resolve_actor(env: &Env, caller: &Address) -> Result<String, ContractError> {
    caller.require_auth();
    EnrollmentRegistry::new(env).caller_id(caller)
}

fn records(env: &Env) -> RecordService<'_, LedgerStore> {
    RecordService::new(env, LedgerStore::new(env))
}

/// Runs an entry point body and leaves a diagnostic entry if it fails.
fn logged<T>(
    env: &Env,
    user: Option<&Address>,
    operation: &str,
    body: impl FnOnce() -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    body().map_err(|error| {
        log_error(env, error, user, operation);
        error
    })
}

#[contract]
pub struct PatientRecordsContract;

#[contractimpl]
impl PatientRecordsContract {
    /// Initialize the contract with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        logged(&env, Some(&admin), "initialize", || {
            if env.storage().instance().has(&INITIALIZED) {
                return Err(ContractError::AlreadyInitialized);
            }
            admin.require_auth();

            env.storage().instance().set(&ADMIN, &admin);
            env.storage().instance().set(&INITIALIZED, &true);

            events::publish_initialized(&env, admin.clone());
            Ok(())
        })
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Writes the six demo patients, overwriting any existing entries under
    /// their IDs. Returns the number of records written.
    pub fn init_ledger(env: Env, admin: Address) -> Result<u32, ContractError> {
        logged(&env, Some(&admin), "init_ledger", || {
            require_not_paused(&env, SEED)?;
            admin.require_auth();
            require_admin(&env, &admin)?;

            let count = records(&env).seed(&genesis::demo_patients(&env))?;
            events::publish_ledger_seeded(&env, count);
            Ok(count)
        })
    }

    /// Bind `account` to `actor_id`. Patients enroll under their patient ID.
    pub fn enroll_identity(
        env: Env,
        admin: Address,
        account: Address,
        actor_id: String,
    ) -> Result<(), ContractError> {
        logged(&env, Some(&admin), "enroll_identity", || {
            require_not_paused(&env, ENROLL)?;
            admin.require_auth();
            require_admin(&env, &admin)?;

            EnrollmentRegistry::new(&env).enroll(&account, &actor_id)?;
            events::publish_identity_enrolled(&env, account.clone(), actor_id.clone());
            Ok(())
        })
    }

    pub fn resolve_identity(env: Env, account: Address) -> Result<String, ContractError> {
        EnrollmentRegistry::new(&env).caller_id(&account)
    }

    /// Open a new, empty record under the caller's own actor ID.
    pub fn create_patient(
        env: Env,
        caller: Address,
        demographics: Demographics,
    ) -> Result<(), ContractError> {
        logged(&env, Some(&caller), "create_patient", || {
            require_not_paused(&env, NEW_PAT)?;
            let actor = resolve_actor(&env, &caller)?;

            records(&env).create(&actor, &actor, demographics)?;
            events::publish_patient_created(&env, actor);
            Ok(())
        })
    }

    pub fn patient_exists(env: Env, patient_id: String) -> Result<bool, ContractError> {
        records(&env).exists(&patient_id)
    }

    /// Current diagnosis, medications and both histories.
    pub fn read_medical_info(
        env: Env,
        caller: Address,
        patient_id: String,
    ) -> Result<MedicalRecord, ContractError> {
        logged(&env, Some(&caller), "read_medical_info", || {
            let actor = resolve_actor(&env, &caller)?;
            records(&env).read_medical_info(&actor, &patient_id)
        })
    }

    pub fn read_full_info(
        env: Env,
        caller: Address,
        patient_id: String,
    ) -> Result<PatientRecord, ContractError> {
        logged(&env, Some(&caller), "read_full_info", || {
            let actor = resolve_actor(&env, &caller)?;
            records(&env).read_full_info(&actor, &patient_id)
        })
    }

    /// Record a new diagnosis and medication. Returns the history length.
    pub fn update_record(
        env: Env,
        caller: Address,
        patient_id: String,
        diagnosis: String,
        medication: String,
    ) -> Result<u32, ContractError> {
        logged(&env, Some(&caller), "update_record", || {
            require_not_paused(&env, UPD_REC)?;
            let actor = resolve_actor(&env, &caller)?;

            let history_len = records(&env).update(&actor, &patient_id, diagnosis, medication)?;
            events::publish_record_updated(&env, patient_id.clone(), actor, history_len);
            Ok(history_len)
        })
    }

    pub fn delete_patient(env: Env, caller: Address, patient_id: String) -> Result<(), ContractError> {
        logged(&env, Some(&caller), "delete_patient", || {
            require_not_paused(&env, DEL_PAT)?;
            let actor = resolve_actor(&env, &caller)?;

            records(&env).delete(&actor, &patient_id)?;
            events::publish_patient_deleted(&env, patient_id.clone());
            Ok(())
        })
    }

    /// Grant access to another actor
    pub fn grant_access(
        env: Env,
        caller: Address,
        patient_id: String,
        grantee_id: String,
    ) -> Result<(), ContractError> {
        logged(&env, Some(&caller), "grant_access", || {
            require_not_paused(&env, GRT_ACC)?;
            let actor = resolve_actor(&env, &caller)?;

            records(&env).grant(&actor, &patient_id, &grantee_id)?;
            events::publish_access_granted(&env, patient_id.clone(), grantee_id.clone());
            Ok(())
        })
    }

    /// Revoke access
    pub fn revoke_access(
        env: Env,
        caller: Address,
        patient_id: String,
        grantee_id: String,
    ) -> Result<(), ContractError> {
        logged(&env, Some(&caller), "revoke_access", || {
            require_not_paused(&env, REV_ACC)?;
            let actor = resolve_actor(&env, &caller)?;

            records(&env).revoke(&actor, &patient_id, &grantee_id)?;
            events::publish_access_revoked(&env, patient_id.clone(), grantee_id.clone());
            Ok(())
        })
    }

    /// Hand an opaque payload about a patient to another authorized actor.
    pub fn share_data(
        env: Env,
        caller: Address,
        patient_id: String,
        recipient_id: String,
        payload: Bytes,
    ) -> Result<(), ContractError> {
        logged(&env, Some(&caller), "share_data", || {
            require_not_paused(&env, SHARE)?;
            let actor = resolve_actor(&env, &caller)?;

            records(&env).share(&actor, &patient_id, &recipient_id, &payload)?;
            events::publish_data_shared(
                &env,
                patient_id.clone(),
                actor,
                recipient_id.clone(),
                payload.len(),
            );
            Ok(())
        })
    }

    /// The payload most recently shared with the caller about `patient_id`.
    pub fn read_shared_data(
        env: Env,
        caller: Address,
        patient_id: String,
    ) -> Result<Bytes, ContractError> {
        logged(&env, Some(&caller), "read_shared_data", || {
            let actor = resolve_actor(&env, &caller)?;
            records(&env).read_shared(&actor, &patient_id)
        })
    }

    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        logged(&env, Some(&caller), "pause", || {
            caller.require_auth();
            require_admin(&env, &caller)?;
            circuit_breaker::pause_contract(&env, &caller, scope);
            Ok(())
        })
    }

    pub fn resume(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        logged(&env, Some(&caller), "resume", || {
            caller.require_auth();
            require_admin(&env, &caller)?;
            circuit_breaker::resume_contract(&env, &caller, scope);
            Ok(())
        })
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        circuit_breaker::is_paused(&env, &scope)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}
