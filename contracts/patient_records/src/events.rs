use crate::circuit_breaker::PauseScope;
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when the genesis patients are written.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerSeededEvent {
    pub count: u32,
    pub timestamp: u64,
}

/// Event published when an account is bound to an actor ID.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityEnrolledEvent {
    pub account: Address,
    pub actor_id: String,
    pub timestamp: u64,
}

/// Event published when a patient opens their own record.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientCreatedEvent {
    pub patient_id: String,
    pub timestamp: u64,
}

/// Event published when a diagnosis and medication are recorded.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordUpdatedEvent {
    pub patient_id: String,
    pub actor_id: String,
    pub history_len: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientDeletedEvent {
    pub patient_id: String,
    pub timestamp: u64,
}

/// Event published when access is granted to a record.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub patient_id: String,
    pub grantee_id: String,
    pub timestamp: u64,
}

/// Event published when access is revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub patient_id: String,
    pub grantee_id: String,
    pub timestamp: u64,
}

/// Event published when data is shared with another actor. The payload
/// itself is not repeated in the event.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataSharedEvent {
    pub patient_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub size: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CircuitBreakerEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_ledger_seeded(env: &Env, count: u32) {
    let topics = (symbol_short!("SEEDED"),);
    let data = LedgerSeededEvent {
        count,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_identity_enrolled(env: &Env, account: Address, actor_id: String) {
    let topics = (symbol_short!("ENROLL"), account.clone());
    let data = IdentityEnrolledEvent {
        account,
        actor_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_patient_created(env: &Env, patient_id: String) {
    let topics = (symbol_short!("PAT_NEW"), patient_id.clone());
    let data = PatientCreatedEvent {
        patient_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_record_updated(env: &Env, patient_id: String, actor_id: String, history_len: u32) {
    let topics = (symbol_short!("REC_UPD"), patient_id.clone(), actor_id.clone());
    let data = RecordUpdatedEvent {
        patient_id,
        actor_id,
        history_len,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_patient_deleted(env: &Env, patient_id: String) {
    let topics = (symbol_short!("PAT_DEL"), patient_id.clone());
    let data = PatientDeletedEvent {
        patient_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_granted(env: &Env, patient_id: String, grantee_id: String) {
    let topics = (symbol_short!("ACC_GRT"), patient_id.clone(), grantee_id.clone());
    let data = AccessGrantedEvent {
        patient_id,
        grantee_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_revoked(env: &Env, patient_id: String, grantee_id: String) {
    let topics = (symbol_short!("ACC_REV"), patient_id.clone(), grantee_id.clone());
    let data = AccessRevokedEvent {
        patient_id,
        grantee_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_data_shared(
    env: &Env,
    patient_id: String,
    sender_id: String,
    recipient_id: String,
    size: u32,
) {
    let topics = (
        symbol_short!("SHARED"),
        patient_id.clone(),
        recipient_id.clone(),
    );
    let data = DataSharedEvent {
        patient_id,
        sender_id,
        recipient_id,
        size,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_paused(env: &Env, caller: Address, scope: PauseScope) {
    let topics = (symbol_short!("PAUSED"), caller.clone());
    let data = CircuitBreakerEvent {
        caller,
        scope,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_resumed(env: &Env, caller: Address, scope: PauseScope) {
    let topics = (symbol_short!("RESUMED"), caller.clone());
    let data = CircuitBreakerEvent {
        caller,
        scope,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
