use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::validation;
use crate::ContractError;

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

const ENROLLED: Symbol = symbol_short!("ENROLLED");
const ACTOR: Symbol = symbol_short!("ACTOR");

/// Resolves an authenticated account to the actor ID used in access lists.
pub trait IdentityOracle {
    fn caller_id(&self, account: &Address) -> Result<String, ContractError>;
}

/// Admin-managed binding between ledger accounts and actor IDs.
///
/// Each account maps to exactly one actor ID and each actor ID to exactly
/// one account, so a patient's ID can only ever be claimed once.
pub struct EnrollmentRegistry {
    env: Env,
}

fn account_key(account: &Address) -> (Symbol, Address) {
    (ENROLLED, account.clone())
}

fn actor_key(actor_id: &String) -> (Symbol, String) {
    (ACTOR, actor_id.clone())
}

impl EnrollmentRegistry {
    pub fn new(env: &Env) -> Self {
        EnrollmentRegistry { env: env.clone() }
    }

    pub fn enroll(&self, account: &Address, actor_id: &String) -> Result<(), ContractError> {
        validation::validate_id(actor_id)?;

        let storage = self.env.storage().persistent();
        let account_key = account_key(account);
        let actor_key = actor_key(actor_id);
        if storage.has(&account_key) || storage.has(&actor_key) {
            return Err(ContractError::IdentityAlreadyEnrolled);
        }

        storage.set(&account_key, actor_id);
        storage.set(&actor_key, account);
        storage.extend_ttl(&account_key, TTL_THRESHOLD, TTL_EXTEND_TO);
        storage.extend_ttl(&actor_key, TTL_THRESHOLD, TTL_EXTEND_TO);
        Ok(())
    }

    /// The account an actor ID is bound to, if any.
    pub fn account_of(&self, actor_id: &String) -> Option<Address> {
        self.env.storage().persistent().get(&actor_key(actor_id))
    }
}

impl IdentityOracle for EnrollmentRegistry {
    fn caller_id(&self, account: &Address) -> Result<String, ContractError> {
        let key = account_key(account);
        let actor_id: String = self
            .env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::UnknownIdentity)?;
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        Ok(actor_id)
    }
}
