use crate::{events, ContractError};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Types ─────────────────────────────────────────────────────

/// Defines the scope of the pause mechanism
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts every mutating entry point
    Global,
    /// Halts one entry point, named by its pause symbol
    Function(Symbol),
}

// ── Storage Keys ─────────────────────────────────────────────

pub fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

pub fn function_pause_key(func: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), func.clone())
}

// ── Core Logistics ───────────────────────────────────────────

pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    match scope {
        PauseScope::Global => env
            .storage()
            .instance()
            .get(&global_pause_key())
            .unwrap_or(false),
        PauseScope::Function(func_name) => env
            .storage()
            .instance()
            .get(&function_pause_key(func_name))
            .unwrap_or(false),
    }
}

/// Fails with `Paused` if the scope or the whole contract is halted.
pub fn require_not_paused(env: &Env, scope: &PauseScope) -> Result<(), ContractError> {
    if is_paused(env, &PauseScope::Global) || is_paused(env, scope) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

fn set_paused(env: &Env, scope: &PauseScope, paused: bool) {
    match scope {
        PauseScope::Global => {
            env.storage().instance().set(&global_pause_key(), &paused);
        }
        PauseScope::Function(func_name) => {
            env.storage()
                .instance()
                .set(&function_pause_key(func_name), &paused);
        }
    }
}

/// Engages a circuit breaker for the specified scope.
/// The caller must already have been checked against the contract admin.
pub fn pause_contract(env: &Env, caller: &Address, scope: PauseScope) {
    set_paused(env, &scope, true);
    events::publish_contract_paused(env, caller.clone(), scope);
}

/// Resumes operation of a circuit breaker for the specified scope.
pub fn resume_contract(env: &Env, caller: &Address, scope: PauseScope) {
    set_paused(env, &scope, false);
    events::publish_contract_resumed(env, caller.clone(), scope);
}
