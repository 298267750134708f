use soroban_sdk::{contracttype, log, Address, Env, Symbol};

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: invalid input parameters or lifecycle misuse
    Validation = 1,
    /// Authorization errors: ownership and access-list failures
    Authorization = 2,
    /// Not found errors: missing patient records, grantees or shared blobs
    NotFound = 3,
    /// State conflict errors: duplicate patients or enrollments
    StateConflict = 4,
    /// Storage errors: unreadable bytes or a failing world state
    Storage = 5,
    /// System errors: circuit breaker engaged
    System = 6,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    RecordNotFound = 4,
    Corrupt = 5,
    AccessDenied = 6,
    NotInAccessList = 7,
    AccessRevoked = 8,
    GranteeNotFound = 9,
    StoreFailure = 10,
    InvalidInput = 11,
    RecordAlreadyExists = 12,
    UnknownIdentity = 13,
    IdentityAlreadyEnrolled = 14,
    Paused = 15,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidInput => ErrorCategory::Validation,
            ContractError::Unauthorized
            | ContractError::AccessDenied
            | ContractError::NotInAccessList
            | ContractError::AccessRevoked
            | ContractError::UnknownIdentity => ErrorCategory::Authorization,
            ContractError::RecordNotFound | ContractError::GranteeNotFound => {
                ErrorCategory::NotFound
            }
            ContractError::RecordAlreadyExists | ContractError::IdentityAlreadyEnrolled => {
                ErrorCategory::StateConflict
            }
            ContractError::Corrupt | ContractError::StoreFailure => ErrorCategory::Storage,
            ContractError::Paused => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidInput
            | ContractError::RecordNotFound
            | ContractError::GranteeNotFound
            | ContractError::RecordAlreadyExists => ErrorSeverity::Low,
            ContractError::Unauthorized
            | ContractError::AccessDenied
            | ContractError::NotInAccessList
            | ContractError::AccessRevoked
            | ContractError::UnknownIdentity
            | ContractError::IdentityAlreadyEnrolled => ErrorSeverity::Medium,
            ContractError::Corrupt | ContractError::StoreFailure => ErrorSeverity::High,
            ContractError::Paused => ErrorSeverity::Critical,
        }
    }

    /// Only a failing world state is worth retrying; the contract itself
    /// never retries.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::StoreFailure)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Only the patient may perform this operation",
            ContractError::RecordNotFound => "Patient record not found",
            ContractError::Corrupt => "Stored patient record could not be decoded",
            ContractError::AccessDenied => "Access denied to the requested patient record",
            ContractError::NotInAccessList => "Actor is not in the patient's access list",
            ContractError::AccessRevoked => "Actor's access to the patient record was revoked",
            ContractError::GranteeNotFound => "Grantee has no entry in the access list",
            ContractError::StoreFailure => "World state operation failed",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::RecordAlreadyExists => "Patient record already exists",
            ContractError::UnknownIdentity => "Caller is not enrolled with an actor identity",
            ContractError::IdentityAlreadyEnrolled => "Account or actor ID is already enrolled",
            ContractError::Paused => "Contract operations are currently paused",
        }
    }
}

/// Writes a diagnostic log entry for a failed operation.
///
/// Failed invocations roll back storage and events, so diagnostics are the
/// only trace left behind. They are compiled in for debug builds and the
/// `release-with-logs` profile.
pub fn log_error(env: &Env, error: ContractError, user: Option<&Address>, operation: &str) {
    let operation = Symbol::new(env, operation);
    let code = error as u32;
    let category = error.category() as u32;
    let severity = error.severity() as u32;
    match user {
        Some(user) => log!(
            env,
            "{} failed for {}: code={} category={} severity={}",
            operation,
            user.clone(),
            code,
            category,
            severity
        ),
        None => log!(
            env,
            "{} failed: code={} category={} severity={}",
            operation,
            code,
            category,
            severity
        ),
    }
}
