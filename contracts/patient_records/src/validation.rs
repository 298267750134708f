use soroban_sdk::{Bytes, String};

use crate::record::Demographics;
use crate::ContractError;

pub const MAX_ID_LEN: u32 = 64;

const MIN_NAME_LEN: u32 = 1;
const MAX_NAME_LEN: u32 = 64;
const MAX_FIELD_LEN: u32 = 128;
const MAX_CLINICAL_LEN: u32 = 256;
const MAX_AGE: u32 = 150;

pub const MAX_PAYLOAD_LEN: u32 = 16_384;

/// Validate a patient or actor identifier.
/// IDs are 1..=MAX_ID_LEN bytes of `[A-Za-z0-9.-]`. The underscore is
/// reserved as the separator of shared-data keys.
pub fn validate_id(id: &String) -> Result<(), ContractError> {
    let len = id.len();
    if !(1..=MAX_ID_LEN).contains(&len) {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; MAX_ID_LEN as usize];
    id.copy_into_slice(&mut buf[..len as usize]);

    if buf[..len as usize]
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
    {
        Ok(())
    } else {
        Err(ContractError::InvalidInput)
    }
}

/// Bounded byte length, no ASCII control characters. UTF-8 text beyond
/// ASCII is accepted.
fn validate_text(value: &String, min: u32, max: u32) -> Result<(), ContractError> {
    let len = value.len();
    if len < min || len > max {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; MAX_CLINICAL_LEN as usize];
    value.copy_into_slice(&mut buf[..len as usize]);

    for &b in &buf[..len as usize] {
        if b < 0x20 || b == 0x7f {
            return Err(ContractError::InvalidInput);
        }
    }

    Ok(())
}

pub fn validate_demographics(demographics: &Demographics) -> Result<(), ContractError> {
    validate_text(&demographics.name, MIN_NAME_LEN, MAX_NAME_LEN)?;
    validate_text(&demographics.gender, 0, MAX_FIELD_LEN)?;
    validate_text(&demographics.bloodType, 0, MAX_FIELD_LEN)?;
    validate_text(&demographics.allergies, 0, MAX_FIELD_LEN)?;
    if demographics.age > MAX_AGE {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Diagnosis and medication entries appended to the histories.
pub fn validate_clinical_entry(entry: &String) -> Result<(), ContractError> {
    validate_text(entry, 1, MAX_CLINICAL_LEN)
}

pub fn validate_payload(payload: &Bytes) -> Result<(), ContractError> {
    if payload.is_empty() || payload.len() > MAX_PAYLOAD_LEN {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_validate_id() {
        let env = Env::default();

        assert_eq!(validate_id(&String::from_str(&env, "Patient1")), Ok(()));
        assert_eq!(validate_id(&String::from_str(&env, "dr.jane-doe")), Ok(()));

        assert_eq!(
            validate_id(&String::from_str(&env, "")),
            Err(ContractError::InvalidInput)
        );
        // Underscore would make shared-data keys ambiguous
        assert_eq!(
            validate_id(&String::from_str(&env, "Patient1_Doctor1")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            validate_id(&String::from_str(&env, "Doctor 1")),
            Err(ContractError::InvalidInput)
        );

        let long_id = "a".repeat(65);
        assert_eq!(
            validate_id(&String::from_str(&env, &long_id)),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn test_validate_clinical_entry() {
        let env = Env::default();

        assert_eq!(
            validate_clinical_entry(&String::from_str(&env, "Type 2 diabetes, controlled")),
            Ok(())
        );
        assert_eq!(
            validate_clinical_entry(&String::from_str(&env, "")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            validate_clinical_entry(&String::from_str(&env, "flu\naspirin")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            validate_clinical_entry(&String::from_str(&env, "flu\u{7f}")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            validate_clinical_entry(&String::from_str(&env, "Lungenentzündung")),
            Ok(())
        );

        let long_entry = "x".repeat(257);
        assert_eq!(
            validate_clinical_entry(&String::from_str(&env, &long_entry)),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn test_validate_demographics() {
        let env = Env::default();
        let mut demographics = Demographics {
            name: String::from_str(&env, "Jane Roe"),
            age: 42,
            gender: String::from_str(&env, "female"),
            bloodType: String::from_str(&env, "O-"),
            allergies: String::from_str(&env, ""),
        };
        assert_eq!(validate_demographics(&demographics), Ok(()));

        demographics.name = String::from_str(&env, "José Müller");
        assert_eq!(validate_demographics(&demographics), Ok(()));

        demographics.age = 151;
        assert_eq!(
            validate_demographics(&demographics),
            Err(ContractError::InvalidInput)
        );

        demographics.age = 42;
        demographics.name = String::from_str(&env, "");
        assert_eq!(
            validate_demographics(&demographics),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn test_validate_payload() {
        let env = Env::default();

        assert_eq!(validate_payload(&Bytes::from_slice(&env, b"lab-42")), Ok(()));
        assert_eq!(
            validate_payload(&Bytes::new(&env)),
            Err(ContractError::InvalidInput)
        );

        let oversized = std::vec![0u8; MAX_PAYLOAD_LEN as usize + 1];
        assert_eq!(
            validate_payload(&Bytes::from_slice(&env, &oversized)),
            Err(ContractError::InvalidInput)
        );
    }
}
