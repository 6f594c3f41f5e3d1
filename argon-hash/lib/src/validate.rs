//! Request validation.
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. byte fields convert from their representation (text as UTF-8)
//! 2. `hash_length`, `time_cost`, `memory_cost` and `parallelism` are
//!    strictly positive and fit in 32 bits
//! 3. the variant is one of `d`, `i`, `id`
//! 4. the encoding is one of `raw`, `hex`, `base64` (only when checked)
//! 5. the version is `0x10` or `0x13`
//!
//! Empty secrets and associated data normalize to absent. The salt is never
//! inspected for length or uniqueness; that is the caller's job.

use std::ffi::OsString;

use zeroize::{Zeroize, Zeroizing};

use crate::error::{Field, ValidationError};
use crate::request::{HashCandidate, HashRequest, Input};
use crate::types::{Encoding, Variant, Version};

/// Whether the caller expects an encoded string back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingCheck {
    /// Validate the encoding field (used by `hash`).
    Required,
    /// Leave the encoding field alone (used by `hash_raw`).
    Skip,
}

/// Validates and normalizes a candidate. Never invokes the primitive.
///
/// ## Examples
///
/// ```
/// use argon_hash::{HashCandidate, ValidationError};
/// use argon_hash::validate::{validate, EncodingCheck};
///
/// let err = validate(
///     HashCandidate::new("pw", "somesalt").with_variant("x"),
///     EncodingCheck::Required,
/// )
/// .unwrap_err();
/// assert_eq!(err, ValidationError::UnsupportedVariant("x".into()));
/// ```
pub fn validate(
    candidate: HashCandidate,
    check: EncodingCheck,
) -> Result<HashRequest, ValidationError> {
    let HashCandidate {
        password,
        salt,
        secret,
        associated_data,
        hash_length,
        time_cost,
        memory_cost,
        parallelism,
        variant,
        version,
        encoding,
        wipe,
    } = candidate;

    let password = Zeroizing::new(into_bytes(password, Field::Password)?);
    let salt = into_bytes(salt, Field::Salt)?;
    let secret = secret
        .map(|input| into_bytes(input, Field::Secret).map(Zeroizing::new))
        .transpose()?;
    let associated_data = associated_data
        .map(|input| into_bytes(input, Field::AssociatedData))
        .transpose()?;

    let hash_length = positive_u32(hash_length, Field::HashLength)?;
    let time_cost = positive_u32(time_cost, Field::TimeCost)?;
    let memory_cost = positive_u32(memory_cost, Field::MemoryCost)?;
    let parallelism = positive_u32(parallelism, Field::Parallelism)?;

    let variant: Variant = variant.parse()?;

    let encoding = match check {
        EncodingCheck::Required => Some(encoding.parse::<Encoding>()?),
        EncodingCheck::Skip => None,
    };

    let version = Version::try_from(version)?;

    Ok(HashRequest {
        password,
        salt,
        secret: secret.filter(|s| !s.is_empty()),
        associated_data: associated_data.filter(|ad| !ad.is_empty()),
        hash_length,
        time_cost,
        memory_cost,
        parallelism,
        variant,
        version,
        wipe,
        encoding,
    })
}

fn into_bytes(input: Input, field: Field) -> Result<Vec<u8>, ValidationError> {
    match input {
        Input::Bytes(bytes) => Ok(bytes),
        Input::Text(text) => Ok(text.into_bytes()),
        Input::OsText(text) => text.into_string().map(String::into_bytes).map_err(|rejected| {
            scrub(rejected);
            ValidationError::InvalidText { field }
        }),
    }
}

/// Zeroes rejected platform text, which may be secret material, and returns
/// the zeroed bytes still at their original length.
fn scrub(rejected: OsString) -> Vec<u8> {
    let mut bytes = rejected.into_encoded_bytes();
    bytes.as_mut_slice().zeroize();
    bytes
}

fn positive_u32(value: i64, field: Field) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}
