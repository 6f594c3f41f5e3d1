//! Error types for the hashing facade.
//!
//! Failures fall into two disjoint classes. [`ValidationError`]s are raised
//! locally before any sensitive buffer is allocated and never reach the
//! primitive. [`PrimitiveError`]s come back from the primitive as a nonzero
//! status code.

use thiserror::Error;

pub use crate::status::{PrimitiveError, PrimitiveErrorKind};

/// Any failure of [`hash`](crate::hash) or [`hash_raw`](crate::hash_raw).
#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected before invoking the primitive.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The primitive ran and returned a nonzero status.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}

impl Error {
    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Primitive(_) => None,
        }
    }

    /// Returns the primitive failure, if this is one.
    pub fn as_primitive(&self) -> Option<&PrimitiveError> {
        match self {
            Self::Primitive(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

/// A request field named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Password,
    Salt,
    Secret,
    AssociatedData,
    HashLength,
    TimeCost,
    MemoryCost,
    Parallelism,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Password => "password",
            Self::Salt => "salt",
            Self::Secret => "secret",
            Self::AssociatedData => "associated_data",
            Self::HashLength => "hash_length",
            Self::TimeCost => "time_cost",
            Self::MemoryCost => "memory_cost",
            Self::Parallelism => "parallelism",
        };
        f.write_str(name)
    }
}

/// A request was malformed. Always names the offending field or value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A textual input could not be converted to UTF-8 bytes.
    #[error("{field} is not valid UTF-8 text")]
    InvalidText { field: Field },

    /// A length or cost parameter was zero or negative.
    #[error("{field} must be strictly positive, got {value}")]
    NonPositive { field: Field, value: i64 },

    /// A length or cost parameter does not fit the primitive's 32-bit field.
    #[error("{field} must fit in 32 bits, got {value}")]
    OutOfRange { field: Field, value: i64 },

    #[error("unsupported variant '{0}'")]
    UnsupportedVariant(String),

    #[error("unsupported encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("unsupported version {0:#x}")]
    UnsupportedVersion(u32),
}

impl ValidationError {
    /// The field this error is about, when it concerns a single field.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::InvalidText { field }
            | Self::NonPositive { field, .. }
            | Self::OutOfRange { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Errors from loading cost defaults out of the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An override variable held something other than an integer.
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_names_field_and_value() {
        let err = ValidationError::NonPositive {
            field: Field::TimeCost,
            value: 0,
        };
        assert_eq!(err.to_string(), "time_cost must be strictly positive, got 0");
        assert_eq!(err.field(), Some(Field::TimeCost));
    }

    #[test]
    fn test_unsupported_version_is_hex() {
        let err = ValidationError::UnsupportedVersion(0x12);
        assert_eq!(err.to_string(), "unsupported version 0x12");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_facade_error_is_transparent() {
        let err: Error = ValidationError::UnsupportedEncoding("yaml".into()).into();
        assert_eq!(err.to_string(), "unsupported encoding 'yaml'");
        assert!(err.as_validation().is_some());
        assert!(err.as_primitive().is_none());
    }

    #[test]
    fn test_facade_error_wraps_primitive() {
        let err: Error = PrimitiveError::from_code(-6).into();
        assert!(err.as_primitive().is_some());
        assert_eq!(
            err.as_primitive().unwrap().kind(),
            PrimitiveErrorKind::SaltTooShort
        );
    }
}
