//! Status codes returned by the primitive and their typed errors.
//!
//! The code space is the reference Argon2 library's: `0` is success and the
//! documented failures run from `-1` to `-35`. [`PrimitiveErrorKind::from_code`]
//! is total over `i32`, so a code outside that range still resolves to
//! [`PrimitiveErrorKind::Unknown`] carrying the raw value.

use thiserror::Error;

/// The success status.
pub const OK: i32 = 0;

pub const OUTPUT_PTR_NULL: i32 = -1;
pub const OUTPUT_TOO_SHORT: i32 = -2;
pub const OUTPUT_TOO_LONG: i32 = -3;
pub const PWD_TOO_SHORT: i32 = -4;
pub const PWD_TOO_LONG: i32 = -5;
pub const SALT_TOO_SHORT: i32 = -6;
pub const SALT_TOO_LONG: i32 = -7;
pub const AD_TOO_SHORT: i32 = -8;
pub const AD_TOO_LONG: i32 = -9;
pub const SECRET_TOO_SHORT: i32 = -10;
pub const SECRET_TOO_LONG: i32 = -11;
pub const TIME_TOO_SMALL: i32 = -12;
pub const TIME_TOO_LARGE: i32 = -13;
pub const MEMORY_TOO_LITTLE: i32 = -14;
pub const MEMORY_TOO_MUCH: i32 = -15;
pub const LANES_TOO_FEW: i32 = -16;
pub const LANES_TOO_MANY: i32 = -17;
pub const PWD_PTR_MISMATCH: i32 = -18;
pub const SALT_PTR_MISMATCH: i32 = -19;
pub const SECRET_PTR_MISMATCH: i32 = -20;
pub const AD_PTR_MISMATCH: i32 = -21;
pub const MEMORY_ALLOCATION_ERROR: i32 = -22;
pub const FREE_MEMORY_CBK_NULL: i32 = -23;
pub const ALLOCATE_MEMORY_CBK_NULL: i32 = -24;
pub const INCORRECT_PARAMETER: i32 = -25;
pub const INCORRECT_TYPE: i32 = -26;
pub const OUT_PTR_MISMATCH: i32 = -27;
pub const THREADS_TOO_FEW: i32 = -28;
pub const THREADS_TOO_MANY: i32 = -29;
pub const MISSING_ARGS: i32 = -30;
pub const ENCODING_FAIL: i32 = -31;
pub const DECODING_FAIL: i32 = -32;
pub const THREAD_FAIL: i32 = -33;
pub const DECODING_LENGTH_FAIL: i32 = -34;
pub const VERIFY_MISMATCH: i32 = -35;

/// Named failure reported by the primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveErrorKind {
    OutputPtrNull,
    OutputTooShort,
    OutputTooLong,
    PasswordTooShort,
    PasswordTooLong,
    SaltTooShort,
    SaltTooLong,
    AdTooShort,
    AdTooLong,
    SecretTooShort,
    SecretTooLong,
    TimeTooSmall,
    TimeTooLarge,
    MemoryTooLittle,
    MemoryTooMuch,
    LanesTooFew,
    LanesTooMany,
    PasswordPtrMismatch,
    SaltPtrMismatch,
    SecretPtrMismatch,
    AdPtrMismatch,
    MemoryAllocation,
    FreeMemoryCallbackNull,
    AllocateMemoryCallbackNull,
    IncorrectParameter,
    IncorrectType,
    OutputPtrMismatch,
    ThreadsTooFew,
    ThreadsTooMany,
    MissingArgs,
    EncodingFailed,
    DecodingFailed,
    ThreadFailed,
    DecodingLengthFailed,
    VerifyMismatch,
    /// A code the reference library does not document.
    Unknown(i32),
}

impl PrimitiveErrorKind {
    /// Resolves a status code to its kind. Total over `i32`.
    pub fn from_code(code: i32) -> Self {
        match code {
            OUTPUT_PTR_NULL => Self::OutputPtrNull,
            OUTPUT_TOO_SHORT => Self::OutputTooShort,
            OUTPUT_TOO_LONG => Self::OutputTooLong,
            PWD_TOO_SHORT => Self::PasswordTooShort,
            PWD_TOO_LONG => Self::PasswordTooLong,
            SALT_TOO_SHORT => Self::SaltTooShort,
            SALT_TOO_LONG => Self::SaltTooLong,
            AD_TOO_SHORT => Self::AdTooShort,
            AD_TOO_LONG => Self::AdTooLong,
            SECRET_TOO_SHORT => Self::SecretTooShort,
            SECRET_TOO_LONG => Self::SecretTooLong,
            TIME_TOO_SMALL => Self::TimeTooSmall,
            TIME_TOO_LARGE => Self::TimeTooLarge,
            MEMORY_TOO_LITTLE => Self::MemoryTooLittle,
            MEMORY_TOO_MUCH => Self::MemoryTooMuch,
            LANES_TOO_FEW => Self::LanesTooFew,
            LANES_TOO_MANY => Self::LanesTooMany,
            PWD_PTR_MISMATCH => Self::PasswordPtrMismatch,
            SALT_PTR_MISMATCH => Self::SaltPtrMismatch,
            SECRET_PTR_MISMATCH => Self::SecretPtrMismatch,
            AD_PTR_MISMATCH => Self::AdPtrMismatch,
            MEMORY_ALLOCATION_ERROR => Self::MemoryAllocation,
            FREE_MEMORY_CBK_NULL => Self::FreeMemoryCallbackNull,
            ALLOCATE_MEMORY_CBK_NULL => Self::AllocateMemoryCallbackNull,
            INCORRECT_PARAMETER => Self::IncorrectParameter,
            INCORRECT_TYPE => Self::IncorrectType,
            OUT_PTR_MISMATCH => Self::OutputPtrMismatch,
            THREADS_TOO_FEW => Self::ThreadsTooFew,
            THREADS_TOO_MANY => Self::ThreadsTooMany,
            MISSING_ARGS => Self::MissingArgs,
            ENCODING_FAIL => Self::EncodingFailed,
            DECODING_FAIL => Self::DecodingFailed,
            THREAD_FAIL => Self::ThreadFailed,
            DECODING_LENGTH_FAIL => Self::DecodingLengthFailed,
            VERIFY_MISMATCH => Self::VerifyMismatch,
            other => Self::Unknown(other),
        }
    }

    /// The status code this kind was resolved from.
    pub fn code(self) -> i32 {
        match self {
            Self::OutputPtrNull => OUTPUT_PTR_NULL,
            Self::OutputTooShort => OUTPUT_TOO_SHORT,
            Self::OutputTooLong => OUTPUT_TOO_LONG,
            Self::PasswordTooShort => PWD_TOO_SHORT,
            Self::PasswordTooLong => PWD_TOO_LONG,
            Self::SaltTooShort => SALT_TOO_SHORT,
            Self::SaltTooLong => SALT_TOO_LONG,
            Self::AdTooShort => AD_TOO_SHORT,
            Self::AdTooLong => AD_TOO_LONG,
            Self::SecretTooShort => SECRET_TOO_SHORT,
            Self::SecretTooLong => SECRET_TOO_LONG,
            Self::TimeTooSmall => TIME_TOO_SMALL,
            Self::TimeTooLarge => TIME_TOO_LARGE,
            Self::MemoryTooLittle => MEMORY_TOO_LITTLE,
            Self::MemoryTooMuch => MEMORY_TOO_MUCH,
            Self::LanesTooFew => LANES_TOO_FEW,
            Self::LanesTooMany => LANES_TOO_MANY,
            Self::PasswordPtrMismatch => PWD_PTR_MISMATCH,
            Self::SaltPtrMismatch => SALT_PTR_MISMATCH,
            Self::SecretPtrMismatch => SECRET_PTR_MISMATCH,
            Self::AdPtrMismatch => AD_PTR_MISMATCH,
            Self::MemoryAllocation => MEMORY_ALLOCATION_ERROR,
            Self::FreeMemoryCallbackNull => FREE_MEMORY_CBK_NULL,
            Self::AllocateMemoryCallbackNull => ALLOCATE_MEMORY_CBK_NULL,
            Self::IncorrectParameter => INCORRECT_PARAMETER,
            Self::IncorrectType => INCORRECT_TYPE,
            Self::OutputPtrMismatch => OUT_PTR_MISMATCH,
            Self::ThreadsTooFew => THREADS_TOO_FEW,
            Self::ThreadsTooMany => THREADS_TOO_MANY,
            Self::MissingArgs => MISSING_ARGS,
            Self::EncodingFailed => ENCODING_FAIL,
            Self::DecodingFailed => DECODING_FAIL,
            Self::ThreadFailed => THREAD_FAIL,
            Self::DecodingLengthFailed => DECODING_LENGTH_FAIL,
            Self::VerifyMismatch => VERIFY_MISMATCH,
            Self::Unknown(code) => code,
        }
    }
}

impl std::fmt::Display for PrimitiveErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::OutputPtrNull => "output pointer is null",
            Self::OutputTooShort => "output is too short",
            Self::OutputTooLong => "output is too long",
            Self::PasswordTooShort => "password is too short",
            Self::PasswordTooLong => "password is too long",
            Self::SaltTooShort => "salt is too short",
            Self::SaltTooLong => "salt is too long",
            Self::AdTooShort => "associated data is too short",
            Self::AdTooLong => "associated data is too long",
            Self::SecretTooShort => "secret is too short",
            Self::SecretTooLong => "secret is too long",
            Self::TimeTooSmall => "time cost is too small",
            Self::TimeTooLarge => "time cost is too large",
            Self::MemoryTooLittle => "memory cost is too small",
            Self::MemoryTooMuch => "memory cost is too large",
            Self::LanesTooFew => "too few lanes",
            Self::LanesTooMany => "too many lanes",
            Self::PasswordPtrMismatch => "password pointer is null but length is not 0",
            Self::SaltPtrMismatch => "salt pointer is null but length is not 0",
            Self::SecretPtrMismatch => "secret pointer is null but length is not 0",
            Self::AdPtrMismatch => "associated data pointer is null but length is not 0",
            Self::MemoryAllocation => "memory allocation error",
            Self::FreeMemoryCallbackNull => "the free memory callback is null",
            Self::AllocateMemoryCallbackNull => "the allocate memory callback is null",
            Self::IncorrectParameter => "incorrect parameter",
            Self::IncorrectType => "there is no such version of Argon2",
            Self::OutputPtrMismatch => "output pointer mismatch",
            Self::ThreadsTooFew => "not enough threads",
            Self::ThreadsTooMany => "too many threads",
            Self::MissingArgs => "missing arguments",
            Self::EncodingFailed => "encoding failed",
            Self::DecodingFailed => "decoding failed",
            Self::ThreadFailed => "threading failure",
            Self::DecodingLengthFailed => "some of the encoded parameters are too long or too short",
            Self::VerifyMismatch => "the password does not match the supplied hash",
            Self::Unknown(_) => "primitive failure",
        };
        f.write_str(message)
    }
}

/// A nonzero status from the primitive, kept with its raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("argon2 primitive failed: {kind} (status {code})")]
pub struct PrimitiveError {
    kind: PrimitiveErrorKind,
    code: i32,
}

impl PrimitiveError {
    /// Builds the error for a status code.
    pub fn from_code(code: i32) -> Self {
        Self {
            kind: PrimitiveErrorKind::from_code(code),
            code,
        }
    }

    pub fn kind(&self) -> PrimitiveErrorKind {
        self.kind
    }

    /// The raw status code, as returned by the primitive.
    pub fn code(&self) -> i32 {
        self.code
    }
}

/// Turns a primitive status into a `Result`. Zero is success; every other
/// value is forwarded unmodified into a [`PrimitiveError`].
pub fn check(status: i32) -> Result<(), PrimitiveError> {
    if status == OK {
        Ok(())
    } else {
        Err(PrimitiveError::from_code(status))
    }
}
