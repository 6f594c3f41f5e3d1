//! Caller-facing request types.
//!
//! A [`HashCandidate`] is whatever the caller handed us: loosely typed,
//! possibly invalid. [`validate`](crate::validate::validate) turns it into a
//! [`HashRequest`], which is immutable and only exists for one call.

use std::ffi::OsString;

use zeroize::Zeroizing;

use crate::config::{
    DEFAULT_HASH_LENGTH, DEFAULT_MEMORY_COST, DEFAULT_PARALLELISM, DEFAULT_TIME_COST,
};
use crate::types::{Encoding, Variant, Version, WipeFlags};

/// A byte-bearing request field in one of its accepted representations.
#[derive(Clone)]
pub enum Input {
    /// Binary data, used as-is.
    Bytes(Vec<u8>),
    /// Text, hashed as its UTF-8 bytes.
    Text(String),
    /// Platform text (argv, environment). Must be valid UTF-8.
    OsText(OsString),
}

impl Input {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bytes(bytes) => bytes.is_empty(),
            Self::Text(text) => text.is_empty(),
            Self::OsText(text) => text.is_empty(),
        }
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Bytes(_) => "Bytes",
            Self::Text(_) => "Text",
            Self::OsText(_) => "OsText",
        };
        write!(f, "{kind}(<redacted>)")
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Input {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Input {
    fn from(bytes: &[u8; N]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<OsString> for Input {
    fn from(text: OsString) -> Self {
        Self::OsText(text)
    }
}

/// An unvalidated hash request.
///
/// Costs are signed so that zero and negative values reach the validator
/// and get reported, instead of wrapping silently at the call site.
///
/// ## Examples
///
/// ```
/// use argon_hash::{HashCandidate, Variant};
///
/// let candidate = HashCandidate::new("correct horse", "battery staple 16B")
///     .with_variant(Variant::Id)
///     .with_time_cost(2)
///     .with_memory_cost(512)
///     .with_parallelism(2);
/// assert_eq!(candidate.hash_length(), 32);
/// ```
#[derive(Debug, Clone)]
pub struct HashCandidate {
    pub(crate) password: Input,
    pub(crate) salt: Input,
    pub(crate) secret: Option<Input>,
    pub(crate) associated_data: Option<Input>,
    pub(crate) hash_length: i64,
    pub(crate) time_cost: i64,
    pub(crate) memory_cost: i64,
    pub(crate) parallelism: i64,
    pub(crate) variant: String,
    pub(crate) version: u32,
    pub(crate) encoding: String,
    pub(crate) wipe: WipeFlags,
}

impl HashCandidate {
    /// Starts a candidate with the default costs, `id` variant, version
    /// `0x13`, hex encoding and both wipe flags set.
    pub fn new(password: impl Into<Input>, salt: impl Into<Input>) -> Self {
        Self {
            password: password.into(),
            salt: salt.into(),
            secret: None,
            associated_data: None,
            hash_length: i64::from(DEFAULT_HASH_LENGTH),
            time_cost: i64::from(DEFAULT_TIME_COST),
            memory_cost: i64::from(DEFAULT_MEMORY_COST),
            parallelism: i64::from(DEFAULT_PARALLELISM),
            variant: Variant::default().to_string(),
            version: Version::default().number(),
            encoding: Encoding::default().to_string(),
            wipe: WipeFlags::default(),
        }
    }

    /// Folds a pepper into the hash. An empty secret is the same as none.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<Input>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    #[must_use]
    pub fn with_associated_data(mut self, data: impl Into<Input>) -> Self {
        self.associated_data = Some(data.into());
        self
    }

    #[must_use]
    pub fn with_hash_length(mut self, hash_length: i64) -> Self {
        self.hash_length = hash_length;
        self
    }

    #[must_use]
    pub fn with_time_cost(mut self, time_cost: i64) -> Self {
        self.time_cost = time_cost;
        self
    }

    /// Memory cost in KiB.
    #[must_use]
    pub fn with_memory_cost(mut self, memory_cost: i64) -> Self {
        self.memory_cost = memory_cost;
        self
    }

    /// Lane count, which is also the thread count requested from the primitive.
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: i64) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Accepts a [`Variant`] or its short name (`"d"`, `"i"`, `"id"`).
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    /// Accepts a [`Version`] or its raw protocol number.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<u32>) -> Self {
        self.version = version.into();
        self
    }

    /// Accepts an [`Encoding`] or its name. Ignored by `hash_raw`.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    #[must_use]
    pub fn with_wipe(mut self, wipe: WipeFlags) -> Self {
        self.wipe = wipe;
        self
    }

    pub fn hash_length(&self) -> i64 {
        self.hash_length
    }

    pub fn time_cost(&self) -> i64 {
        self.time_cost
    }

    pub fn memory_cost(&self) -> i64 {
        self.memory_cost
    }

    pub fn parallelism(&self) -> i64 {
        self.parallelism
    }
}

/// A validated request, consumed by exactly one hash call.
///
/// Byte fields are held in [`Zeroizing`] storage, so the normalized copies
/// are cleared when the request is dropped regardless of the wipe flags.
pub struct HashRequest {
    pub(crate) password: Zeroizing<Vec<u8>>,
    pub(crate) salt: Vec<u8>,
    pub(crate) secret: Option<Zeroizing<Vec<u8>>>,
    pub(crate) associated_data: Option<Vec<u8>>,
    pub(crate) hash_length: u32,
    pub(crate) time_cost: u32,
    pub(crate) memory_cost: u32,
    pub(crate) parallelism: u32,
    pub(crate) variant: Variant,
    pub(crate) version: Version,
    pub(crate) wipe: WipeFlags,
    pub(crate) encoding: Option<Encoding>,
}

impl HashRequest {
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    pub fn associated_data(&self) -> Option<&[u8]> {
        self.associated_data.as_deref()
    }

    pub fn hash_length(&self) -> u32 {
        self.hash_length
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn wipe(&self) -> WipeFlags {
        self.wipe
    }

    /// The output encoding, present only when validation checked it.
    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }
}

impl std::fmt::Debug for HashRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRequest")
            .field("password_len", &self.password.len())
            .field("salt_len", &self.salt.len())
            .field("has_secret", &self.secret.is_some())
            .field("hash_length", &self.hash_length)
            .field("time_cost", &self.time_cost)
            .field("memory_cost", &self.memory_cost)
            .field("parallelism", &self.parallelism)
            .field("variant", &self.variant)
            .field("version", &self.version)
            .field("wipe", &self.wipe)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}
