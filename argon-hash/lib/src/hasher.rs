//! The hashing facade.
//!
//! Two operations sit on top of the primitive:
//!
//! - [`hash_raw`] validates a candidate, runs the primitive and returns the
//!   digest bytes.
//! - [`hash`] does the same and renders the digest in the candidate's
//!   encoding (`raw`, `hex` or `base64`).
//!
//! Every call owns its buffers. The password and secret are copied into a
//! [`HashContext`], wiped according to the candidate's [`WipeFlags`] once
//! the primitive returns (on failure as well as success), and never kept.
//!
//! ## Examples
//!
//! ```rust
//! use argon_hash::{hash, hash_raw, HashCandidate};
//!
//! let candidate = HashCandidate::new("correct horse", "battery staple 16B")
//!     .with_time_cost(2)
//!     .with_memory_cost(512)
//!     .with_parallelism(2);
//!
//! let digest = hash_raw(candidate.clone()).unwrap();
//! assert_eq!(digest.len(), 32);
//!
//! let hex = hash(candidate).unwrap();
//! assert_eq!(hex.as_str().unwrap().len(), 64);
//! ```
//!
//! [`WipeFlags`]: crate::WipeFlags

use tracing::{debug, instrument};

use crate::context::HashContext;
use crate::dispatch::dispatch;
use crate::encode::{Encoded, encode};
use crate::error::Error;
use crate::primitive::{Argon2Primitive, Primitive};
use crate::request::{HashCandidate, HashRequest};
use crate::status::PrimitiveError;
use crate::types::Encoding;
use crate::validate::{EncodingCheck, validate};

/// A successful digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashResult {
    digest: Vec<u8>,
    encoding: Encoding,
}

impl HashResult {
    /// The raw digest, exactly `hash_length` bytes.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn len(&self) -> usize {
        self.digest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digest.is_empty()
    }

    /// The encoding applied to the returned representation (always `Raw`
    /// for `hash_raw`).
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn into_digest(self) -> Vec<u8> {
        self.digest
    }

    /// Renders the digest in another encoding.
    pub fn encode(self, encoding: Encoding) -> Encoded {
        encode(self.digest, encoding)
    }
}

/// The facade over a [`Primitive`].
///
/// Holds no per-call state, so one `Hasher` can serve concurrent callers.
/// [`Hasher::new`] uses [`Argon2Primitive`]; tests and alternative
/// backends can supply their own primitive with [`Hasher::with_primitive`].
#[derive(Debug, Clone, Default)]
pub struct Hasher<P = Argon2Primitive> {
    primitive: P,
}

impl Hasher {
    pub fn new() -> Self {
        Self {
            primitive: Argon2Primitive,
        }
    }
}

impl<P: Primitive> Hasher<P> {
    pub fn with_primitive(primitive: P) -> Self {
        Self { primitive }
    }

    /// Hashes a candidate and returns the digest bytes.
    ///
    /// The candidate's encoding is not checked.
    ///
    /// ## Errors
    ///
    /// Returns `Error::Validation` if the candidate is malformed; the
    /// primitive is not invoked in that case. Returns `Error::Primitive` if
    /// the primitive rejects the parameters or fails.
    #[instrument(level = "debug", skip_all)]
    pub fn hash_raw(&self, candidate: HashCandidate) -> Result<HashResult, Error> {
        let request = validate(candidate, EncodingCheck::Skip)
            .inspect_err(|err| debug!(%err, "rejected hash request"))?;
        let digest = self.compute(request)?;

        Ok(HashResult {
            digest,
            encoding: Encoding::Raw,
        })
    }

    /// Hashes a candidate and renders the digest in its encoding.
    ///
    /// ## Errors
    ///
    /// As [`hash_raw`](Self::hash_raw), plus `Error::Validation` for an
    /// encoding other than `raw`, `hex` or `base64`.
    #[instrument(level = "debug", skip_all)]
    pub fn hash(&self, candidate: HashCandidate) -> Result<Encoded, Error> {
        let request = validate(candidate, EncodingCheck::Required)
            .inspect_err(|err| debug!(%err, "rejected hash request"))?;
        let encoding = request.encoding().unwrap_or_default();
        let digest = self.compute(request)?;

        Ok(encode(digest, encoding))
    }

    fn compute(&self, request: HashRequest) -> Result<Vec<u8>, PrimitiveError> {
        let variant = request.variant();
        let expected_len = request.hash_length() as usize;
        debug!(
            %variant,
            version = request.version().number(),
            hash_length = request.hash_length(),
            time_cost = request.time_cost(),
            memory_cost = request.memory_cost(),
            parallelism = request.parallelism(),
            has_secret = request.has_secret(),
            "hashing"
        );

        let mut ctx = HashContext::assemble(request);
        let outcome = dispatch(&self.primitive, &mut ctx, variant);
        let (digest, report) = ctx.release();
        debug!(
            password_wiped = report.password_wiped,
            secret_wiped = ?report.secret_wiped,
            "released hash context"
        );

        outcome?;
        debug_assert_eq!(digest.len(), expected_len);
        Ok(digest)
    }
}

/// Hashes a candidate with the `argon2` crate and returns the digest bytes.
///
/// ## Examples
///
/// ```rust
/// use argon_hash::{hash_raw, HashCandidate};
///
/// let a = hash_raw(HashCandidate::new("pw", "somesaltvalue123").with_memory_cost(64)).unwrap();
/// let b = hash_raw(HashCandidate::new("pw", "somesaltvalue123").with_memory_cost(64)).unwrap();
/// assert_eq!(a, b);
/// ```
///
/// ## Errors
///
/// See [`Hasher::hash_raw`].
pub fn hash_raw(candidate: HashCandidate) -> Result<HashResult, Error> {
    Hasher::new().hash_raw(candidate)
}

/// Hashes a candidate with the `argon2` crate and encodes the digest.
///
/// ## Examples
///
/// ```rust
/// use argon_hash::{hash, Encoding, HashCandidate};
///
/// let encoded = hash(
///     HashCandidate::new("pw", "somesaltvalue123")
///         .with_memory_cost(64)
///         .with_encoding(Encoding::Base64),
/// )
/// .unwrap();
/// assert_eq!(encoded.as_str().unwrap().len(), 44);
/// ```
///
/// ## Errors
///
/// See [`Hasher::hash`].
pub fn hash(candidate: HashCandidate) -> Result<Encoded, Error> {
    Hasher::new().hash(candidate)
}
