//! Argon2 password hashing behind a validated, typed facade.
//!
//! Callers describe a hash with a [`HashCandidate`]; the facade validates it,
//! copies the secret material into call-owned buffers, runs the Argon2
//! primitive, wipes the buffers and returns the digest.
//!
//! ## Operations
//!
//! | Function | Returns |
//! |----------|---------|
//! | [`hash_raw`] | [`HashResult`] with the raw digest bytes |
//! | [`hash`] | [`Encoded`] digest in `raw`, `hex` or `base64` |
//!
//! Both run on the `argon2` crate. [`Hasher::with_primitive`] accepts any
//! other [`Primitive`].
//!
//! ## Defaults
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | hash length | 32 bytes |
//! | time cost | 2 passes |
//! | memory cost | 512 KiB |
//! | parallelism | 4 lanes |
//! | variant | `id` |
//! | version | `0x13` |
//! | wipe flags | password and secret |
//! | encoding | `hex` |
//!
//! Costs should be raised as hardware improves. [`CostDefaults::from_env`]
//! lets a deployment do that without code changes.
//!
//! ## Examples
//!
//! ```rust
//! use argon_hash::{hash, generate_salt, HashCandidate, Variant, DEFAULT_SALT_LENGTH};
//!
//! let salt = generate_salt(DEFAULT_SALT_LENGTH);
//! let digest = hash(
//!     HashCandidate::new("my-secret-password", salt)
//!         .with_secret("deployment pepper")
//!         .with_variant(Variant::Id),
//! )
//! .unwrap();
//! assert_eq!(digest.as_str().unwrap().len(), 64);
//! ```

mod buffer;
pub mod config;
mod context;
mod dispatch;
mod encode;
mod error;
mod hasher;
mod primitive;
mod request;
mod salt;
pub mod status;
mod types;
pub mod validate;

pub use buffer::{SecureBuffer, WipePolicy};
pub use config::{
    CostDefaults, DEFAULT_HASH_LENGTH, DEFAULT_MEMORY_COST, DEFAULT_PARALLELISM,
    DEFAULT_SALT_LENGTH, DEFAULT_TIME_COST,
};
pub use context::{ContextInputs, HashContext, WipeReport};
pub use dispatch::{Algorithm, dispatch};
pub use encode::{Encoded, encode, to_base64, to_hex};
pub use error::{ConfigError, Error, Field, PrimitiveError, PrimitiveErrorKind, ValidationError};
pub use hasher::{HashResult, Hasher, hash, hash_raw};
pub use primitive::{Argon2Primitive, Primitive};
pub use request::{HashCandidate, HashRequest, Input};
pub use salt::generate_salt;
pub use types::{Encoding, Variant, Version, WipeFlags};
