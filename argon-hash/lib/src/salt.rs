//! Random salt generation.

use rand::RngCore;
use rand::rngs::OsRng;

/// Returns `len` bytes from the operating system's CSPRNG.
///
/// Salts must be unique per hash. Nothing downstream checks this, so
/// callers without their own salt source should use this function.
///
/// ## Examples
///
/// ```rust
/// use argon_hash::{generate_salt, DEFAULT_SALT_LENGTH};
///
/// let salt = generate_salt(DEFAULT_SALT_LENGTH);
/// assert_eq!(salt.len(), 16);
/// ```
pub fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    OsRng.fill_bytes(&mut salt);
    salt
}
