//! Owned byte buffers for secret material.

use zeroize::Zeroize;

/// What happens to a buffer's contents when it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipePolicy {
    /// Overwrite every byte with zero before the memory is freed.
    Wipe,
    /// Free the memory as-is.
    Retain,
}

impl WipePolicy {
    /// `Wipe` when `flag` is set, `Retain` otherwise.
    pub fn when(flag: bool) -> Self {
        if flag { Self::Wipe } else { Self::Retain }
    }
}

/// A byte buffer owned by a single hash call.
///
/// The bytes are copied in on construction, so the caller's original buffer
/// is never relied upon. Buffers tagged [`WipePolicy::Wipe`] are zeroed when
/// [`wipe`](Self::wipe) is called and again on drop, which also covers
/// unwinding out of the primitive.
pub struct SecureBuffer {
    bytes: Vec<u8>,
    policy: WipePolicy,
}

impl SecureBuffer {
    /// Copies `bytes` into a new buffer with the given policy.
    pub fn copy_from(bytes: &[u8], policy: WipePolicy) -> Self {
        Self {
            bytes: bytes.to_vec(),
            policy,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn policy(&self) -> WipePolicy {
        self.policy
    }

    /// Zeroes the contents in place if the policy asks for it.
    ///
    /// The length is preserved so the zeroed bytes stay inspectable until the
    /// buffer is dropped. Returns `true` if the buffer was wiped.
    pub fn wipe(&mut self) -> bool {
        match self.policy {
            WipePolicy::Wipe => {
                self.bytes.as_mut_slice().zeroize();
                true
            }
            WipePolicy::Retain => false,
        }
    }

    /// `true` when every byte is zero (vacuously so for an empty buffer).
    pub fn is_zeroed(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        if self.policy == WipePolicy::Wipe {
            self.bytes.zeroize();
        }
    }
}

impl std::fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("len", &self.bytes.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_caller_bytes() {
        let mut original = b"hunter2".to_vec();
        let buffer = SecureBuffer::copy_from(&original, WipePolicy::Wipe);
        original.fill(b'x');
        assert_eq!(buffer.as_slice(), b"hunter2");
    }

    #[test]
    fn test_wipe_zeroes_without_shrinking() {
        let mut buffer = SecureBuffer::copy_from(b"hunter2", WipePolicy::Wipe);
        assert!(buffer.wipe());
        assert_eq!(buffer.len(), 7);
        assert!(buffer.is_zeroed());
    }

    #[test]
    fn test_retain_leaves_contents() {
        let mut buffer = SecureBuffer::copy_from(b"salt", WipePolicy::Retain);
        assert!(!buffer.wipe());
        assert_eq!(buffer.as_slice(), b"salt");
        assert!(!buffer.is_zeroed());
    }

    #[test]
    fn test_policy_follows_flag() {
        assert_eq!(WipePolicy::when(true), WipePolicy::Wipe);
        assert_eq!(WipePolicy::when(false), WipePolicy::Retain);
    }

    #[test]
    fn test_debug_does_not_print_contents() {
        let buffer = SecureBuffer::copy_from(b"hunter2", WipePolicy::Wipe);
        let rendered = format!("{buffer:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("104")); // 'h'
        assert!(rendered.contains("len: 7"));
    }
}
