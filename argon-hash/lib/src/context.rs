//! The invocation record handed to the primitive.

use crate::buffer::{SecureBuffer, WipePolicy};
use crate::request::HashRequest;
use crate::types::WipeFlags;

/// Buffers and cost parameters for a single primitive invocation.
///
/// A context is assembled from one [`HashRequest`] and ended by
/// [`release`](Self::release), which consumes it. Sensitive buffers are
/// wiped there, and again on drop if the call unwinds before release.
#[derive(Debug)]
pub struct HashContext {
    out: Vec<u8>,
    password: SecureBuffer,
    salt: SecureBuffer,
    secret: Option<SecureBuffer>,
    associated_data: Option<SecureBuffer>,
    t_cost: u32,
    m_cost: u32,
    lanes: u32,
    threads: u32,
    version: u32,
    flags: WipeFlags,
}

/// Read-only view of a context's inputs, borrowed alongside its output.
///
/// Absent secret and associated data show up as empty slices.
#[derive(Debug, Clone, Copy)]
pub struct ContextInputs<'a> {
    pub password: &'a [u8],
    pub salt: &'a [u8],
    pub secret: &'a [u8],
    pub associated_data: &'a [u8],
    pub t_cost: u32,
    pub m_cost: u32,
    pub lanes: u32,
    pub threads: u32,
    pub version: u32,
    pub flags: WipeFlags,
}

/// State of the sensitive buffers right after release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WipeReport {
    /// Whether every password byte is now zero.
    pub password_wiped: bool,
    /// Same for the secret; `None` when no secret was supplied.
    pub secret_wiped: Option<bool>,
}

impl HashContext {
    /// Copies the request's bytes into context-owned buffers.
    ///
    /// The output buffer is `hash_length` zero bytes and is never wiped.
    /// Lanes and threads both take the request's parallelism.
    pub fn assemble(request: HashRequest) -> Self {
        let flags = request.wipe;
        let password = SecureBuffer::copy_from(
            &request.password,
            WipePolicy::when(flags.contains(WipeFlags::CLEAR_PASSWORD)),
        );
        let secret = request.secret.as_deref().map(|secret| {
            SecureBuffer::copy_from(
                secret,
                WipePolicy::when(flags.contains(WipeFlags::CLEAR_SECRET)),
            )
        });

        Self {
            out: vec![0; request.hash_length as usize],
            password,
            salt: SecureBuffer::copy_from(&request.salt, WipePolicy::Retain),
            secret,
            associated_data: request
                .associated_data
                .as_deref()
                .map(|ad| SecureBuffer::copy_from(ad, WipePolicy::Retain)),
            t_cost: request.time_cost,
            m_cost: request.memory_cost,
            lanes: request.parallelism,
            threads: request.parallelism,
            version: request.version.number(),
            flags,
        }
    }

    /// Splits the context into its inputs and the output buffer, so a
    /// primitive can read one while writing the other.
    pub fn split(&mut self) -> (ContextInputs<'_>, &mut [u8]) {
        let inputs = ContextInputs {
            password: self.password.as_slice(),
            salt: self.salt.as_slice(),
            secret: self
                .secret
                .as_ref()
                .map(SecureBuffer::as_slice)
                .unwrap_or_default(),
            associated_data: self
                .associated_data
                .as_ref()
                .map(SecureBuffer::as_slice)
                .unwrap_or_default(),
            t_cost: self.t_cost,
            m_cost: self.m_cost,
            lanes: self.lanes,
            threads: self.threads,
            version: self.version,
            flags: self.flags,
        };
        (inputs, &mut self.out)
    }

    pub fn output_len(&self) -> usize {
        self.out.len()
    }

    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    pub fn threads(&self) -> u32 {
        self.threads
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Wipes flagged buffers and hands back the output.
    ///
    /// Runs on success and on primitive failure alike; the report reflects
    /// the buffers after wiping, before they are freed.
    pub fn release(mut self) -> (Vec<u8>, WipeReport) {
        self.password.wipe();
        if let Some(secret) = self.secret.as_mut() {
            secret.wipe();
        }

        let report = WipeReport {
            password_wiped: self.password.is_zeroed(),
            secret_wiped: self.secret.as_ref().map(SecureBuffer::is_zeroed),
        };
        (std::mem::take(&mut self.out), report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HashCandidate;
    use crate::validate::{EncodingCheck, validate};

    fn request(candidate: HashCandidate) -> HashRequest {
        validate(candidate, EncodingCheck::Skip).unwrap()
    }

    #[test]
    fn test_assembles_costs_and_lanes() {
        let mut ctx = HashContext::assemble(request(
            HashCandidate::new("pw", "somesalt")
                .with_hash_length(24)
                .with_time_cost(3)
                .with_memory_cost(64)
                .with_parallelism(2),
        ));
        assert_eq!(ctx.output_len(), 24);
        assert_eq!(ctx.lanes(), 2);
        assert_eq!(ctx.threads(), 2);
        assert_eq!(ctx.version(), 0x13);

        let (inputs, out) = ctx.split();
        assert_eq!(inputs.password, b"pw");
        assert_eq!(inputs.salt, b"somesalt");
        assert_eq!(inputs.t_cost, 3);
        assert_eq!(inputs.m_cost, 64);
        assert!(out.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_absent_secret_is_empty_slice() {
        let mut ctx = HashContext::assemble(request(HashCandidate::new("pw", "somesalt")));
        let (inputs, _) = ctx.split();
        assert!(inputs.secret.is_empty());
        assert!(inputs.associated_data.is_empty());
    }

    #[test]
    fn test_release_wipes_flagged_buffers() {
        let ctx = HashContext::assemble(request(
            HashCandidate::new("pw", "somesalt").with_secret("pepper"),
        ));
        let (out, report) = ctx.release();
        assert_eq!(out.len(), 32);
        assert_eq!(
            report,
            WipeReport {
                password_wiped: true,
                secret_wiped: Some(true),
            }
        );
    }

    #[test]
    fn test_release_respects_cleared_flags() {
        let ctx = HashContext::assemble(request(
            HashCandidate::new("pw", "somesalt")
                .with_secret("pepper")
                .with_wipe(WipeFlags::CLEAR_SECRET),
        ));
        let (_, report) = ctx.release();
        assert!(!report.password_wiped);
        assert_eq!(report.secret_wiped, Some(true));
    }

    #[test]
    fn test_release_without_secret_reports_none() {
        let ctx = HashContext::assemble(request(HashCandidate::new("pw", "somesalt")));
        let (_, report) = ctx.release();
        assert!(report.password_wiped);
        assert_eq!(report.secret_wiped, None);
    }

    #[test]
    fn test_output_survives_release() {
        let mut ctx = HashContext::assemble(request(
            HashCandidate::new("pw", "somesalt").with_hash_length(4),
        ));
        ctx.split().1.copy_from_slice(&[1, 2, 3, 4]);
        let (out, _) = ctx.release();
        assert_eq!(out, vec![1, 2, 3, 4]);
    }
}
