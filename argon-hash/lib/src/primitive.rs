//! The memory-hard primitive behind the facade.
//!
//! The facade talks to the primitive through one entry point,
//! [`Primitive::invoke`], which reads a [`HashContext`], writes the digest
//! into the context's output buffer and returns an integer status. The
//! default implementation, [`Argon2Primitive`], runs the RustCrypto
//! `argon2` crate and reports its failures with the reference library's
//! status codes.

use argon2::{Argon2, AssociatedData, Block, ParamsBuilder};

use crate::context::HashContext;
use crate::dispatch::Algorithm;
use crate::status;

/// A single-entry-point Argon2 implementation.
///
/// `invoke` must write exactly `ctx.output_len()` bytes on success and
/// return [`status::OK`]; any other return value is a failure code.
pub trait Primitive {
    fn invoke(&self, ctx: &mut HashContext, algorithm: Algorithm) -> i32;
}

impl<P: Primitive + ?Sized> Primitive for &P {
    fn invoke(&self, ctx: &mut HashContext, algorithm: Algorithm) -> i32 {
        (**self).invoke(ctx, algorithm)
    }
}

/// Argon2 from the `argon2` crate.
///
/// Lanes map to the crate's `p_cost`. The crate fills lanes on the calling
/// thread, so the context's thread count is accepted but not acted on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Primitive;

impl Primitive for Argon2Primitive {
    fn invoke(&self, ctx: &mut HashContext, algorithm: Algorithm) -> i32 {
        match run(ctx, algorithm) {
            Ok(()) => status::OK,
            Err(Failure::Argon2(err)) => status_of(err),
            Err(Failure::Allocation) => status::MEMORY_ALLOCATION_ERROR,
        }
    }
}

enum Failure {
    Argon2(argon2::Error),
    /// The working memory for `m_cost` could not be reserved.
    Allocation,
}

impl From<argon2::Error> for Failure {
    fn from(err: argon2::Error) -> Self {
        Self::Argon2(err)
    }
}

fn run(ctx: &mut HashContext, algorithm: Algorithm) -> Result<(), Failure> {
    let (inputs, out) = ctx.split();
    let version = argon2::Version::try_from(inputs.version)?;

    let mut builder = ParamsBuilder::new();
    builder
        .m_cost(inputs.m_cost)
        .t_cost(inputs.t_cost)
        .p_cost(inputs.lanes);
    if !inputs.associated_data.is_empty() {
        builder.data(AssociatedData::new(inputs.associated_data)?);
    }
    let params = builder.build()?;
    let mut blocks = allocate_blocks(params.block_count())?;

    let argon2 = if inputs.secret.is_empty() {
        Argon2::new(algorithm.into(), version, params)
    } else {
        Argon2::new_with_secret(inputs.secret, algorithm.into(), version, params)?
    };
    argon2.hash_password_into_with_memory(inputs.password, inputs.salt, out, &mut blocks)?;
    Ok(())
}

/// Reserves the primitive's working memory without aborting on failure.
///
/// `m_cost` may be as large as `u32::MAX` KiB, which an infallible
/// allocation would turn into a process abort.
fn allocate_blocks(count: usize) -> Result<Vec<Block>, Failure> {
    let mut blocks = Vec::new();
    blocks
        .try_reserve_exact(count)
        .map_err(|_| Failure::Allocation)?;
    blocks.resize(count, Block::default());
    Ok(blocks)
}

/// Translates an `argon2` crate error into the reference status code.
#[allow(unreachable_patterns)]
fn status_of(err: argon2::Error) -> i32 {
    use argon2::Error;

    match err {
        Error::AdTooLong => status::AD_TOO_LONG,
        Error::AlgorithmInvalid => status::INCORRECT_TYPE,
        Error::MemoryTooLittle => status::MEMORY_TOO_LITTLE,
        Error::MemoryTooMuch => status::MEMORY_TOO_MUCH,
        Error::OutputTooShort => status::OUTPUT_TOO_SHORT,
        Error::OutputTooLong => status::OUTPUT_TOO_LONG,
        Error::PwdTooLong => status::PWD_TOO_LONG,
        Error::SaltTooShort => status::SALT_TOO_SHORT,
        Error::SaltTooLong => status::SALT_TOO_LONG,
        Error::SecretTooLong => status::SECRET_TOO_LONG,
        // The crate's thread bounds are its lane (p_cost) bounds.
        Error::ThreadsTooFew => status::LANES_TOO_FEW,
        Error::ThreadsTooMany => status::LANES_TOO_MANY,
        Error::TimeTooSmall => status::TIME_TOO_SMALL,
        Error::VersionInvalid => status::INCORRECT_PARAMETER,
        _ => status::INCORRECT_PARAMETER,
    }
}

impl From<Algorithm> for argon2::Algorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::D => Self::Argon2d,
            Algorithm::I => Self::Argon2i,
            Algorithm::Id => Self::Argon2id,
        }
    }
}
