//! Variant selection and primitive invocation.

use tracing::debug;

use crate::context::HashContext;
use crate::primitive::Primitive;
use crate::status::{self, PrimitiveError};
use crate::types::Variant;

/// The primitive's algorithm selector, with its native numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Algorithm {
    D = 0,
    I = 1,
    Id = 2,
}

impl From<Variant> for Algorithm {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::D => Self::D,
            Variant::I => Self::I,
            Variant::Id => Self::Id,
        }
    }
}

/// Invokes the primitive once for `variant`.
///
/// A zero status is success. Anything else is handed to the status mapper
/// unmodified. Threads are never spawned here; the context already carries
/// the lane and thread counts the primitive may use.
pub fn dispatch<P: Primitive + ?Sized>(
    primitive: &P,
    ctx: &mut HashContext,
    variant: Variant,
) -> Result<(), PrimitiveError> {
    let algorithm = Algorithm::from(variant);
    debug!(
        %variant,
        algorithm = algorithm as u32,
        version = ctx.version(),
        lanes = ctx.lanes(),
        threads = ctx.threads(),
        "invoking argon2 primitive"
    );

    let code = primitive.invoke(ctx, algorithm);
    status::check(code).inspect_err(|err| debug!(code, %err, "argon2 primitive failed"))
}
