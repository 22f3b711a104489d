//! This module implements the processing logic for ICS2 (client abstractions and functions) msgs.

use crate::core::ics02_client::error::ClientError;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics24_host::identifier::ClientId;
use crate::core::ics24_host::path::VerifiedRootPath;
use crate::core::{ContextError, ValidationContext};
use crate::Height;

pub mod create_client;
pub mod update_client;

/// Looks up the root a client verified at `height`, failing if the client is unknown.
pub fn get_verified_root<Ctx>(
    ctx: &Ctx,
    client_id: &ClientId,
    height: &Height,
) -> Result<Option<CommitmentRoot>, ContextError>
where
    Ctx: ValidationContext,
{
    ctx.client_state(client_id)?;
    ctx.verified_root(&VerifiedRootPath::new(client_id, *height))
}

/// The root a proof claimed at `proof_height` must verify against.
pub(crate) fn proof_root<Ctx>(
    ctx: &Ctx,
    client_id: &ClientId,
    proof_height: &Height,
) -> Result<CommitmentRoot, ContextError>
where
    Ctx: ValidationContext,
{
    get_verified_root(ctx, client_id, proof_height)?.ok_or_else(|| {
        ClientError::VerifiedRootNotFound {
            client_id: client_id.clone(),
            height: *proof_height,
        }
        .into()
    })
}
