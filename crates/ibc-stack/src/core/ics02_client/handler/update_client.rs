//! Protocol logic specific to processing ICS2 messages of type `MsgUpdateClient`,
//! and to recording verified roots directly.
//!
//! Both paths keep the root table append-only: a new height must be strictly
//! greater than the latest height the client has recorded.

use crate::prelude::*;

use crate::core::ics02_client::events::UpdateClient;
use crate::core::ics02_client::msgs::update_client::MsgUpdateClient;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics24_host::identifier::ClientId;
use crate::core::ics24_host::path::{ClientConsensusStatePath, ClientStatePath, VerifiedRootPath};
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;
use crate::Height;

pub fn validate<Ctx>(ctx: &Ctx, msg: &MsgUpdateClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let client_state = ctx.client_state(&msg.client_id)?;
    client_state.advance(msg.consensus_state.height)?;

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgUpdateClient) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let MsgUpdateClient {
        client_id,
        consensus_state,
        signer: _,
    } = msg;

    let height = consensus_state.height;
    let client_state = ctx.client_state(&client_id)?.advance(height)?;
    let client_type = client_state.client_type.clone();

    ctx.store_verified_root(
        &VerifiedRootPath::new(&client_id, height),
        consensus_state.root().clone(),
    )?;
    ctx.store_consensus_state(&ClientConsensusStatePath::new(&client_id), consensus_state)?;
    ctx.store_client_state(&ClientStatePath::new(&client_id), client_state)?;

    ctx.emit_ibc_event(IbcEvent::UpdateClient(UpdateClient::new(
        client_id.clone(),
        client_type,
        height,
    )));
    ctx.log_message(format!(
        "success: client {client_id} updated to height {height}"
    ));

    Ok(())
}

/// Records `root` as verified for `client_id` at `height` without replacing
/// the client's consensus state.
pub fn set_verified_root<Ctx>(
    ctx: &mut Ctx,
    client_id: &ClientId,
    height: Height,
    root: CommitmentRoot,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_state = ctx.client_state(client_id)?.advance(height)?;

    ctx.store_verified_root(&VerifiedRootPath::new(client_id, height), root)?;
    ctx.store_client_state(&ClientStatePath::new(client_id), client_state)?;
    ctx.log_message(format!(
        "success: client {client_id} verified root at height {height}"
    ));

    Ok(())
}
