//! Protocol logic specific to processing ICS2 messages of type `MsgCreateClient`.

use crate::prelude::*;

use crate::core::ics02_client::client_state::ClientState;
use crate::core::ics02_client::error::ClientError;
use crate::core::ics02_client::events::CreateClient;
use crate::core::ics02_client::msgs::create_client::MsgCreateClient;
use crate::core::ics24_host::path::{ClientConsensusStatePath, ClientStatePath, VerifiedRootPath};
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(ctx: &Ctx, msg: &MsgCreateClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    if ctx.client_state(&msg.client_id).is_ok() {
        return Err(ClientError::ClientAlreadyExists {
            client_id: msg.client_id.clone(),
        }
        .into());
    }

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgCreateClient) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let MsgCreateClient {
        client_id,
        client_type,
        consensus_state,
        signer: _,
    } = msg;

    let consensus_height = consensus_state.height;
    let client_state = ClientState::new(client_type.clone(), consensus_height);

    ctx.store_verified_root(
        &VerifiedRootPath::new(&client_id, consensus_height),
        consensus_state.root().clone(),
    )?;
    ctx.store_consensus_state(&ClientConsensusStatePath::new(&client_id), consensus_state)?;
    ctx.store_client_state(&ClientStatePath::new(&client_id), client_state)?;

    ctx.emit_ibc_event(IbcEvent::CreateClient(CreateClient::new(
        client_id.clone(),
        client_type,
        consensus_height,
    )));
    ctx.log_message(format!(
        "success: generated new client with identifier: {client_id}"
    ));

    Ok(())
}
