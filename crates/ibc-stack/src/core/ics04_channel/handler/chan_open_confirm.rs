//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenConfirm`.

use crate::prelude::*;

use crate::core::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::ics04_channel::events::OpenConfirm;
use crate::core::ics04_channel::handler::{open_connection_of, verify_chan_end_on_counterparty};
use crate::core::ics04_channel::msgs::chan_open_confirm::MsgChannelOpenConfirm;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::path::ChannelEndPath;
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(
    ctx_b: &Ctx,
    capability: &PortCapability,
    msg: &MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.authenticate_port(capability, &msg.port_id_on_b)?;

    let chan_end_on_b =
        ctx_b.channel_end(&ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b))?;

    // Validate that the channel end is in a state where it can be confirmed.
    chan_end_on_b.verify_state_matches(&State::TryOpen)?;

    let (_, conn_end_on_b) = open_connection_of(ctx_b, chan_end_on_b.connection_hops())?;

    // Verify proofs
    {
        let conn_id_on_a = conn_end_on_b.counterparty().connection_id().clone();
        let expected_chan_end_on_a = ChannelEnd::new(
            State::Open,
            *chan_end_on_b.ordering(),
            Counterparty::new(msg.port_id_on_b.clone(), msg.chan_id_on_b.clone()),
            vec![conn_id_on_a],
            chan_end_on_b.version().clone(),
        );

        verify_chan_end_on_counterparty(
            ctx_b,
            &conn_end_on_b,
            &msg.proof_height_on_a,
            &msg.proof_chan_end_on_a,
            chan_end_on_b.counterparty().port_id(),
            chan_end_on_b.counterparty().channel_id(),
            expected_chan_end_on_a,
        )?;
    }

    Ok(())
}

pub fn execute<Ctx>(
    ctx_b: &mut Ctx,
    capability: &PortCapability,
    msg: &MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx_b.authenticate_port(capability, &msg.port_id_on_b)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    let event = IbcEvent::OpenConfirmChannel(OpenConfirm::new(
        msg.port_id_on_b.clone(),
        msg.chan_id_on_b.clone(),
        chan_end_on_b.counterparty().port_id().clone(),
        chan_end_on_b.counterparty().channel_id().clone(),
        chan_end_on_b.connection_hops()[0].clone(),
        chan_end_on_b.version().clone(),
    ));

    // state changes
    {
        let mut chan_end_on_b = chan_end_on_b;
        chan_end_on_b.set_state(State::Open);
        ctx_b.store_channel(&chan_end_path_on_b, chan_end_on_b)?;
    }

    // emit events and logs
    {
        ctx_b.log_message("success: channel open confirm".to_string());
        ctx_b.emit_ibc_event(event);
    }

    Ok(())
}
