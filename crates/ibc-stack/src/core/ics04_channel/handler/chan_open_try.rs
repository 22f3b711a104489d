//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenTry`.

use crate::prelude::*;

use crate::core::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::ics04_channel::error::ChannelError;
use crate::core::ics04_channel::events::OpenTry;
use crate::core::ics04_channel::handler::{
    open_connection_of, verify_chan_end_on_counterparty, verify_connection_supports_order,
};
use crate::core::ics04_channel::msgs::chan_open_try::MsgChannelOpenTry;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::path::{ChannelEndPath, SeqAckPath, SeqRecvPath, SeqSendPath};
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(
    ctx_b: &Ctx,
    capability: &PortCapability,
    msg: &MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.authenticate_port(capability, &msg.port_id_on_b)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    if ctx_b.channel_end(&chan_end_path_on_b).is_ok() {
        return Err(ChannelError::ChannelExists {
            port_id: msg.port_id_on_b.clone(),
            channel_id: msg.chan_id_on_b.clone(),
        }
        .into());
    }

    let (_, conn_end_on_b) = open_connection_of(ctx_b, &msg.connection_hops_on_b)?;
    verify_connection_supports_order(&conn_end_on_b, msg.ordering)?;

    // Verify proofs
    {
        let conn_id_on_a = conn_end_on_b.counterparty().connection_id().clone();
        let expected_chan_end_on_a = ChannelEnd::new(
            State::Init,
            msg.ordering,
            Counterparty::new(msg.port_id_on_b.clone(), msg.chan_id_on_b.clone()),
            vec![conn_id_on_a],
            msg.version_on_a.clone(),
        );

        verify_chan_end_on_counterparty(
            ctx_b,
            &conn_end_on_b,
            &msg.proof_height_on_a,
            &msg.proof_chan_end_on_a,
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            expected_chan_end_on_a,
        )?;
    }

    Ok(())
}

pub fn execute<Ctx>(
    ctx_b: &mut Ctx,
    capability: &PortCapability,
    msg: &MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx_b.authenticate_port(capability, &msg.port_id_on_b)?;

    let conn_id_on_b = msg.connection_hops_on_b[0].clone();

    // state changes
    {
        let chan_end_on_b = ChannelEnd::new(
            State::TryOpen,
            msg.ordering,
            Counterparty::new(msg.port_id_on_a.clone(), msg.chan_id_on_a.clone()),
            msg.connection_hops_on_b.clone(),
            msg.version_on_a.clone(),
        );
        let port_id = &msg.port_id_on_b;
        let chan_id = &msg.chan_id_on_b;

        ctx_b.store_channel(&ChannelEndPath::new(port_id, chan_id), chan_end_on_b)?;
        ctx_b.store_next_sequence_send(&SeqSendPath::new(port_id, chan_id), 1.into())?;
        ctx_b.store_next_sequence_recv(&SeqRecvPath::new(port_id, chan_id), 1.into())?;
        ctx_b.store_next_sequence_ack(&SeqAckPath::new(port_id, chan_id), 1.into())?;
    }

    // emit events and logs
    {
        ctx_b.log_message(format!(
            "success: channel open try with channel identifier: {}",
            msg.chan_id_on_b
        ));

        ctx_b.emit_ibc_event(IbcEvent::OpenTryChannel(OpenTry::new(
            msg.port_id_on_b.clone(),
            msg.chan_id_on_b.clone(),
            msg.port_id_on_a.clone(),
            msg.chan_id_on_a.clone(),
            conn_id_on_b,
            msg.version_on_a.clone(),
        )));
    }

    Ok(())
}
