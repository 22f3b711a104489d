//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenInit`.

use crate::prelude::*;

use crate::core::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::ics04_channel::error::ChannelError;
use crate::core::ics04_channel::events::OpenInit;
use crate::core::ics04_channel::handler::{open_connection_of, verify_connection_supports_order};
use crate::core::ics04_channel::msgs::chan_open_init::MsgChannelOpenInit;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::path::{ChannelEndPath, SeqAckPath, SeqRecvPath, SeqSendPath};
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(
    ctx_a: &Ctx,
    capability: &PortCapability,
    msg: &MsgChannelOpenInit,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.authenticate_port(capability, &msg.port_id_on_a)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    if ctx_a.channel_end(&chan_end_path_on_a).is_ok() {
        return Err(ChannelError::ChannelExists {
            port_id: msg.port_id_on_a.clone(),
            channel_id: msg.chan_id_on_a.clone(),
        }
        .into());
    }

    let (_, conn_end_on_a) = open_connection_of(ctx_a, &msg.connection_hops_on_a)?;
    verify_connection_supports_order(&conn_end_on_a, msg.ordering)?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    capability: &PortCapability,
    msg: &MsgChannelOpenInit,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx_a.authenticate_port(capability, &msg.port_id_on_a)?;

    let chan_end_on_a = ChannelEnd::new(
        State::Init,
        msg.ordering,
        Counterparty::new(msg.port_id_on_b.clone(), msg.chan_id_on_b.clone()),
        msg.connection_hops_on_a.clone(),
        msg.version.clone(),
    );
    let conn_id_on_a = msg.connection_hops_on_a[0].clone();

    // state changes
    {
        let port_id = &msg.port_id_on_a;
        let chan_id = &msg.chan_id_on_a;

        ctx_a.store_channel(&ChannelEndPath::new(port_id, chan_id), chan_end_on_a)?;
        ctx_a.store_next_sequence_send(&SeqSendPath::new(port_id, chan_id), 1.into())?;
        ctx_a.store_next_sequence_recv(&SeqRecvPath::new(port_id, chan_id), 1.into())?;
        ctx_a.store_next_sequence_ack(&SeqAckPath::new(port_id, chan_id), 1.into())?;
    }

    // emit events and logs
    {
        ctx_a.log_message(format!(
            "success: channel open init with channel identifier: {}",
            msg.chan_id_on_a
        ));

        ctx_a.emit_ibc_event(IbcEvent::OpenInitChannel(OpenInit::new(
            msg.port_id_on_a.clone(),
            msg.chan_id_on_a.clone(),
            msg.port_id_on_b.clone(),
            msg.chan_id_on_b.clone(),
            conn_id_on_a,
            msg.version.clone(),
        )));
    }

    Ok(())
}
