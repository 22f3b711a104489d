//! Protocol logic specific to ICS4 messages of type `MsgChannelCloseInit`.

use crate::prelude::*;

use crate::core::ics04_channel::channel::State;
use crate::core::ics04_channel::events::CloseInit;
use crate::core::ics04_channel::handler::open_connection_of;
use crate::core::ics04_channel::msgs::chan_close_init::MsgChannelCloseInit;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::path::ChannelEndPath;
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(
    ctx_a: &Ctx,
    capability: &PortCapability,
    msg: &MsgChannelCloseInit,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.authenticate_port(capability, &msg.port_id_on_a)?;

    let chan_end_on_a =
        ctx_a.channel_end(&ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a))?;

    // Validate that the channel end is in a state where it can be closed.
    chan_end_on_a.verify_not_closed()?;

    open_connection_of(ctx_a, chan_end_on_a.connection_hops())?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    capability: &PortCapability,
    msg: &MsgChannelCloseInit,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx_a.authenticate_port(capability, &msg.port_id_on_a)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let event = IbcEvent::CloseInitChannel(CloseInit::new(
        msg.port_id_on_a.clone(),
        msg.chan_id_on_a.clone(),
        chan_end_on_a.counterparty().port_id().clone(),
        chan_end_on_a.counterparty().channel_id().clone(),
        chan_end_on_a.connection_hops()[0].clone(),
        chan_end_on_a.version().clone(),
    ));

    // state changes
    {
        let mut chan_end_on_a = chan_end_on_a;
        chan_end_on_a.set_state(State::Closed);
        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a)?;
    }

    // emit events and logs
    {
        ctx_a.log_message("success: channel close init".to_string());
        ctx_a.emit_ibc_event(event);
    }

    Ok(())
}
