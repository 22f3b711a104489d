//! Entrypoints of the core handlers: every message is fully validated before
//! any of its effects are executed.

use tracing::debug;

use crate::core::ics02_client::handler::{create_client, update_client};
use crate::core::ics02_client::msgs::ClientMsg;
use crate::core::ics03_connection::handler::{
    conn_open_ack, conn_open_confirm, conn_open_init, conn_open_try,
};
use crate::core::ics03_connection::msgs::ConnectionMsg;
use crate::core::ics04_channel::channel::Counterparty;
use crate::core::ics04_channel::error::{ChannelError, PacketError};
use crate::core::ics04_channel::handler::{
    chan_close_confirm, chan_close_init, chan_open_ack, chan_open_confirm, chan_open_init,
    chan_open_try, recv_packet,
};
use crate::core::ics04_channel::msgs::{ChannelMsg, PacketMsg};
use crate::core::ics24_host::identifier::PortId;
use crate::core::msgs::MsgEnvelope;
use crate::core::router::{Module, ModuleError, ModuleExtras, Router, RouterError};
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;
use crate::proto::Any;

/// Decodes `message` and dispatches it.
pub fn deliver<Ctx, R>(ctx: &mut Ctx, router: &R, message: Any) -> Result<(), RouterError>
where
    Ctx: ExecutionContext,
    R: Router<Ctx>,
{
    let envelope = MsgEnvelope::try_from(message).map_err(|e| {
        debug!(error = %e, "rejected undecodable message");
        e
    })?;
    dispatch(ctx, router, envelope)
}

/// Validates `msg` and, if it passes, executes it.
pub fn dispatch<Ctx, R>(ctx: &mut Ctx, router: &R, msg: MsgEnvelope) -> Result<(), RouterError>
where
    Ctx: ExecutionContext,
    R: Router<Ctx>,
{
    validate(&*ctx, router, msg.clone()).map_err(|e| {
        debug!(error = %e, kind = %e.kind(), "message failed validation");
        e
    })?;
    execute(ctx, router, msg)
}

fn route<'r, Ctx, R>(router: &'r R, port_id: &PortId) -> Result<&'r dyn Module<Ctx>, RouterError>
where
    R: Router<Ctx>,
{
    router
        .get_route(port_id)
        .ok_or_else(|| RouterError::RouteNotFound {
            port_id: port_id.clone(),
        })
}

fn channel_module_error(e: ModuleError) -> ContextError {
    ChannelError::AppModule(e).into()
}

fn packet_module_error(e: ModuleError) -> ContextError {
    PacketError::AppModule(e).into()
}

fn channel_port(msg: &ChannelMsg) -> &PortId {
    match msg {
        ChannelMsg::OpenInit(msg) => &msg.port_id_on_a,
        ChannelMsg::OpenTry(msg) => &msg.port_id_on_b,
        ChannelMsg::OpenAck(msg) => &msg.port_id_on_a,
        ChannelMsg::OpenConfirm(msg) => &msg.port_id_on_b,
        ChannelMsg::CloseInit(msg) => &msg.port_id_on_a,
        ChannelMsg::CloseConfirm(msg) => &msg.port_id_on_b,
    }
}

fn packet_port(msg: &PacketMsg) -> &PortId {
    match msg {
        PacketMsg::Recv(msg) => &msg.packet.port_id_on_b,
    }
}

/// Entrypoint which only performs message validation
pub fn validate<Ctx, R>(ctx: &Ctx, router: &R, msg: MsgEnvelope) -> Result<(), RouterError>
where
    Ctx: ValidationContext,
    R: Router<Ctx>,
{
    match msg {
        MsgEnvelope::Client(msg) => match msg {
            ClientMsg::CreateClient(msg) => create_client::validate(ctx, &msg),
            ClientMsg::UpdateClient(msg) => update_client::validate(ctx, &msg),
        }
        .map_err(RouterError::ContextError),
        MsgEnvelope::Connection(msg) => match msg {
            ConnectionMsg::OpenInit(msg) => conn_open_init::validate(ctx, &msg),
            ConnectionMsg::OpenTry(msg) => conn_open_try::validate(ctx, &msg),
            ConnectionMsg::OpenAck(msg) => conn_open_ack::validate(ctx, &msg),
            ConnectionMsg::OpenConfirm(msg) => conn_open_confirm::validate(ctx, &msg),
        }
        .map_err(RouterError::ContextError),
        MsgEnvelope::Channel(msg) => {
            let module = route(router, channel_port(&msg))?;
            let capability = module.port_capability();

            let result = match msg {
                ChannelMsg::OpenInit(msg) => {
                    chan_open_init::validate(ctx, capability, &msg)?;
                    module
                        .on_chan_open_init_validate(
                            ctx,
                            msg.ordering,
                            &msg.connection_hops_on_a,
                            &msg.port_id_on_a,
                            &msg.chan_id_on_a,
                            &Counterparty::new(msg.port_id_on_b.clone(), msg.chan_id_on_b.clone()),
                            &msg.version,
                        )
                        .map_err(channel_module_error)
                }
                ChannelMsg::OpenTry(msg) => {
                    chan_open_try::validate(ctx, capability, &msg)?;
                    module
                        .on_chan_open_try_validate(
                            ctx,
                            msg.ordering,
                            &msg.connection_hops_on_b,
                            &msg.port_id_on_b,
                            &msg.chan_id_on_b,
                            &Counterparty::new(msg.port_id_on_a.clone(), msg.chan_id_on_a.clone()),
                            &msg.version_on_a,
                        )
                        .map_err(channel_module_error)
                }
                ChannelMsg::OpenAck(msg) => {
                    chan_open_ack::validate(ctx, capability, &msg)?;
                    module
                        .on_chan_open_ack_validate(
                            ctx,
                            &msg.port_id_on_a,
                            &msg.chan_id_on_a,
                            &msg.version_on_b,
                        )
                        .map_err(channel_module_error)
                }
                ChannelMsg::OpenConfirm(msg) => {
                    chan_open_confirm::validate(ctx, capability, &msg)?;
                    module
                        .on_chan_open_confirm_validate(ctx, &msg.port_id_on_b, &msg.chan_id_on_b)
                        .map_err(channel_module_error)
                }
                ChannelMsg::CloseInit(msg) => {
                    chan_close_init::validate(ctx, capability, &msg)?;
                    module
                        .on_chan_close_init_validate(ctx, &msg.port_id_on_a, &msg.chan_id_on_a)
                        .map_err(channel_module_error)
                }
                ChannelMsg::CloseConfirm(msg) => {
                    chan_close_confirm::validate(ctx, capability, &msg)?;
                    module
                        .on_chan_close_confirm_validate(ctx, &msg.port_id_on_b, &msg.chan_id_on_b)
                        .map_err(channel_module_error)
                }
            };
            result.map_err(RouterError::ContextError)
        }
        MsgEnvelope::Packet(msg) => {
            let module = route(router, packet_port(&msg))?;
            let capability = module.port_capability();

            let result = match msg {
                PacketMsg::Recv(msg) => {
                    recv_packet::validate(ctx, capability, &msg)?;
                    module
                        .on_recv_packet_validate(ctx, &msg.packet)
                        .map_err(packet_module_error)
                }
            };
            result.map_err(RouterError::ContextError)
        }
    }
}

/// Entrypoint which only performs message execution
pub fn execute<Ctx, R>(ctx: &mut Ctx, router: &R, msg: MsgEnvelope) -> Result<(), RouterError>
where
    Ctx: ExecutionContext,
    R: Router<Ctx>,
{
    match msg {
        MsgEnvelope::Client(msg) => match msg {
            ClientMsg::CreateClient(msg) => create_client::execute(ctx, msg),
            ClientMsg::UpdateClient(msg) => update_client::execute(ctx, msg),
        }
        .map_err(RouterError::ContextError),
        MsgEnvelope::Connection(msg) => match msg {
            ConnectionMsg::OpenInit(msg) => conn_open_init::execute(ctx, msg),
            ConnectionMsg::OpenTry(msg) => conn_open_try::execute(ctx, msg),
            ConnectionMsg::OpenAck(msg) => conn_open_ack::execute(ctx, msg),
            ConnectionMsg::OpenConfirm(msg) => conn_open_confirm::execute(ctx, msg),
        }
        .map_err(RouterError::ContextError),
        MsgEnvelope::Channel(msg) => {
            let module = route(router, channel_port(&msg))?;
            let capability = module.port_capability();

            let extras = match msg {
                ChannelMsg::OpenInit(msg) => {
                    chan_open_init::execute(ctx, capability, &msg)?;
                    module
                        .on_chan_open_init_execute(
                            ctx,
                            msg.ordering,
                            &msg.connection_hops_on_a,
                            &msg.port_id_on_a,
                            &msg.chan_id_on_a,
                            &Counterparty::new(msg.port_id_on_b.clone(), msg.chan_id_on_b.clone()),
                            &msg.version,
                        )
                        .map_err(channel_module_error)
                }
                ChannelMsg::OpenTry(msg) => {
                    chan_open_try::execute(ctx, capability, &msg)?;
                    module
                        .on_chan_open_try_execute(
                            ctx,
                            msg.ordering,
                            &msg.connection_hops_on_b,
                            &msg.port_id_on_b,
                            &msg.chan_id_on_b,
                            &Counterparty::new(msg.port_id_on_a.clone(), msg.chan_id_on_a.clone()),
                            &msg.version_on_a,
                        )
                        .map_err(channel_module_error)
                }
                ChannelMsg::OpenAck(msg) => {
                    chan_open_ack::execute(ctx, capability, &msg)?;
                    module
                        .on_chan_open_ack_execute(
                            ctx,
                            &msg.port_id_on_a,
                            &msg.chan_id_on_a,
                            &msg.version_on_b,
                        )
                        .map_err(channel_module_error)
                }
                ChannelMsg::OpenConfirm(msg) => {
                    chan_open_confirm::execute(ctx, capability, &msg)?;
                    module
                        .on_chan_open_confirm_execute(ctx, &msg.port_id_on_b, &msg.chan_id_on_b)
                        .map_err(channel_module_error)
                }
                ChannelMsg::CloseInit(msg) => {
                    chan_close_init::execute(ctx, capability, &msg)?;
                    module
                        .on_chan_close_init_execute(ctx, &msg.port_id_on_a, &msg.chan_id_on_a)
                        .map_err(channel_module_error)
                }
                ChannelMsg::CloseConfirm(msg) => {
                    chan_close_confirm::execute(ctx, capability, &msg)?;
                    module
                        .on_chan_close_confirm_execute(ctx, &msg.port_id_on_b, &msg.chan_id_on_b)
                        .map_err(channel_module_error)
                }
            }?;

            emit_module_extras(ctx, extras);
            Ok(())
        }
        MsgEnvelope::Packet(msg) => {
            let module = route(router, packet_port(&msg))?;
            let capability = module.port_capability();

            let extras = match msg {
                PacketMsg::Recv(msg) => {
                    recv_packet::execute(ctx, capability, &msg)?;
                    module
                        .on_recv_packet_execute(ctx, &msg.packet)
                        .map_err(packet_module_error)
                }
            }?;

            emit_module_extras(ctx, extras);
            Ok(())
        }
    }
}

fn emit_module_extras<Ctx>(ctx: &mut Ctx, extras: ModuleExtras)
where
    Ctx: ExecutionContext,
{
    for module_event in extras.events {
        ctx.emit_ibc_event(IbcEvent::AppModule(module_event));
    }

    for log_message in extras.log {
        ctx.log_message(log_message);
    }
}
