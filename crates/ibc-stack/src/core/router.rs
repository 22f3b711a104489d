//! Routing of channel and packet messages to the application module that
//! owns the destination port.

use crate::prelude::*;

use core::fmt::Debug;

use displaydoc::Display;

use crate::core::error::ErrorKind;
use crate::core::ics04_channel::channel::{Counterparty, Order};
use crate::core::ics04_channel::packet::Packet;
use crate::core::ics04_channel::version::Version;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::core::ContextError;
use crate::events::ModuleEvent;

/// Events and log lines an application module wants the host to emit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleExtras {
    pub events: Vec<ModuleEvent>,
    pub log: Vec<String>,
}

impl ModuleExtras {
    pub fn empty() -> Self {
        ModuleExtras::default()
    }
}

// A rejection reported by an application module callback.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
/// application module rejected the message ({kind}): {description}
pub struct ModuleError {
    pub kind: ErrorKind,
    pub description: String,
}

#[cfg(feature = "std")]
impl std::error::Error for ModuleError {}

/// Callbacks an application registers for the port it owns.
///
/// Validation callbacks only read the host; execution callbacks run after the
/// core handler has written its state and may move application state such as
/// balances.
pub trait Module<Ctx>: Debug {
    /// The capability the module received when binding its port.
    fn port_capability(&self) -> &PortCapability;

    #[allow(clippy::too_many_arguments)]
    fn on_chan_open_init_validate(
        &self,
        _ctx: &Ctx,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        _version: &Version,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn on_chan_open_init_execute(
        &self,
        _ctx: &mut Ctx,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        _version: &Version,
    ) -> Result<ModuleExtras, ModuleError> {
        Ok(ModuleExtras::empty())
    }

    #[allow(clippy::too_many_arguments)]
    fn on_chan_open_try_validate(
        &self,
        _ctx: &Ctx,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        _counterparty_version: &Version,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn on_chan_open_try_execute(
        &self,
        _ctx: &mut Ctx,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        _counterparty_version: &Version,
    ) -> Result<ModuleExtras, ModuleError> {
        Ok(ModuleExtras::empty())
    }

    fn on_chan_open_ack_validate(
        &self,
        _ctx: &Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    fn on_chan_open_ack_execute(
        &self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<ModuleExtras, ModuleError> {
        Ok(ModuleExtras::empty())
    }

    fn on_chan_open_confirm_validate(
        &self,
        _ctx: &Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    fn on_chan_open_confirm_execute(
        &self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ModuleError> {
        Ok(ModuleExtras::empty())
    }

    fn on_chan_close_init_validate(
        &self,
        _ctx: &Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    fn on_chan_close_init_execute(
        &self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ModuleError> {
        Ok(ModuleExtras::empty())
    }

    fn on_chan_close_confirm_validate(
        &self,
        _ctx: &Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    fn on_chan_close_confirm_execute(
        &self,
        _ctx: &mut Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ModuleError> {
        Ok(ModuleExtras::empty())
    }

    fn on_recv_packet_validate(&self, ctx: &Ctx, packet: &Packet) -> Result<(), ModuleError>;

    fn on_recv_packet_execute(
        &self,
        ctx: &mut Ctx,
        packet: &Packet,
    ) -> Result<ModuleExtras, ModuleError>;
}

/// Maps ports to the modules that own them.
pub trait Router<Ctx> {
    /// Returns a reference to the `Module` bound to the specified port.
    fn get_route(&self, port_id: &PortId) -> Option<&dyn Module<Ctx>>;

    /// Returns true if a `Module` is bound to the specified port.
    fn has_route(&self, port_id: &PortId) -> bool {
        self.get_route(port_id).is_some()
    }
}

#[derive(Debug, Display)]
pub enum RouterError {
    /// context error: `{0}`
    ContextError(ContextError),
    /// unknown type URL `{url}`
    UnknownMessageTypeUrl { url: String },
    /// the message is malformed and cannot be decoded: `{0}`
    MalformedMessageBytes(prost::DecodeError),
    /// no module is routed for port `{port_id}`
    RouteNotFound { port_id: PortId },
}

impl RouterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContextError(e) => e.kind(),
            Self::UnknownMessageTypeUrl { .. } => ErrorKind::UnknownRequest,
            Self::MalformedMessageBytes(_) => ErrorKind::InvalidInput,
            Self::RouteNotFound { .. } => ErrorKind::NotFound,
        }
    }
}

impl From<ContextError> for RouterError {
    fn from(error: ContextError) -> Self {
        Self::ContextError(error)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ContextError(e) => Some(e),
            Self::MalformedMessageBytes(e) => Some(e),
            _ => None,
        }
    }
}
