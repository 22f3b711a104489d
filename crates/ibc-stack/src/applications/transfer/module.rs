//! The IBC module callbacks of the token transfer application.

use crate::prelude::*;

use super::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use super::error::TokenTransferError;
use super::relay::on_recv_packet::{process_recv_packet_execute, process_recv_packet_validate};
use super::VERSION;
use crate::core::ics04_channel::channel::{Counterparty, Order};
use crate::core::ics04_channel::packet::Packet;
use crate::core::ics04_channel::version::Version;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::core::router::{Module, ModuleError, ModuleExtras};

/// The token transfer application, bound to the port of its capability.
#[derive(Debug)]
pub struct TransferModule {
    port_capability: PortCapability,
}

impl TransferModule {
    pub fn new(port_capability: PortCapability) -> Self {
        Self { port_capability }
    }
}

fn ensure_unordered(order: Order) -> Result<(), TokenTransferError> {
    if order != Order::Unordered {
        return Err(TokenTransferError::ChannelNotUnordered {
            expect_order: Order::Unordered,
            got_order: order,
        });
    }
    Ok(())
}

fn ensure_counterparty_version(counterparty_version: &Version) -> Result<(), TokenTransferError> {
    if counterparty_version != &Version::new(VERSION.to_string()) {
        return Err(TokenTransferError::InvalidCounterpartyVersion {
            expect_version: Version::new(VERSION.to_string()),
            got_version: counterparty_version.clone(),
        });
    }
    Ok(())
}

impl<Ctx> Module<Ctx> for TransferModule
where
    Ctx: TokenTransferExecutionContext,
{
    fn port_capability(&self) -> &PortCapability {
        &self.port_capability
    }

    fn on_chan_open_init_validate(
        &self,
        ctx: &Ctx,
        order: Order,
        _connection_hops: &[ConnectionId],
        port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<(), ModuleError> {
        ensure_unordered(order)?;

        let bound_port = ctx.get_port()?;
        if port_id != &bound_port {
            return Err(TokenTransferError::InvalidPort {
                port_id: port_id.clone(),
                exp_port_id: bound_port,
            }
            .into());
        }

        if !version.is_empty() && version != &Version::new(VERSION.to_string()) {
            return Err(TokenTransferError::InvalidVersion {
                expect_version: Version::new(VERSION.to_string()),
                got_version: version.clone(),
            }
            .into());
        }

        Ok(())
    }

    fn on_chan_open_try_validate(
        &self,
        _ctx: &Ctx,
        order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<(), ModuleError> {
        ensure_unordered(order)?;
        ensure_counterparty_version(counterparty_version)?;
        Ok(())
    }

    fn on_chan_open_ack_validate(
        &self,
        _ctx: &Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        counterparty_version: &Version,
    ) -> Result<(), ModuleError> {
        Ok(ensure_counterparty_version(counterparty_version)?)
    }

    fn on_chan_close_init_validate(
        &self,
        _ctx: &Ctx,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ModuleError> {
        Err(TokenTransferError::CantCloseChannel.into())
    }

    fn on_recv_packet_validate(&self, ctx: &Ctx, packet: &Packet) -> Result<(), ModuleError> {
        Ok(process_recv_packet_validate(ctx, packet)?)
    }

    fn on_recv_packet_execute(
        &self,
        ctx: &mut Ctx,
        packet: &Packet,
    ) -> Result<ModuleExtras, ModuleError> {
        Ok(process_recv_packet_execute(ctx, packet)?)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rstest::rstest;

    use super::*;
    use crate::core::ics05_port::handler::bind_port;
    use crate::mock::context::MockContext;
    use crate::ErrorKind;

    fn transfer_module(ctx: &mut MockContext) -> TransferModule {
        TransferModule::new(bind_port(ctx, PortId::transfer()).unwrap())
    }

    fn counterparty() -> Counterparty {
        Counterparty::new(PortId::transfer(), ChannelId::from_str("ch2").unwrap())
    }

    fn open_init(
        ctx: &MockContext,
        module: &TransferModule,
        order: Order,
        port_id: &PortId,
        version: &str,
    ) -> Result<(), ModuleError> {
        module.on_chan_open_init_validate(
            ctx,
            order,
            &[ConnectionId::from_str("conn0").unwrap()],
            port_id,
            &ChannelId::from_str("ch1").unwrap(),
            &counterparty(),
            &Version::from(version),
        )
    }

    #[rstest]
    #[case::current_version(VERSION)]
    #[case::version_left_to_the_module("")]
    fn open_init_accepts_unordered_transfer_channels(#[case] version: &str) {
        let mut ctx = MockContext::default();
        let module = transfer_module(&mut ctx);

        assert!(open_init(&ctx, &module, Order::Unordered, &PortId::transfer(), version).is_ok());
    }

    #[rstest]
    #[case::ordered(Order::Ordered, "transfer", VERSION)]
    #[case::foreign_port(Order::Unordered, "firstport", VERSION)]
    #[case::unknown_version(Order::Unordered, "transfer", "1.0")]
    fn open_init_rejects(#[case] order: Order, #[case] port: &str, #[case] version: &str) {
        let mut ctx = MockContext::default();
        let module = transfer_module(&mut ctx);

        let err = open_init(&ctx, &module, order, &PortId::from_str(port).unwrap(), version)
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn open_try_and_ack_require_the_transfer_version() {
        let mut ctx = MockContext::default();
        let module = transfer_module(&mut ctx);
        let chan_id = ChannelId::from_str("ch1").unwrap();

        let try_res = module.on_chan_open_try_validate(
            &ctx,
            Order::Unordered,
            &[ConnectionId::from_str("conn0").unwrap()],
            &PortId::transfer(),
            &chan_id,
            &counterparty(),
            &Version::from("ics20-2"),
        );
        assert!(try_res.is_err());

        assert!(module
            .on_chan_open_ack_validate(&ctx, &PortId::transfer(), &chan_id, &Version::from(VERSION))
            .is_ok());
        assert!(module
            .on_chan_open_ack_validate(&ctx, &PortId::transfer(), &chan_id, &Version::empty())
            .is_err());
    }

    #[test]
    fn transfer_channels_cannot_be_closed() {
        let mut ctx = MockContext::default();
        let module = transfer_module(&mut ctx);

        let err = module
            .on_chan_close_init_validate(
                &ctx,
                &PortId::transfer(),
                &ChannelId::from_str("ch1").unwrap(),
            )
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidState);
    }
}
