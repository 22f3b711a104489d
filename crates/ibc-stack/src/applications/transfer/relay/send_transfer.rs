use crate::prelude::*;

use tracing::debug;

use crate::applications::transfer::context::{
    TokenTransferExecutionContext, TokenTransferValidationContext,
};
use crate::applications::transfer::denom::TracePrefix;
use crate::applications::transfer::error::TokenTransferError;
use crate::applications::transfer::events::TransferEvent;
use crate::applications::transfer::msgs::transfer::MsgTransfer;
use crate::applications::transfer::packet::PacketData;
use crate::core::ics04_channel::handler::send_packet::{send_packet_execute, send_packet_validate};
use crate::core::ics04_channel::packet::Packet;
use crate::core::ics24_host::path::{ChannelEndPath, SeqSendPath};
use crate::events::{IbcEvent, ModuleEvent};

/// Initiate a token transfer. Equivalent to calling [`send_transfer_validate`], followed by [`send_transfer_execute`].
pub fn send_transfer<Ctx>(ctx_a: &mut Ctx, msg: MsgTransfer) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    send_transfer_validate(ctx_a, &msg)?;
    send_transfer_execute(ctx_a, msg)
}

/// Validates the token transfer. If this succeeds, then it is legal to initiate the transfer with [`send_transfer_execute`].
pub fn send_transfer_validate<Ctx>(ctx_a: &Ctx, msg: &MsgTransfer) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    ctx_a.can_send_coins()?;

    let packet = transfer_packet(ctx_a, msg)?;

    if msg.source {
        ctx_a.escrow_coins_validate(
            &msg.sender,
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            &msg.coins,
        )?;
    } else {
        ctx_a.burn_coins_validate(&msg.sender, &msg.coins)?;
    }

    send_packet_validate(ctx_a, &packet)?;

    Ok(())
}

/// Executes the token transfer. A prior call to [`send_transfer_validate`] MUST have succeeded.
pub fn send_transfer_execute<Ctx>(ctx_a: &mut Ctx, msg: MsgTransfer) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    let packet = transfer_packet(ctx_a, &msg)?;

    if msg.source {
        ctx_a.escrow_coins_execute(
            &msg.sender,
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            &msg.coins,
        )?;
    } else {
        ctx_a.burn_coins_execute(&msg.sender, &msg.coins)?;
    }

    send_packet_execute(ctx_a, packet)?;

    {
        ctx_a.log_message(format!(
            "IBC fungible token transfer: {} --({})--> {}",
            msg.sender, msg.coins, msg.receiver
        ));

        let transfer_event = TransferEvent {
            sender: msg.sender,
            receiver: msg.receiver,
            amount: msg.coins,
            source: msg.source,
        };
        ctx_a.emit_ibc_event(IbcEvent::AppModule(ModuleEvent::from(transfer_event)));
    }

    Ok(())
}

/// Builds the packet carrying `msg`, checking the coins' trace prefixes.
///
/// Coins leaving their origin chain must not carry this channel's prefix, and
/// travel with the counterparty's prefix so that the receiving chain mints
/// vouchers under its own end of the channel. Vouchers travelling back must
/// carry this channel's prefix and keep it.
fn transfer_packet<Ctx>(ctx_a: &Ctx, msg: &MsgTransfer) -> Result<Packet, TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    msg.coins.validate()?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let port_id_on_b = chan_end_on_a.counterparty().port_id().clone();
    let chan_id_on_b = chan_end_on_a.counterparty().channel_id().clone();

    let seq_send_path_on_a = SeqSendPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let sequence = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

    let prefix_on_a = TracePrefix::new(msg.port_id_on_a.clone(), msg.chan_id_on_a.clone());
    let packet_coins = if msg.source {
        if let Some(coin) = msg.coins.iter().find(|coin| coin.denom.has_prefix(&prefix_on_a)) {
            debug!(denom = %coin.denom, "source transfer of a voucher of this channel");
            return Err(TokenTransferError::InvalidDenom {
                denom: coin.denom.to_string(),
                reason: format!("coins sent from their origin cannot carry `{prefix_on_a}`"),
            });
        }
        let prefix_on_b = TracePrefix::new(port_id_on_b.clone(), chan_id_on_b.clone());
        msg.coins.try_map_denoms(|denom| Ok(denom.add_prefix(&prefix_on_b)))?
    } else {
        if let Some(coin) = msg.coins.iter().find(|coin| !coin.denom.has_prefix(&prefix_on_a)) {
            debug!(denom = %coin.denom, "returned voucher lacks the channel prefix");
            return Err(TokenTransferError::InvalidDenom {
                denom: coin.denom.to_string(),
                reason: format!("returned vouchers must carry `{prefix_on_a}`"),
            });
        }
        msg.coins.clone()
    };

    let data = PacketData::new(
        packet_coins,
        msg.sender.clone(),
        msg.receiver.clone(),
        msg.source,
    )
    .to_bytes()?;

    Ok(Packet {
        seq_on_a: sequence,
        port_id_on_a: msg.port_id_on_a.clone(),
        chan_id_on_a: msg.chan_id_on_a.clone(),
        port_id_on_b,
        chan_id_on_b,
        data,
        timeout_height_on_b: msg.timeout_height_on_b,
    })
}
