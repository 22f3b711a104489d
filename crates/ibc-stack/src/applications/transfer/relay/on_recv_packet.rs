use crate::prelude::*;

use crate::applications::transfer::coin::Coins;
use crate::applications::transfer::context::{
    TokenTransferExecutionContext, TokenTransferValidationContext,
};
use crate::applications::transfer::denom::TracePrefix;
use crate::applications::transfer::error::TokenTransferError;
use crate::applications::transfer::events::RecvEvent;
use crate::applications::transfer::packet::PacketData;
use crate::core::ics04_channel::packet::Packet;
use crate::core::router::ModuleExtras;

/// How the receiving chain credits the coins of an incoming packet.
enum Credit {
    /// The sender was the origin: mint vouchers named after our end of the channel.
    Mint(Coins),
    /// The coins are coming home: release the base coins from escrow.
    Unescrow(Coins),
}

/// Decodes the packet data and works out which coins to credit, checking
/// that every denomination carries the prefix the packet's direction demands.
fn credit_of(packet: &Packet) -> Result<(PacketData, Credit), TokenTransferError> {
    let data = PacketData::from_bytes(&packet.data)?;
    data.validate_basic()?;

    let credit = if data.source {
        let prefix_on_b =
            TracePrefix::new(packet.port_id_on_b.clone(), packet.chan_id_on_b.clone());
        ensure_prefixed(&data.amount, &prefix_on_b)?;
        Credit::Mint(data.amount.clone())
    } else {
        let prefix_on_a =
            TracePrefix::new(packet.port_id_on_a.clone(), packet.chan_id_on_a.clone());
        let base_coins = data
            .amount
            .try_map_denoms(|denom| denom.remove_prefix(&prefix_on_a))?;
        Credit::Unescrow(base_coins)
    };

    Ok((data, credit))
}

fn ensure_prefixed(coins: &Coins, prefix: &TracePrefix) -> Result<(), TokenTransferError> {
    match coins.iter().find(|coin| !coin.denom.has_prefix(prefix)) {
        Some(coin) => Err(TokenTransferError::InvalidDenom {
            denom: coin.denom.to_string(),
            reason: format!("expected prefix `{prefix}`"),
        }),
        None => Ok(()),
    }
}

/// Checks that the packet can be credited in full, including that no
/// balance it touches overflows, so that execution never fails halfway
/// through.
pub fn process_recv_packet_validate<Ctx>(
    ctx_b: &Ctx,
    packet: &Packet,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    ctx_b.can_receive_coins()?;

    let (data, credit) = credit_of(packet)?;
    match credit {
        Credit::Mint(coins) => ctx_b.mint_coins_validate(&data.receiver, &coins),
        Credit::Unescrow(coins) => ctx_b.unescrow_coins_validate(
            &data.receiver,
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            &coins,
        ),
    }
}

/// This function handles the transfer receiving logic.
pub fn process_recv_packet_execute<Ctx>(
    ctx_b: &mut Ctx,
    packet: &Packet,
) -> Result<ModuleExtras, TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    let (data, credit) = credit_of(packet)?;

    let (credited, minted) = match credit {
        Credit::Mint(coins) => {
            ctx_b.mint_coins_execute(&data.receiver, &coins)?;
            (coins, true)
        }
        Credit::Unescrow(coins) => {
            ctx_b.unescrow_coins_execute(
                &data.receiver,
                &packet.port_id_on_b,
                &packet.chan_id_on_b,
                &coins,
            )?;
            (coins, false)
        }
    };

    let log = vec![format!(
        "IBC fungible token receive: {} --({})--> {}",
        data.sender, credited, data.receiver
    )];
    let recv_event = RecvEvent {
        sender: data.sender,
        receiver: data.receiver,
        amount: credited,
        minted,
    };

    Ok(ModuleExtras {
        events: vec![recv_event.into()],
        log,
    })
}
