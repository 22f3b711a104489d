//! Defines all token transfer event types

use crate::prelude::*;

use super::coin::Coins;
use super::MODULE_ID_STR;
use crate::events::ModuleEvent;
use crate::signer::Signer;

const EVENT_TYPE_PACKET: &str = "fungible_token_packet";
const EVENT_TYPE_TRANSFER: &str = "transfer";

/// Contains all events variants that can be emitted from the token transfer application
pub enum Event {
    Recv(RecvEvent),
    Transfer(TransferEvent),
}

/// Event emitted by the `onRecvPacket` module callback to indicate that the
/// `RecvPacket` message was processed
pub struct RecvEvent {
    pub sender: Signer,
    pub receiver: Signer,
    pub amount: Coins,
    /// Whether the coins were minted as vouchers rather than released from escrow.
    pub minted: bool,
}

impl From<RecvEvent> for ModuleEvent {
    fn from(ev: RecvEvent) -> Self {
        let RecvEvent {
            sender,
            receiver,
            amount,
            minted,
        } = ev;
        Self {
            kind: EVENT_TYPE_PACKET.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("sender", sender).into(),
                ("receiver", receiver).into(),
                ("amount", amount).into(),
                ("minted", minted).into(),
            ],
        }
    }
}

/// Event emitted after a successful `sendTransfer`
pub struct TransferEvent {
    pub sender: Signer,
    pub receiver: Signer,
    pub amount: Coins,
    pub source: bool,
}

impl From<TransferEvent> for ModuleEvent {
    fn from(ev: TransferEvent) -> Self {
        let TransferEvent {
            sender,
            receiver,
            amount,
            source,
        } = ev;
        Self {
            kind: EVENT_TYPE_TRANSFER.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("sender", sender).into(),
                ("receiver", receiver).into(),
                ("amount", amount).into(),
                ("source", source).into(),
            ],
        }
    }
}

impl From<Event> for ModuleEvent {
    fn from(ev: Event) -> Self {
        match ev {
            Event::Recv(ev) => ev.into(),
            Event::Transfer(ev) => ev.into(),
        }
    }
}
