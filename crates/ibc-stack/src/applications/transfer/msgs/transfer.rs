//! This is the definition of a transfer messages that an application submits to a chain.

use crate::prelude::*;

use prost::Message;

use crate::applications::transfer::coin::{Coin, Coins};
use crate::applications::transfer::error::TokenTransferError;
use crate::core::ics04_channel::timeout::TimeoutHeight;
use crate::core::ics24_host::identifier::{ChannelId, PortId};
use crate::core::msgs::Msg;
use crate::core::ContextError;
use crate::proto::transfer::MsgTransfer as RawMsgTransfer;
use crate::proto::Any;
use crate::signer::Signer;

pub const TYPE_URL: &str = "/ibc.applications.transfer.v1.MsgTransfer";

/// Message used to build an ICS20 token transfer packet.
///
/// Note that this message is not a packet yet, as it lacks the proper sequence
/// number, and destination port/channel. The sender only specifies the
/// transfer itself and lets the library build the packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTransfer {
    /// the port on which the packet will be sent
    pub port_id_on_a: PortId,
    /// the channel by which the packet will be sent
    pub chan_id_on_a: ChannelId,
    /// the tokens to be transferred
    pub coins: Coins,
    /// the sender address
    pub sender: Signer,
    /// the recipient address on the destination chain
    pub receiver: Signer,
    /// whether this chain is the origin of the tokens
    pub source: bool,
    /// The timeout is disabled when set to `Never`.
    pub timeout_height_on_b: TimeoutHeight,
}

impl Msg for MsgTransfer {
    type Raw = RawMsgTransfer;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgTransfer> for MsgTransfer {
    type Error = TokenTransferError;

    fn try_from(raw_msg: RawMsgTransfer) -> Result<Self, Self::Error> {
        let timeout_height_on_b = TimeoutHeight::try_from(raw_msg.timeout_height)
            .map_err(ContextError::from)?;

        let coins = Coins::new(
            raw_msg
                .token
                .into_iter()
                .map(Coin::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        )?;
        coins.validate()?;

        Ok(MsgTransfer {
            port_id_on_a: raw_msg.source_port.parse()?,
            chan_id_on_a: raw_msg.source_channel.parse()?,
            coins,
            sender: raw_msg.sender.parse()?,
            receiver: raw_msg.receiver.parse()?,
            source: raw_msg.source,
            timeout_height_on_b,
        })
    }
}

impl From<MsgTransfer> for RawMsgTransfer {
    fn from(domain_msg: MsgTransfer) -> Self {
        RawMsgTransfer {
            source_port: domain_msg.port_id_on_a.to_string(),
            source_channel: domain_msg.chan_id_on_a.to_string(),
            token: domain_msg.coins.into_iter().map(Into::into).collect(),
            sender: domain_msg.sender.to_string(),
            receiver: domain_msg.receiver.to_string(),
            source: domain_msg.source,
            timeout_height: domain_msg.timeout_height_on_b.into(),
        }
    }
}

impl TryFrom<Any> for MsgTransfer {
    type Error = TokenTransferError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            TYPE_URL => RawMsgTransfer::decode(raw.value.as_slice())
                .map_err(TokenTransferError::DecodeRawMsg)?
                .try_into(),
            _ => Err(TokenTransferError::UnknownMsgType {
                msg_type: raw.type_url,
            }),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_util::get_dummy_msg_transfer;
    use super::*;
    use crate::proto::transfer::Coin as RawCoin;
    use crate::ErrorKind;

    #[test]
    fn msg_transfer_through_any() {
        let msg = get_dummy_msg_transfer("5stake,100atom", true);

        let decoded = MsgTransfer::try_from(msg.clone().to_any()).unwrap();

        assert_eq!(decoded, msg);
        assert_eq!(decoded.coins.to_string(), "100atom,5stake");
    }

    #[test]
    fn wrong_type_url_is_unknown() {
        let mut any = get_dummy_msg_transfer("100atom", true).to_any();
        any.type_url = "/ibc.core.channel.v1.MsgRecvPacket".to_string();

        let err = MsgTransfer::try_from(any).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnknownRequest);
    }

    #[test]
    fn raw_msg_without_tokens_is_rejected() {
        let mut raw = RawMsgTransfer::from(get_dummy_msg_transfer("100atom", true));
        raw.token.clear();

        assert!(matches!(
            MsgTransfer::try_from(raw),
            Err(TokenTransferError::EmptyCoins)
        ));
    }

    #[test]
    fn raw_msg_with_bad_token_is_rejected() {
        let mut raw = RawMsgTransfer::from(get_dummy_msg_transfer("100atom", true));
        raw.token = vec![RawCoin {
            denom: "atom".to_string(),
            amount: "0".to_string(),
        }];

        assert!(MsgTransfer::try_from(raw.clone()).is_err());

        raw.token[0].denom = String::new();
        raw.token[0].amount = "1".to_string();
        let err = MsgTransfer::try_from(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDenom);
    }

    #[test]
    fn raw_msg_with_empty_sender_is_rejected() {
        let mut raw = RawMsgTransfer::from(get_dummy_msg_transfer("100atom", true));
        raw.sender = String::new();

        assert!(matches!(
            MsgTransfer::try_from(raw),
            Err(TokenTransferError::Signer(_))
        ));
    }
}
