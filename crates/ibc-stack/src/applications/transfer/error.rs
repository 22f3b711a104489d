use crate::prelude::*;

use displaydoc::Display;
use uint::FromDecStrErr;

use crate::core::ics04_channel::channel::Order;
use crate::core::ics04_channel::version::Version;
use crate::core::ics24_host::error::IdentifierError;
use crate::core::ics24_host::identifier::PortId;
use crate::core::router::ModuleError;
use crate::core::ContextError;
use crate::signer::{Signer, SignerError};
use crate::ErrorKind;

use super::amount::Amount;
use super::denom::Denom;

#[derive(Display, Debug)]
pub enum TokenTransferError {
    /// context error: `{0}`
    ContextError(ContextError),
    /// invalid identifier: `{0}`
    InvalidIdentifier(IdentifierError),
    /// base denomination is empty
    EmptyBaseDenom,
    /// invalid denomination `{denom}`: {reason}
    InvalidDenom { denom: String, reason: String },
    /// invalid amount error: `{0}`
    InvalidAmount(FromDecStrErr),
    /// invalid coin string: `{coin}`
    InvalidCoin { coin: String },
    /// coin `{coin}` must have a positive amount
    NonPositiveAmount { coin: String },
    /// at least one coin must be transferred
    EmptyCoins,
    /// coins `{coins}` are not sorted by denomination or repeat one
    UnsortedCoins { coins: String },
    /// amount of `{denom}` overflows
    AmountOverflow { denom: Denom },
    /// failed to parse signer error: `{0}`
    Signer(SignerError),
    /// account `{account}` holds `{available}{denom}`, less than the requested `{requested}`
    InsufficientFunds {
        account: Signer,
        denom: Denom,
        available: Amount,
        requested: Amount,
    },
    /// escrow account `{account}` holds `{available}{denom}`, less than the requested `{requested}`
    InsufficientEscrow {
        account: Signer,
        denom: Denom,
        available: Amount,
        requested: Amount,
    },
    /// expected `{expect_order}` channel, got `{got_order}`
    ChannelNotUnordered {
        expect_order: Order,
        got_order: Order,
    },
    /// expected version `{expect_version}` , got `{got_version}`
    InvalidVersion {
        expect_version: Version,
        got_version: Version,
    },
    /// expected counterparty version `{expect_version}`, got `{got_version}`
    InvalidCounterpartyVersion {
        expect_version: Version,
        got_version: Version,
    },
    /// invalid port: `{port_id}`, expected `{exp_port_id}`
    InvalidPort {
        port_id: PortId,
        exp_port_id: PortId,
    },
    /// channel cannot be closed
    CantCloseChannel,
    /// failed to deserialize packet data: {reason}
    PacketDataDeserialization { reason: String },
    /// receive is not enabled
    ReceiveDisabled,
    /// send is not enabled
    SendDisabled,
    /// decoding raw msg error: `{0}`
    DecodeRawMsg(prost::DecodeError),
    /// unknown msg type: `{msg_type}`
    UnknownMsgType { msg_type: String },
}

impl TokenTransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContextError(e) => e.kind(),
            Self::EmptyBaseDenom | Self::InvalidDenom { .. } => ErrorKind::InvalidDenom,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::InsufficientEscrow { .. } => ErrorKind::InsufficientEscrow,
            Self::SendDisabled | Self::ReceiveDisabled | Self::CantCloseChannel => {
                ErrorKind::InvalidState
            }
            Self::UnknownMsgType { .. } => ErrorKind::UnknownRequest,
            Self::InvalidIdentifier(_)
            | Self::InvalidAmount(_)
            | Self::InvalidCoin { .. }
            | Self::NonPositiveAmount { .. }
            | Self::EmptyCoins
            | Self::UnsortedCoins { .. }
            | Self::AmountOverflow { .. }
            | Self::Signer(_)
            | Self::ChannelNotUnordered { .. }
            | Self::InvalidVersion { .. }
            | Self::InvalidCounterpartyVersion { .. }
            | Self::InvalidPort { .. }
            | Self::PacketDataDeserialization { .. }
            | Self::DecodeRawMsg(_) => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TokenTransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ContextError(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::InvalidAmount(e) => Some(e),
            Self::Signer(e) => Some(e),
            Self::DecodeRawMsg(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for TokenTransferError {
    fn from(err: ContextError) -> TokenTransferError {
        Self::ContextError(err)
    }
}

impl From<IdentifierError> for TokenTransferError {
    fn from(err: IdentifierError) -> TokenTransferError {
        Self::InvalidIdentifier(err)
    }
}

impl From<SignerError> for TokenTransferError {
    fn from(err: SignerError) -> TokenTransferError {
        Self::Signer(err)
    }
}

impl From<TokenTransferError> for ModuleError {
    fn from(err: TokenTransferError) -> ModuleError {
        ModuleError {
            kind: err.kind(),
            description: err.to_string(),
        }
    }
}
