use crate::prelude::*;

use displaydoc::Display;

use super::channel::State;
use super::packet::Sequence;
use super::timeout::TimeoutHeight;
use crate::core::error::ErrorKind;
use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics04_channel::channel::Order;
use crate::core::ics04_channel::version::Version;
use crate::core::ics23_commitment::error::CommitmentError;
use crate::core::ics24_host::error::IdentifierError;
use crate::core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::core::router::ModuleError;
use crate::signer::SignerError;
use crate::Height;

#[derive(Debug, Display)]
pub enum ChannelError {
    /// connection error: `{0}`
    Connection(ConnectionError),
    /// channel state unknown: `{state}`
    UnknownState { state: i32 },
    /// channel order type unknown: `{type_id}`
    UnknownOrderType { type_id: String },
    /// invalid order type: expected `{expected}`; actual `{actual}`
    InvalidOrderType { expected: String, actual: String },
    /// invalid connection hops length: expected `{expected}`; actual `{actual}`
    InvalidConnectionHopsLength { expected: u64, actual: u64 },
    /// invalid signer address error: `{0}`
    Signer(SignerError),
    /// invalid proof: missing height
    MissingHeight,
    /// missing counterparty
    MissingCounterparty,
    /// missing channel end
    MissingChannel,
    /// invalid proof: `{0}`
    InvalidProof(CommitmentError),
    /// the channel ordering `{ordering}` is not supported by connection
    ChannelFeatureNotSupportedByConnection { ordering: Order },
    /// the channel end (`{port_id}`, `{channel_id}`) already exists
    ChannelExists {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// the channel end (`{port_id}`, `{channel_id}`) does not exist
    ChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// invalid channel state: expected `{expected}`, actual `{actual}`
    InvalidState { expected: String, actual: String },
    /// the associated connection `{connection_id}` is not OPEN
    ConnectionNotOpen { connection_id: ConnectionId },
    /// counterparty version `{actual}` does not match the local version `{expected}`
    VersionMismatch { expected: Version, actual: Version },
    /// error verifying channel state: `{0}`
    VerifyChannelFailed(CommitmentError),
    /// String `{value}` cannot be converted to packet sequence, error: `{error}`
    InvalidStringAsSequence {
        value: String,
        error: core::num::ParseIntError,
    },
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// `{0}`
    AppModule(ModuleError),
}

impl ChannelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(e) => e.kind(),
            Self::AppModule(e) => e.kind,
            Self::ChannelExists { .. } => ErrorKind::AlreadyExists,
            Self::ChannelNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidState { .. } | Self::ConnectionNotOpen { .. } => ErrorKind::InvalidState,
            Self::VerifyChannelFailed(_) => ErrorKind::ProofVerificationFailed,
            Self::UnknownState { .. }
            | Self::UnknownOrderType { .. }
            | Self::InvalidOrderType { .. }
            | Self::InvalidConnectionHopsLength { .. }
            | Self::Signer(_)
            | Self::MissingHeight
            | Self::MissingCounterparty
            | Self::MissingChannel
            | Self::InvalidProof(_)
            | Self::ChannelFeatureNotSupportedByConnection { .. }
            | Self::VersionMismatch { .. }
            | Self::InvalidStringAsSequence { .. }
            | Self::InvalidIdentifier(_) => ErrorKind::InvalidInput,
        }
    }
}

#[derive(Debug, Display)]
pub enum PacketError {
    /// the channel end (`{port_id}`, `{channel_id}`) does not exist
    ChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// Channel `{channel_id}` should not be state `{state}`
    InvalidChannelState { channel_id: ChannelId, state: State },
    /// the associated connection `{connection_id}` is not OPEN
    ConnectionNotOpen { connection_id: ConnectionId },
    /// packet destination port `{port_id}` and channel `{channel_id}` doesn't match the counterparty's port/channel
    InvalidPacketCounterparty {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// Receiving chain block height `{chain_height}` >= packet timeout height `{timeout_height}`
    LowPacketHeight {
        chain_height: Height,
        timeout_height: TimeoutHeight,
    },
    /// Invalid packet sequence `{given_sequence}` ≠ next sequence `{next_sequence}`
    InvalidPacketSequence {
        given_sequence: Sequence,
        next_sequence: Sequence,
    },
    /// packet with sequence `{sequence}` has already been received
    PacketAlreadyReceived { sequence: Sequence },
    /// a commitment for the packet with sequence `{sequence}` already exists
    PacketCommitmentExists { sequence: Sequence },
    /// Verification fails for the packet with the sequence number `{sequence}`, error: `{error}`
    PacketVerificationFailed {
        sequence: Sequence,
        error: CommitmentError,
    },
    /// invalid proof: `{0}`
    InvalidProof(CommitmentError),
    /// invalid proof: missing height
    MissingHeight,
    /// there is no packet in this message
    MissingPacket,
    /// invalid signer address error: `{0}`
    Signer(SignerError),
    /// packet sequence cannot be 0
    ZeroPacketSequence,
    /// invalid timeout height for the packet
    InvalidTimeoutHeight,
    /// packet data bytes cannot be empty
    ZeroPacketData,
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// Missing sequence number for sending packets on port `{port_id}` and channel `{channel_id}`
    MissingNextSendSeq {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// Missing sequence number for receiving packets on port `{port_id}` and channel `{channel_id}`
    MissingNextRecvSeq {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// Missing sequence number for ack packets on port `{port_id}` and channel `{channel_id}`
    MissingNextAckSeq {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// Commitment for the packet `{sequence}` not found
    PacketCommitmentNotFound { sequence: Sequence },
    /// Receipt for the packet `{sequence}` not found
    PacketReceiptNotFound { sequence: Sequence },
    /// `{0}`
    AppModule(ModuleError),
}

impl PacketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AppModule(e) => e.kind,
            Self::ChannelNotFound { .. }
            | Self::MissingNextSendSeq { .. }
            | Self::MissingNextRecvSeq { .. }
            | Self::MissingNextAckSeq { .. }
            | Self::PacketCommitmentNotFound { .. }
            | Self::PacketReceiptNotFound { .. } => ErrorKind::NotFound,
            Self::PacketAlreadyReceived { .. } | Self::PacketCommitmentExists { .. } => {
                ErrorKind::AlreadyExists
            }
            Self::InvalidChannelState { .. }
            | Self::ConnectionNotOpen { .. }
            | Self::LowPacketHeight { .. } => ErrorKind::InvalidState,
            Self::PacketVerificationFailed { .. } => ErrorKind::ProofVerificationFailed,
            Self::InvalidPacketCounterparty { .. }
            | Self::InvalidPacketSequence { .. }
            | Self::InvalidProof(_)
            | Self::MissingHeight
            | Self::MissingPacket
            | Self::Signer(_)
            | Self::ZeroPacketSequence
            | Self::InvalidTimeoutHeight
            | Self::ZeroPacketData
            | Self::InvalidIdentifier(_) => ErrorKind::InvalidInput,
        }
    }
}

impl From<IdentifierError> for ChannelError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidIdentifier(err)
    }
}

impl From<IdentifierError> for PacketError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidIdentifier(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Signer(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::InvalidProof(e) => Some(e),
            Self::PacketVerificationFailed { error: e, .. } => Some(e),
            Self::AppModule(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Connection(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::Signer(e) => Some(e),
            Self::InvalidProof(e) => Some(e),
            Self::VerifyChannelFailed(e) => Some(e),
            Self::InvalidStringAsSequence { error: e, .. } => Some(e),
            Self::AppModule(e) => Some(e),
            _ => None,
        }
    }
}
