use crate::prelude::*;

use displaydoc::Display;

use crate::core::ics02_client::error::ClientError;
use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics04_channel::error::{ChannelError, PacketError};
use crate::core::ics05_port::error::PortError;
use crate::core::ics24_host::store::StoreError;

/// Classification of every failure the stack reports, independent of the
/// component that raised it.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// not found
    NotFound,
    /// already exists
    AlreadyExists,
    /// invalid state
    InvalidState,
    /// unauthorized
    Unauthorized,
    /// proof verification failed
    ProofVerificationFailed,
    /// invalid denomination
    InvalidDenom,
    /// insufficient funds
    InsufficientFunds,
    /// insufficient escrow
    InsufficientEscrow,
    /// unknown request
    UnknownRequest,
    /// invalid input
    InvalidInput,
    /// storage failure
    Storage,
}

/// Failures of the host itself rather than of the protocol.
#[derive(Debug, Display)]
pub enum HostError {
    /// stored record at `{path}` cannot be decoded: {description}
    DecodeStoredRecord { path: String, description: String },
    /// store error: {0}
    Store(StoreError),
}

#[cfg(feature = "std")]
impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Store(e) => Some(e),
            Self::DecodeStoredRecord { .. } => None,
        }
    }
}

#[derive(Debug, Display)]
pub enum ContextError {
    /// ICS02 Client error: {0}
    ClientError(ClientError),
    /// ICS03 Connection error: {0}
    ConnectionError(ConnectionError),
    /// ICS04 Channel error: {0}
    ChannelError(ChannelError),
    /// ICS04 Packet error: {0}
    PacketError(PacketError),
    /// ICS05 Port error: {0}
    PortError(PortError),
    /// Host error: {0}
    HostError(HostError),
}

impl ContextError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientError(e) => e.kind(),
            Self::ConnectionError(e) => e.kind(),
            Self::ChannelError(e) => e.kind(),
            Self::PacketError(e) => e.kind(),
            Self::PortError(e) => e.kind(),
            Self::HostError(_) => ErrorKind::Storage,
        }
    }
}

impl From<ClientError> for ContextError {
    fn from(err: ClientError) -> ContextError {
        Self::ClientError(err)
    }
}

impl From<ConnectionError> for ContextError {
    fn from(err: ConnectionError) -> ContextError {
        Self::ConnectionError(err)
    }
}

impl From<ChannelError> for ContextError {
    fn from(err: ChannelError) -> ContextError {
        Self::ChannelError(err)
    }
}

impl From<PacketError> for ContextError {
    fn from(err: PacketError) -> ContextError {
        Self::PacketError(err)
    }
}

impl From<PortError> for ContextError {
    fn from(err: PortError) -> ContextError {
        Self::PortError(err)
    }
}

impl From<HostError> for ContextError {
    fn from(err: HostError) -> ContextError {
        Self::HostError(err)
    }
}

impl From<StoreError> for ContextError {
    fn from(err: StoreError) -> ContextError {
        Self::HostError(HostError::Store(err))
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ClientError(e) => Some(e),
            Self::ConnectionError(e) => Some(e),
            Self::ChannelError(e) => Some(e),
            Self::PacketError(e) => Some(e),
            Self::PortError(e) => Some(e),
            Self::HostError(e) => Some(e),
        }
    }
}
