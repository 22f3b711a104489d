use crate::prelude::*;

use displaydoc::Display;

use crate::core::error::ErrorKind;
use crate::core::ics24_host::error::IdentifierError;
use crate::core::ics24_host::identifier::ClientId;
use crate::signer::SignerError;
use crate::Height;

/// Encodes all the possible client errors
#[derive(Debug, Display)]
pub enum ClientError {
    /// client is already created for identifier `{client_id}`
    ClientAlreadyExists { client_id: ClientId },
    /// client not found: `{client_id}`
    ClientStateNotFound { client_id: ClientId },
    /// consensus state not found for client `{client_id}`
    ConsensusStateNotFound { client_id: ClientId },
    /// no verified root for client `{client_id}` at height `{height}`
    VerifiedRootNotFound { client_id: ClientId, height: Height },
    /// height `{height}` must be greater than the latest stored height `{latest_height}`
    NonMonotonicHeight { latest_height: Height, height: Height },
    /// invalid client type: `{client_type}`
    InvalidClientType { client_type: String },
    /// invalid client identifier: `{0}`
    InvalidIdentifier(IdentifierError),
    /// missing raw consensus state
    MissingRawConsensusState,
    /// consensus state root cannot be empty
    EmptyConsensusStateRoot,
    /// missing height
    MissingHeight,
    /// invalid height; cannot be zero or negative
    InvalidHeight,
    /// height cannot end up zero or negative
    InvalidHeightResult,
    /// invalid signer: `{0}`
    Signer(SignerError),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientAlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::ClientStateNotFound { .. }
            | Self::ConsensusStateNotFound { .. }
            | Self::VerifiedRootNotFound { .. } => ErrorKind::NotFound,
            Self::NonMonotonicHeight { .. } => ErrorKind::InvalidState,
            Self::InvalidClientType { .. }
            | Self::InvalidIdentifier(_)
            | Self::MissingRawConsensusState
            | Self::EmptyConsensusStateRoot
            | Self::MissingHeight
            | Self::InvalidHeight
            | Self::InvalidHeightResult
            | Self::Signer(_) => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::InvalidIdentifier(e) => Some(e),
            Self::Signer(e) => Some(e),
            _ => None,
        }
    }
}
