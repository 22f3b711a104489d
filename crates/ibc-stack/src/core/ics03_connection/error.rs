use crate::prelude::*;

use displaydoc::Display;

use crate::core::error::ErrorKind;
use crate::core::ics02_client::error::ClientError;
use crate::core::ics03_connection::connection::State;
use crate::core::ics03_connection::version::Version;
use crate::core::ics23_commitment::error::CommitmentError;
use crate::core::ics24_host::error::IdentifierError;
use crate::core::ics24_host::identifier::ConnectionId;
use crate::signer::SignerError;

#[derive(Debug, Display)]
pub enum ConnectionError {
    /// client error: `{0}`
    Client(ClientError),
    /// connection state is unknown: `{state}`
    UnknownState { state: i32 },
    /// connection `{connection_id}` is in state `{actual}`, expected `{expected}`
    InvalidState {
        connection_id: ConnectionId,
        expected: State,
        actual: State,
    },
    /// connection exists (was initialized) already: `{connection_id}`
    ConnectionExistsAlready { connection_id: ConnectionId },
    /// no connection was found for the connection id `{connection_id}`
    ConnectionNotFound { connection_id: ConnectionId },
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// empty supported versions
    EmptyVersions,
    /// empty supported features
    EmptyFeatures,
    /// no common version
    NoCommonVersion,
    /// no common features
    NoCommonFeatures,
    /// version \"`{version}`\" not supported
    VersionNotSupported { version: Version },
    /// feature \"`{feature}`\" not supported
    FeatureNotSupported { feature: String },
    /// missing counterparty
    MissingCounterparty,
    /// missing proof height
    MissingProofHeight,
    /// invalid counterparty commitment prefix: `{0}`
    InvalidCommitmentPrefix(CommitmentError),
    /// invalid connection proof: `{0}`
    InvalidProof(CommitmentError),
    /// error verifying connection state: `{0}`
    VerifyConnectionState(CommitmentError),
    /// invalid signer: `{0}`
    Signer(SignerError),
}

impl ConnectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Client(e) => e.kind(),
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::ConnectionExistsAlready { .. } => ErrorKind::AlreadyExists,
            Self::ConnectionNotFound { .. } => ErrorKind::NotFound,
            Self::VerifyConnectionState(_) => ErrorKind::ProofVerificationFailed,
            Self::UnknownState { .. }
            | Self::InvalidIdentifier(_)
            | Self::EmptyVersions
            | Self::EmptyFeatures
            | Self::NoCommonVersion
            | Self::NoCommonFeatures
            | Self::VersionNotSupported { .. }
            | Self::FeatureNotSupported { .. }
            | Self::MissingCounterparty
            | Self::MissingProofHeight
            | Self::InvalidCommitmentPrefix(_)
            | Self::InvalidProof(_)
            | Self::Signer(_) => ErrorKind::InvalidInput,
        }
    }
}

impl From<ClientError> for ConnectionError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Client(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::InvalidCommitmentPrefix(e) => Some(e),
            Self::InvalidProof(e) => Some(e),
            Self::VerifyConnectionState(e) => Some(e),
            Self::Signer(e) => Some(e),
            _ => None,
        }
    }
}
