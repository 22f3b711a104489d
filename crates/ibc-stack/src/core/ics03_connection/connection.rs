//! Defines the types that define a connection

use crate::prelude::*;

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics03_connection::version::Version;
use crate::core::ics23_commitment::commitment::CommitmentPrefix;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::proto::connection::{
    ConnectionEnd as RawConnectionEnd, Counterparty as RawCounterparty,
};

/// A connection end as stored on one of the two chains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionEnd {
    pub state: State,
    client_id: ClientId,
    counterparty: Counterparty,
    versions: Vec<Version>,
}

impl ConnectionEnd {
    pub fn new(
        state: State,
        client_id: ClientId,
        counterparty: Counterparty,
        versions: Vec<Version>,
    ) -> Self {
        Self {
            state,
            client_id,
            counterparty,
            versions,
        }
    }

    /// Getter for the state of this connection end.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Setter for the `state` field.
    pub fn set_state(&mut self, new_state: State) {
        self.state = new_state;
    }

    /// Setter for the `version` field, fixing the negotiated version.
    pub fn set_version(&mut self, new_version: Version) {
        self.versions = vec![new_version];
    }

    /// Helper function to compare the state of this end with another state.
    pub fn state_matches(&self, other: &State) -> bool {
        self.state.eq(other)
    }

    /// Getter for the client id on the local party of this connection end.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Getter for the list of versions in this connection end.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Getter for the counterparty.
    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    /// Returns whether or not this connection is in the `Open` state.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Fails unless the connection is in the `expected` state.
    pub fn verify_state_matches(
        &self,
        connection_id: &ConnectionId,
        expected: State,
    ) -> Result<(), ConnectionError> {
        if !self.state_matches(&expected) {
            return Err(ConnectionError::InvalidState {
                connection_id: connection_id.clone(),
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }
}

impl TryFrom<RawConnectionEnd> for ConnectionEnd {
    type Error = ConnectionError;

    fn try_from(value: RawConnectionEnd) -> Result<Self, Self::Error> {
        let state = State::from_i32(value.state)?;
        let client_id =
            ClientId::from_str(&value.client_id).map_err(ConnectionError::InvalidIdentifier)?;
        let counterparty = value
            .counterparty
            .ok_or(ConnectionError::MissingCounterparty)?
            .try_into()?;
        let versions = value
            .versions
            .into_iter()
            .map(Version::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(state, client_id, counterparty, versions))
    }
}

impl From<ConnectionEnd> for RawConnectionEnd {
    fn from(value: ConnectionEnd) -> Self {
        RawConnectionEnd {
            client_id: value.client_id.to_string(),
            versions: value.versions.into_iter().map(Into::into).collect(),
            state: value.state as i32,
            counterparty: Some(value.counterparty.into()),
        }
    }
}

/// The other end of a connection, as seen from the local chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterparty {
    client_id: ClientId,
    connection_id: ConnectionId,
    prefix: CommitmentPrefix,
}

impl Counterparty {
    pub fn new(client_id: ClientId, connection_id: ConnectionId, prefix: CommitmentPrefix) -> Self {
        Self {
            client_id,
            connection_id,
            prefix,
        }
    }

    /// Getter for the client id.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Getter for connection id.
    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    /// Getter for the commitment prefix under which the counterparty stores its state.
    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }
}

impl TryFrom<RawCounterparty> for Counterparty {
    type Error = ConnectionError;

    fn try_from(raw_counterparty: RawCounterparty) -> Result<Self, Self::Error> {
        Ok(Counterparty::new(
            ClientId::from_str(&raw_counterparty.client_id)
                .map_err(ConnectionError::InvalidIdentifier)?,
            ConnectionId::from_str(&raw_counterparty.connection_id)
                .map_err(ConnectionError::InvalidIdentifier)?,
            CommitmentPrefix::try_from(raw_counterparty.prefix)
                .map_err(ConnectionError::InvalidCommitmentPrefix)?,
        ))
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(value: Counterparty) -> Self {
        RawCounterparty {
            client_id: value.client_id.to_string(),
            connection_id: value.connection_id.to_string(),
            prefix: value.prefix.into_vec(),
        }
    }
}

/// Handshake progress of a connection end. Only ever advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    Uninitialized = 0isize,
    Init = 1isize,
    TryOpen = 2isize,
    Open = 3isize,
}

impl State {
    /// Yields the State as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
        }
    }

    /// Parses the State out from a i32.
    pub fn from_i32(s: i32) -> Result<Self, ConnectionError> {
        match s {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Init),
            2 => Ok(Self::TryOpen),
            3 => Ok(Self::Open),
            _ => Err(ConnectionError::UnknownState { state: s }),
        }
    }

    /// Returns whether or not this connection state is `Open`.
    pub fn is_open(self) -> bool {
        self == State::Open
    }

    /// Returns whether or not this connection with this state
    /// has progressed less or the same than the argument.
    pub fn less_or_equal_progress(self, other: Self) -> bool {
        self <= other
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}
