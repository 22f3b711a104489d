use crate::prelude::*;

use core::str::FromStr;

use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::error::ClientError;
use crate::proto::client::ClientState as RawClientState;
use crate::Height;

/// What the tracker knows about a client: which algorithm feeds it and the
/// height of its newest verified root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientState {
    pub client_type: ClientType,
    pub latest_height: Height,
}

impl ClientState {
    pub fn new(client_type: ClientType, latest_height: Height) -> Self {
        Self {
            client_type,
            latest_height,
        }
    }

    pub fn latest_height(&self) -> Height {
        self.latest_height
    }

    /// Returns a copy advanced to `height`, which must exceed the latest height.
    pub fn advance(&self, height: Height) -> Result<Self, ClientError> {
        if height <= self.latest_height {
            return Err(ClientError::NonMonotonicHeight {
                latest_height: self.latest_height,
                height,
            });
        }
        Ok(Self {
            client_type: self.client_type.clone(),
            latest_height: height,
        })
    }
}

impl TryFrom<RawClientState> for ClientState {
    type Error = ClientError;

    fn try_from(raw: RawClientState) -> Result<Self, Self::Error> {
        Ok(Self {
            client_type: ClientType::from_str(&raw.client_type)?,
            latest_height: raw
                .latest_height
                .ok_or(ClientError::MissingHeight)?
                .try_into()?,
        })
    }
}

impl From<ClientState> for RawClientState {
    fn from(value: ClientState) -> Self {
        RawClientState {
            client_type: value.client_type.as_str().to_string(),
            latest_height: Some(value.latest_height.into()),
        }
    }
}
