use crate::prelude::*;

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use crate::core::ics02_client::error::ClientError;

/// Type of the light client algorithm supplying consensus states, e.g.
/// `07-tendermint`. The tracker only records it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientType(String);

impl ClientType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClientType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ClientError::InvalidClientType {
                client_type: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for ClientType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}
