//! Token denominations and the channel-path prefixes that record where a
//! token has travelled.
//!
//! A token minted on this chain after crossing the channel `secondport/ch2`
//! carries the denomination `secondport/ch2/atom`. The prefix is what lets
//! the token be redeemed against the right escrow when it travels back.

use crate::prelude::*;

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TokenTransferError;
use crate::core::ics24_host::identifier::{ChannelId, PortId};

/// One hop in a token's trace: the port and channel a denomination prefix names.
///
/// Renders as `{port_id}/{channel_id}/`, exactly the string prepended to a
/// denomination.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct TracePrefix {
    port_id: PortId,
    channel_id: ChannelId,
}

impl TracePrefix {
    pub fn new(port_id: PortId, channel_id: ChannelId) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

impl Display for TracePrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}/", self.port_id, self.channel_id)
    }
}

/// A denomination, possibly prefixed by one or more trace hops.
///
/// Denominations are 1 to 128 characters long and may only contain
/// letters, digits and the separators `/`, `:`, `.`, `_` and `-`.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true iff this denomination starts with `prefix`.
    pub fn has_prefix(&self, prefix: &TracePrefix) -> bool {
        self.0.starts_with(&prefix.to_string())
    }

    /// Returns this denomination with `prefix` prepended.
    pub fn add_prefix(&self, prefix: &TracePrefix) -> Denom {
        Denom(format!("{prefix}{}", self.0))
    }

    /// Returns this denomination without its leading `prefix`, failing if it
    /// does not carry it or if nothing would remain.
    pub fn remove_prefix(&self, prefix: &TracePrefix) -> Result<Denom, TokenTransferError> {
        match self.0.strip_prefix(&prefix.to_string()) {
            Some(base) if !base.is_empty() => Ok(Denom(base.to_string())),
            _ => Err(TokenTransferError::InvalidDenom {
                denom: self.0.clone(),
                reason: format!("expected prefix `{prefix}`"),
            }),
        }
    }
}

impl FromStr for Denom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(TokenTransferError::EmptyBaseDenom);
        }
        if s.len() > 128 {
            return Err(TokenTransferError::InvalidDenom {
                denom: s.to_string(),
                reason: "longer than 128 characters".to_string(),
            });
        }
        if s.contains(|c| {
            !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '/' | ':' | '.' | '_' | '-')
        }) {
            return Err(TokenTransferError::InvalidDenom {
                denom: s.to_string(),
                reason: "contains an invalid character".to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Denom {
    type Error = TokenTransferError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Denom> for String {
    fn from(denom: Denom) -> Self {
        denom.0
    }
}

impl Display for Denom {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}
