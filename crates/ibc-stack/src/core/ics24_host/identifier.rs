use crate::prelude::*;

use core::fmt::{Debug, Display, Error as FmtError, Formatter};
use core::str::FromStr;

use derive_more::Into;

use super::error::IdentifierError;
use super::validate::{
    validate_generic_identifier, validate_identifier, validate_port_identifier,
    MAX_IDENTIFIER_LENGTH,
};

/// The identifier of a chain, optionally carrying a revision number as its
/// `{name}-{revision}` suffix.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainId {
    id: String,
    revision_number: u64,
}

impl ChainId {
    /// Creates a chain identifier, extracting the revision number when the
    /// identifier follows the `{name}-{revision}` format and defaulting to `0`
    /// otherwise.
    pub fn new(id: &str) -> Result<Self, IdentifierError> {
        validate_identifier(id, 1, MAX_IDENTIFIER_LENGTH)?;
        let revision_number = Self::extract_revision_number(id).unwrap_or(0);
        Ok(Self {
            id: id.to_string(),
            revision_number,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    /// Returns `Some(revision)` if the identifier ends in `-{u64}`.
    fn extract_revision_number(id: &str) -> Option<u64> {
        let (name, revision) = id.rsplit_once('-')?;
        if name.is_empty() || (revision.starts_with('0') && revision.len() > 1) {
            return None;
        }
        revision.parse().ok()
    }
}

impl FromStr for ChainId {
    type Err = IdentifierError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::new(id)
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.id)
    }
}

/// Declares a validated string identifier newtype.
macro_rules! string_identifier {
    ($(#[$attr:meta])* $name:ident, $validate:path) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $validate(s).map(|_| Self(s.to_string()))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str().eq(other)
            }
        }
    };
}

string_identifier!(
    /// Identifies a light client tracking a counterparty chain.
    ClientId,
    validate_generic_identifier
);

string_identifier!(
    /// Identifies a connection end on the host chain.
    ConnectionId,
    validate_generic_identifier
);

string_identifier!(
    /// Identifies a channel end, scoped by its port.
    ChannelId,
    validate_generic_identifier
);

string_identifier!(
    /// Identifies a port, the unit of ownership of channels.
    PortId,
    validate_port_identifier
);

impl PortId {
    /// The port the token transfer application binds to by default.
    pub fn transfer() -> Self {
        Self("transfer".to_string())
    }
}
