use crate::prelude::*;

use displaydoc::Display;

/// Errors raised while parsing or validating host identifiers.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum IdentifierError {
    /// identifier `{id}` cannot contain separator '/'
    ContainSeparator { id: String },
    /// identifier `{id}` has invalid length `{length}` must be between `{min}`-`{max}` characters
    InvalidLength {
        id: String,
        length: usize,
        min: usize,
        max: usize,
    },
    /// identifier `{id}` must only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, - `[`, `]`, `<`, `>`
    InvalidCharacter { id: String },
    /// identifier cannot be empty
    Empty,
    /// chain identifiers are expected to be in epoch format `{id}`
    ChainIdNotEpochFormat { id: String },
}

#[cfg(feature = "std")]
impl std::error::Error for IdentifierError {}
