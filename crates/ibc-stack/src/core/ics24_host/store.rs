//! Interface to the versioned merkle key/value store that persists IBC state
//! and serves the proofs counterparties verify.

use crate::prelude::*;

use displaydoc::Display;

use crate::core::ics23_commitment::commitment::{CommitmentProofBytes, CommitmentRoot};

/// Identifies a committed version of the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitInfo {
    pub version: u64,
    pub root_hash: CommitmentRoot,
}

/// The answer to a [`ProvableStore::query`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResult {
    pub value: Option<Vec<u8>>,
    pub proof: Option<CommitmentProofBytes>,
    pub version: u64,
}

/// Controls which committed versions remain queryable.
///
/// A version is kept if it is among the `keep_recent` most recent versions, or
/// if `keep_every` is non-zero and divides it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PruningOptions {
    keep_recent: u64,
    keep_every: u64,
}

impl PruningOptions {
    pub fn new(keep_recent: u64, keep_every: u64) -> Self {
        Self {
            keep_recent: keep_recent.max(1),
            keep_every,
        }
    }

    /// Keeps every version.
    pub fn everything() -> Self {
        Self::new(1, 1)
    }

    /// Keeps only the latest version.
    pub fn nothing() -> Self {
        Self::new(1, 0)
    }

    pub fn keep_recent(&self) -> u64 {
        self.keep_recent
    }

    pub fn keep_every(&self) -> u64 {
        self.keep_every
    }

    pub fn retains(&self, latest: u64, version: u64) -> bool {
        if version > latest || version == 0 {
            return false;
        }
        latest - version < self.keep_recent
            || (self.keep_every != 0 && version % self.keep_every == 0)
    }
}

impl Default for PruningOptions {
    fn default() -> Self {
        Self::everything()
    }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum StoreError {
    /// version `{version}` is unavailable (latest `{latest}`): pruned or not yet committed
    HeightUnavailable { version: u64, latest: u64 },
    /// nothing has been committed yet
    NothingCommitted,
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}

/// A merkleized key/value store with a commit lifecycle.
///
/// Writes go to a working set which [`commit`](ProvableStore::commit) seals
/// into a new version. Queries and proofs are served from committed versions.
pub trait ProvableStore {
    /// Reads from the working set.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);

    /// Seals the working set as version `latest_version() + 1`, then prunes.
    fn commit(&mut self) -> Result<CommitInfo, StoreError>;

    /// The latest committed version; `0` before the first commit.
    fn latest_version(&self) -> u64;

    /// Root hash of a retained version.
    fn root_hash(&self, version: u64) -> Result<CommitmentRoot, StoreError>;

    /// Reads `key` at `version` (the latest committed version when `None`),
    /// attaching a membership or non-membership proof if `prove` is set.
    fn query(
        &self,
        key: &[u8],
        version: Option<u64>,
        prove: bool,
    ) -> Result<QueryResult, StoreError>;

    /// Resets the working set to a retained version, discarding later ones.
    fn load_version(&mut self, version: u64) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(25, true)]
    #[case(24, false)]
    #[case(20, true)]
    #[case(15, false)]
    #[case(10, true)]
    #[case(26, false)]
    fn keep_recent_and_every_tenth(#[case] version: u64, #[case] retained: bool) {
        let pruning = PruningOptions::new(1, 10);
        assert_eq!(pruning.retains(25, version), retained);
    }

    #[test]
    fn nothing_keeps_only_latest() {
        let pruning = PruningOptions::nothing();
        assert!(pruning.retains(7, 7));
        assert!(!pruning.retains(7, 6));
        assert!((1..=7).all(|v| PruningOptions::default().retains(7, v)));
    }
}
