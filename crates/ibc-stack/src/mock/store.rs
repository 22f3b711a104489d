//! An in-memory [`ProvableStore`] keeping a full snapshot per retained version.

use crate::prelude::*;

use tracing::trace;

use crate::core::ics23_commitment::commitment::{CommitmentProofBytes, CommitmentRoot};
use crate::core::ics23_commitment::merkle::MerkleProof;
use crate::core::ics24_host::store::{
    CommitInfo, ProvableStore, PruningOptions, QueryResult, StoreError,
};
use crate::mock::tree::MerkleTree;

#[derive(Clone, Debug)]
struct Snapshot {
    state: BTreeMap<Vec<u8>, Vec<u8>>,
    root: CommitmentRoot,
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    working: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Retained versions only; pruned ones are dropped at commit.
    versions: BTreeMap<u64, Snapshot>,
    latest: u64,
    pruning: PruningOptions,
}

impl InMemoryStore {
    pub fn new(pruning: PruningOptions) -> Self {
        Self {
            pruning,
            ..Default::default()
        }
    }

    pub fn pruning(&self) -> PruningOptions {
        self.pruning
    }

    /// The versions that can still be queried, oldest first.
    pub fn retained_versions(&self) -> Vec<u64> {
        self.versions.keys().copied().collect()
    }

    fn snapshot(&self, version: u64) -> Result<&Snapshot, StoreError> {
        if self.latest == 0 {
            return Err(StoreError::NothingCommitted);
        }
        self.versions
            .get(&version)
            .ok_or(StoreError::HeightUnavailable {
                version,
                latest: self.latest,
            })
    }
}

impl ProvableStore for InMemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.working.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.working.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.working.remove(key);
    }

    fn commit(&mut self) -> Result<CommitInfo, StoreError> {
        let version = self.latest + 1;
        let root = MerkleTree::from_map(&self.working).root();

        self.versions.insert(
            version,
            Snapshot {
                state: self.working.clone(),
                root: root.clone(),
            },
        );
        self.latest = version;

        let pruning = self.pruning;
        self.versions
            .retain(|&retained, _| pruning.retains(version, retained));

        trace!(
            version,
            keys = self.working.len(),
            retained = self.versions.len(),
            "committed store version"
        );

        Ok(CommitInfo {
            version,
            root_hash: root,
        })
    }

    fn latest_version(&self) -> u64 {
        self.latest
    }

    fn root_hash(&self, version: u64) -> Result<CommitmentRoot, StoreError> {
        Ok(self.snapshot(version)?.root.clone())
    }

    fn query(
        &self,
        key: &[u8],
        version: Option<u64>,
        prove: bool,
    ) -> Result<QueryResult, StoreError> {
        let version = version.unwrap_or(self.latest);
        let snapshot = self.snapshot(version)?;

        let proof = prove
            .then(|| MerkleTree::from_map(&snapshot.state).prove(key))
            .flatten()
            .map(|proof| CommitmentProofBytes::from(MerkleProof::from(proof)));
        trace!(version, prove, found = snapshot.state.contains_key(key), "store query");

        Ok(QueryResult {
            value: snapshot.state.get(key).cloned(),
            proof,
            version,
        })
    }

    fn load_version(&mut self, version: u64) -> Result<(), StoreError> {
        let state = self.snapshot(version)?.state.clone();

        self.working = state;
        self.versions.retain(|&retained, _| retained <= version);
        self.latest = version;

        trace!(version, "loaded store version");

        Ok(())
    }
}
