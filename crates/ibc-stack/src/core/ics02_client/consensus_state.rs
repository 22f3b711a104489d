use crate::prelude::*;

use core::str::FromStr;

use crate::core::ics02_client::error::ClientError;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics24_host::identifier::ChainId;
use crate::proto::client::ConsensusState as RawConsensusState;
use crate::Height;

/// A counterparty chain's consensus state at some height, as vouched for by
/// that chain's light client algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusState {
    pub chain_id: ChainId,
    pub height: Height,
    /// Root of the counterparty store at `height`.
    pub root: CommitmentRoot,
    /// Opaque encoding of the validator set expected to sign the next block.
    pub next_validator_set: Vec<u8>,
}

impl ConsensusState {
    pub fn new(
        chain_id: ChainId,
        height: Height,
        root: CommitmentRoot,
        next_validator_set: Vec<u8>,
    ) -> Self {
        Self {
            chain_id,
            height,
            root,
            next_validator_set,
        }
    }

    pub fn root(&self) -> &CommitmentRoot {
        &self.root
    }
}

impl TryFrom<RawConsensusState> for ConsensusState {
    type Error = ClientError;

    fn try_from(raw: RawConsensusState) -> Result<Self, Self::Error> {
        let chain_id = ChainId::from_str(&raw.chain_id).map_err(ClientError::InvalidIdentifier)?;
        let height = raw
            .height
            .ok_or(ClientError::MissingHeight)?
            .try_into()?;
        if raw.root.is_empty() {
            return Err(ClientError::EmptyConsensusStateRoot);
        }

        Ok(Self {
            chain_id,
            height,
            root: raw.root.into(),
            next_validator_set: raw.next_validator_set,
        })
    }
}

impl From<ConsensusState> for RawConsensusState {
    fn from(value: ConsensusState) -> Self {
        RawConsensusState {
            chain_id: value.chain_id.to_string(),
            height: Some(value.height.into()),
            root: value.root.into_vec(),
            next_validator_set: value.next_validator_set,
        }
    }
}
