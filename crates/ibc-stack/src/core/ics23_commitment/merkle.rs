//! Merkle proofs in the ICS-23 format.
//!
//! A store key lives in a single tree, so a proof is one
//! [`ics23::CommitmentProof`] checked directly against the committed root.

use ics23::commitment_proof::Proof;
use ics23::{
    calculate_existence_root, verify_membership, verify_non_membership, CommitmentProof,
    HostFunctionsProvider, ProofSpec,
};
use prost::Message;

use super::commitment::{CommitmentProofBytes, CommitmentRoot};
use super::error::CommitmentError;

#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    proof: CommitmentProof,
}

impl MerkleProof {
    pub fn new(proof: CommitmentProof) -> Self {
        Self { proof }
    }

    pub fn inner(&self) -> &CommitmentProof {
        &self.proof
    }

    pub fn verify_membership<H: HostFunctionsProvider>(
        &self,
        spec: &ProofSpec,
        root: &CommitmentRoot,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), CommitmentError> {
        if root.is_empty() {
            return Err(CommitmentError::EmptyMerkleRoot);
        }
        if value.is_empty() {
            return Err(CommitmentError::EmptyVerifiedValue);
        }
        let Some(Proof::Exist(existence_proof)) = &self.proof.proof else {
            return Err(CommitmentError::ExpectedExistenceProof);
        };
        if existence_proof.key != key {
            return Err(CommitmentError::KeyMismatch);
        }
        if existence_proof.value != value {
            return Err(CommitmentError::ValueMismatch);
        }

        let calculated = calculate_existence_root::<H>(existence_proof)
            .map_err(|_| CommitmentError::InvalidMerkleProof)?;
        if calculated != root.as_bytes() {
            return Err(CommitmentError::VerificationFailure);
        }
        if !verify_membership::<H>(&self.proof, spec, &calculated, key, value) {
            return Err(CommitmentError::VerificationFailure);
        }

        Ok(())
    }

    pub fn verify_non_membership<H: HostFunctionsProvider>(
        &self,
        spec: &ProofSpec,
        root: &CommitmentRoot,
        key: &[u8],
    ) -> Result<(), CommitmentError> {
        if root.is_empty() {
            return Err(CommitmentError::EmptyMerkleRoot);
        }
        let Some(Proof::Nonexist(non_existence_proof)) = &self.proof.proof else {
            return Err(CommitmentError::ExpectedNonExistenceProof);
        };
        if non_existence_proof.key != key {
            return Err(CommitmentError::KeyMismatch);
        }

        let root = root.as_bytes().to_vec();
        if !verify_non_membership::<H>(&self.proof, spec, &root, key) {
            return Err(CommitmentError::VerificationFailure);
        }

        Ok(())
    }
}

impl From<CommitmentProof> for MerkleProof {
    fn from(proof: CommitmentProof) -> Self {
        Self::new(proof)
    }
}

impl From<MerkleProof> for CommitmentProofBytes {
    fn from(proof: MerkleProof) -> Self {
        // the oneof tag of the proof variant keeps the encoding non-empty
        Self::from_encoded(proof.proof.encode_to_vec())
    }
}

impl<'a> TryFrom<&'a CommitmentProofBytes> for MerkleProof {
    type Error = CommitmentError;

    fn try_from(value: &'a CommitmentProofBytes) -> Result<Self, Self::Error> {
        let proof = CommitmentProof::decode(value.as_bytes())
            .map_err(CommitmentError::CommitmentProofDecodingFailed)?;
        if proof.proof.is_none() {
            return Err(CommitmentError::MissingProofVariant);
        }
        Ok(Self { proof })
    }
}
