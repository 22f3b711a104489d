//! The proof verification boundary. Handshake and packet handlers only ever
//! talk to a [`CommitmentScheme`], so the merkle construction can be swapped
//! without touching them.

use core::fmt::Debug;

use ics23::{HostFunctionsManager, ProofSpec};

use super::commitment::{CommitmentProofBytes, CommitmentRoot};
use super::error::CommitmentError;
use super::merkle::MerkleProof;

/// Verifies membership and non-membership proofs against a commitment root.
pub trait CommitmentScheme: Debug {
    /// Checks that `key` maps to exactly `value` in the tree committed to by `root`.
    fn verify_membership(
        &self,
        root: &CommitmentRoot,
        proof: &CommitmentProofBytes,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), CommitmentError>;

    /// Checks that `key` is absent from the tree committed to by `root`.
    fn verify_non_membership(
        &self,
        root: &CommitmentRoot,
        proof: &CommitmentProofBytes,
        key: &[u8],
    ) -> Result<(), CommitmentError>;
}

/// ICS-23 proofs checked against a single [`ProofSpec`].
///
/// Defaults to [`ics23::tendermint_spec`], the layout of the simple merkle
/// tree: sha256 leaves over the length-prefixed key and hashed value, sha256
/// inner nodes with two children.
#[derive(Clone, Debug, PartialEq)]
pub struct Ics23Scheme {
    spec: ProofSpec,
}

impl Ics23Scheme {
    pub fn new(spec: ProofSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &ProofSpec {
        &self.spec
    }
}

impl Default for Ics23Scheme {
    fn default() -> Self {
        Self::new(ics23::tendermint_spec())
    }
}

impl CommitmentScheme for Ics23Scheme {
    fn verify_membership(
        &self,
        root: &CommitmentRoot,
        proof: &CommitmentProofBytes,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), CommitmentError> {
        MerkleProof::try_from(proof)?.verify_membership::<HostFunctionsManager>(
            &self.spec, root, key, value,
        )
    }

    fn verify_non_membership(
        &self,
        root: &CommitmentRoot,
        proof: &CommitmentProofBytes,
        key: &[u8],
    ) -> Result<(), CommitmentError> {
        MerkleProof::try_from(proof)?.verify_non_membership::<HostFunctionsManager>(
            &self.spec, root, key,
        )
    }
}

#[cfg(test)]
mod tests {
    use ics23::commitment_proof::Proof;
    use ics23::{
        calculate_existence_root, BatchProof, CommitmentProof, ExistenceProof, LengthOp,
    };
    use rstest::{fixture, rstest};

    use super::*;
    use crate::mock::tree::MerkleTree;
    use crate::prelude::*;

    const KEY: &[u8] = b"ibc/connections/conn-a";
    const VALUE: &[u8] = b"end-a";

    #[fixture]
    fn tree() -> MerkleTree {
        let map = BTreeMap::from([
            (KEY.to_vec(), VALUE.to_vec()),
            (b"ibc/connections/conn-c".to_vec(), b"end-c".to_vec()),
            (b"ibc/connections/conn-d".to_vec(), b"end-d".to_vec()),
        ]);
        MerkleTree::from_map(&map)
    }

    fn encode(proof: CommitmentProof) -> CommitmentProofBytes {
        MerkleProof::from(proof).into()
    }

    fn existence_proof(tree: &MerkleTree) -> ExistenceProof {
        match tree.prove(KEY).unwrap().proof {
            Some(Proof::Exist(proof)) => proof,
            _ => panic!("expected existence proof"),
        }
    }

    /// Re-encodes `proof` together with the root it folds up to.
    fn self_consistent(proof: ExistenceProof) -> (CommitmentRoot, CommitmentProofBytes) {
        let root = calculate_existence_root::<HostFunctionsManager>(&proof).unwrap();
        let proof = CommitmentProof {
            proof: Some(Proof::Exist(proof)),
        };
        (root.into(), encode(proof))
    }

    #[rstest]
    fn verifies_encoded_proofs(tree: MerkleTree) {
        let root = tree.root();
        let scheme = Ics23Scheme::default();

        let proof = encode(tree.prove(KEY).unwrap());
        assert!(scheme.verify_membership(&root, &proof, KEY, VALUE).is_ok());
        assert!(matches!(
            scheme.verify_membership(&root, &proof, KEY, b"end-b"),
            Err(CommitmentError::ValueMismatch)
        ));
        assert!(matches!(
            scheme.verify_non_membership(&root, &proof, KEY),
            Err(CommitmentError::ExpectedNonExistenceProof)
        ));

        let absent = encode(tree.prove(b"ibc/connections/conn-b").unwrap());
        assert!(scheme
            .verify_non_membership(&root, &absent, b"ibc/connections/conn-b")
            .is_ok());
        assert!(matches!(
            scheme.verify_membership(&root, &absent, b"ibc/connections/conn-b", VALUE),
            Err(CommitmentError::ExpectedExistenceProof)
        ));
    }

    #[rstest]
    fn proof_against_another_root_fails(tree: MerkleTree) {
        let proof = encode(tree.prove(KEY).unwrap());
        let other = CommitmentRoot::from_bytes(&[7; 32]);

        assert!(matches!(
            Ics23Scheme::default().verify_membership(&other, &proof, KEY, VALUE),
            Err(CommitmentError::VerificationFailure)
        ));
    }

    #[rstest]
    fn flipping_a_proof_byte_fails_verification(tree: MerkleTree) {
        let mut bytes: Vec<u8> = encode(tree.prove(KEY).unwrap()).into();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        let proof = CommitmentProofBytes::try_from(bytes).unwrap();

        assert!(Ics23Scheme::default()
            .verify_membership(&tree.root(), &proof, KEY, VALUE)
            .is_err());
    }

    #[test]
    fn garbage_proof_is_rejected() {
        let proof = CommitmentProofBytes::try_from(vec![0xff, 0xff, 0xff]).unwrap();
        let root = CommitmentRoot::from_bytes(&[1; 32]);

        assert!(matches!(
            Ics23Scheme::default().verify_membership(&root, &proof, KEY, VALUE),
            Err(CommitmentError::CommitmentProofDecodingFailed(_))
        ));
    }

    #[test]
    fn proof_without_variant_is_rejected() {
        // a single unknown varint field, which decodes to an empty proof
        let proof = CommitmentProofBytes::try_from(vec![0x28, 0x01]).unwrap();
        let root = CommitmentRoot::from_bytes(&[1; 32]);

        assert!(matches!(
            Ics23Scheme::default().verify_membership(&root, &proof, KEY, VALUE),
            Err(CommitmentError::MissingProofVariant)
        ));
    }

    #[rstest]
    fn batch_proofs_are_not_accepted(tree: MerkleTree) {
        let proof = encode(CommitmentProof {
            proof: Some(Proof::Batch(BatchProof::default())),
        });

        assert!(matches!(
            Ics23Scheme::default().verify_membership(&tree.root(), &proof, KEY, VALUE),
            Err(CommitmentError::ExpectedExistenceProof)
        ));
    }

    // Each proof below folds up to its own root, so only the `ProofSpec` can reject it.
    #[rstest]
    fn proof_outside_the_proof_spec_is_rejected(tree: MerkleTree) {
        let scheme = Ics23Scheme::default();

        let mut unprefixed_leaf = existence_proof(&tree);
        if let Some(leaf) = unprefixed_leaf.leaf.as_mut() {
            leaf.length = LengthOp::NoPrefix.into();
        }
        let (root, proof) = self_consistent(unprefixed_leaf);
        assert!(matches!(
            scheme.verify_membership(&root, &proof, KEY, VALUE),
            Err(CommitmentError::VerificationFailure)
        ));

        let mut oversized_step = existence_proof(&tree);
        oversized_step.path[0].prefix.extend([0xab; 64]);
        let (root, proof) = self_consistent(oversized_step);
        assert!(matches!(
            scheme.verify_membership(&root, &proof, KEY, VALUE),
            Err(CommitmentError::VerificationFailure)
        ));
    }

    #[rstest]
    fn oversized_path_fails_without_panicking(tree: MerkleTree) {
        let mut proof = existence_proof(&tree);
        let step = proof.path[0].clone();
        proof.path.extend(core::iter::repeat(step).take(4096));
        let proof = encode(CommitmentProof {
            proof: Some(Proof::Exist(proof)),
        });

        assert!(matches!(
            Ics23Scheme::default().verify_membership(&tree.root(), &proof, KEY, VALUE),
            Err(CommitmentError::VerificationFailure)
        ));
    }
}
