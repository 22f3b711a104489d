//! Binary merkle tree over the sorted entries of one store version.
//!
//! The tree has the shape of the Tendermint simple merkle tree: values sit in
//! the leaves and every inner node splits at the largest power of two below
//! its number of leaves. Its proofs therefore verify under
//! [`ics23::tendermint_spec`], both for present and for absent keys.

use crate::prelude::*;

use ics23::commitment_proof::Proof;
use ics23::{
    CommitmentProof, ExistenceProof, HashOp, InnerOp, LeafOp, LengthOp, NonExistenceProof,
};
use sha2::{Digest, Sha256};

use crate::core::ics23_commitment::commitment::CommitmentRoot;

const LEAF_PREFIX: u8 = 0;
const INNER_PREFIX: u8 = 1;

fn leaf_op() -> LeafOp {
    LeafOp {
        hash: HashOp::Sha256.into(),
        prehash_key: HashOp::NoHash.into(),
        prehash_value: HashOp::Sha256.into(),
        length: LengthOp::VarProto.into(),
        prefix: vec![LEAF_PREFIX],
    }
}

fn extend_length_prefixed(buf: &mut Vec<u8>, data: &[u8]) {
    prost::encoding::encode_varint(data.len() as u64, buf);
    buf.extend_from_slice(data);
}

fn leaf_hash(key: &[u8], value: &[u8]) -> Vec<u8> {
    let mut preimage = vec![LEAF_PREFIX];
    extend_length_prefixed(&mut preimage, key);
    extend_length_prefixed(&mut preimage, &Sha256::digest(value));
    Sha256::digest(&preimage).to_vec()
}

fn inner_hash(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut sha = Sha256::new();
    sha.update([INNER_PREFIX]);
    sha.update(left);
    sha.update(right);
    sha.finalize().to_vec()
}

/// Largest power of two strictly less than `length` (`length` > 1).
fn split_point(length: usize) -> usize {
    let mut split = 1;
    while split * 2 < length {
        split *= 2;
    }
    split
}

fn root_of(leaves: &[Vec<u8>]) -> Vec<u8> {
    match leaves {
        [] => Sha256::digest(b"").to_vec(),
        [leaf] => leaf.clone(),
        _ => {
            let split = split_point(leaves.len());
            inner_hash(&root_of(&leaves[..split]), &root_of(&leaves[split..]))
        }
    }
}

/// Inner steps from the leaf at `index` up to the root, leaf first.
fn path_of(leaves: &[Vec<u8>], index: usize) -> Vec<InnerOp> {
    if leaves.len() <= 1 {
        return Vec::new();
    }
    let split = split_point(leaves.len());
    let (mut path, step) = if index < split {
        let step = InnerOp {
            hash: HashOp::Sha256.into(),
            prefix: vec![INNER_PREFIX],
            suffix: root_of(&leaves[split..]),
        };
        (path_of(&leaves[..split], index), step)
    } else {
        let mut prefix = vec![INNER_PREFIX];
        prefix.extend(root_of(&leaves[..split]));
        let step = InnerOp {
            hash: HashOp::Sha256.into(),
            prefix,
            suffix: Vec::new(),
        };
        (path_of(&leaves[split..], index - split), step)
    };
    path.push(step);
    path
}

#[derive(Clone, Debug)]
pub struct MerkleTree {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    leaves: Vec<Vec<u8>>,
}

impl MerkleTree {
    pub fn from_map(map: &BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        let entries: Vec<_> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let leaves = entries.iter().map(|(k, v)| leaf_hash(k, v)).collect();
        Self { entries, leaves }
    }

    /// The root hash; an empty tree hashes to `sha256("")`.
    pub fn root(&self) -> CommitmentRoot {
        root_of(&self.leaves).into()
    }

    fn existence_proof(&self, index: usize) -> Option<ExistenceProof> {
        let (key, value) = self.entries.get(index)?.clone();
        Some(ExistenceProof {
            key,
            value,
            leaf: Some(leaf_op()),
            path: path_of(&self.leaves, index),
        })
    }

    /// Proves membership of `key` if present, non-membership otherwise.
    ///
    /// Nothing can be proven about an empty tree.
    pub fn prove(&self, key: &[u8]) -> Option<CommitmentProof> {
        if self.entries.is_empty() {
            return None;
        }
        let proof = match self
            .entries
            .binary_search_by(|(k, _)| k.as_slice().cmp(key))
        {
            Ok(index) => Proof::Exist(self.existence_proof(index)?),
            Err(index) => Proof::Nonexist(NonExistenceProof {
                key: key.to_vec(),
                left: index
                    .checked_sub(1)
                    .and_then(|i| self.existence_proof(i)),
                right: self.existence_proof(index),
            }),
        };
        Some(CommitmentProof { proof: Some(proof) })
    }
}

#[cfg(test)]
mod tests {
    use ics23::{tendermint_spec, HostFunctionsManager};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn tree() -> MerkleTree {
        let map = (1..=5u8)
            .map(|i| (vec![b'k', i * 2], vec![b'v', i]))
            .collect::<BTreeMap<_, _>>();
        MerkleTree::from_map(&map)
    }

    fn root(tree: &MerkleTree) -> Vec<u8> {
        tree.root().into_vec()
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    fn every_leaf_proves_membership(tree: MerkleTree, #[case] i: u8) {
        let key = vec![b'k', i * 2];
        let proof = tree.prove(&key).unwrap();

        assert!(ics23::verify_membership::<HostFunctionsManager>(
            &proof,
            &tendermint_spec(),
            &root(&tree),
            &key,
            &[b'v', i]
        ));
        assert!(!ics23::verify_membership::<HostFunctionsManager>(
            &proof,
            &tendermint_spec(),
            &root(&tree),
            &key,
            &[b'v', i + 1]
        ));
    }

    #[rstest]
    #[case(vec![b'k', 0])]
    #[case(vec![b'k', 5])]
    #[case(vec![b'k', 7])]
    #[case(vec![b'k', 11])]
    fn absent_keys_prove_non_membership(tree: MerkleTree, #[case] key: Vec<u8>) {
        let proof = tree.prove(&key).unwrap();

        assert!(ics23::verify_non_membership::<HostFunctionsManager>(
            &proof,
            &tendermint_spec(),
            &root(&tree),
            &key
        ));
    }

    #[rstest]
    fn non_adjacent_neighbours_are_rejected(tree: MerkleTree) {
        let exist = |key: &[u8]| match tree.prove(key).unwrap().proof {
            Some(Proof::Exist(proof)) => proof,
            _ => panic!("expected existence proof"),
        };
        // skips the leaf `k4`, which is present
        let proof = CommitmentProof {
            proof: Some(Proof::Nonexist(NonExistenceProof {
                key: vec![b'k', 4],
                left: Some(exist(&[b'k', 2])),
                right: Some(exist(&[b'k', 6])),
            })),
        };

        assert!(!ics23::verify_non_membership::<HostFunctionsManager>(
            &proof,
            &tendermint_spec(),
            &root(&tree),
            &[b'k', 4]
        ));
    }

    #[test]
    fn empty_tree_proves_nothing() {
        let tree = MerkleTree::from_map(&BTreeMap::new());

        assert_eq!(tree.root().as_bytes(), Sha256::digest(b"").as_slice());
        assert!(tree.prove(b"anything").is_none());
    }

    #[test]
    fn single_leaf_root_is_the_leaf_hash() {
        let map = BTreeMap::from([(b"key".to_vec(), b"value".to_vec())]);
        let tree = MerkleTree::from_map(&map);

        assert_eq!(root(&tree), leaf_hash(b"key", b"value"));
        assert!(tree.prove(b"key").is_some());
    }
}
