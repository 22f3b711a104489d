use crate::prelude::*;

use sha2::{Digest, Sha256};

use crate::core::ics04_channel::timeout::TimeoutHeight;

/// Packet commitment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketCommitment(Vec<u8>);

impl PacketCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for PacketCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PacketCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Compute the commitment for a packet.
///
/// The hash covers the big-endian timeout revision number and height followed
/// by the hash of the packet data. A `Never` timeout commits as zeroes.
pub fn compute_packet_commitment(
    packet_data: &[u8],
    timeout_height: &TimeoutHeight,
) -> PacketCommitment {
    let mut hash_input = [0; 8 * 2 + 32];

    hash_input[..8].copy_from_slice(&timeout_height.commitment_revision_number().to_be_bytes());
    hash_input[8..16].copy_from_slice(&timeout_height.commitment_revision_height().to_be_bytes());

    let packet_data_hash = hash(packet_data);
    hash_input[16..].copy_from_slice(&packet_data_hash);

    hash(&hash_input).to_vec().into()
}

fn hash(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}
