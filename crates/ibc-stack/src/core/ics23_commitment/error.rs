use displaydoc::Display;
use prost::DecodeError;

#[derive(Debug, Display)]
pub enum CommitmentError {
    /// empty commitment prefix
    EmptyCommitmentPrefix,
    /// empty merkle proof
    EmptyMerkleProof,
    /// empty merkle root
    EmptyMerkleRoot,
    /// failed to decode commitment proof: `{0}`
    CommitmentProofDecodingFailed(DecodeError),
    /// commitment proof carries no proof variant
    MissingProofVariant,
    /// empty verified value
    EmptyVerifiedValue,
    /// expected an existence proof
    ExpectedExistenceProof,
    /// expected a non-existence proof
    ExpectedNonExistenceProof,
    /// proven key does not match the queried key
    KeyMismatch,
    /// proven value does not match the expected value
    ValueMismatch,
    /// invalid merkle proof
    InvalidMerkleProof,
    /// proof verification failed
    VerificationFailure,
}

#[cfg(feature = "std")]
impl std::error::Error for CommitmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CommitmentProofDecodingFailed(e) => Some(e),
            _ => None,
        }
    }
}
