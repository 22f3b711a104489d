use crate::prelude::*;

use core::str::FromStr;

use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics03_connection::version::Version;
use crate::core::ics23_commitment::commitment::CommitmentProofBytes;
use crate::core::ics24_host::identifier::ConnectionId;
use crate::core::msgs::Msg;
use crate::proto::connection::MsgConnectionOpenAck as RawMsgConnectionOpenAck;
use crate::signer::Signer;
use crate::Height;

pub const TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenAck";

/// Per our convention, this message is sent to chain A.
/// The handler will check proofs of chain B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenAck {
    /// ConnectionId that chain A has chosen for it's ConnectionEnd
    pub conn_id_on_a: ConnectionId,
    /// proof of ConnectionEnd stored on Chain B during ConnOpenTry
    pub proof_conn_end_on_b: CommitmentProofBytes,
    /// Height at which the proof was produced on chain B
    pub proofs_height_on_b: Height,
    /// The version chain B picked in its `OpenTry`
    pub version: Version,
    pub signer: Signer,
}

impl Msg for MsgConnectionOpenAck {
    type Raw = RawMsgConnectionOpenAck;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgConnectionOpenAck> for MsgConnectionOpenAck {
    type Error = ConnectionError;

    fn try_from(msg: RawMsgConnectionOpenAck) -> Result<Self, Self::Error> {
        Ok(Self {
            conn_id_on_a: ConnectionId::from_str(&msg.connection_id)
                .map_err(ConnectionError::InvalidIdentifier)?,
            version: msg
                .version
                .ok_or(ConnectionError::EmptyVersions)?
                .try_into()?,
            proof_conn_end_on_b: msg
                .proof_try
                .try_into()
                .map_err(ConnectionError::InvalidProof)?,
            proofs_height_on_b: msg
                .proof_height
                .ok_or(ConnectionError::MissingProofHeight)?
                .try_into()?,
            signer: msg.signer.parse().map_err(ConnectionError::Signer)?,
        })
    }
}

impl From<MsgConnectionOpenAck> for RawMsgConnectionOpenAck {
    fn from(msg: MsgConnectionOpenAck) -> Self {
        RawMsgConnectionOpenAck {
            connection_id: msg.conn_id_on_a.to_string(),
            version: Some(msg.version.into()),
            proof_try: msg.proof_conn_end_on_b.into(),
            proof_height: Some(msg.proofs_height_on_b.into()),
            signer: msg.signer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ics03_connection::version::get_compatible_versions;
    use crate::proto::client::Height as RawHeight;

    fn dummy_raw_msg() -> RawMsgConnectionOpenAck {
        RawMsgConnectionOpenAck {
            connection_id: "conn-on-a".to_string(),
            version: get_compatible_versions().into_iter().next().map(Into::into),
            proof_try: vec![1, 2, 3],
            proof_height: Some(RawHeight {
                revision_number: 0,
                revision_height: 10,
            }),
            signer: "cosmos1signer".to_string(),
        }
    }

    #[test]
    fn parse_connection_open_ack_msg() {
        let raw = dummy_raw_msg();
        let msg = MsgConnectionOpenAck::try_from(raw.clone()).unwrap();
        assert_eq!(RawMsgConnectionOpenAck::from(msg), raw);

        let no_version = RawMsgConnectionOpenAck {
            version: None,
            ..dummy_raw_msg()
        };
        assert!(matches!(
            MsgConnectionOpenAck::try_from(no_version),
            Err(ConnectionError::EmptyVersions)
        ));
    }
}
