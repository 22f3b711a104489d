use crate::prelude::*;

use core::str::FromStr;

use crate::core::ics03_connection::connection::Counterparty;
use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics03_connection::version::Version;
use crate::core::ics23_commitment::commitment::CommitmentProofBytes;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::core::msgs::Msg;
use crate::proto::connection::MsgConnectionOpenTry as RawMsgConnectionOpenTry;
use crate::signer::Signer;
use crate::Height;

pub const TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenTry";

/// Per our convention, this message is sent to chain B.
/// The handler will check proofs of chain A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenTry {
    pub conn_id_on_b: ConnectionId,
    /// ClientId on B that the connection is being opened for
    pub client_id_on_b: ClientId,
    /// Names the connection end on chain A, its client and its store prefix
    pub counterparty: Counterparty,
    /// Versions chain A proposed in its `OpenInit`
    pub versions_on_a: Vec<Version>,
    /// proof of ConnectionEnd stored on Chain A during ConnOpenInit
    pub proof_conn_end_on_a: CommitmentProofBytes,
    /// Height at which the proof was produced on chain A
    pub proofs_height_on_a: Height,
    pub signer: Signer,
}

impl Msg for MsgConnectionOpenTry {
    type Raw = RawMsgConnectionOpenTry;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgConnectionOpenTry> for MsgConnectionOpenTry {
    type Error = ConnectionError;

    fn try_from(msg: RawMsgConnectionOpenTry) -> Result<Self, Self::Error> {
        let versions_on_a = msg
            .counterparty_versions
            .into_iter()
            .map(Version::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if versions_on_a.is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }

        Ok(Self {
            conn_id_on_b: ConnectionId::from_str(&msg.connection_id)
                .map_err(ConnectionError::InvalidIdentifier)?,
            client_id_on_b: ClientId::from_str(&msg.client_id)
                .map_err(ConnectionError::InvalidIdentifier)?,
            counterparty: msg
                .counterparty
                .ok_or(ConnectionError::MissingCounterparty)?
                .try_into()?,
            versions_on_a,
            proof_conn_end_on_a: msg
                .proof_init
                .try_into()
                .map_err(ConnectionError::InvalidProof)?,
            proofs_height_on_a: msg
                .proof_height
                .ok_or(ConnectionError::MissingProofHeight)?
                .try_into()?,
            signer: msg.signer.parse().map_err(ConnectionError::Signer)?,
        })
    }
}

impl From<MsgConnectionOpenTry> for RawMsgConnectionOpenTry {
    fn from(msg: MsgConnectionOpenTry) -> Self {
        RawMsgConnectionOpenTry {
            connection_id: msg.conn_id_on_b.to_string(),
            client_id: msg.client_id_on_b.to_string(),
            counterparty: Some(msg.counterparty.into()),
            counterparty_versions: msg.versions_on_a.into_iter().map(Into::into).collect(),
            proof_init: msg.proof_conn_end_on_a.into(),
            proof_height: Some(msg.proofs_height_on_a.into()),
            signer: msg.signer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::core::ics03_connection::version::get_compatible_versions;
    use crate::proto::client::Height as RawHeight;
    use crate::proto::connection::Counterparty as RawCounterparty;

    fn dummy_raw_msg() -> RawMsgConnectionOpenTry {
        RawMsgConnectionOpenTry {
            connection_id: "conn-on-b".to_string(),
            client_id: "client-on-b".to_string(),
            counterparty: Some(RawCounterparty {
                client_id: "client-on-a".to_string(),
                connection_id: "conn-on-a".to_string(),
                prefix: b"ibc".to_vec(),
            }),
            counterparty_versions: get_compatible_versions()
                .into_iter()
                .map(Into::into)
                .collect(),
            proof_init: vec![1, 2, 3],
            proof_height: Some(RawHeight {
                revision_number: 0,
                revision_height: 10,
            }),
            signer: "cosmos1signer".to_string(),
        }
    }

    #[test]
    fn raw_round_trip() {
        let raw = dummy_raw_msg();
        let msg = MsgConnectionOpenTry::try_from(raw.clone()).unwrap();
        assert_eq!(RawMsgConnectionOpenTry::from(msg), raw);
    }

    #[rstest]
    #[case::empty_proof(RawMsgConnectionOpenTry { proof_init: vec![], ..dummy_raw_msg() })]
    #[case::missing_proof_height(RawMsgConnectionOpenTry { proof_height: None, ..dummy_raw_msg() })]
    #[case::zero_proof_height(RawMsgConnectionOpenTry {
        proof_height: Some(RawHeight { revision_number: 0, revision_height: 0 }),
        ..dummy_raw_msg()
    })]
    #[case::no_versions(RawMsgConnectionOpenTry { counterparty_versions: vec![], ..dummy_raw_msg() })]
    #[case::bad_connection_id(RawMsgConnectionOpenTry {
        connection_id: "/conn".to_string(),
        ..dummy_raw_msg()
    })]
    fn rejects_malformed(#[case] raw: RawMsgConnectionOpenTry) {
        assert!(MsgConnectionOpenTry::try_from(raw).is_err());
    }
}
