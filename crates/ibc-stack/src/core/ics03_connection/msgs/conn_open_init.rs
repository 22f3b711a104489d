use crate::prelude::*;

use core::str::FromStr;

use crate::core::ics03_connection::connection::Counterparty;
use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics03_connection::version::Version;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::core::msgs::Msg;
use crate::proto::connection::MsgConnectionOpenInit as RawMsgConnectionOpenInit;
use crate::signer::Signer;

pub const TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenInit";

/// Per our convention, this message is sent to chain A.
/// The handler will check proofs of chain B.
///
/// An empty `versions` list proposes every version the host supports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenInit {
    pub conn_id_on_a: ConnectionId,
    /// ClientId on chain A that the connection is being opened for
    pub client_id_on_a: ClientId,
    pub counterparty: Counterparty,
    pub versions: Vec<Version>,
    pub signer: Signer,
}

impl Msg for MsgConnectionOpenInit {
    type Raw = RawMsgConnectionOpenInit;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgConnectionOpenInit> for MsgConnectionOpenInit {
    type Error = ConnectionError;

    fn try_from(msg: RawMsgConnectionOpenInit) -> Result<Self, Self::Error> {
        Ok(Self {
            conn_id_on_a: ConnectionId::from_str(&msg.connection_id)
                .map_err(ConnectionError::InvalidIdentifier)?,
            client_id_on_a: ClientId::from_str(&msg.client_id)
                .map_err(ConnectionError::InvalidIdentifier)?,
            counterparty: msg
                .counterparty
                .ok_or(ConnectionError::MissingCounterparty)?
                .try_into()?,
            versions: msg
                .versions
                .into_iter()
                .map(Version::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            signer: msg.signer.parse().map_err(ConnectionError::Signer)?,
        })
    }
}

impl From<MsgConnectionOpenInit> for RawMsgConnectionOpenInit {
    fn from(ics_msg: MsgConnectionOpenInit) -> Self {
        RawMsgConnectionOpenInit {
            connection_id: ics_msg.conn_id_on_a.to_string(),
            client_id: ics_msg.client_id_on_a.to_string(),
            counterparty: Some(ics_msg.counterparty.into()),
            versions: ics_msg.versions.into_iter().map(Into::into).collect(),
            signer: ics_msg.signer.to_string(),
        }
    }
}
