//! Definition of domain type message `MsgCreateClient`.

use crate::prelude::*;

use core::str::FromStr;

use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::consensus_state::ConsensusState;
use crate::core::ics02_client::error::ClientError;
use crate::core::ics24_host::identifier::ClientId;
use crate::core::msgs::Msg;
use crate::proto::client::MsgCreateClient as RawMsgCreateClient;
use crate::signer::Signer;

pub const CREATE_CLIENT_TYPE_URL: &str = "/ibc.core.client.v1.MsgCreateClient";

/// A type of message that triggers the creation of a new on-chain (IBC) client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgCreateClient {
    pub client_id: ClientId,
    pub client_type: ClientType,
    pub consensus_state: ConsensusState,
    pub signer: Signer,
}

impl MsgCreateClient {
    pub fn new(
        client_id: ClientId,
        client_type: ClientType,
        consensus_state: ConsensusState,
        signer: Signer,
    ) -> Self {
        MsgCreateClient {
            client_id,
            client_type,
            consensus_state,
            signer,
        }
    }
}

impl Msg for MsgCreateClient {
    type Raw = RawMsgCreateClient;

    fn type_url(&self) -> String {
        CREATE_CLIENT_TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgCreateClient> for MsgCreateClient {
    type Error = ClientError;

    fn try_from(raw: RawMsgCreateClient) -> Result<Self, Self::Error> {
        Ok(MsgCreateClient {
            client_id: ClientId::from_str(&raw.client_id).map_err(ClientError::InvalidIdentifier)?,
            client_type: ClientType::from_str(&raw.client_type)?,
            consensus_state: raw
                .consensus_state
                .ok_or(ClientError::MissingRawConsensusState)?
                .try_into()?,
            signer: raw.signer.parse().map_err(ClientError::Signer)?,
        })
    }
}

impl From<MsgCreateClient> for RawMsgCreateClient {
    fn from(ics_msg: MsgCreateClient) -> Self {
        RawMsgCreateClient {
            client_id: ics_msg.client_id.to_string(),
            client_type: ics_msg.client_type.as_str().to_string(),
            consensus_state: Some(ics_msg.consensus_state.into()),
            signer: ics_msg.signer.to_string(),
        }
    }
}
