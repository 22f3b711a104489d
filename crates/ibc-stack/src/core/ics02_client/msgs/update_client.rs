//! Definition of domain type message `MsgUpdateClient`.

use crate::prelude::*;

use core::str::FromStr;

use crate::core::ics02_client::consensus_state::ConsensusState;
use crate::core::ics02_client::error::ClientError;
use crate::core::ics24_host::identifier::ClientId;
use crate::core::msgs::Msg;
use crate::proto::client::MsgUpdateClient as RawMsgUpdateClient;
use crate::signer::Signer;

pub const UPDATE_CLIENT_TYPE_URL: &str = "/ibc.core.client.v1.MsgUpdateClient";

/// Supplies a client with the consensus state of a newer counterparty height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgUpdateClient {
    pub client_id: ClientId,
    pub consensus_state: ConsensusState,
    pub signer: Signer,
}

impl Msg for MsgUpdateClient {
    type Raw = RawMsgUpdateClient;

    fn type_url(&self) -> String {
        UPDATE_CLIENT_TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgUpdateClient> for MsgUpdateClient {
    type Error = ClientError;

    fn try_from(raw: RawMsgUpdateClient) -> Result<Self, Self::Error> {
        Ok(MsgUpdateClient {
            client_id: ClientId::from_str(&raw.client_id).map_err(ClientError::InvalidIdentifier)?,
            consensus_state: raw
                .consensus_state
                .ok_or(ClientError::MissingRawConsensusState)?
                .try_into()?,
            signer: raw.signer.parse().map_err(ClientError::Signer)?,
        })
    }
}

impl From<MsgUpdateClient> for RawMsgUpdateClient {
    fn from(ics_msg: MsgUpdateClient) -> Self {
        RawMsgUpdateClient {
            client_id: ics_msg.client_id.to_string(),
            consensus_state: Some(ics_msg.consensus_state.into()),
            signer: ics_msg.signer.to_string(),
        }
    }
}
