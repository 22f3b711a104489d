//! The closed set of messages the core handlers accept, and the decoding of
//! those messages out of an [`Any`].

use crate::prelude::*;

use crate::core::ics02_client::msgs::{create_client, update_client, ClientMsg};
use crate::core::ics03_connection::msgs::{
    conn_open_ack, conn_open_confirm, conn_open_init, conn_open_try, ConnectionMsg,
};
use crate::core::ics04_channel::msgs::{
    chan_close_confirm, chan_close_init, chan_open_ack, chan_open_confirm, chan_open_init,
    chan_open_try, recv_packet, ChannelMsg, PacketMsg,
};
use crate::core::router::RouterError;
use crate::core::ContextError;
use crate::proto::Any;

/// Trait to be implemented by all IBC messages
pub trait Msg: Clone {
    type Raw: From<Self> + prost::Message;

    /// Unique type identifier for this message, to support encoding to/from `Any`.
    fn type_url(&self) -> String;

    fn get_sign_bytes(self) -> Vec<u8> {
        let raw_msg: Self::Raw = self.into();
        prost::Message::encode_to_vec(&raw_msg)
    }

    fn to_any(self) -> Any {
        Any {
            type_url: self.type_url(),
            value: self.get_sign_bytes(),
        }
    }
}

/// Enumeration of all messages that the core handlers are capable of routing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MsgEnvelope {
    Client(ClientMsg),
    Connection(ConnectionMsg),
    Channel(ChannelMsg),
    Packet(PacketMsg),
}

/// Decodes the raw message carried by `any_msg` and validates it into its
/// domain counterpart.
fn decode_msg<Raw, M>(any_msg: &Any) -> Result<M, RouterError>
where
    Raw: prost::Message + Default,
    M: TryFrom<Raw>,
    ContextError: From<M::Error>,
{
    let raw = Raw::decode(any_msg.value.as_slice()).map_err(RouterError::MalformedMessageBytes)?;
    M::try_from(raw).map_err(|e| RouterError::ContextError(e.into()))
}

impl TryFrom<Any> for MsgEnvelope {
    type Error = RouterError;

    fn try_from(any_msg: Any) -> Result<Self, Self::Error> {
        use crate::proto::{channel as raw_chan, client as raw_client, connection as raw_conn};

        let envelope = match any_msg.type_url.as_str() {
            // ICS2 messages
            create_client::CREATE_CLIENT_TYPE_URL => MsgEnvelope::Client(ClientMsg::CreateClient(
                decode_msg::<raw_client::MsgCreateClient, _>(&any_msg)?,
            )),
            update_client::UPDATE_CLIENT_TYPE_URL => MsgEnvelope::Client(ClientMsg::UpdateClient(
                decode_msg::<raw_client::MsgUpdateClient, _>(&any_msg)?,
            )),

            // ICS03
            conn_open_init::TYPE_URL => MsgEnvelope::Connection(ConnectionMsg::OpenInit(
                decode_msg::<raw_conn::MsgConnectionOpenInit, _>(&any_msg)?,
            )),
            conn_open_try::TYPE_URL => MsgEnvelope::Connection(ConnectionMsg::OpenTry(
                decode_msg::<raw_conn::MsgConnectionOpenTry, _>(&any_msg)?,
            )),
            conn_open_ack::TYPE_URL => MsgEnvelope::Connection(ConnectionMsg::OpenAck(
                decode_msg::<raw_conn::MsgConnectionOpenAck, _>(&any_msg)?,
            )),
            conn_open_confirm::TYPE_URL => MsgEnvelope::Connection(ConnectionMsg::OpenConfirm(
                decode_msg::<raw_conn::MsgConnectionOpenConfirm, _>(&any_msg)?,
            )),

            // ICS04 channel messages
            chan_open_init::TYPE_URL => MsgEnvelope::Channel(ChannelMsg::OpenInit(
                decode_msg::<raw_chan::MsgChannelOpenInit, _>(&any_msg)?,
            )),
            chan_open_try::TYPE_URL => MsgEnvelope::Channel(ChannelMsg::OpenTry(
                decode_msg::<raw_chan::MsgChannelOpenTry, _>(&any_msg)?,
            )),
            chan_open_ack::TYPE_URL => MsgEnvelope::Channel(ChannelMsg::OpenAck(
                decode_msg::<raw_chan::MsgChannelOpenAck, _>(&any_msg)?,
            )),
            chan_open_confirm::TYPE_URL => MsgEnvelope::Channel(ChannelMsg::OpenConfirm(
                decode_msg::<raw_chan::MsgChannelOpenConfirm, _>(&any_msg)?,
            )),
            chan_close_init::TYPE_URL => MsgEnvelope::Channel(ChannelMsg::CloseInit(
                decode_msg::<raw_chan::MsgChannelCloseInit, _>(&any_msg)?,
            )),
            chan_close_confirm::TYPE_URL => MsgEnvelope::Channel(ChannelMsg::CloseConfirm(
                decode_msg::<raw_chan::MsgChannelCloseConfirm, _>(&any_msg)?,
            )),

            // ICS04 packet messages
            recv_packet::TYPE_URL => MsgEnvelope::Packet(PacketMsg::Recv(decode_msg::<
                raw_chan::MsgRecvPacket,
                _,
            >(&any_msg)?)),

            _ => {
                return Err(RouterError::UnknownMessageTypeUrl {
                    url: any_msg.type_url,
                })
            }
        };

        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;
    use crate::core::ics02_client::client_type::ClientType;
    use crate::core::ics02_client::msgs::MsgCreateClient;
    use crate::core::ics24_host::identifier::ClientId;
    use crate::mock::context::dummy_consensus_state;
    use crate::mock::fixtures::{dummy_signer, MOCK_CLIENT_TYPE};
    use crate::{ErrorKind, Height};

    #[test]
    fn envelope_from_any() {
        let msg = MsgCreateClient::new(
            ClientId::from_str("test-client").unwrap(),
            ClientType::from_str(MOCK_CLIENT_TYPE).unwrap(),
            dummy_consensus_state("chainB-0", Height::new(0, 5).unwrap()),
            dummy_signer(),
        );

        let envelope = MsgEnvelope::try_from(msg.clone().to_any()).unwrap();

        assert_eq!(envelope, MsgEnvelope::Client(ClientMsg::CreateClient(msg)));
    }

    #[test]
    fn unknown_type_url_is_an_unknown_request() {
        let any = Any {
            type_url: "/cosmos.bank.v1beta1.MsgSend".to_string(),
            value: vec![],
        };

        let err = MsgEnvelope::try_from(any).unwrap_err();

        assert!(matches!(err, RouterError::UnknownMessageTypeUrl { .. }));
        assert_eq!(err.kind(), ErrorKind::UnknownRequest);
    }

    #[test]
    fn malformed_bytes_are_rejected() {
        let any = Any {
            type_url: create_client::CREATE_CLIENT_TYPE_URL.to_string(),
            value: vec![0xff, 0xff, 0xff],
        };

        let err = MsgEnvelope::try_from(any).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
