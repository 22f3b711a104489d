//! Defines events emitted during handling of IBC messages

use crate::prelude::*;

use crate::core::ics02_client::events::{
    self as ClientEvents, CREATE_CLIENT_EVENT, UPDATE_CLIENT_EVENT,
};
use crate::core::ics03_connection::events as ConnectionEvents;
use crate::core::ics04_channel::events as ChannelEvents;

pub const CONNECTION_OPEN_INIT_EVENT: &str = "connection_open_init";
pub const CONNECTION_OPEN_TRY_EVENT: &str = "connection_open_try";
pub const CONNECTION_OPEN_ACK_EVENT: &str = "connection_open_ack";
pub const CONNECTION_OPEN_CONFIRM_EVENT: &str = "connection_open_confirm";

pub const CHANNEL_OPEN_INIT_EVENT: &str = "channel_open_init";
pub const CHANNEL_OPEN_TRY_EVENT: &str = "channel_open_try";
pub const CHANNEL_OPEN_ACK_EVENT: &str = "channel_open_ack";
pub const CHANNEL_OPEN_CONFIRM_EVENT: &str = "channel_open_confirm";
pub const CHANNEL_CLOSE_INIT_EVENT: &str = "channel_close_init";
pub const CHANNEL_CLOSE_CONFIRM_EVENT: &str = "channel_close_confirm";

pub const SEND_PACKET_EVENT: &str = "send_packet";
pub const RECEIVE_PACKET_EVENT: &str = "recv_packet";

/// Events created by the IBC component of a chain, destined for a relayer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IbcEvent {
    CreateClient(ClientEvents::CreateClient),
    UpdateClient(ClientEvents::UpdateClient),

    OpenInitConnection(ConnectionEvents::OpenInit),
    OpenTryConnection(ConnectionEvents::OpenTry),
    OpenAckConnection(ConnectionEvents::OpenAck),
    OpenConfirmConnection(ConnectionEvents::OpenConfirm),

    OpenInitChannel(ChannelEvents::OpenInit),
    OpenTryChannel(ChannelEvents::OpenTry),
    OpenAckChannel(ChannelEvents::OpenAck),
    OpenConfirmChannel(ChannelEvents::OpenConfirm),
    CloseInitChannel(ChannelEvents::CloseInit),
    CloseConfirmChannel(ChannelEvents::CloseConfirm),

    SendPacket(ChannelEvents::SendPacket),
    ReceivePacket(ChannelEvents::ReceivePacket),

    AppModule(ModuleEvent),
}

impl IbcEvent {
    pub fn event_type(&self) -> &str {
        match self {
            IbcEvent::CreateClient(_) => CREATE_CLIENT_EVENT,
            IbcEvent::UpdateClient(_) => UPDATE_CLIENT_EVENT,
            IbcEvent::OpenInitConnection(_) => CONNECTION_OPEN_INIT_EVENT,
            IbcEvent::OpenTryConnection(_) => CONNECTION_OPEN_TRY_EVENT,
            IbcEvent::OpenAckConnection(_) => CONNECTION_OPEN_ACK_EVENT,
            IbcEvent::OpenConfirmConnection(_) => CONNECTION_OPEN_CONFIRM_EVENT,
            IbcEvent::OpenInitChannel(_) => CHANNEL_OPEN_INIT_EVENT,
            IbcEvent::OpenTryChannel(_) => CHANNEL_OPEN_TRY_EVENT,
            IbcEvent::OpenAckChannel(_) => CHANNEL_OPEN_ACK_EVENT,
            IbcEvent::OpenConfirmChannel(_) => CHANNEL_OPEN_CONFIRM_EVENT,
            IbcEvent::CloseInitChannel(_) => CHANNEL_CLOSE_INIT_EVENT,
            IbcEvent::CloseConfirmChannel(_) => CHANNEL_CLOSE_CONFIRM_EVENT,
            IbcEvent::SendPacket(_) => SEND_PACKET_EVENT,
            IbcEvent::ReceivePacket(_) => RECEIVE_PACKET_EVENT,
            IbcEvent::AppModule(module_event) => module_event.kind.as_str(),
        }
    }

    /// The key/value attributes of the event, in emission order.
    pub fn attributes(&self) -> Vec<ModuleEventAttribute> {
        let pairs: Vec<(&str, String)> = match self {
            IbcEvent::CreateClient(ClientEvents::CreateClient {
                client_id,
                client_type,
                consensus_height,
            })
            | IbcEvent::UpdateClient(ClientEvents::UpdateClient {
                client_id,
                client_type,
                consensus_height,
            }) => vec![
                ("client_id", client_id.to_string()),
                ("client_type", client_type.to_string()),
                ("consensus_height", consensus_height.to_string()),
            ],
            IbcEvent::OpenInitConnection(e) => e.attributes().to_pairs(),
            IbcEvent::OpenTryConnection(e) => e.attributes().to_pairs(),
            IbcEvent::OpenAckConnection(e) => e.attributes().to_pairs(),
            IbcEvent::OpenConfirmConnection(e) => e.attributes().to_pairs(),
            IbcEvent::OpenInitChannel(e) => e.attributes().to_pairs(),
            IbcEvent::OpenTryChannel(e) => e.attributes().to_pairs(),
            IbcEvent::OpenAckChannel(e) => e.attributes().to_pairs(),
            IbcEvent::OpenConfirmChannel(e) => e.attributes().to_pairs(),
            IbcEvent::CloseInitChannel(e) => e.attributes().to_pairs(),
            IbcEvent::CloseConfirmChannel(e) => e.attributes().to_pairs(),
            IbcEvent::SendPacket(e) => e.attributes().to_pairs(),
            IbcEvent::ReceivePacket(e) => e.attributes().to_pairs(),
            IbcEvent::AppModule(e) => return e.attributes.clone(),
        };

        pairs.into_iter().map(Into::into).collect()
    }
}

/// An event emitted by an application module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEvent {
    pub kind: String,
    pub attributes: Vec<ModuleEventAttribute>,
}

impl From<ModuleEvent> for IbcEvent {
    fn from(e: ModuleEvent) -> Self {
        IbcEvent::AppModule(e)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEventAttribute {
    pub key: String,
    pub value: String,
}

impl<K: ToString, V: ToString> From<(K, V)> for ModuleEventAttribute {
    fn from((k, v): (K, V)) -> Self {
        Self {
            key: k.to_string(),
            value: v.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;
    use crate::core::ics04_channel::channel::Order;
    use crate::core::ics04_channel::packet::Packet;
    use crate::core::ics04_channel::timeout::TimeoutHeight;
    use crate::core::ics24_host::identifier::{ClientId, ConnectionId};

    #[test]
    fn connection_event_carries_both_ends() {
        let event = IbcEvent::OpenInitConnection(ConnectionEvents::OpenInit::new(
            ConnectionId::from_str("conn-a").unwrap(),
            ClientId::from_str("client-a").unwrap(),
            ConnectionId::from_str("conn-b").unwrap(),
            ClientId::from_str("client-b").unwrap(),
        ));

        assert_eq!(event.event_type(), CONNECTION_OPEN_INIT_EVENT);
        let attributes = event.attributes();
        assert!(attributes.contains(&("connection_id", "conn-a").into()));
        assert!(attributes.contains(&("counterparty_client_id", "client-b").into()));
    }

    #[test]
    fn packet_event_renders_sequence_and_ordering() {
        let packet = Packet {
            seq_on_a: 7.into(),
            port_id_on_a: "firstport".parse().unwrap(),
            chan_id_on_a: "ch1".parse().unwrap(),
            port_id_on_b: "secondport".parse().unwrap(),
            chan_id_on_b: "ch2".parse().unwrap(),
            data: b"data".to_vec(),
            timeout_height_on_b: TimeoutHeight::Never,
        };
        let event = IbcEvent::SendPacket(ChannelEvents::SendPacket::new(
            packet,
            Order::Ordered,
            ConnectionId::from_str("conn-a").unwrap(),
        ));

        assert_eq!(event.event_type(), SEND_PACKET_EVENT);
        let attributes = event.attributes();
        assert!(attributes.contains(&("packet_sequence", "7").into()));
        assert!(attributes.contains(&("packet_channel_ordering", "ORDER_ORDERED").into()));
    }

    #[test]
    fn module_event_uses_its_own_kind() {
        let event: IbcEvent = ModuleEvent {
            kind: "transfer".to_string(),
            attributes: vec![("amount", "100").into()],
        }
        .into();

        assert_eq!(event.event_type(), "transfer");
        assert_eq!(event.attributes().len(), 1);
    }
}
