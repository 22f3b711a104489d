//! Types for the IBC events emitted by the channel handshake and packet handlers.

use crate::prelude::*;

use crate::core::ics04_channel::channel::Order;
use crate::core::ics04_channel::packet::Packet;
use crate::core::ics04_channel::version::Version;
use crate::core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};

pub const PORT_ID_ATTRIBUTE_KEY: &str = "port_id";
pub const CHANNEL_ID_ATTRIBUTE_KEY: &str = "channel_id";
pub const COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY: &str = "counterparty_port_id";
pub const COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY: &str = "counterparty_channel_id";
pub const CONNECTION_ID_ATTRIBUTE_KEY: &str = "connection_id";
pub const VERSION_ATTRIBUTE_KEY: &str = "version";

pub const PKT_SEQ_ATTRIBUTE_KEY: &str = "packet_sequence";
pub const PKT_DATA_ATTRIBUTE_KEY: &str = "packet_data";
pub const PKT_SRC_PORT_ATTRIBUTE_KEY: &str = "packet_src_port";
pub const PKT_SRC_CHANNEL_ATTRIBUTE_KEY: &str = "packet_src_channel";
pub const PKT_DST_PORT_ATTRIBUTE_KEY: &str = "packet_dst_port";
pub const PKT_DST_CHANNEL_ATTRIBUTE_KEY: &str = "packet_dst_channel";
pub const PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY: &str = "packet_timeout_height";
pub const PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY: &str = "packet_channel_ordering";
pub const PKT_CONNECTION_ID_ATTRIBUTE_KEY: &str = "packet_connection";

/// Attributes shared by every channel handshake event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelAttributes {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub counterparty_port_id: PortId,
    pub counterparty_channel_id: ChannelId,
    pub connection_id: ConnectionId,
    pub version: Version,
}

impl ChannelAttributes {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (PORT_ID_ATTRIBUTE_KEY, self.port_id.to_string()),
            (CHANNEL_ID_ATTRIBUTE_KEY, self.channel_id.to_string()),
            (
                COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY,
                self.counterparty_port_id.to_string(),
            ),
            (
                COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY,
                self.counterparty_channel_id.to_string(),
            ),
            (CONNECTION_ID_ATTRIBUTE_KEY, self.connection_id.to_string()),
            (VERSION_ATTRIBUTE_KEY, self.version.to_string()),
        ]
    }
}

macro_rules! channel_event {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(ChannelAttributes);

        impl $name {
            pub fn new(
                port_id: PortId,
                channel_id: ChannelId,
                counterparty_port_id: PortId,
                counterparty_channel_id: ChannelId,
                connection_id: ConnectionId,
                version: Version,
            ) -> Self {
                Self(ChannelAttributes {
                    port_id,
                    channel_id,
                    counterparty_port_id,
                    counterparty_channel_id,
                    connection_id,
                    version,
                })
            }

            pub fn attributes(&self) -> &ChannelAttributes {
                &self.0
            }

            pub fn port_id(&self) -> &PortId {
                &self.0.port_id
            }

            pub fn channel_id(&self) -> &ChannelId {
                &self.0.channel_id
            }
        }
    };
}

channel_event!(
    /// Generated on chain A when a channel handshake starts.
    OpenInit
);
channel_event!(
    /// Generated on chain B.
    OpenTry
);
channel_event!(
    /// Generated on chain A.
    OpenAck
);
channel_event!(
    /// Generated on chain B once both ends are open.
    OpenConfirm
);
channel_event!(CloseInit);
channel_event!(CloseConfirm);

/// Attributes shared by the packet events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketAttributes {
    pub packet: Packet,
    pub channel_ordering: Order,
    pub connection_id: ConnectionId,
}

impl PacketAttributes {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                PKT_DATA_ATTRIBUTE_KEY,
                String::from_utf8_lossy(&self.packet.data).into_owned(),
            ),
            (
                PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY,
                self.packet.timeout_height_on_b.to_string(),
            ),
            (PKT_SEQ_ATTRIBUTE_KEY, self.packet.seq_on_a.to_string()),
            (PKT_SRC_PORT_ATTRIBUTE_KEY, self.packet.port_id_on_a.to_string()),
            (
                PKT_SRC_CHANNEL_ATTRIBUTE_KEY,
                self.packet.chan_id_on_a.to_string(),
            ),
            (PKT_DST_PORT_ATTRIBUTE_KEY, self.packet.port_id_on_b.to_string()),
            (
                PKT_DST_CHANNEL_ATTRIBUTE_KEY,
                self.packet.chan_id_on_b.to_string(),
            ),
            (
                PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY,
                self.channel_ordering.to_string(),
            ),
            (
                PKT_CONNECTION_ID_ATTRIBUTE_KEY,
                self.connection_id.to_string(),
            ),
        ]
    }
}

/// Emitted when a packet is sent. Relayers use it to learn which commitment
/// to prove on the destination chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendPacket(PacketAttributes);

impl SendPacket {
    pub fn new(packet: Packet, channel_ordering: Order, connection_id: ConnectionId) -> Self {
        Self(PacketAttributes {
            packet,
            channel_ordering,
            connection_id,
        })
    }

    pub fn attributes(&self) -> &PacketAttributes {
        &self.0
    }

    pub fn packet(&self) -> &Packet {
        &self.0.packet
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceivePacket(PacketAttributes);

impl ReceivePacket {
    pub fn new(packet: Packet, channel_ordering: Order, connection_id: ConnectionId) -> Self {
        Self(PacketAttributes {
            packet,
            channel_ordering,
            connection_id,
        })
    }

    pub fn attributes(&self) -> &PacketAttributes {
        &self.0
    }

    pub fn packet(&self) -> &Packet {
        &self.0.packet
    }
}
