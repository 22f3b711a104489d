//! Path-space of the IBC store: every persisted record lives under one of
//! these keys, and counterparty proofs are checked against the same encoding.

use crate::prelude::*;

use derive_more::{Display, From};

use crate::core::ics04_channel::packet::Sequence;
use crate::core::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::Height;

pub const CLIENT_PREFIX: &str = "clients";
pub const CLIENT_TYPE: &str = "clientType";
pub const CLIENT_STATE: &str = "clientState";
pub const CONSENSUS_STATE: &str = "consensusState";
pub const ROOTS: &str = "roots";
pub const CONNECTION_PREFIX: &str = "connections";
pub const PORT_PREFIX: &str = "ports";
pub const CHANNEL_PREFIX: &str = "channels";
pub const SEQUENCE_SEND: &str = "nextSequenceSend";
pub const SEQUENCE_RECV: &str = "nextSequenceRecv";
pub const SEQUENCE_ACK: &str = "nextSequenceAck";
pub const PACKET_PREFIX: &str = "packets";
pub const RECEIPT_PREFIX: &str = "receipts";

/// The Path enum abstracts out the different sub-paths.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub enum Path {
    ClientType(ClientTypePath),
    ClientState(ClientStatePath),
    ClientConsensusState(ClientConsensusStatePath),
    VerifiedRoot(VerifiedRootPath),
    Connection(ConnectionPath),
    Ports(PortPath),
    ChannelEnd(ChannelEndPath),
    SeqSend(SeqSendPath),
    SeqRecv(SeqRecvPath),
    SeqAck(SeqAckPath),
    Commitment(CommitmentPath),
    Receipt(ReceiptPath),
}

impl Path {
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CLIENT_PREFIX}/{_0}/{CLIENT_TYPE}")]
pub struct ClientTypePath(pub ClientId);

impl ClientTypePath {
    pub fn new(client_id: &ClientId) -> ClientTypePath {
        ClientTypePath(client_id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CLIENT_PREFIX}/{_0}/{CLIENT_STATE}")]
pub struct ClientStatePath(pub ClientId);

impl ClientStatePath {
    pub fn new(client_id: &ClientId) -> ClientStatePath {
        ClientStatePath(client_id.clone())
    }
}

/// Holds the latest consensus state supplied for a client.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CLIENT_PREFIX}/{_0}/{CONSENSUS_STATE}")]
pub struct ClientConsensusStatePath(pub ClientId);

impl ClientConsensusStatePath {
    pub fn new(client_id: &ClientId) -> ClientConsensusStatePath {
        ClientConsensusStatePath(client_id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CLIENT_PREFIX}/{client_id}/{ROOTS}/{height}")]
pub struct VerifiedRootPath {
    pub client_id: ClientId,
    pub height: Height,
}

impl VerifiedRootPath {
    pub fn new(client_id: &ClientId, height: Height) -> VerifiedRootPath {
        VerifiedRootPath {
            client_id: client_id.clone(),
            height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CONNECTION_PREFIX}/{_0}")]
pub struct ConnectionPath(pub ConnectionId);

impl ConnectionPath {
    pub fn new(connection_id: &ConnectionId) -> ConnectionPath {
        ConnectionPath(connection_id.clone())
    }
}

/// Records which capability owns a port.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PORT_PREFIX}/{_0}")]
pub struct PortPath(pub PortId);

impl PortPath {
    pub fn new(port_id: &PortId) -> PortPath {
        PortPath(port_id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PORT_PREFIX}/{_0}/{CHANNEL_PREFIX}/{_1}")]
pub struct ChannelEndPath(pub PortId, pub ChannelId);

impl ChannelEndPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> ChannelEndPath {
        ChannelEndPath(port_id.clone(), channel_id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PORT_PREFIX}/{_0}/{CHANNEL_PREFIX}/{_1}/{SEQUENCE_SEND}")]
pub struct SeqSendPath(pub PortId, pub ChannelId);

impl SeqSendPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> SeqSendPath {
        SeqSendPath(port_id.clone(), channel_id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PORT_PREFIX}/{_0}/{CHANNEL_PREFIX}/{_1}/{SEQUENCE_RECV}")]
pub struct SeqRecvPath(pub PortId, pub ChannelId);

impl SeqRecvPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> SeqRecvPath {
        SeqRecvPath(port_id.clone(), channel_id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PORT_PREFIX}/{_0}/{CHANNEL_PREFIX}/{_1}/{SEQUENCE_ACK}")]
pub struct SeqAckPath(pub PortId, pub ChannelId);

impl SeqAckPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> SeqAckPath {
        SeqAckPath(port_id.clone(), channel_id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PORT_PREFIX}/{port_id}/{CHANNEL_PREFIX}/{channel_id}/{PACKET_PREFIX}/{sequence}")]
pub struct CommitmentPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl CommitmentPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> CommitmentPath {
        CommitmentPath {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PORT_PREFIX}/{port_id}/{CHANNEL_PREFIX}/{channel_id}/{RECEIPT_PREFIX}/{sequence}")]
pub struct ReceiptPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl ReceiptPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> ReceiptPath {
        ReceiptPath {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        }
    }
}
