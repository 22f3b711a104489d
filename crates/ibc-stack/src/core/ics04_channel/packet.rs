use crate::prelude::*;

use core::str::FromStr;

use crate::core::ics04_channel::error::{ChannelError, PacketError};
use crate::core::ics04_channel::timeout::TimeoutHeight;
use crate::core::ics24_host::identifier::{ChannelId, PortId};
use crate::proto::channel::Packet as RawPacket;
use crate::Height;

/// The marker stored for every packet an UNORDERED channel has received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Receipt {
    Ok,
}

/// The sequence number of a packet enforces ordering among packets from the same source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(u64);

impl FromStr for Sequence {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.parse::<u64>().map_err(|e| {
            ChannelError::InvalidStringAsSequence {
                value: s.to_string(),
                error: e,
            }
        })?))
    }
}

impl Sequence {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn increment(&self) -> Sequence {
        Sequence(self.0 + 1)
    }
}

impl From<u64> for Sequence {
    fn from(seq: u64) -> Self {
        Sequence(seq)
    }
}

impl From<Sequence> for u64 {
    fn from(s: Sequence) -> u64 {
        s.0
    }
}

impl core::fmt::Display for Sequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Hash, PartialEq, Eq)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
}

struct PacketData<'a>(&'a [u8]);

impl<'a> core::fmt::Debug for PacketData<'a> {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        match core::str::from_utf8(self.0) {
            Ok(s) => write!(formatter, "{s:?}"),
            Err(_) => write!(formatter, "{:?}", self.0),
        }
    }
}

impl core::fmt::Debug for Packet {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        formatter
            .debug_struct("Packet")
            .field("sequence", &self.seq_on_a)
            .field("source_port", &self.port_id_on_a)
            .field("source_channel", &self.chan_id_on_a)
            .field("destination_port", &self.port_id_on_b)
            .field("destination_channel", &self.chan_id_on_b)
            .field("data", &PacketData(&self.data))
            .field("timeout_height", &self.timeout_height_on_b)
            .finish()
    }
}

impl Packet {
    /// Checks whether the packet can no longer be received by a destination
    /// chain whose next block is at `dst_chain_height`.
    ///
    /// Note: a timed-out packet would be refunded on the source chain through a
    /// timeout message, which this crate does not process.
    pub fn timed_out(&self, dst_chain_height: Height) -> bool {
        self.timeout_height_on_b.is_reached_by(dst_chain_height)
    }
}

/// Custom debug output to omit the packet data
impl core::fmt::Display for Packet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "seq:{}, path:{}/{}->{}/{}, toh:{}",
            self.seq_on_a,
            self.chan_id_on_a,
            self.port_id_on_a,
            self.chan_id_on_b,
            self.port_id_on_b,
            self.timeout_height_on_b
        )
    }
}

impl TryFrom<RawPacket> for Packet {
    type Error = PacketError;

    fn try_from(raw_pkt: RawPacket) -> Result<Self, Self::Error> {
        if Sequence::from(raw_pkt.sequence).is_zero() {
            return Err(PacketError::ZeroPacketSequence);
        }

        // Heights with `revision_height == 0` are rejected unless both fields
        // are zero. To time out at the start of the next revision use
        // `{revision_number: old_rev + 1, revision_height: 1}`.
        let packet_timeout_height: TimeoutHeight = raw_pkt
            .timeout_height
            .try_into()
            .map_err(|_| PacketError::InvalidTimeoutHeight)?;

        if raw_pkt.data.is_empty() {
            return Err(PacketError::ZeroPacketData);
        }

        Ok(Packet {
            seq_on_a: Sequence::from(raw_pkt.sequence),
            port_id_on_a: raw_pkt
                .source_port
                .parse()
                .map_err(PacketError::InvalidIdentifier)?,
            chan_id_on_a: raw_pkt
                .source_channel
                .parse()
                .map_err(PacketError::InvalidIdentifier)?,
            port_id_on_b: raw_pkt
                .destination_port
                .parse()
                .map_err(PacketError::InvalidIdentifier)?,
            chan_id_on_b: raw_pkt
                .destination_channel
                .parse()
                .map_err(PacketError::InvalidIdentifier)?,
            data: raw_pkt.data,
            timeout_height_on_b: packet_timeout_height,
        })
    }
}

impl From<Packet> for RawPacket {
    fn from(packet: Packet) -> Self {
        RawPacket {
            sequence: packet.seq_on_a.0,
            source_port: packet.port_id_on_a.to_string(),
            source_channel: packet.chan_id_on_a.to_string(),
            destination_port: packet.port_id_on_b.to_string(),
            destination_channel: packet.chan_id_on_b.to_string(),
            data: packet.data,
            timeout_height: packet.timeout_height_on_b.into(),
        }
    }
}
