use crate::prelude::*;

use crate::core::ics04_channel::channel::{ChannelEnd, Counterparty, Order, State};
use crate::core::ics04_channel::error::ChannelError;
use crate::core::ics04_channel::version::Version;
use crate::core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::core::msgs::Msg;
use crate::proto::channel::MsgChannelOpenInit as RawMsgChannelOpenInit;
use crate::signer::Signer;

pub const TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenInit";

///
/// Message definition for the first step in the channel open handshake (`ChanOpenInit` datagram).
/// Per our convention, this message is sent to chain A.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenInit {
    pub port_id_on_a: PortId,
    /// The identifier chain A assigns to its channel end
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    /// The identifier chain B is expected to use for its channel end
    pub chan_id_on_b: ChannelId,
    pub connection_hops_on_a: Vec<ConnectionId>,
    pub ordering: Order,
    pub version: Version,
    pub signer: Signer,
}

impl Msg for MsgChannelOpenInit {
    type Raw = RawMsgChannelOpenInit;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgChannelOpenInit> for MsgChannelOpenInit {
    type Error = ChannelError;

    fn try_from(raw_msg: RawMsgChannelOpenInit) -> Result<Self, Self::Error> {
        let chan_end_on_a: ChannelEnd = raw_msg
            .channel
            .ok_or(ChannelError::MissingChannel)?
            .try_into()?;
        chan_end_on_a.verify_state_matches(&State::Init)?;
        if chan_end_on_a.ordering == Order::None {
            return Err(ChannelError::InvalidOrderType {
                expected: "Channel ordering cannot be None".to_string(),
                actual: chan_end_on_a.ordering.to_string(),
            });
        }
        Ok(MsgChannelOpenInit {
            port_id_on_a: raw_msg.port_id.parse()?,
            chan_id_on_a: raw_msg.channel_id.parse()?,
            port_id_on_b: chan_end_on_a.remote.port_id,
            chan_id_on_b: chan_end_on_a.remote.channel_id,
            connection_hops_on_a: chan_end_on_a.connection_hops,
            ordering: chan_end_on_a.ordering,
            version: chan_end_on_a.version,
            signer: raw_msg.signer.parse().map_err(ChannelError::Signer)?,
        })
    }
}

impl From<MsgChannelOpenInit> for RawMsgChannelOpenInit {
    fn from(domain_msg: MsgChannelOpenInit) -> Self {
        let chan_end_on_a = ChannelEnd::new(
            State::Init,
            domain_msg.ordering,
            Counterparty::new(domain_msg.port_id_on_b, domain_msg.chan_id_on_b),
            domain_msg.connection_hops_on_a,
            domain_msg.version,
        );
        RawMsgChannelOpenInit {
            port_id: domain_msg.port_id_on_a.to_string(),
            channel_id: domain_msg.chan_id_on_a.to_string(),
            channel: Some(chan_end_on_a.into()),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::channel::{Channel as RawChannel, Counterparty as RawCounterparty};

    fn dummy_raw_msg() -> RawMsgChannelOpenInit {
        RawMsgChannelOpenInit {
            port_id: "firstport".to_string(),
            channel_id: "ch1".to_string(),
            channel: Some(RawChannel {
                state: 1,
                ordering: 2,
                counterparty: Some(RawCounterparty {
                    port_id: "secondport".to_string(),
                    channel_id: "ch2".to_string(),
                }),
                connection_hops: vec!["conn-on-a".to_string()],
                version: "1.0".to_string(),
            }),
            signer: "cosmos1signer".to_string(),
        }
    }

    #[test]
    fn parse_channel_open_init_msg() {
        let raw = dummy_raw_msg();
        let msg = MsgChannelOpenInit::try_from(raw.clone()).unwrap();

        assert_eq!(msg.chan_id_on_b.as_str(), "ch2");
        assert_eq!(RawMsgChannelOpenInit::from(msg), raw);
    }

    #[test]
    fn channel_open_init_rejects_wrong_state_and_ordering() {
        let mut raw = dummy_raw_msg();
        if let Some(channel) = raw.channel.as_mut() {
            channel.state = 3;
        }
        assert!(MsgChannelOpenInit::try_from(raw).is_err());

        let mut raw = dummy_raw_msg();
        if let Some(channel) = raw.channel.as_mut() {
            channel.ordering = 0;
        }
        assert!(MsgChannelOpenInit::try_from(raw).is_err());

        let raw = RawMsgChannelOpenInit {
            channel: None,
            ..dummy_raw_msg()
        };
        assert!(MsgChannelOpenInit::try_from(raw).is_err());
    }
}
