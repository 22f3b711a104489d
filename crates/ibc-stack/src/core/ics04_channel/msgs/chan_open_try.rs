use crate::prelude::*;

use crate::core::ics04_channel::channel::{ChannelEnd, Counterparty, Order, State};
use crate::core::ics04_channel::error::ChannelError;
use crate::core::ics04_channel::version::Version;
use crate::core::ics23_commitment::commitment::CommitmentProofBytes;
use crate::core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::core::msgs::Msg;
use crate::proto::channel::MsgChannelOpenTry as RawMsgChannelOpenTry;
use crate::signer::Signer;
use crate::Height;

pub const TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenTry";

///
/// Message definition for the second step in the channel open handshake (`ChanOpenTry` datagram).
/// Per our convention, this message is sent to chain B.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenTry {
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub connection_hops_on_b: Vec<ConnectionId>,
    pub ordering: Order,
    /// The version chain A recorded in its `OpenInit`
    pub version_on_a: Version,
    pub proof_chan_end_on_a: CommitmentProofBytes,
    pub proof_height_on_a: Height,
    pub signer: Signer,
}

impl Msg for MsgChannelOpenTry {
    type Raw = RawMsgChannelOpenTry;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgChannelOpenTry> for MsgChannelOpenTry {
    type Error = ChannelError;

    fn try_from(raw_msg: RawMsgChannelOpenTry) -> Result<Self, Self::Error> {
        let chan_end_on_b: ChannelEnd = raw_msg
            .channel
            .ok_or(ChannelError::MissingChannel)?
            .try_into()?;
        chan_end_on_b.verify_state_matches(&State::TryOpen)?;
        if chan_end_on_b.ordering == Order::None {
            return Err(ChannelError::InvalidOrderType {
                expected: "Channel ordering cannot be None".to_string(),
                actual: chan_end_on_b.ordering.to_string(),
            });
        }

        Ok(MsgChannelOpenTry {
            port_id_on_b: raw_msg.port_id.parse()?,
            chan_id_on_b: raw_msg.channel_id.parse()?,
            port_id_on_a: chan_end_on_b.remote.port_id,
            chan_id_on_a: chan_end_on_b.remote.channel_id,
            connection_hops_on_b: chan_end_on_b.connection_hops,
            ordering: chan_end_on_b.ordering,
            version_on_a: raw_msg.counterparty_version.into(),
            proof_chan_end_on_a: raw_msg
                .proof_init
                .try_into()
                .map_err(ChannelError::InvalidProof)?,
            proof_height_on_a: raw_msg
                .proof_height
                .and_then(|raw_height| raw_height.try_into().ok())
                .ok_or(ChannelError::MissingHeight)?,
            signer: raw_msg.signer.parse().map_err(ChannelError::Signer)?,
        })
    }
}

impl From<MsgChannelOpenTry> for RawMsgChannelOpenTry {
    fn from(domain_msg: MsgChannelOpenTry) -> Self {
        let chan_end_on_b = ChannelEnd::new(
            State::TryOpen,
            domain_msg.ordering,
            Counterparty::new(domain_msg.port_id_on_a, domain_msg.chan_id_on_a),
            domain_msg.connection_hops_on_b,
            domain_msg.version_on_a.clone(),
        );
        RawMsgChannelOpenTry {
            port_id: domain_msg.port_id_on_b.to_string(),
            channel_id: domain_msg.chan_id_on_b.to_string(),
            channel: Some(chan_end_on_b.into()),
            counterparty_version: domain_msg.version_on_a.to_string(),
            proof_init: domain_msg.proof_chan_end_on_a.into(),
            proof_height: Some(domain_msg.proof_height_on_a.into()),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::channel::{Channel as RawChannel, Counterparty as RawCounterparty};
    use crate::proto::client::Height as RawHeight;

    fn dummy_raw_msg() -> RawMsgChannelOpenTry {
        RawMsgChannelOpenTry {
            port_id: "secondport".to_string(),
            channel_id: "ch2".to_string(),
            channel: Some(RawChannel {
                state: 2,
                ordering: 2,
                counterparty: Some(RawCounterparty {
                    port_id: "firstport".to_string(),
                    channel_id: "ch1".to_string(),
                }),
                connection_hops: vec!["conn-on-b".to_string()],
                version: "1.0".to_string(),
            }),
            counterparty_version: "1.0".to_string(),
            proof_init: vec![1, 2, 3],
            proof_height: Some(RawHeight {
                revision_number: 0,
                revision_height: 5,
            }),
            signer: "cosmos1signer".to_string(),
        }
    }

    #[test]
    fn parse_channel_open_try_msg() {
        let raw = dummy_raw_msg();
        let msg = MsgChannelOpenTry::try_from(raw.clone()).unwrap();

        assert_eq!(msg.version_on_a, Version::from("1.0"));
        assert_eq!(RawMsgChannelOpenTry::from(msg), raw);
    }

    #[test]
    fn channel_open_try_requires_proof_and_height() {
        let raw = RawMsgChannelOpenTry {
            proof_init: vec![],
            ..dummy_raw_msg()
        };
        assert!(MsgChannelOpenTry::try_from(raw).is_err());

        let raw = RawMsgChannelOpenTry {
            proof_height: None,
            ..dummy_raw_msg()
        };
        assert!(matches!(
            MsgChannelOpenTry::try_from(raw),
            Err(ChannelError::MissingHeight)
        ));
    }
}
