use crate::prelude::*;

use crate::core::ics04_channel::error::ChannelError;
use crate::core::ics24_host::identifier::{ChannelId, PortId};
use crate::core::msgs::Msg;
use crate::proto::channel::MsgChannelCloseInit as RawMsgChannelCloseInit;
use crate::signer::Signer;

pub const TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelCloseInit";

///
/// Message definition for the first step in the channel close handshake (`ChanCloseInit` datagram).
/// Per our convention, this message is sent to chain A.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelCloseInit {
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub signer: Signer,
}

impl Msg for MsgChannelCloseInit {
    type Raw = RawMsgChannelCloseInit;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl TryFrom<RawMsgChannelCloseInit> for MsgChannelCloseInit {
    type Error = ChannelError;

    fn try_from(raw_msg: RawMsgChannelCloseInit) -> Result<Self, Self::Error> {
        Ok(MsgChannelCloseInit {
            port_id_on_a: raw_msg.port_id.parse()?,
            chan_id_on_a: raw_msg.channel_id.parse()?,
            signer: raw_msg.signer.parse().map_err(ChannelError::Signer)?,
        })
    }
}

impl From<MsgChannelCloseInit> for RawMsgChannelCloseInit {
    fn from(domain_msg: MsgChannelCloseInit) -> Self {
        RawMsgChannelCloseInit {
            port_id: domain_msg.port_id_on_a.to_string(),
            channel_id: domain_msg.chan_id_on_a.to_string(),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_channel_close_init_msg() {
        let raw = RawMsgChannelCloseInit {
            port_id: "firstport".to_string(),
            channel_id: "ch1".to_string(),
            signer: "cosmos1signer".to_string(),
        };
        let msg = MsgChannelCloseInit::try_from(raw.clone()).unwrap();
        assert_eq!(RawMsgChannelCloseInit::from(msg), raw.clone());

        let no_signer = RawMsgChannelCloseInit {
            signer: String::new(),
            ..raw
        };
        assert!(matches!(
            MsgChannelCloseInit::try_from(no_signer),
            Err(ChannelError::Signer(_))
        ));
    }
}
