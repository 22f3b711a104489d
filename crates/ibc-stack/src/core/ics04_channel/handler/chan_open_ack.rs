//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenAck`.

use crate::prelude::*;

use crate::core::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::ics04_channel::error::ChannelError;
use crate::core::ics04_channel::events::OpenAck;
use crate::core::ics04_channel::handler::{open_connection_of, verify_chan_end_on_counterparty};
use crate::core::ics04_channel::msgs::chan_open_ack::MsgChannelOpenAck;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::path::ChannelEndPath;
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(
    ctx_a: &Ctx,
    capability: &PortCapability,
    msg: &MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.authenticate_port(capability, &msg.port_id_on_a)?;

    let chan_end_on_a =
        ctx_a.channel_end(&ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a))?;

    // Validate that the channel end is in a state where it can be ack.
    chan_end_on_a.verify_state_matches(&State::Init)?;

    let (_, conn_end_on_a) = open_connection_of(ctx_a, chan_end_on_a.connection_hops())?;

    if &msg.version_on_b != chan_end_on_a.version() {
        return Err(ChannelError::VersionMismatch {
            expected: chan_end_on_a.version().clone(),
            actual: msg.version_on_b.clone(),
        }
        .into());
    }

    // Verify proofs
    {
        let conn_id_on_b = conn_end_on_a.counterparty().connection_id().clone();
        let expected_chan_end_on_b = ChannelEnd::new(
            State::TryOpen,
            *chan_end_on_a.ordering(),
            Counterparty::new(msg.port_id_on_a.clone(), msg.chan_id_on_a.clone()),
            vec![conn_id_on_b],
            msg.version_on_b.clone(),
        );

        verify_chan_end_on_counterparty(
            ctx_a,
            &conn_end_on_a,
            &msg.proof_height_on_b,
            &msg.proof_chan_end_on_b,
            chan_end_on_a.counterparty().port_id(),
            chan_end_on_a.counterparty().channel_id(),
            expected_chan_end_on_b,
        )?;
    }

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    capability: &PortCapability,
    msg: &MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx_a.authenticate_port(capability, &msg.port_id_on_a)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let event = IbcEvent::OpenAckChannel(OpenAck::new(
        msg.port_id_on_a.clone(),
        msg.chan_id_on_a.clone(),
        chan_end_on_a.counterparty().port_id().clone(),
        chan_end_on_a.counterparty().channel_id().clone(),
        chan_end_on_a.connection_hops()[0].clone(),
        msg.version_on_b.clone(),
    ));

    // state changes
    {
        let mut chan_end_on_a = chan_end_on_a;
        chan_end_on_a.set_state(State::Open);
        chan_end_on_a.set_version(msg.version_on_b.clone());
        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a)?;
    }

    // emit events and logs
    {
        ctx_a.log_message("success: channel open ack".to_string());
        ctx_a.emit_ibc_event(event);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rstest::*;
    use test_log::test;

    use super::*;
    use crate::core::ics04_channel::channel::Order;
    use crate::core::ics05_port::handler::bind_port;
    use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
    use crate::mock::context::{sync_client, MockContext};
    use crate::mock::fixtures::{dummy_signer, open_connection_end};
    use crate::ErrorKind;

    struct Fixture {
        ctx_a: MockContext,
        capability: PortCapability,
        msg: MsgChannelOpenAck,
    }

    /// Chain A holds `firstport/ch1` in `Init`, chain B holds the matching
    /// `secondport/ch2` in `TryOpen`.
    #[fixture]
    fn fixture() -> Fixture {
        let client_id_on_a = ClientId::from_str("client-on-a").unwrap();
        let client_id_on_b = ClientId::from_str("client-on-b").unwrap();
        let conn_id_on_a = ConnectionId::from_str("conn-on-a").unwrap();
        let conn_id_on_b = ConnectionId::from_str("conn-on-b").unwrap();

        let chan_end_on_a = ChannelEnd::new(
            State::Init,
            Order::Ordered,
            Counterparty::new("secondport".parse().unwrap(), "ch2".parse().unwrap()),
            vec![conn_id_on_a.clone()],
            "1.0".into(),
        );
        let chan_end_on_b = ChannelEnd::new(
            State::TryOpen,
            Order::Ordered,
            Counterparty::new("firstport".parse().unwrap(), "ch1".parse().unwrap()),
            vec![conn_id_on_b.clone()],
            "1.0".into(),
        );

        let mut ctx_a = MockContext::default()
            .with_connection(
                conn_id_on_a.clone(),
                open_connection_end(&client_id_on_a, &client_id_on_b, &conn_id_on_b),
            )
            .with_channel("firstport".parse().unwrap(), "ch1".parse().unwrap(), chan_end_on_a);
        let mut ctx_b = MockContext::default().with_channel(
            "secondport".parse().unwrap(),
            "ch2".parse().unwrap(),
            chan_end_on_b,
        );
        let capability = bind_port(&mut ctx_a, "firstport".parse().unwrap()).unwrap();

        let proof_height = sync_client(&mut ctx_b, &mut ctx_a, &client_id_on_a);
        let proof = ctx_b.prove(
            ChannelEndPath::new(&"secondport".parse().unwrap(), &"ch2".parse().unwrap()),
            &proof_height,
        );

        let msg = MsgChannelOpenAck {
            port_id_on_a: "firstport".parse().unwrap(),
            chan_id_on_a: "ch1".parse().unwrap(),
            version_on_b: "1.0".into(),
            proof_chan_end_on_b: proof,
            proof_height_on_b: proof_height,
            signer: dummy_signer(),
        };

        Fixture {
            ctx_a,
            capability,
            msg,
        }
    }

    #[rstest]
    fn chan_open_ack_ok(fixture: Fixture) {
        let Fixture {
            mut ctx_a,
            capability,
            msg,
        } = fixture;

        validate(&ctx_a, &capability, &msg).unwrap();
        execute(&mut ctx_a, &capability, &msg).unwrap();

        let chan_end = ctx_a
            .channel_end(&ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a))
            .unwrap();
        assert!(chan_end.is_open());
    }

    #[rstest]
    fn chan_open_ack_with_version_mismatch_fails(fixture: Fixture) {
        let Fixture {
            ctx_a,
            capability,
            mut msg,
        } = fixture;
        msg.version_on_b = "2.0".into();

        let err = validate(&ctx_a, &capability, &msg).unwrap_err();

        assert!(matches!(
            err,
            ContextError::ChannelError(ChannelError::VersionMismatch { .. })
        ));
    }

    #[rstest]
    fn chan_open_ack_twice_fails(fixture: Fixture) {
        let Fixture {
            mut ctx_a,
            capability,
            msg,
        } = fixture;
        execute(&mut ctx_a, &capability, &msg).unwrap();

        let err = validate(&ctx_a, &capability, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[rstest]
    fn chan_open_ack_for_unknown_channel_fails(fixture: Fixture) {
        let Fixture {
            ctx_a,
            capability,
            mut msg,
        } = fixture;
        msg.chan_id_on_a = "ch9".parse().unwrap();

        let err = validate(&ctx_a, &capability, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
