//! Protocol logic specific to ICS4 messages of type `MsgChannelCloseConfirm`.

use crate::prelude::*;

use crate::core::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::ics04_channel::events::CloseConfirm;
use crate::core::ics04_channel::handler::{open_connection_of, verify_chan_end_on_counterparty};
use crate::core::ics04_channel::msgs::chan_close_confirm::MsgChannelCloseConfirm;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics24_host::path::ChannelEndPath;
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(
    ctx_b: &Ctx,
    capability: &PortCapability,
    msg: &MsgChannelCloseConfirm,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.authenticate_port(capability, &msg.port_id_on_b)?;

    let chan_end_on_b =
        ctx_b.channel_end(&ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b))?;

    // Validate that the channel end is in a state where it can be closed.
    chan_end_on_b.verify_not_closed()?;

    let (_, conn_end_on_b) = open_connection_of(ctx_b, chan_end_on_b.connection_hops())?;

    // Verify proofs
    {
        let conn_id_on_a = conn_end_on_b.counterparty().connection_id().clone();
        let expected_chan_end_on_a = ChannelEnd::new(
            State::Closed,
            *chan_end_on_b.ordering(),
            Counterparty::new(msg.port_id_on_b.clone(), msg.chan_id_on_b.clone()),
            vec![conn_id_on_a],
            chan_end_on_b.version().clone(),
        );

        verify_chan_end_on_counterparty(
            ctx_b,
            &conn_end_on_b,
            &msg.proof_height_on_a,
            &msg.proof_chan_end_on_a,
            chan_end_on_b.counterparty().port_id(),
            chan_end_on_b.counterparty().channel_id(),
            expected_chan_end_on_a,
        )?;
    }

    Ok(())
}

pub fn execute<Ctx>(
    ctx_b: &mut Ctx,
    capability: &PortCapability,
    msg: &MsgChannelCloseConfirm,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx_b.authenticate_port(capability, &msg.port_id_on_b)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    let event = IbcEvent::CloseConfirmChannel(CloseConfirm::new(
        msg.port_id_on_b.clone(),
        msg.chan_id_on_b.clone(),
        chan_end_on_b.counterparty().port_id().clone(),
        chan_end_on_b.counterparty().channel_id().clone(),
        chan_end_on_b.connection_hops()[0].clone(),
        chan_end_on_b.version().clone(),
    ));

    // state changes
    {
        let mut chan_end_on_b = chan_end_on_b;
        chan_end_on_b.set_state(State::Closed);
        ctx_b.store_channel(&chan_end_path_on_b, chan_end_on_b)?;
    }

    // emit events and logs
    {
        ctx_b.log_message("success: channel close confirm".to_string());
        ctx_b.emit_ibc_event(event);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;
    use crate::core::ics04_channel::channel::Order;
    use crate::core::ics05_port::handler::bind_port;
    use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
    use crate::mock::context::{sync_client, MockContext};
    use crate::mock::fixtures::{dummy_signer, open_connection_end};
    use crate::ErrorKind;

    fn fixture_with_state_on_a(
        state_on_a: State,
    ) -> (MockContext, PortCapability, MsgChannelCloseConfirm) {
        let client_id_on_a = ClientId::from_str("client-on-a").unwrap();
        let client_id_on_b = ClientId::from_str("client-on-b").unwrap();
        let conn_id_on_a = ConnectionId::from_str("conn-on-a").unwrap();
        let conn_id_on_b = ConnectionId::from_str("conn-on-b").unwrap();

        let chan_end_on_a = ChannelEnd::new(
            state_on_a,
            Order::Ordered,
            Counterparty::new("secondport".parse().unwrap(), "ch2".parse().unwrap()),
            vec![conn_id_on_a.clone()],
            "1.0".into(),
        );
        let chan_end_on_b = ChannelEnd::new(
            State::Open,
            Order::Ordered,
            Counterparty::new("firstport".parse().unwrap(), "ch1".parse().unwrap()),
            vec![conn_id_on_b.clone()],
            "1.0".into(),
        );

        let mut ctx_a = MockContext::default().with_channel(
            "firstport".parse().unwrap(),
            "ch1".parse().unwrap(),
            chan_end_on_a,
        );
        let mut ctx_b = MockContext::default()
            .with_connection(
                conn_id_on_b,
                open_connection_end(&client_id_on_b, &client_id_on_a, &conn_id_on_a),
            )
            .with_channel("secondport".parse().unwrap(), "ch2".parse().unwrap(), chan_end_on_b);
        let capability = bind_port(&mut ctx_b, "secondport".parse().unwrap()).unwrap();

        let proof_height = sync_client(&mut ctx_a, &mut ctx_b, &client_id_on_b);
        let proof = ctx_a.prove(
            ChannelEndPath::new(&"firstport".parse().unwrap(), &"ch1".parse().unwrap()),
            &proof_height,
        );

        let msg = MsgChannelCloseConfirm {
            port_id_on_b: "secondport".parse().unwrap(),
            chan_id_on_b: "ch2".parse().unwrap(),
            proof_chan_end_on_a: proof,
            proof_height_on_a: proof_height,
            signer: dummy_signer(),
        };

        (ctx_b, capability, msg)
    }

    #[test]
    fn chan_close_confirm_ok() {
        let (mut ctx_b, capability, msg) = fixture_with_state_on_a(State::Closed);

        validate(&ctx_b, &capability, &msg).unwrap();
        execute(&mut ctx_b, &capability, &msg).unwrap();

        let chan_end = ctx_b
            .channel_end(&ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b))
            .unwrap();
        assert_eq!(chan_end.state(), &State::Closed);
        assert!(matches!(
            ctx_b.events.last(),
            Some(IbcEvent::CloseConfirmChannel(_))
        ));
    }

    #[test]
    fn chan_close_confirm_while_counterparty_open_fails() {
        let (ctx_b, capability, msg) = fixture_with_state_on_a(State::Open);

        let err = validate(&ctx_b, &capability, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProofVerificationFailed);
    }

    #[test]
    fn chan_close_confirm_twice_fails() {
        let (mut ctx_b, capability, msg) = fixture_with_state_on_a(State::Closed);
        execute(&mut ctx_b, &capability, &msg).unwrap();

        let err = validate(&ctx_b, &capability, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
