//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenConfirm`.

use crate::prelude::*;

use crate::core::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::ics03_connection::events::OpenConfirm;
use crate::core::ics03_connection::handler::verify_conn_end_on_counterparty;
use crate::core::ics03_connection::msgs::conn_open_confirm::MsgConnectionOpenConfirm;
use crate::core::ics24_host::path::ConnectionPath;
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let vars = LocalVars::new(ctx_b, msg)?;
    validate_impl(ctx_b, msg, &vars)
}

fn validate_impl<Ctx>(
    ctx_b: &Ctx,
    msg: &MsgConnectionOpenConfirm,
    vars: &LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let conn_end_on_b = vars.conn_end_on_b();
    ctx_b.client_state(conn_end_on_b.client_id())?;

    conn_end_on_b.verify_state_matches(&msg.conn_id_on_b, State::TryOpen)?;

    // Verify proofs
    {
        let counterparty = conn_end_on_b.counterparty();
        let expected_conn_end_on_a = ConnectionEnd::new(
            State::Open,
            counterparty.client_id().clone(),
            Counterparty::new(
                conn_end_on_b.client_id().clone(),
                msg.conn_id_on_b.clone(),
                ctx_b.commitment_prefix(),
            ),
            conn_end_on_b.versions().to_vec(),
        );

        verify_conn_end_on_counterparty(
            ctx_b,
            conn_end_on_b.client_id(),
            &msg.proof_height_on_a,
            &msg.proof_conn_end_on_a,
            counterparty.prefix(),
            counterparty.connection_id(),
            expected_conn_end_on_a,
        )?;
    }

    Ok(())
}

pub fn execute<Ctx>(ctx_b: &mut Ctx, msg: MsgConnectionOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let vars = LocalVars::new(ctx_b, &msg)?;
    execute_impl(ctx_b, msg, vars)
}

fn execute_impl<Ctx>(
    ctx_b: &mut Ctx,
    msg: MsgConnectionOpenConfirm,
    vars: LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_id_on_b = vars.conn_end_on_b.client_id().clone();
    let conn_id_on_a = vars.conn_end_on_b.counterparty().connection_id().clone();
    let client_id_on_a = vars.conn_end_on_b.counterparty().client_id().clone();

    let new_conn_end_on_b = {
        let mut new_conn_end_on_b = vars.conn_end_on_b;
        new_conn_end_on_b.set_state(State::Open);
        new_conn_end_on_b
    };
    ctx_b.store_connection(&ConnectionPath::new(&msg.conn_id_on_b), new_conn_end_on_b)?;

    ctx_b.emit_ibc_event(IbcEvent::OpenConfirmConnection(OpenConfirm::new(
        msg.conn_id_on_b.clone(),
        client_id_on_b,
        conn_id_on_a,
        client_id_on_a,
    )));
    ctx_b.log_message(format!("success: conn_open_confirm: {}", msg.conn_id_on_b));

    Ok(())
}

struct LocalVars {
    conn_end_on_b: ConnectionEnd,
}

impl LocalVars {
    fn new<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenConfirm) -> Result<Self, ContextError>
    where
        Ctx: ValidationContext,
    {
        Ok(Self {
            conn_end_on_b: ctx_b.connection_end(&msg.conn_id_on_b)?,
        })
    }

    fn conn_end_on_b(&self) -> &ConnectionEnd {
        &self.conn_end_on_b
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rstest::*;
    use test_log::test;

    use super::*;
    use crate::core::ics03_connection::version::get_compatible_versions;
    use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
    use crate::mock::context::{sync_client, MockContext};
    use crate::mock::fixtures::dummy_signer;
    use crate::ErrorKind;

    struct Fixture {
        ctx_b: MockContext,
        msg: MsgConnectionOpenConfirm,
    }

    fn fixture_with_state_on_a(state_on_a: State) -> Fixture {
        let client_id_on_a = ClientId::from_str("client-on-a").unwrap();
        let client_id_on_b = ClientId::from_str("client-on-b").unwrap();
        let conn_id_on_a = ConnectionId::from_str("conn-on-a").unwrap();
        let conn_id_on_b = ConnectionId::from_str("conn-on-b").unwrap();
        let prefix = MockContext::default().commitment_prefix();
        let versions = vec![get_compatible_versions().remove(0)];

        let conn_end_on_a = ConnectionEnd::new(
            state_on_a,
            client_id_on_a.clone(),
            Counterparty::new(client_id_on_b.clone(), conn_id_on_b.clone(), prefix.clone()),
            versions.clone(),
        );
        let conn_end_on_b = ConnectionEnd::new(
            State::TryOpen,
            client_id_on_b.clone(),
            Counterparty::new(client_id_on_a, conn_id_on_a.clone(), prefix),
            versions,
        );

        let mut ctx_a = MockContext::default().with_connection(conn_id_on_a.clone(), conn_end_on_a);
        let mut ctx_b = MockContext::default().with_connection(conn_id_on_b.clone(), conn_end_on_b);

        let proof_height = sync_client(&mut ctx_a, &mut ctx_b, &client_id_on_b);

        let msg = MsgConnectionOpenConfirm {
            conn_id_on_b,
            proof_conn_end_on_a: ctx_a.prove(ConnectionPath::new(&conn_id_on_a), &proof_height),
            proof_height_on_a: proof_height,
            signer: dummy_signer(),
        };

        Fixture { ctx_b, msg }
    }

    #[test]
    fn conn_open_confirm_ok() {
        let Fixture { mut ctx_b, msg } = fixture_with_state_on_a(State::Open);

        validate(&ctx_b, &msg).unwrap();
        execute(&mut ctx_b, msg.clone()).unwrap();

        let conn_end = ctx_b.connection_end(&msg.conn_id_on_b).unwrap();
        assert!(conn_end.is_open());
        assert!(matches!(
            ctx_b.events.last(),
            Some(IbcEvent::OpenConfirmConnection(_))
        ));
    }

    #[test]
    fn conn_open_confirm_before_counterparty_ack_fails() {
        // Chain A has not processed `OpenAck` yet.
        let Fixture { ctx_b, msg } = fixture_with_state_on_a(State::Init);

        let err = validate(&ctx_b, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProofVerificationFailed);
    }

    #[test]
    fn conn_open_confirm_twice_fails() {
        let Fixture { mut ctx_b, msg } = fixture_with_state_on_a(State::Open);
        execute(&mut ctx_b, msg.clone()).unwrap();

        let err = validate(&ctx_b, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
