//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenAck`.

use crate::prelude::*;

use crate::core::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::ics03_connection::events::OpenAck;
use crate::core::ics03_connection::handler::verify_conn_end_on_counterparty;
use crate::core::ics03_connection::msgs::conn_open_ack::MsgConnectionOpenAck;
use crate::core::ics24_host::path::ConnectionPath;
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let vars = LocalVars::new(ctx_a, msg)?;
    validate_impl(ctx_a, msg, &vars)
}

fn validate_impl<Ctx>(
    ctx_a: &Ctx,
    msg: &MsgConnectionOpenAck,
    vars: &LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.client_state(vars.conn_end_on_a.client_id())?;

    vars.conn_end_on_a
        .verify_state_matches(&msg.conn_id_on_a, State::Init)?;

    msg.version.verify_is_supported(vars.conn_end_on_a.versions())?;

    // Proof verification.
    {
        let counterparty = vars.conn_end_on_a.counterparty();
        let expected_conn_end_on_b = ConnectionEnd::new(
            State::TryOpen,
            counterparty.client_id().clone(),
            Counterparty::new(
                vars.conn_end_on_a.client_id().clone(),
                msg.conn_id_on_a.clone(),
                ctx_a.commitment_prefix(),
            ),
            vec![msg.version.clone()],
        );

        verify_conn_end_on_counterparty(
            ctx_a,
            vars.conn_end_on_a.client_id(),
            &msg.proofs_height_on_b,
            &msg.proof_conn_end_on_b,
            counterparty.prefix(),
            counterparty.connection_id(),
            expected_conn_end_on_b,
        )?;
    }

    Ok(())
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let vars = LocalVars::new(ctx_a, &msg)?;
    execute_impl(ctx_a, msg, vars)
}

fn execute_impl<Ctx>(
    ctx_a: &mut Ctx,
    msg: MsgConnectionOpenAck,
    vars: LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let event = IbcEvent::OpenAckConnection(OpenAck::new(
        msg.conn_id_on_a.clone(),
        vars.conn_end_on_a.client_id().clone(),
        vars.conn_end_on_a.counterparty().connection_id().clone(),
        vars.conn_end_on_a.counterparty().client_id().clone(),
    ));

    let new_conn_end_on_a = {
        let mut conn_end_on_a = vars.conn_end_on_a;
        conn_end_on_a.set_state(State::Open);
        conn_end_on_a.set_version(msg.version);
        conn_end_on_a
    };
    ctx_a.store_connection(&ConnectionPath::new(&msg.conn_id_on_a), new_conn_end_on_a)?;

    ctx_a.emit_ibc_event(event);
    ctx_a.log_message(format!(
        "success: conn_open_ack verification passed for {}",
        msg.conn_id_on_a
    ));

    Ok(())
}

struct LocalVars {
    conn_end_on_a: ConnectionEnd,
}

impl LocalVars {
    fn new<Ctx>(ctx_a: &Ctx, msg: &MsgConnectionOpenAck) -> Result<Self, ContextError>
    where
        Ctx: ValidationContext,
    {
        Ok(Self {
            conn_end_on_a: ctx_a.connection_end(&msg.conn_id_on_a)?,
        })
    }
}
