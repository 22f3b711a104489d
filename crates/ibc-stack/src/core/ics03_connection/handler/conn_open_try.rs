//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenTry`.

use crate::prelude::*;

use crate::core::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics03_connection::events::OpenTry;
use crate::core::ics03_connection::handler::verify_conn_end_on_counterparty;
use crate::core::ics03_connection::msgs::conn_open_try::MsgConnectionOpenTry;
use crate::core::ics24_host::path::ConnectionPath;
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let vars = LocalVars::new(ctx_b, msg)?;
    validate_impl(ctx_b, msg, &vars)
}

fn validate_impl<Ctx>(
    ctx_b: &Ctx,
    msg: &MsgConnectionOpenTry,
    vars: &LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    if ctx_b.connection_end(&msg.conn_id_on_b).is_ok() {
        return Err(ConnectionError::ConnectionExistsAlready {
            connection_id: msg.conn_id_on_b.clone(),
        }
        .into());
    }

    // Verify proofs
    {
        let expected_conn_end_on_a = ConnectionEnd::new(
            State::Init,
            msg.counterparty.client_id().clone(),
            Counterparty::new(
                msg.client_id_on_b.clone(),
                msg.conn_id_on_b.clone(),
                ctx_b.commitment_prefix(),
            ),
            msg.versions_on_a.clone(),
        );

        verify_conn_end_on_counterparty(
            ctx_b,
            vars.conn_end_on_b.client_id(),
            &msg.proofs_height_on_a,
            &msg.proof_conn_end_on_a,
            msg.counterparty.prefix(),
            msg.counterparty.connection_id(),
            expected_conn_end_on_a,
        )?;
    }

    Ok(())
}

pub fn execute<Ctx>(ctx_b: &mut Ctx, msg: MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let vars = LocalVars::new(ctx_b, &msg)?;
    execute_impl(ctx_b, msg, vars)
}

fn execute_impl<Ctx>(
    ctx_b: &mut Ctx,
    msg: MsgConnectionOpenTry,
    vars: LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_id_on_a = msg.counterparty.connection_id().clone();
    let client_id_on_a = msg.counterparty.client_id().clone();

    ctx_b.store_connection(&ConnectionPath::new(&msg.conn_id_on_b), vars.conn_end_on_b)?;

    ctx_b.emit_ibc_event(IbcEvent::OpenTryConnection(OpenTry::new(
        msg.conn_id_on_b.clone(),
        msg.client_id_on_b,
        conn_id_on_a,
        client_id_on_a,
    )));
    ctx_b.log_message(format!(
        "success: conn_open_try: generated new connection identifier: {}",
        msg.conn_id_on_b
    ));

    Ok(())
}

struct LocalVars {
    conn_end_on_b: ConnectionEnd,
}

impl LocalVars {
    fn new<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenTry) -> Result<Self, ContextError>
    where
        Ctx: ValidationContext,
    {
        // The client the counterparty proofs are checked against must exist.
        ctx_b.client_state(&msg.client_id_on_b)?;

        let version_on_b =
            ctx_b.pick_version(&ctx_b.get_compatible_versions(), &msg.versions_on_a)?;

        Ok(Self {
            conn_end_on_b: ConnectionEnd::new(
                State::TryOpen,
                msg.client_id_on_b.clone(),
                msg.counterparty.clone(),
                vec![version_on_b],
            ),
        })
    }
}
