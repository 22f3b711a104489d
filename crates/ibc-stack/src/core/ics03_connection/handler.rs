//! This module implements the processing logic for ICS3 (connection open
//! handshake) messages.

use prost::Message;

use crate::core::ics02_client::handler::proof_root;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics23_commitment::commitment::{CommitmentPrefix, CommitmentProofBytes};
use crate::core::ics23_commitment::scheme::CommitmentScheme;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::core::ics24_host::path::ConnectionPath;
use crate::core::{ContextError, ValidationContext};
use crate::proto::connection::ConnectionEnd as RawConnectionEnd;
use crate::Height;

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;

/// Verifies that, at `proof_height`, the counterparty stores exactly
/// `expected_conn_end` under `conn_id_on_cp`.
pub(crate) fn verify_conn_end_on_counterparty<Ctx>(
    ctx: &Ctx,
    client_id: &ClientId,
    proof_height: &Height,
    proof: &CommitmentProofBytes,
    prefix_on_cp: &CommitmentPrefix,
    conn_id_on_cp: &ConnectionId,
    expected_conn_end: ConnectionEnd,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let root = proof_root(ctx, client_id, proof_height)?;
    let key = prefix_on_cp.apply(ConnectionPath::new(conn_id_on_cp));
    let value = RawConnectionEnd::from(expected_conn_end).encode_to_vec();

    ctx.commitment_scheme()
        .verify_membership(&root, proof, &key, &value)
        .map_err(ConnectionError::VerifyConnectionState)?;

    Ok(())
}
