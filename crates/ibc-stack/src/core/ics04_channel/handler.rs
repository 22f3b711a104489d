//! This module implements the processing logic for ICS4 (channel) messages.

use prost::Message;

use crate::core::ics02_client::handler::proof_root;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics04_channel::channel::{verify_connection_hops_length, ChannelEnd, Order};
use crate::core::ics04_channel::error::ChannelError;
use crate::core::ics23_commitment::commitment::CommitmentProofBytes;
use crate::core::ics23_commitment::scheme::CommitmentScheme;
use crate::core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::core::ics24_host::path::ChannelEndPath;
use crate::core::{ContextError, ValidationContext};
use crate::proto::channel::Channel as RawChannel;
use crate::Height;

pub mod chan_close_confirm;
pub mod chan_close_init;
pub mod chan_open_ack;
pub mod chan_open_confirm;
pub mod chan_open_init;
pub mod chan_open_try;
pub mod recv_packet;
pub mod send_packet;

/// Resolves the single connection hop of a channel and checks that the
/// connection is open.
pub(crate) fn open_connection_of<Ctx>(
    ctx: &Ctx,
    connection_hops: &[ConnectionId],
) -> Result<(ConnectionId, ConnectionEnd), ContextError>
where
    Ctx: ValidationContext,
{
    verify_connection_hops_length(connection_hops, 1)?;

    let conn_id = connection_hops[0].clone();
    let conn_end = ctx.connection_end(&conn_id)?;

    if !conn_end.is_open() {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id,
        }
        .into());
    }

    Ok((conn_id, conn_end))
}

/// Fails unless the negotiated connection version permits `ordering`.
pub(crate) fn verify_connection_supports_order(
    conn_end: &ConnectionEnd,
    ordering: Order,
) -> Result<(), ChannelError> {
    if !conn_end
        .versions()
        .iter()
        .any(|version| version.supports_order(ordering))
    {
        return Err(ChannelError::ChannelFeatureNotSupportedByConnection { ordering });
    }
    Ok(())
}

/// Verifies that, at `proof_height`, the counterparty of `conn_end` stores
/// exactly `expected_chan_end` under `(port_id_on_cp, chan_id_on_cp)`.
pub(crate) fn verify_chan_end_on_counterparty<Ctx>(
    ctx: &Ctx,
    conn_end: &ConnectionEnd,
    proof_height: &Height,
    proof: &CommitmentProofBytes,
    port_id_on_cp: &PortId,
    chan_id_on_cp: &ChannelId,
    expected_chan_end: ChannelEnd,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let root = proof_root(ctx, conn_end.client_id(), proof_height)?;
    let key = conn_end
        .counterparty()
        .prefix()
        .apply(ChannelEndPath::new(port_id_on_cp, chan_id_on_cp));
    let value = RawChannel::from(expected_chan_end).encode_to_vec();

    ctx.commitment_scheme()
        .verify_membership(&root, proof, &key, &value)
        .map_err(ChannelError::VerifyChannelFailed)?;

    Ok(())
}
