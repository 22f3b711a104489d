//! Commits an outgoing packet on behalf of an application module.

use crate::prelude::*;

use crate::core::ics04_channel::error::PacketError;
use crate::core::ics04_channel::events::SendPacket;
use crate::core::ics04_channel::packet::Packet;
use crate::core::ics24_host::path::{ChannelEndPath, CommitmentPath, SeqSendPath};
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

/// Send the given packet, including all necessary validation.
///
/// Equivalent to calling [`send_packet_validate`], followed by [`send_packet_execute`]
pub fn send_packet(ctx_a: &mut impl ExecutionContext, packet: Packet) -> Result<(), ContextError> {
    send_packet_validate(ctx_a, &packet)?;
    send_packet_execute(ctx_a, packet)
}

/// Validate that sending the given packet would succeed.
pub fn send_packet_validate(
    ctx_a: &impl ValidationContext,
    packet: &Packet,
) -> Result<(), ContextError> {
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    if !chan_end_on_a.is_open() {
        return Err(PacketError::InvalidChannelState {
            channel_id: packet.chan_id_on_a.clone(),
            state: *chan_end_on_a.state(),
        }
        .into());
    }

    let counterparty = chan_end_on_a.counterparty();
    if counterparty.port_id() != &packet.port_id_on_b
        || counterparty.channel_id() != &packet.chan_id_on_b
    {
        return Err(PacketError::InvalidPacketCounterparty {
            port_id: packet.port_id_on_b.clone(),
            channel_id: packet.chan_id_on_b.clone(),
        }
        .into());
    }

    let conn_id_on_a = &chan_end_on_a.connection_hops()[0];
    let conn_end_on_a = ctx_a.connection_end(conn_id_on_a)?;
    if !conn_end_on_a.is_open() {
        return Err(PacketError::ConnectionNotOpen {
            connection_id: conn_id_on_a.clone(),
        }
        .into());
    }

    let client_state_of_b_on_a = ctx_a.client_state(conn_end_on_a.client_id())?;
    let latest_height_on_a = client_state_of_b_on_a.latest_height();

    if packet.timeout_height_on_b.has_expired(latest_height_on_a) {
        return Err(PacketError::LowPacketHeight {
            chain_height: latest_height_on_a,
            timeout_height: packet.timeout_height_on_b,
        }
        .into());
    }

    let seq_send_path_on_a = SeqSendPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let next_seq_send_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

    if packet.seq_on_a != next_seq_send_on_a {
        return Err(PacketError::InvalidPacketSequence {
            given_sequence: packet.seq_on_a,
            next_sequence: next_seq_send_on_a,
        }
        .into());
    }

    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
    if ctx_a.get_packet_commitment(&commitment_path_on_a).is_ok() {
        return Err(PacketError::PacketCommitmentExists {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    Ok(())
}

/// Send the packet without any validation.
///
/// A prior call to [`send_packet_validate`] MUST have succeeded.
pub fn send_packet_execute(
    ctx_a: &mut impl ExecutionContext,
    packet: Packet,
) -> Result<(), ContextError> {
    {
        let seq_send_path_on_a = SeqSendPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let next_seq_send_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

        ctx_a.store_next_sequence_send(&seq_send_path_on_a, next_seq_send_on_a.increment())?;
    }

    ctx_a.store_packet_commitment(
        &CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a),
        ctx_a.packet_commitment(&packet.data, &packet.timeout_height_on_b),
    )?;

    // emit events and logs
    {
        let chan_end_on_a =
            ctx_a.channel_end(&ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a))?;
        let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();

        ctx_a.log_message(format!(
            "success: packet send with sequence {}",
            packet.seq_on_a
        ));

        ctx_a.emit_ibc_event(IbcEvent::SendPacket(SendPacket::new(
            packet,
            *chan_end_on_a.ordering(),
            conn_id_on_a,
        )));
    }

    Ok(())
}
