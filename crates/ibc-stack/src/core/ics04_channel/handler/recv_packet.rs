//! Protocol logic specific to ICS4 messages of type `MsgRecvPacket`.

use crate::prelude::*;

use crate::core::ics02_client::handler::proof_root;
use crate::core::ics04_channel::channel::Order;
use crate::core::ics04_channel::error::PacketError;
use crate::core::ics04_channel::events::ReceivePacket;
use crate::core::ics04_channel::msgs::recv_packet::MsgRecvPacket;
use crate::core::ics04_channel::packet::Receipt;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics23_commitment::scheme::CommitmentScheme;
use crate::core::ics24_host::path::{ChannelEndPath, CommitmentPath, ReceiptPath, SeqRecvPath};
use crate::core::{ContextError, ExecutionContext, ValidationContext};
use crate::events::IbcEvent;

pub fn validate<Ctx>(
    ctx_b: &Ctx,
    capability: &PortCapability,
    msg: &MsgRecvPacket,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let packet = &msg.packet;
    ctx_b.authenticate_port(capability, &packet.port_id_on_b)?;

    let chan_end_on_b =
        ctx_b.channel_end(&ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b))?;

    if !chan_end_on_b.is_open() {
        return Err(PacketError::InvalidChannelState {
            channel_id: packet.chan_id_on_b.clone(),
            state: *chan_end_on_b.state(),
        }
        .into());
    }

    let counterparty = chan_end_on_b.counterparty();
    if counterparty.port_id() != &packet.port_id_on_a
        || counterparty.channel_id() != &packet.chan_id_on_a
    {
        return Err(PacketError::InvalidPacketCounterparty {
            port_id: packet.port_id_on_a.clone(),
            channel_id: packet.chan_id_on_a.clone(),
        }
        .into());
    }

    let conn_id_on_b = &chan_end_on_b.connection_hops()[0];
    let conn_end_on_b = ctx_b.connection_end(conn_id_on_b)?;
    if !conn_end_on_b.is_open() {
        return Err(PacketError::ConnectionNotOpen {
            connection_id: conn_id_on_b.clone(),
        }
        .into());
    }

    let latest_height = ctx_b.host_height()?;
    if packet.timed_out(latest_height) {
        return Err(PacketError::LowPacketHeight {
            chain_height: latest_height,
            timeout_height: packet.timeout_height_on_b,
        }
        .into());
    }

    // Verify proofs
    {
        let root = proof_root(ctx_b, conn_end_on_b.client_id(), &msg.proof_height_on_a)?;
        let key = conn_end_on_b.counterparty().prefix().apply(CommitmentPath::new(
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
            packet.seq_on_a,
        ));
        let expected_commitment_on_a =
            ctx_b.packet_commitment(&packet.data, &packet.timeout_height_on_b);

        ctx_b
            .commitment_scheme()
            .verify_membership(
                &root,
                &msg.proof_commitment_on_a,
                &key,
                &expected_commitment_on_a.into_vec(),
            )
            .map_err(|e| PacketError::PacketVerificationFailed {
                sequence: packet.seq_on_a,
                error: e,
            })?;
    }

    match chan_end_on_b.ordering() {
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;
            if packet.seq_on_a < next_seq_recv {
                return Err(PacketError::PacketAlreadyReceived {
                    sequence: packet.seq_on_a,
                }
                .into());
            }
            if packet.seq_on_a > next_seq_recv {
                return Err(PacketError::InvalidPacketSequence {
                    given_sequence: packet.seq_on_a,
                    next_sequence: next_seq_recv,
                }
                .into());
            }
        }
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
            match ctx_b.get_packet_receipt(&receipt_path_on_b) {
                Ok(_) => {
                    return Err(PacketError::PacketAlreadyReceived {
                        sequence: packet.seq_on_a,
                    }
                    .into())
                }
                Err(ContextError::PacketError(PacketError::PacketReceiptNotFound { sequence }))
                    if sequence == packet.seq_on_a => {}
                Err(e) => return Err(e),
            }
        }
        Order::None => {
            return Err(PacketError::InvalidChannelState {
                channel_id: packet.chan_id_on_b.clone(),
                state: *chan_end_on_b.state(),
            }
            .into())
        }
    }

    Ok(())
}

pub fn execute<Ctx>(
    ctx_b: &mut Ctx,
    capability: &PortCapability,
    msg: &MsgRecvPacket,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let packet = &msg.packet;
    ctx_b.authenticate_port(capability, &packet.port_id_on_b)?;

    let chan_end_on_b =
        ctx_b.channel_end(&ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b))?;

    // state changes
    match chan_end_on_b.ordering() {
        Order::Unordered => {
            let path = ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
            ctx_b.store_packet_receipt(&path, Receipt::Ok)?;
        }
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;
            ctx_b.store_next_sequence_recv(&seq_recv_path_on_b, next_seq_recv.increment())?;
        }
        Order::None => {}
    }

    // emit events and logs
    {
        let conn_id_on_b = chan_end_on_b.connection_hops()[0].clone();

        ctx_b.log_message(format!(
            "success: packet receive with sequence {}",
            packet.seq_on_a
        ));

        ctx_b.emit_ibc_event(IbcEvent::ReceivePacket(ReceivePacket::new(
            packet.clone(),
            *chan_end_on_b.ordering(),
            conn_id_on_b,
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rstest::*;

    use super::*;
    use crate::core::ics04_channel::channel::{ChannelEnd, Counterparty, State};
    use crate::core::ics04_channel::packet::{Packet, Sequence};
    use crate::core::ics04_channel::timeout::TimeoutHeight;
    use crate::core::ics05_port::handler::bind_port;
    use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
    use crate::mock::context::{sync_client, MockContext};
    use crate::mock::fixtures::{dummy_signer, open_connection_end};
    use crate::{ErrorKind, Height};

    fn packet(seq: u64, timeout_height_on_b: TimeoutHeight) -> Packet {
        Packet {
            seq_on_a: seq.into(),
            port_id_on_a: "firstport".parse().unwrap(),
            chan_id_on_a: "ch1".parse().unwrap(),
            port_id_on_b: "secondport".parse().unwrap(),
            chan_id_on_b: "ch2".parse().unwrap(),
            data: b"hello".to_vec(),
            timeout_height_on_b,
        }
    }

    /// Commits `packet` on chain A, then builds chain B with an open channel
    /// of the given ordering and a client that has seen A's commitment.
    fn setup(ordering: Order, packet: Packet) -> (MockContext, PortCapability, MsgRecvPacket) {
        let client_id_on_a = ClientId::from_str("client-on-a").unwrap();
        let client_id_on_b = ClientId::from_str("client-on-b").unwrap();
        let conn_id_on_a = ConnectionId::from_str("conn-on-a").unwrap();
        let conn_id_on_b = ConnectionId::from_str("conn-on-b").unwrap();

        let mut ctx_a = MockContext::default();
        let commitment = ctx_a.packet_commitment(&packet.data, &packet.timeout_height_on_b);
        let commitment_path =
            CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
        ctx_a
            .store_packet_commitment(&commitment_path, commitment)
            .unwrap();

        let chan_end_on_b = ChannelEnd::new(
            State::Open,
            ordering,
            Counterparty::new("firstport".parse().unwrap(), "ch1".parse().unwrap()),
            vec![conn_id_on_b.clone()],
            "1.0".into(),
        );
        let mut ctx_b = MockContext::default()
            .with_connection(
                conn_id_on_b,
                open_connection_end(&client_id_on_b, &client_id_on_a, &conn_id_on_a),
            )
            .with_channel("secondport".parse().unwrap(), "ch2".parse().unwrap(), chan_end_on_b);
        ctx_b
            .store_next_sequence_recv(
                &SeqRecvPath::new(&"secondport".parse().unwrap(), &"ch2".parse().unwrap()),
                1.into(),
            )
            .unwrap();
        let capability = bind_port(&mut ctx_b, "secondport".parse().unwrap()).unwrap();

        let proof_height = sync_client(&mut ctx_a, &mut ctx_b, &client_id_on_b);
        let proof = ctx_a.prove(commitment_path, &proof_height);

        let msg = MsgRecvPacket {
            packet,
            proof_commitment_on_a: proof,
            proof_height_on_a: proof_height,
            signer: dummy_signer(),
        };

        (ctx_b, capability, msg)
    }

    #[rstest]
    #[case::ordered(Order::Ordered)]
    #[case::unordered(Order::Unordered)]
    fn recv_packet_ok(#[case] ordering: Order) {
        let (mut ctx_b, capability, msg) = setup(ordering, packet(1, TimeoutHeight::Never));

        validate(&ctx_b, &capability, &msg).unwrap();
        execute(&mut ctx_b, &capability, &msg).unwrap();

        assert!(matches!(
            ctx_b.events.last(),
            Some(IbcEvent::ReceivePacket(_))
        ));
        let packet = &msg.packet;
        match ordering {
            Order::Ordered => assert_eq!(
                ctx_b
                    .get_next_sequence_recv(&SeqRecvPath::new(
                        &packet.port_id_on_b,
                        &packet.chan_id_on_b
                    ))
                    .unwrap(),
                Sequence::from(2)
            ),
            _ => assert_eq!(
                ctx_b
                    .get_packet_receipt(&ReceiptPath::new(
                        &packet.port_id_on_b,
                        &packet.chan_id_on_b,
                        packet.seq_on_a
                    ))
                    .unwrap(),
                Receipt::Ok
            ),
        }
    }

    #[rstest]
    #[case::ordered(Order::Ordered)]
    #[case::unordered(Order::Unordered)]
    fn recv_packet_replay_fails(#[case] ordering: Order) {
        let (mut ctx_b, capability, msg) = setup(ordering, packet(1, TimeoutHeight::Never));
        execute(&mut ctx_b, &capability, &msg).unwrap();

        let err = validate(&ctx_b, &capability, &msg).unwrap_err();

        assert!(matches!(
            err,
            ContextError::PacketError(PacketError::PacketAlreadyReceived { .. })
        ));
    }

    #[test_log::test]
    fn recv_packet_out_of_order_fails_on_ordered_channel() {
        let (ctx_b, capability, msg) = setup(Order::Ordered, packet(2, TimeoutHeight::Never));

        let err = validate(&ctx_b, &capability, &msg).unwrap_err();

        assert!(matches!(
            err,
            ContextError::PacketError(PacketError::InvalidPacketSequence { .. })
        ));
    }

    #[test_log::test]
    fn recv_packet_out_of_order_ok_on_unordered_channel() {
        let (ctx_b, capability, msg) = setup(Order::Unordered, packet(2, TimeoutHeight::Never));

        validate(&ctx_b, &capability, &msg).unwrap();
    }

    #[test_log::test]
    fn recv_packet_with_tampered_data_fails() {
        let (ctx_b, capability, mut msg) = setup(Order::Unordered, packet(1, TimeoutHeight::Never));
        msg.packet.data = b"goodbye".to_vec();

        let err = validate(&ctx_b, &capability, &msg).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProofVerificationFailed);
    }

    #[test_log::test]
    fn recv_packet_after_timeout_fails() {
        let timeout = TimeoutHeight::At(Height::new(0, 1).unwrap());
        let (ctx_b, capability, msg) = setup(Order::Unordered, packet(1, timeout));

        let err = validate(&ctx_b, &capability, &msg).unwrap_err();

        assert!(matches!(
            err,
            ContextError::PacketError(PacketError::LowPacketHeight { .. })
        ));
    }

    #[test_log::test]
    fn recv_packet_from_wrong_source_fails() {
        let (ctx_b, capability, mut msg) = setup(Order::Unordered, packet(1, TimeoutHeight::Never));
        msg.packet.chan_id_on_a = "ch3".parse().unwrap();

        let err = validate(&ctx_b, &capability, &msg).unwrap_err();

        assert!(matches!(
            err,
            ContextError::PacketError(PacketError::InvalidPacketCounterparty { .. })
        ));
    }
}
