//! Scenarios running two hosts against each other, with the test playing the
//! relayer: every step is an encoded message delivered to the host it is
//! meant for, and every counterparty proof is taken from a committed block.

use crate::prelude::*;

use core::str::FromStr;

use primitive_types::U256;
use test_log::test;

use crate::applications::transfer::context::escrow_address;
use crate::applications::transfer::coin::{Coin, Coins};
use crate::applications::transfer::module::TransferModule;
use crate::applications::transfer::msgs::transfer::MsgTransfer;
use crate::applications::transfer::{send_transfer, VERSION};
use crate::core::handler::deliver;
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::msgs::create_client::MsgCreateClient;
use crate::core::ics02_client::msgs::update_client::MsgUpdateClient;
use crate::core::ics03_connection::connection::{
    Counterparty as ConnCounterparty, State as ConnState,
};
use crate::core::ics03_connection::msgs::conn_open_ack::MsgConnectionOpenAck;
use crate::core::ics03_connection::msgs::conn_open_confirm::MsgConnectionOpenConfirm;
use crate::core::ics03_connection::msgs::conn_open_init::MsgConnectionOpenInit;
use crate::core::ics03_connection::msgs::conn_open_try::MsgConnectionOpenTry;
use crate::core::ics03_connection::version::get_compatible_versions;
use crate::core::ics04_channel::channel::{Order, State as ChanState};
use crate::core::ics04_channel::handler::send_packet::send_packet;
use crate::core::ics04_channel::msgs::chan_open_ack::MsgChannelOpenAck;
use crate::core::ics04_channel::msgs::chan_open_confirm::MsgChannelOpenConfirm;
use crate::core::ics04_channel::msgs::chan_open_init::MsgChannelOpenInit;
use crate::core::ics04_channel::msgs::chan_open_try::MsgChannelOpenTry;
use crate::core::ics04_channel::msgs::recv_packet::MsgRecvPacket;
use crate::core::ics04_channel::packet::Packet;
use crate::core::ics04_channel::timeout::TimeoutHeight;
use crate::core::ics04_channel::version::Version as ChanVersion;
use crate::core::ics05_port::handler::bind_port;
use crate::core::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::core::ics24_host::path::{ChannelEndPath, CommitmentPath, ConnectionPath, ReceiptPath};
use crate::core::ics24_host::store::{ProvableStore, PruningOptions};
use crate::core::msgs::Msg;
use crate::core::router::RouterError;
use crate::core::ValidationContext;
use crate::events::IbcEvent;
use crate::mock::context::{MockContext, MockContextConfig};
use crate::mock::fixtures::{dummy_signer, MOCK_CLIENT_TYPE};
use crate::mock::router::{DummyModule, MockRouter};
use crate::query::{query_channel, query_client_state};
use crate::signer::Signer;
use crate::{Any, ErrorKind, Height};

/// One host and the modules routed on it.
struct Chain {
    ctx: MockContext,
    router: MockRouter,
    /// The client tracking the other chain.
    client_id: ClientId,
    conn_id: ConnectionId,
}

impl Chain {
    fn new(chain_id: &str, transfer_port: &str, client_id: &str, conn_id: &str) -> Self {
        let ctx = MockContextConfig::builder()
            .chain_id(chain_id.parse().unwrap())
            .transfer_port(transfer_port.parse().unwrap())
            .build();
        Self {
            ctx,
            router: MockRouter::new(),
            client_id: ClientId::from_str(client_id).unwrap(),
            conn_id: ConnectionId::from_str(conn_id).unwrap(),
        }
    }

    fn deliver(&mut self, msg: Any) -> Result<(), RouterError> {
        deliver(&mut self.ctx, &self.router, msg)
    }

    fn route_dummy(&mut self, port_id: &str) {
        let capability = bind_port(&mut self.ctx, port_id.parse().unwrap()).unwrap();
        self.router.add_route(DummyModule::new(capability)).unwrap();
    }

    fn route_transfer(&mut self, port_id: &str) {
        let capability = bind_port(&mut self.ctx, port_id.parse().unwrap()).unwrap();
        self.router.add_route(TransferModule::new(capability)).unwrap();
    }
}

fn chains() -> (Chain, Chain) {
    (
        Chain::new("mockgaia-0", "firstport", "client-on-a", "conn-on-a"),
        Chain::new("mockosmo-0", "secondport", "client-on-b", "conn-on-b"),
    )
}

/// Commits `src` and hands its new root to `dst`'s client of `src`, creating
/// that client on first use. Returns the height proofs from `src` are now
/// verifiable at.
fn relay_root(src: &mut Chain, dst: &mut Chain) -> Height {
    let height = src.ctx.commit();
    let consensus_state = src.ctx.host_consensus_state(&height).unwrap();

    let msg = if dst.ctx.client_state(&dst.client_id).is_ok() {
        MsgUpdateClient {
            client_id: dst.client_id.clone(),
            consensus_state,
            signer: dummy_signer(),
        }
        .to_any()
    } else {
        MsgCreateClient {
            client_id: dst.client_id.clone(),
            client_type: ClientType::from_str(MOCK_CLIENT_TYPE).unwrap(),
            consensus_state,
            signer: dummy_signer(),
        }
        .to_any()
    };
    dst.deliver(msg).unwrap();

    height
}

fn open_connection(a: &mut Chain, b: &mut Chain) {
    relay_root(b, a);
    relay_root(a, b);

    a.deliver(
        MsgConnectionOpenInit {
            conn_id_on_a: a.conn_id.clone(),
            client_id_on_a: a.client_id.clone(),
            counterparty: ConnCounterparty::new(
                b.client_id.clone(),
                b.conn_id.clone(),
                b.ctx.commitment_prefix(),
            ),
            versions: get_compatible_versions(),
            signer: dummy_signer(),
        }
        .to_any(),
    )
    .unwrap();

    let height = relay_root(a, b);
    b.deliver(
        MsgConnectionOpenTry {
            conn_id_on_b: b.conn_id.clone(),
            client_id_on_b: b.client_id.clone(),
            counterparty: ConnCounterparty::new(
                a.client_id.clone(),
                a.conn_id.clone(),
                a.ctx.commitment_prefix(),
            ),
            versions_on_a: get_compatible_versions(),
            proof_conn_end_on_a: a.ctx.prove(ConnectionPath::new(&a.conn_id), &height),
            proofs_height_on_a: height,
            signer: dummy_signer(),
        }
        .to_any(),
    )
    .unwrap();

    let height = relay_root(b, a);
    let version = b.ctx.connection_end(&b.conn_id).unwrap().versions()[0].clone();
    a.deliver(
        MsgConnectionOpenAck {
            conn_id_on_a: a.conn_id.clone(),
            proof_conn_end_on_b: b.ctx.prove(ConnectionPath::new(&b.conn_id), &height),
            proofs_height_on_b: height,
            version,
            signer: dummy_signer(),
        }
        .to_any(),
    )
    .unwrap();

    let height = relay_root(a, b);
    b.deliver(
        MsgConnectionOpenConfirm {
            conn_id_on_b: b.conn_id.clone(),
            proof_conn_end_on_a: a.ctx.prove(ConnectionPath::new(&a.conn_id), &height),
            proof_height_on_a: height,
            signer: dummy_signer(),
        }
        .to_any(),
    )
    .unwrap();
}

/// The two channel ends a handshake joins.
struct ChannelPair {
    port_a: PortId,
    chan_a: ChannelId,
    port_b: PortId,
    chan_b: ChannelId,
    ordering: Order,
    version: ChanVersion,
}

impl ChannelPair {
    fn new(ordering: Order, version: &str) -> Self {
        Self {
            port_a: "firstport".parse().unwrap(),
            chan_a: "ch1".parse().unwrap(),
            port_b: "secondport".parse().unwrap(),
            chan_b: "ch2".parse().unwrap(),
            ordering,
            version: version.into(),
        }
    }

    fn open_init(&self, a: &Chain) -> Any {
        MsgChannelOpenInit {
            port_id_on_a: self.port_a.clone(),
            chan_id_on_a: self.chan_a.clone(),
            port_id_on_b: self.port_b.clone(),
            chan_id_on_b: self.chan_b.clone(),
            connection_hops_on_a: vec![a.conn_id.clone()],
            ordering: self.ordering,
            version: self.version.clone(),
            signer: dummy_signer(),
        }
        .to_any()
    }

    fn open_try(&self, a: &Chain, b: &Chain, height: Height) -> MsgChannelOpenTry {
        MsgChannelOpenTry {
            port_id_on_b: self.port_b.clone(),
            chan_id_on_b: self.chan_b.clone(),
            port_id_on_a: self.port_a.clone(),
            chan_id_on_a: self.chan_a.clone(),
            connection_hops_on_b: vec![b.conn_id.clone()],
            ordering: self.ordering,
            version_on_a: self.version.clone(),
            proof_chan_end_on_a: a
                .ctx
                .prove(ChannelEndPath::new(&self.port_a, &self.chan_a), &height),
            proof_height_on_a: height,
            signer: dummy_signer(),
        }
    }

    fn open(&self, a: &mut Chain, b: &mut Chain) {
        a.deliver(self.open_init(a)).unwrap();

        let height = relay_root(a, b);
        b.deliver(self.open_try(a, b, height).to_any()).unwrap();

        let height = relay_root(b, a);
        let version_on_b = b
            .ctx
            .channel_end(&ChannelEndPath::new(&self.port_b, &self.chan_b))
            .unwrap()
            .version()
            .clone();
        a.deliver(
            MsgChannelOpenAck {
                port_id_on_a: self.port_a.clone(),
                chan_id_on_a: self.chan_a.clone(),
                version_on_b,
                proof_chan_end_on_b: b
                    .ctx
                    .prove(ChannelEndPath::new(&self.port_b, &self.chan_b), &height),
                proof_height_on_b: height,
                signer: dummy_signer(),
            }
            .to_any(),
        )
        .unwrap();

        let height = relay_root(a, b);
        b.deliver(
            MsgChannelOpenConfirm {
                port_id_on_b: self.port_b.clone(),
                chan_id_on_b: self.chan_b.clone(),
                proof_chan_end_on_a: a
                    .ctx
                    .prove(ChannelEndPath::new(&self.port_a, &self.chan_a), &height),
                proof_height_on_a: height,
                signer: dummy_signer(),
            }
            .to_any(),
        )
        .unwrap();
    }
}

/// Relays the latest packet `src` sent to `dst`.
fn relay_packet(src: &mut Chain, dst: &mut Chain) -> Result<(), RouterError> {
    let packet = last_sent_packet(&src.ctx);
    let height = relay_root(src, dst);
    let proof = src.ctx.prove(
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a),
        &height,
    );
    dst.deliver(
        MsgRecvPacket {
            packet,
            proof_commitment_on_a: proof,
            proof_height_on_a: height,
            signer: dummy_signer(),
        }
        .to_any(),
    )
}

fn last_sent_packet(ctx: &MockContext) -> Packet {
    ctx.events
        .iter()
        .rev()
        .find_map(|event| match event {
            IbcEvent::SendPacket(e) => Some(e.packet().clone()),
            _ => None,
        })
        .unwrap()
}

fn account(name: &str) -> Signer {
    Signer::from_str(name).unwrap()
}

fn coins(s: &str) -> Coins {
    s.parse().unwrap()
}

#[test]
fn connection_handshake_opens_both_ends() {
    let (mut a, mut b) = chains();

    open_connection(&mut a, &mut b);

    let conn_on_a = a.ctx.connection_end(&a.conn_id).unwrap();
    let conn_on_b = b.ctx.connection_end(&b.conn_id).unwrap();
    assert_eq!(conn_on_a.state(), &ConnState::Open);
    assert_eq!(conn_on_b.state(), &ConnState::Open);
    assert_eq!(conn_on_a.versions(), conn_on_b.versions());
    assert!(matches!(
        b.ctx.events.last(),
        Some(IbcEvent::OpenConfirmConnection(_))
    ));

    let retry = MsgConnectionOpenInit {
        conn_id_on_a: a.conn_id.clone(),
        client_id_on_a: a.client_id.clone(),
        counterparty: ConnCounterparty::new(
            b.client_id.clone(),
            b.conn_id.clone(),
            b.ctx.commitment_prefix(),
        ),
        versions: get_compatible_versions(),
        signer: dummy_signer(),
    };
    let err = a.deliver(retry.to_any()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(
        a.ctx.connection_end(&a.conn_id).unwrap().state(),
        &ConnState::Open
    );
}

#[test]
fn channel_handshake_with_dummy_modules() {
    let (mut a, mut b) = chains();
    a.route_dummy("firstport");
    b.route_dummy("secondport");
    open_connection(&mut a, &mut b);
    let pair = ChannelPair::new(Order::Ordered, "1.0");

    pair.open(&mut a, &mut b);

    let chan_on_a = a
        .ctx
        .channel_end(&ChannelEndPath::new(&pair.port_a, &pair.chan_a))
        .unwrap();
    let chan_on_b = b
        .ctx
        .channel_end(&ChannelEndPath::new(&pair.port_b, &pair.chan_b))
        .unwrap();
    assert_eq!(chan_on_a.state(), &ChanState::Open);
    assert_eq!(chan_on_b.state(), &ChanState::Open);
    assert_eq!(chan_on_b.version(), &ChanVersion::from("1.0"));
    assert!(matches!(
        b.ctx.events.last(),
        Some(IbcEvent::OpenConfirmChannel(_))
    ));

    let err = a.deliver(pair.open_init(&a)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    // An ordered packet reaches the module on the other end.
    send_packet(
        &mut a.ctx,
        Packet {
            seq_on_a: 1.into(),
            port_id_on_a: pair.port_a.clone(),
            chan_id_on_a: pair.chan_a.clone(),
            port_id_on_b: pair.port_b.clone(),
            chan_id_on_b: pair.chan_b.clone(),
            data: b"ping".to_vec(),
            timeout_height_on_b: TimeoutHeight::Never,
        },
    )
    .unwrap();
    relay_packet(&mut a, &mut b).unwrap();
    assert!(b
        .ctx
        .logs
        .iter()
        .any(|log| log == "dummy module received packet 1"));

    // A replay is rejected.
    let err = relay_packet(&mut a, &mut b).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn token_transfer_round_trip() {
    let (mut a, mut b) = chains();
    a.route_transfer("firstport");
    b.route_transfer("secondport");
    open_connection(&mut a, &mut b);
    let pair = ChannelPair::new(Order::Unordered, VERSION);
    pair.open(&mut a, &mut b);

    let alice = account("cosmos1alice");
    let bob = account("cosmos1bob");
    a.ctx = a.ctx.with_balance(alice.clone(), coins("100atom"));

    send_transfer(
        &mut a.ctx,
        MsgTransfer {
            port_id_on_a: pair.port_a.clone(),
            chan_id_on_a: pair.chan_a.clone(),
            coins: coins("100atom"),
            sender: alice.clone(),
            receiver: bob.clone(),
            source: true,
            timeout_height_on_b: TimeoutHeight::Never,
        },
    )
    .unwrap();
    relay_packet(&mut a, &mut b).unwrap();

    let escrow_on_a = escrow_address(&pair.port_a, &pair.chan_a);
    assert!(a.ctx.balance(&alice).is_empty());
    assert_eq!(a.ctx.balance(&escrow_on_a), coins("100atom"));
    assert_eq!(b.ctx.balance(&bob), coins("100secondport/ch2/atom"));

    // The same packet cannot be credited twice.
    let err = relay_packet(&mut a, &mut b).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(b.ctx.balance(&bob), coins("100secondport/ch2/atom"));

    // Bob sends the vouchers home, which releases the escrow.
    send_transfer(
        &mut b.ctx,
        MsgTransfer {
            port_id_on_a: pair.port_b.clone(),
            chan_id_on_a: pair.chan_b.clone(),
            coins: coins("100secondport/ch2/atom"),
            sender: bob.clone(),
            receiver: alice.clone(),
            source: false,
            timeout_height_on_b: TimeoutHeight::Never,
        },
    )
    .unwrap();
    relay_packet(&mut b, &mut a).unwrap();

    assert!(b.ctx.balance(&bob).is_empty());
    assert!(a.ctx.balance(&escrow_on_a).is_empty());
    assert_eq!(a.ctx.balance(&alice), coins("100atom"));
}

#[test]
fn overflowing_credit_leaves_the_packet_receivable() {
    let (mut a, mut b) = chains();
    a.route_transfer("firstport");
    b.route_transfer("secondport");
    open_connection(&mut a, &mut b);
    let pair = ChannelPair::new(Order::Unordered, VERSION);
    pair.open(&mut a, &mut b);

    let alice = account("cosmos1alice");
    let bob = account("cosmos1bob");
    let full = Coins::new(vec![Coin::new(
        U256::MAX,
        "secondport/ch2/atom".parse().unwrap(),
    )])
    .unwrap();
    a.ctx = a.ctx.with_balance(alice.clone(), coins("1atom"));
    b.ctx = b.ctx.with_balance(bob.clone(), full.clone());

    send_transfer(
        &mut a.ctx,
        MsgTransfer {
            port_id_on_a: pair.port_a.clone(),
            chan_id_on_a: pair.chan_a.clone(),
            coins: coins("1atom"),
            sender: alice.clone(),
            receiver: bob.clone(),
            source: true,
            timeout_height_on_b: TimeoutHeight::Never,
        },
    )
    .unwrap();
    let packet = last_sent_packet(&a.ctx);
    let receipt_path =
        ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

    // Both attempts fail on the credit itself and leave no receipt behind.
    for _ in 0..2 {
        let err = relay_packet(&mut a, &mut b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(b.ctx.get_packet_receipt(&receipt_path).is_err());
        assert_eq!(b.ctx.balance(&bob), full);
    }

    // Once bob burns a voucher the same packet goes through.
    send_transfer(
        &mut b.ctx,
        MsgTransfer {
            port_id_on_a: pair.port_b.clone(),
            chan_id_on_a: pair.chan_b.clone(),
            coins: coins("1secondport/ch2/atom"),
            sender: bob.clone(),
            receiver: alice.clone(),
            source: false,
            timeout_height_on_b: TimeoutHeight::Never,
        },
    )
    .unwrap();
    relay_packet(&mut a, &mut b).unwrap();

    assert!(b.ctx.get_packet_receipt(&receipt_path).is_ok());
    assert_eq!(b.ctx.balance(&bob), full);
}

#[test]
fn transfer_channel_must_be_unordered() {
    let (mut a, mut b) = chains();
    a.route_transfer("firstport");
    b.route_transfer("secondport");
    open_connection(&mut a, &mut b);

    let err = a
        .deliver(ChannelPair::new(Order::Ordered, VERSION).open_init(&a))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn tampered_proofs_are_rejected() {
    let (mut a, mut b) = chains();
    a.route_dummy("firstport");
    b.route_dummy("secondport");
    open_connection(&mut a, &mut b);
    let pair = ChannelPair::new(Order::Ordered, "1.0");
    a.deliver(pair.open_init(&a)).unwrap();
    let height = relay_root(&mut a, &mut b);
    let chan_path_on_b = ChannelEndPath::new(&pair.port_b, &pair.chan_b);

    // A valid proof of another record.
    let mut msg = pair.open_try(&a, &b, height);
    msg.proof_chan_end_on_a = a.ctx.prove(ConnectionPath::new(&a.conn_id), &height);
    let err = b.deliver(msg.to_any()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProofVerificationFailed);

    // A claim that does not match what chain A stored.
    let mut msg = pair.open_try(&a, &b, height);
    msg.version_on_a = "2.0".into();
    let err = b.deliver(msg.to_any()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProofVerificationFailed);

    // A height chain B's client never saw.
    let mut msg = pair.open_try(&a, &b, height);
    msg.proof_height_on_a = Height::new(0, height.revision_height() + 5).unwrap();
    assert!(b.deliver(msg.to_any()).is_err());

    assert!(b.ctx.channel_end(&chan_path_on_b).is_err());
    b.deliver(pair.open_try(&a, &b, height).to_any()).unwrap();
    assert!(b.ctx.channel_end(&chan_path_on_b).is_ok());
}

#[test]
fn pruned_heights_cannot_be_queried() {
    let client_id = ClientId::from_str("client-on-a").unwrap();
    let mut ctx: MockContext = MockContextConfig::builder()
        .pruning(PruningOptions::new(1, 10))
        .build();
    ctx = ctx.with_client(&client_id, Height::new(0, 5).unwrap());
    for _ in 0..25 {
        ctx.commit();
    }

    for retained in [10, 20, 25] {
        let height = Height::new(0, retained).unwrap();
        let response = query_client_state(&ctx, &client_id, Some(height), true).unwrap();
        assert_eq!(response.proof_height, height);
    }
    let err =
        query_client_state(&ctx, &client_id, Some(Height::new(0, 24).unwrap()), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);

    ctx.store_mut().load_version(20).unwrap();
    assert_eq!(ctx.store().latest_version(), 20);
    assert_eq!(ctx.commit(), Height::new(0, 21).unwrap());
}

#[test]
fn queries_serve_relayers() {
    let (mut a, mut b) = chains();
    a.route_dummy("firstport");
    b.route_dummy("secondport");
    open_connection(&mut a, &mut b);
    let pair = ChannelPair::new(Order::Ordered, "1.0");
    pair.open(&mut a, &mut b);
    b.ctx.commit();

    let response = query_channel(&b.ctx, &pair.port_b, &pair.chan_b, None, true).unwrap();

    assert_eq!(response.value.state(), &ChanState::Open);
    assert!(response.proof.is_some());
}

#[test]
fn undecodable_and_unrouted_messages() {
    let (mut a, mut b) = chains();
    open_connection(&mut a, &mut b);

    let err = a
        .deliver(Any {
            type_url: "/ibc.core.unknown.v1.MsgUnknown".to_string(),
            value: Vec::new(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownRequest);

    let err = a
        .deliver(ChannelPair::new(Order::Ordered, "1.0").open_init(&a))
        .unwrap_err();
    assert!(matches!(err, RouterError::RouteNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
