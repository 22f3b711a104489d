//! Implementation of a global context mock. Used in testing handlers of all IBC modules.
//!
//! A [`MockContext`] is one chain: its IBC state lives in an [`InMemoryStore`]
//! under the commitment prefix, encoded exactly as counterparties expect to
//! find it in proofs. Balances live in a separate ledger map.

use crate::prelude::*;

use core::fmt::Display;
use core::str::FromStr;

use parking_lot::Mutex;
use prost::Message;
use sha2::{Digest, Sha256};
use typed_builder::TypedBuilder;

use crate::applications::transfer::context::{
    ParamsCache, TokenTransferExecutionContext, TokenTransferValidationContext, TransferParams,
};
use crate::applications::transfer::error::TokenTransferError;
use crate::applications::transfer::Coins;
use crate::core::ics02_client::client_state::ClientState;
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::consensus_state::ConsensusState;
use crate::core::ics02_client::error::ClientError;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics04_channel::channel::ChannelEnd;
use crate::core::ics04_channel::commitment::PacketCommitment;
use crate::core::ics04_channel::error::{ChannelError, PacketError};
use crate::core::ics04_channel::packet::{Receipt, Sequence};
use crate::core::ics05_port::error::PortError;
use crate::core::ics23_commitment::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use crate::core::ics23_commitment::scheme::Ics23Scheme;
use crate::core::ics24_host::identifier::{ChainId, ChannelId, ClientId, ConnectionId, PortId};
use crate::core::ics24_host::path::{
    ChannelEndPath, ClientConsensusStatePath, ClientStatePath, CommitmentPath, ConnectionPath,
    Path, PortPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath, VerifiedRootPath,
};
use crate::core::ics24_host::store::{ProvableStore, PruningOptions};
use crate::core::{ContextError, ExecutionContext, HostError, ValidationContext};
use crate::events::IbcEvent;
use crate::mock::fixtures::{mock_commitment_prefix, MOCK_CLIENT_TYPE};
use crate::mock::store::InMemoryStore;
use crate::proto::channel::Channel as RawChannel;
use crate::proto::client::{ClientState as RawClientState, ConsensusState as RawConsensusState};
use crate::proto::connection::ConnectionEnd as RawConnectionEnd;
use crate::proto::transfer::Params as RawParams;
use crate::query::QueryContext;
use crate::signer::Signer;
use crate::Height;

/// Key of the transfer params, outside the IBC prefix.
pub const TRANSFER_PARAMS_KEY: &[u8] = b"transfer/params";

const RECEIPT_OK: &[u8] = &[1];

/// Configuration of a [`MockContext`].
#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = MockContext))]
pub struct MockContextConfig {
    /// Also fixes the revision number of every host height.
    #[builder(default = ChainId::new("mockgaia-0").expect("never fails"))]
    pub chain_id: ChainId,
    #[builder(default = mock_commitment_prefix())]
    pub commitment_prefix: CommitmentPrefix,
    #[builder(default)]
    pub pruning: PruningOptions,
    /// The port the host reports for the transfer application.
    #[builder(default = PortId::transfer())]
    pub transfer_port: PortId,
}

impl From<MockContextConfig> for MockContext {
    fn from(config: MockContextConfig) -> Self {
        MockContext {
            chain_id: config.chain_id,
            commitment_prefix: config.commitment_prefix,
            transfer_port: config.transfer_port,
            store: InMemoryStore::new(config.pruning),
            balances: BTreeMap::new(),
            params_cache: Mutex::new(ParamsCache::default()),
            capability_counter: 0,
            scheme: Ics23Scheme::default(),
            events: Vec::new(),
            logs: Vec::new(),
        }
    }
}

/// A context implementing the dependencies necessary for testing any IBC module.
#[derive(Debug)]
pub struct MockContext {
    chain_id: ChainId,
    commitment_prefix: CommitmentPrefix,
    transfer_port: PortId,

    store: InMemoryStore,

    /// The ledger backing the transfer application.
    balances: BTreeMap<Signer, Coins>,
    params_cache: Mutex<ParamsCache>,

    capability_counter: u64,
    scheme: Ics23Scheme,

    pub events: Vec<IbcEvent>,
    pub logs: Vec<String>,
}

/// Returns a MockContext with bare minimum initialization: no clients, no
/// connections, no channels and nothing committed.
impl Default for MockContext {
    fn default() -> Self {
        MockContextConfig::builder().build()
    }
}

/// Implementation of internal interface for use in testing. The methods in this interface should
/// _not_ be accessible to any Ics handler.
impl MockContext {
    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut InMemoryStore {
        &mut self.store
    }

    /// Associates a client record to this context: a client state at
    /// `height`, a dummy consensus state and its verified root.
    pub fn with_client(mut self, client_id: &ClientId, height: Height) -> Self {
        let consensus_state = dummy_consensus_state("mockcounterparty-0", height);
        self.install_client(client_id, consensus_state)
            .expect("error writing to store");
        self
    }

    pub fn with_connection(
        mut self,
        connection_id: ConnectionId,
        connection_end: ConnectionEnd,
    ) -> Self {
        self.store_connection(&ConnectionPath::new(&connection_id), connection_end)
            .expect("error writing to store");
        self
    }

    /// Stores a channel end without touching its sequence counters.
    pub fn with_channel(
        mut self,
        port_id: PortId,
        chan_id: ChannelId,
        channel_end: ChannelEnd,
    ) -> Self {
        self.store_channel(&ChannelEndPath::new(&port_id, &chan_id), channel_end)
            .expect("error writing to store");
        self
    }

    pub fn with_balance(mut self, account: Signer, coins: Coins) -> Self {
        self.balances.insert(account, coins);
        self
    }

    pub fn balance(&self, account: &Signer) -> Coins {
        self.balances.get(account).cloned().unwrap_or_default()
    }

    /// Seals the pending writes into a new block and returns its height.
    pub fn commit(&mut self) -> Height {
        let info = self.store.commit().expect("in-memory commit never fails");
        Height::new(self.chain_id.revision_number(), info.version).expect("versions start at 1")
    }

    /// Proves the record at `path` as committed at `height`.
    pub fn prove(&self, path: impl Into<Path>, height: &Height) -> CommitmentProofBytes {
        self.store
            .query(
                &self.commitment_prefix.apply(path),
                Some(height.revision_height()),
                true,
            )
            .expect("height must be retained")
            .proof
            .expect("proof was requested")
    }

    fn install_client(
        &mut self,
        client_id: &ClientId,
        consensus_state: ConsensusState,
    ) -> Result<(), ContextError> {
        let client_type = ClientType::from_str(MOCK_CLIENT_TYPE)?;
        let height = consensus_state.height;

        self.store_verified_root(
            &VerifiedRootPath::new(client_id, height),
            consensus_state.root().clone(),
        )?;
        self.store_consensus_state(&ClientConsensusStatePath::new(client_id), consensus_state)?;
        self.store_client_state(
            &ClientStatePath::new(client_id),
            ClientState::new(client_type, height),
        )
    }

    fn write(&mut self, path: impl Into<Path>, value: Vec<u8>) {
        let key = self.commitment_prefix.apply(path);
        self.store.set(key, value);
    }

    fn read(&self, path: impl Into<Path>) -> Option<(Path, Vec<u8>)> {
        let path = path.into();
        let key = self.commitment_prefix.apply(path.clone());
        self.store.get(&key).map(|bytes| (path, bytes))
    }

    fn load_transfer_params(&self) -> Result<TransferParams, TokenTransferError> {
        match self.store.get(TRANSFER_PARAMS_KEY) {
            None => Ok(TransferParams::default()),
            Some(bytes) => RawParams::decode(bytes.as_slice())
                .map(TransferParams::from)
                .map_err(|e| {
                    TokenTransferError::ContextError(
                        corrupted(String::from_utf8_lossy(TRANSFER_PARAMS_KEY), e).into(),
                    )
                }),
        }
    }
}

fn corrupted(path: impl Display, e: impl Display) -> HostError {
    HostError::DecodeStoredRecord {
        path: path.to_string(),
        description: e.to_string(),
    }
}

fn decode<R, T>(path: &Path, bytes: &[u8]) -> Result<T, ContextError>
where
    R: Message + Default,
    T: TryFrom<R>,
    T::Error: Display,
{
    let raw = R::decode(bytes).map_err(|e| corrupted(path, e))?;
    T::try_from(raw).map_err(|e| corrupted(path, e).into())
}

fn decode_u64(path: &Path, bytes: &[u8]) -> Result<u64, ContextError> {
    let bytes = <[u8; 8]>::try_from(bytes)
        .map_err(|_| corrupted(path, format!("expected 8 bytes, got {}", bytes.len())))?;
    Ok(u64::from_be_bytes(bytes))
}

/// A consensus state at `height` whose root is derived from the chain id and
/// height, so distinct calls yield distinct roots.
pub fn dummy_consensus_state(chain_id: &str, height: Height) -> ConsensusState {
    let root = Sha256::digest(format!("{chain_id}/{height}").as_bytes()).to_vec();
    ConsensusState::new(
        ChainId::new(chain_id).expect("valid chain id"),
        height,
        CommitmentRoot::from(root),
        Vec::new(),
    )
}

/// Commits `src` and makes the client `client_id_on_dst` on `dst` aware of
/// the new root, creating the client on first use. Returns the height at
/// which proofs from `src` can now be verified on `dst`.
///
/// This stands in for the relayer's client update.
pub fn sync_client(
    src: &mut MockContext,
    dst: &mut MockContext,
    client_id_on_dst: &ClientId,
) -> Height {
    let height = src.commit();
    let root = src
        .store
        .root_hash(height.revision_height())
        .expect("just committed");

    match dst.client_state(client_id_on_dst) {
        Ok(client_state) => {
            let client_state = client_state
                .advance(height)
                .expect("source heights only grow");
            dst.store_verified_root(&VerifiedRootPath::new(client_id_on_dst, height), root)
                .expect("error writing to store");
            dst.store_client_state(&ClientStatePath::new(client_id_on_dst), client_state)
                .expect("error writing to store");
        }
        Err(_) => {
            let consensus_state =
                ConsensusState::new(src.chain_id.clone(), height, root, Vec::new());
            dst.install_client(client_id_on_dst, consensus_state)
                .expect("error writing to store");
        }
    }

    height
}

impl ValidationContext for MockContext {
    type ProofVerifier = Ics23Scheme;

    fn commitment_scheme(&self) -> &Self::ProofVerifier {
        &self.scheme
    }

    fn client_state(&self, client_id: &ClientId) -> Result<ClientState, ContextError> {
        match self.read(ClientStatePath::new(client_id)) {
            Some((path, bytes)) => decode::<RawClientState, _>(&path, &bytes),
            None => Err(ClientError::ClientStateNotFound {
                client_id: client_id.clone(),
            }
            .into()),
        }
    }

    fn consensus_state(
        &self,
        client_cons_state_path: &ClientConsensusStatePath,
    ) -> Result<ConsensusState, ContextError> {
        match self.read(client_cons_state_path.clone()) {
            Some((path, bytes)) => decode::<RawConsensusState, _>(&path, &bytes),
            None => Err(ClientError::ConsensusStateNotFound {
                client_id: client_cons_state_path.0.clone(),
            }
            .into()),
        }
    }

    fn verified_root(
        &self,
        verified_root_path: &VerifiedRootPath,
    ) -> Result<Option<CommitmentRoot>, ContextError> {
        Ok(self
            .read(verified_root_path.clone())
            .map(|(_, bytes)| CommitmentRoot::from(bytes)))
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        Ok(Height::new(
            self.chain_id.revision_number(),
            self.store.latest_version() + 1,
        )?)
    }

    fn host_consensus_state(&self, height: &Height) -> Result<ConsensusState, ContextError> {
        let root = self.store.root_hash(height.revision_height())?;
        Ok(ConsensusState::new(
            self.chain_id.clone(),
            *height,
            root,
            Vec::new(),
        ))
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        self.commitment_prefix.clone()
    }

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        match self.read(ConnectionPath::new(conn_id)) {
            Some((path, bytes)) => decode::<RawConnectionEnd, _>(&path, &bytes),
            None => Err(ConnectionError::ConnectionNotFound {
                connection_id: conn_id.clone(),
            }
            .into()),
        }
    }

    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        match self.read(channel_end_path.clone()) {
            Some((path, bytes)) => decode::<RawChannel, _>(&path, &bytes),
            None => Err(ChannelError::ChannelNotFound {
                port_id: channel_end_path.0.clone(),
                channel_id: channel_end_path.1.clone(),
            }
            .into()),
        }
    }

    fn get_next_sequence_send(
        &self,
        seq_send_path: &SeqSendPath,
    ) -> Result<Sequence, ContextError> {
        match self.read(seq_send_path.clone()) {
            Some((path, bytes)) => Ok(decode_u64(&path, &bytes)?.into()),
            None => Err(PacketError::MissingNextSendSeq {
                port_id: seq_send_path.0.clone(),
                channel_id: seq_send_path.1.clone(),
            }
            .into()),
        }
    }

    fn get_next_sequence_recv(
        &self,
        seq_recv_path: &SeqRecvPath,
    ) -> Result<Sequence, ContextError> {
        match self.read(seq_recv_path.clone()) {
            Some((path, bytes)) => Ok(decode_u64(&path, &bytes)?.into()),
            None => Err(PacketError::MissingNextRecvSeq {
                port_id: seq_recv_path.0.clone(),
                channel_id: seq_recv_path.1.clone(),
            }
            .into()),
        }
    }

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ContextError> {
        match self.read(seq_ack_path.clone()) {
            Some((path, bytes)) => Ok(decode_u64(&path, &bytes)?.into()),
            None => Err(PacketError::MissingNextAckSeq {
                port_id: seq_ack_path.0.clone(),
                channel_id: seq_ack_path.1.clone(),
            }
            .into()),
        }
    }

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<PacketCommitment, ContextError> {
        self.read(commitment_path.clone())
            .map(|(_, bytes)| PacketCommitment::from(bytes))
            .ok_or_else(|| {
                PacketError::PacketCommitmentNotFound {
                    sequence: commitment_path.sequence,
                }
                .into()
            })
    }

    fn get_packet_receipt(&self, receipt_path: &ReceiptPath) -> Result<Receipt, ContextError> {
        self.read(receipt_path.clone())
            .map(|_| Receipt::Ok)
            .ok_or_else(|| {
                PacketError::PacketReceiptNotFound {
                    sequence: receipt_path.sequence,
                }
                .into()
            })
    }

    fn port_capability_index(&self, port_path: &PortPath) -> Result<u64, ContextError> {
        match self.read(port_path.clone()) {
            Some((path, bytes)) => decode_u64(&path, &bytes),
            None => Err(PortError::UnknownPort {
                port_id: port_path.0.clone(),
            }
            .into()),
        }
    }

    fn capability_counter(&self) -> Result<u64, ContextError> {
        Ok(self.capability_counter)
    }
}

impl ExecutionContext for MockContext {
    fn store_client_state(
        &mut self,
        client_state_path: &ClientStatePath,
        client_state: ClientState,
    ) -> Result<(), ContextError> {
        self.write(
            client_state_path.clone(),
            RawClientState::from(client_state).encode_to_vec(),
        );
        Ok(())
    }

    fn store_consensus_state(
        &mut self,
        consensus_state_path: &ClientConsensusStatePath,
        consensus_state: ConsensusState,
    ) -> Result<(), ContextError> {
        self.write(
            consensus_state_path.clone(),
            RawConsensusState::from(consensus_state).encode_to_vec(),
        );
        Ok(())
    }

    fn store_verified_root(
        &mut self,
        verified_root_path: &VerifiedRootPath,
        root: CommitmentRoot,
    ) -> Result<(), ContextError> {
        self.write(verified_root_path.clone(), root.into_vec());
        Ok(())
    }

    fn store_connection(
        &mut self,
        connection_path: &ConnectionPath,
        connection_end: ConnectionEnd,
    ) -> Result<(), ContextError> {
        self.write(
            connection_path.clone(),
            RawConnectionEnd::from(connection_end).encode_to_vec(),
        );
        Ok(())
    }

    fn store_channel(
        &mut self,
        channel_end_path: &ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ContextError> {
        self.write(
            channel_end_path.clone(),
            RawChannel::from(channel_end).encode_to_vec(),
        );
        Ok(())
    }

    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.write(seq_send_path.clone(), seq.value().to_be_bytes().to_vec());
        Ok(())
    }

    fn store_next_sequence_recv(
        &mut self,
        seq_recv_path: &SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.write(seq_recv_path.clone(), seq.value().to_be_bytes().to_vec());
        Ok(())
    }

    fn store_next_sequence_ack(
        &mut self,
        seq_ack_path: &SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.write(seq_ack_path.clone(), seq.value().to_be_bytes().to_vec());
        Ok(())
    }

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError> {
        self.write(commitment_path.clone(), commitment.into_vec());
        Ok(())
    }

    fn store_packet_receipt(
        &mut self,
        receipt_path: &ReceiptPath,
        _receipt: Receipt,
    ) -> Result<(), ContextError> {
        self.write(receipt_path.clone(), RECEIPT_OK.to_vec());
        Ok(())
    }

    fn store_port_capability(
        &mut self,
        port_path: &PortPath,
        index: u64,
    ) -> Result<(), ContextError> {
        self.write(port_path.clone(), index.to_be_bytes().to_vec());
        Ok(())
    }

    fn increase_capability_counter(&mut self) {
        self.capability_counter += 1;
    }

    fn emit_ibc_event(&mut self, event: IbcEvent) {
        self.events.push(event);
    }

    fn log_message(&mut self, message: String) {
        self.logs.push(message);
    }
}

impl TokenTransferValidationContext for MockContext {
    fn get_port(&self) -> Result<PortId, TokenTransferError> {
        Ok(self.transfer_port.clone())
    }

    fn transfer_params(&self) -> Result<TransferParams, TokenTransferError> {
        self.params_cache
            .lock()
            .get_or_load(|| self.load_transfer_params())
    }

    fn get_coins(&self, account: &Signer) -> Result<Coins, TokenTransferError> {
        Ok(self.balance(account))
    }
}

impl TokenTransferExecutionContext for MockContext {
    fn add_coins(
        &mut self,
        account: &Signer,
        coins: &Coins,
    ) -> Result<Coins, TokenTransferError> {
        let balance = self.balance(account).checked_add(coins)?;
        self.balances.insert(account.clone(), balance.clone());
        Ok(balance)
    }

    fn subtract_coins(
        &mut self,
        account: &Signer,
        coins: &Coins,
    ) -> Result<Coins, TokenTransferError> {
        let balance = self.balance(account).checked_sub(coins).map_err(|short| {
            TokenTransferError::InsufficientFunds {
                account: account.clone(),
                requested: coins.amount_of(&short.denom),
                available: short.amount,
                denom: short.denom,
            }
        })?;
        self.balances.insert(account.clone(), balance.clone());
        Ok(balance)
    }

    fn store_transfer_params(&mut self, params: TransferParams) -> Result<(), TokenTransferError> {
        self.store
            .set(TRANSFER_PARAMS_KEY.to_vec(), RawParams::from(params).encode_to_vec());
        self.params_cache.lock().mark_stale();
        Ok(())
    }
}

impl QueryContext for MockContext {
    type Store = InMemoryStore;

    fn provable_store(&self) -> &Self::Store {
        &self.store
    }
}
