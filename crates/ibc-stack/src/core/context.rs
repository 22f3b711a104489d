use crate::prelude::*;

use crate::core::ics02_client::client_state::ClientState;
use crate::core::ics02_client::consensus_state::ConsensusState;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::version::{
    get_compatible_versions, pick_version, Version as ConnectionVersion,
};
use crate::core::ics04_channel::channel::ChannelEnd;
use crate::core::ics04_channel::commitment::{compute_packet_commitment, PacketCommitment};
use crate::core::ics04_channel::packet::{Receipt, Sequence};
use crate::core::ics04_channel::timeout::TimeoutHeight;
use crate::core::ics05_port::capability::PortCapability;
use crate::core::ics05_port::error::PortError;
use crate::core::ics23_commitment::commitment::{CommitmentPrefix, CommitmentRoot};
use crate::core::ics23_commitment::scheme::CommitmentScheme;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId, PortId};
use crate::core::ics24_host::path::{
    ChannelEndPath, ClientConsensusStatePath, ClientStatePath, CommitmentPath, ConnectionPath,
    PortPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath, VerifiedRootPath,
};
use crate::core::ContextError;
use crate::events::IbcEvent;
use crate::Height;

/// Read access to the host state, shared by every handler's validation step.
pub trait ValidationContext {
    type ProofVerifier: CommitmentScheme;

    /// The scheme used to check counterparty proofs against verified roots.
    fn commitment_scheme(&self) -> &Self::ProofVerifier;

    /// Returns the ClientState for the given identifier `client_id`.
    fn client_state(&self, client_id: &ClientId) -> Result<ClientState, ContextError>;

    /// Retrieve the latest consensus state supplied for a client.
    fn consensus_state(
        &self,
        client_cons_state_path: &ClientConsensusStatePath,
    ) -> Result<ConsensusState, ContextError>;

    /// The root the client verified at the given height, if any.
    fn verified_root(
        &self,
        verified_root_path: &VerifiedRootPath,
    ) -> Result<Option<CommitmentRoot>, ContextError>;

    /// Returns the current height of the local chain.
    fn host_height(&self) -> Result<Height, ContextError>;

    /// Returns the `ConsensusState` of the host (local) chain at a specific height.
    fn host_consensus_state(&self, height: &Height) -> Result<ConsensusState, ContextError>;

    /// Returns the prefix that the local chain uses in the KV store.
    fn commitment_prefix(&self) -> CommitmentPrefix;

    /// Returns the ConnectionEnd for the given identifier `conn_id`.
    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError>;

    /// Returns the list of all possible versions that the connection
    /// handshake protocol supports.
    fn get_compatible_versions(&self) -> Vec<ConnectionVersion> {
        get_compatible_versions()
    }

    /// Returns one version out of the supplied list of versions, which the
    /// connection handshake protocol prefers.
    fn pick_version(
        &self,
        supported_versions: &[ConnectionVersion],
        counterparty_candidate_versions: &[ConnectionVersion],
    ) -> Result<ConnectionVersion, ContextError> {
        pick_version(supported_versions, counterparty_candidate_versions)
            .map_err(ContextError::ConnectionError)
    }

    /// Returns the ChannelEnd for the given `port_id` and `chan_id`.
    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError>;

    fn get_next_sequence_send(&self, seq_send_path: &SeqSendPath)
        -> Result<Sequence, ContextError>;

    fn get_next_sequence_recv(&self, seq_recv_path: &SeqRecvPath)
        -> Result<Sequence, ContextError>;

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ContextError>;

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<PacketCommitment, ContextError>;

    fn get_packet_receipt(&self, receipt_path: &ReceiptPath) -> Result<Receipt, ContextError>;

    /// The index of the capability that owns a port, failing with
    /// `UnknownPort` if the port is not bound.
    fn port_capability_index(&self, port_path: &PortPath) -> Result<u64, ContextError>;

    /// Returns a counter on how many capabilities have been handed out so far.
    fn capability_counter(&self) -> Result<u64, ContextError>;

    /// Checks that `capability` is the one bound to `port_id`.
    fn authenticate_port(
        &self,
        capability: &PortCapability,
        port_id: &PortId,
    ) -> Result<(), ContextError> {
        let index = self.port_capability_index(&PortPath::new(port_id))?;
        if capability.port_id() != port_id || capability.index() != index {
            return Err(PortError::CapabilityMismatch {
                port_id: port_id.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Compute the commitment for a packet.
    fn packet_commitment(
        &self,
        packet_data: &[u8],
        timeout_height: &TimeoutHeight,
    ) -> PacketCommitment {
        compute_packet_commitment(packet_data, timeout_height)
    }
}

/// Write access to the host state, used by every handler's execution step.
pub trait ExecutionContext: ValidationContext {
    /// Called upon successful client creation and update
    fn store_client_state(
        &mut self,
        client_state_path: &ClientStatePath,
        client_state: ClientState,
    ) -> Result<(), ContextError>;

    /// Called upon successful client creation and update
    fn store_consensus_state(
        &mut self,
        consensus_state_path: &ClientConsensusStatePath,
        consensus_state: ConsensusState,
    ) -> Result<(), ContextError>;

    /// Records a root the client has verified. Entries are never overwritten.
    fn store_verified_root(
        &mut self,
        verified_root_path: &VerifiedRootPath,
        root: CommitmentRoot,
    ) -> Result<(), ContextError>;

    /// Stores the given connection_end at path
    fn store_connection(
        &mut self,
        connection_path: &ConnectionPath,
        connection_end: ConnectionEnd,
    ) -> Result<(), ContextError>;

    /// Stores the given channel_end at a path associated with the port_id and channel_id.
    fn store_channel(
        &mut self,
        channel_end_path: &ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_recv(
        &mut self,
        seq_recv_path: &SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_ack(
        &mut self,
        seq_ack_path: &SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError>;

    fn store_packet_receipt(
        &mut self,
        receipt_path: &ReceiptPath,
        receipt: Receipt,
    ) -> Result<(), ContextError>;

    /// Records that the capability with `index` owns the port.
    fn store_port_capability(
        &mut self,
        port_path: &PortPath,
        index: u64,
    ) -> Result<(), ContextError>;

    /// Called upon port binding.
    /// Increases the counter which keeps track of how many capabilities have been handed out.
    /// Should never fail.
    fn increase_capability_counter(&mut self);

    /// Ibc events
    fn emit_ibc_event(&mut self, event: IbcEvent);

    /// Logging facility
    fn log_message(&mut self, message: String);
}
