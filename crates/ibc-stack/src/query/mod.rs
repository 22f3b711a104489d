//! Read-only access to committed IBC state for external callers such as
//! relayers, optionally with the merkle proof a counterparty needs to verify
//! the answer.
//!
//! Store-backed queries read a committed version of the host's
//! [`ProvableStore`]: the latest one when no height is given. The returned
//! `proof_height` is the height the proof (if any) was produced at.

use crate::prelude::*;

use displaydoc::Display;
use prost::Message;
use serde::Serialize;

use crate::core::ics02_client::client_state::ClientState;
use crate::core::ics02_client::consensus_state::ConsensusState;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics04_channel::channel::ChannelEnd;
use crate::core::ics23_commitment::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use crate::core::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::core::ics24_host::path::{
    ChannelEndPath, ClientConsensusStatePath, ClientStatePath, ConnectionPath, Path,
    VerifiedRootPath,
};
use crate::core::ics24_host::store::{ProvableStore, StoreError};
use crate::core::{ContextError, ErrorKind, ValidationContext};
use crate::proto::channel::Channel as RawChannel;
use crate::proto::client::{ClientState as RawClientState, ConsensusState as RawConsensusState};
use crate::proto::connection::ConnectionEnd as RawConnectionEnd;
use crate::Height;

/// Context to be implemented by the host to serve queries from its store.
pub trait QueryContext: ValidationContext {
    type Store: ProvableStore;

    fn provable_store(&self) -> &Self::Store;
}

/// A queried value together with its optional proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryResponse<T> {
    pub value: T,
    pub proof: Option<CommitmentProofBytes>,
    pub proof_height: Height,
}

#[derive(Debug, Display)]
pub enum QueryError {
    /// context error: `{0}`
    Context(ContextError),
    /// store error: `{0}`
    Store(StoreError),
    /// no record at `{path}` in version `{version}`
    NotFound { path: Path, version: u64 },
    /// record at `{path}` cannot be decoded: {description}
    Decode { path: Path, description: String },
    /// height `{height}` is not on the host revision `{revision_number}`
    RevisionMismatch { height: Height, revision_number: u64 },
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Context(e) => e.kind(),
            Self::Store(_) | Self::Decode { .. } => ErrorKind::Storage,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RevisionMismatch { .. } => ErrorKind::InvalidInput,
        }
    }
}

impl From<ContextError> for QueryError {
    fn from(e: ContextError) -> Self {
        Self::Context(e)
    }
}

impl From<StoreError> for QueryError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context(e) => Some(e),
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

/// Maps a query height onto a store version, checking its revision.
fn store_version<Ctx>(ctx: &Ctx, height: Option<Height>) -> Result<Option<u64>, QueryError>
where
    Ctx: QueryContext,
{
    let Some(height) = height else {
        return Ok(None);
    };
    let revision_number = ctx.host_height()?.revision_number();
    if height.revision_number() != revision_number {
        return Err(QueryError::RevisionMismatch {
            height,
            revision_number,
        });
    }
    Ok(Some(height.revision_height()))
}

fn query_record<Ctx, T, F>(
    ctx: &Ctx,
    path: impl Into<Path>,
    height: Option<Height>,
    prove: bool,
    decode: F,
) -> Result<QueryResponse<T>, QueryError>
where
    Ctx: QueryContext,
    F: FnOnce(Vec<u8>) -> Result<T, String>,
{
    let path = path.into();
    let version = store_version(ctx, height)?;
    let key = ctx.commitment_prefix().apply(path.clone());

    let result = ctx.provable_store().query(&key, version, prove)?;
    let bytes = result.value.ok_or_else(|| QueryError::NotFound {
        path: path.clone(),
        version: result.version,
    })?;
    let value = decode(bytes).map_err(|description| QueryError::Decode { path, description })?;
    let proof_height = Height::new(ctx.host_height()?.revision_number(), result.version)
        .map_err(ContextError::from)?;

    Ok(QueryResponse {
        value,
        proof: result.proof,
        proof_height,
    })
}

fn decode_proto<R, T>(bytes: Vec<u8>) -> Result<T, String>
where
    R: Message + Default,
    T: TryFrom<R>,
    T::Error: ToString,
{
    let raw = R::decode(bytes.as_slice()).map_err(|e| e.to_string())?;
    T::try_from(raw).map_err(|e| e.to_string())
}

/// Queries the client state of `client_id`.
pub fn query_client_state<Ctx>(
    ctx: &Ctx,
    client_id: &ClientId,
    height: Option<Height>,
    prove: bool,
) -> Result<QueryResponse<ClientState>, QueryError>
where
    Ctx: QueryContext,
{
    query_record(
        ctx,
        ClientStatePath::new(client_id),
        height,
        prove,
        decode_proto::<RawClientState, _>,
    )
}

/// Queries the latest consensus state supplied for `client_id`.
pub fn query_consensus_state<Ctx>(
    ctx: &Ctx,
    client_id: &ClientId,
    height: Option<Height>,
    prove: bool,
) -> Result<QueryResponse<ConsensusState>, QueryError>
where
    Ctx: QueryContext,
{
    query_record(
        ctx,
        ClientConsensusStatePath::new(client_id),
        height,
        prove,
        decode_proto::<RawConsensusState, _>,
    )
}

/// Queries the root `client_id` verified at `root_height`.
pub fn query_verified_root<Ctx>(
    ctx: &Ctx,
    client_id: &ClientId,
    root_height: Height,
    height: Option<Height>,
    prove: bool,
) -> Result<QueryResponse<CommitmentRoot>, QueryError>
where
    Ctx: QueryContext,
{
    query_record(
        ctx,
        VerifiedRootPath::new(client_id, root_height),
        height,
        prove,
        |bytes| Ok(CommitmentRoot::from(bytes)),
    )
}

pub fn query_connection<Ctx>(
    ctx: &Ctx,
    conn_id: &ConnectionId,
    height: Option<Height>,
    prove: bool,
) -> Result<QueryResponse<ConnectionEnd>, QueryError>
where
    Ctx: QueryContext,
{
    query_record(
        ctx,
        ConnectionPath::new(conn_id),
        height,
        prove,
        decode_proto::<RawConnectionEnd, _>,
    )
}

/// Queries the channel end of `port_id/channel_id`.
pub fn query_channel<Ctx>(
    ctx: &Ctx,
    port_id: &PortId,
    channel_id: &ChannelId,
    height: Option<Height>,
    prove: bool,
) -> Result<QueryResponse<ChannelEnd>, QueryError>
where
    Ctx: QueryContext,
{
    query_record(
        ctx,
        ChannelEndPath::new(port_id, channel_id),
        height,
        prove,
        decode_proto::<RawChannel, _>,
    )
}

/// Queries the host's own consensus state at `height`, or at its latest
/// committed height. The host state is not a store record, so no proof is
/// attached.
pub fn query_host_consensus_state<Ctx>(
    ctx: &Ctx,
    height: Option<Height>,
) -> Result<QueryResponse<ConsensusState>, QueryError>
where
    Ctx: QueryContext,
{
    let height = match height {
        Some(height) => height,
        None => {
            let latest = ctx.provable_store().latest_version();
            if latest == 0 {
                return Err(StoreError::NothingCommitted.into());
            }
            Height::new(ctx.host_height()?.revision_number(), latest)
                .map_err(ContextError::from)?
        }
    };
    store_version(ctx, Some(height))?;

    Ok(QueryResponse {
        value: ctx.host_consensus_state(&height)?,
        proof: None,
        proof_height: height,
    })
}

/// Queries the prefix the host commits its IBC state under.
pub fn query_commitment_prefix<Ctx>(ctx: &Ctx) -> Result<QueryResponse<CommitmentPrefix>, QueryError>
where
    Ctx: QueryContext,
{
    Ok(QueryResponse {
        value: ctx.commitment_prefix(),
        proof: None,
        proof_height: ctx.host_height()?,
    })
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rstest::*;
    use test_log::test;

    use super::*;
    use crate::core::ics04_channel::channel::{Counterparty, Order, State};
    use crate::core::ics23_commitment::scheme::{CommitmentScheme, Ics23Scheme};
    use crate::core::ics24_host::store::PruningOptions;
    use crate::mock::context::{MockContext, MockContextConfig};

    struct Fixture {
        ctx: MockContext,
        client_id: ClientId,
        chan_end: ChannelEnd,
    }

    /// A client at `0-10` and a channel `firstport/ch1`, committed at `0-1`.
    #[fixture]
    fn fixture() -> Fixture {
        let client_id = ClientId::from_str("client-on-a").unwrap();
        let chan_end = ChannelEnd::new(
            State::Init,
            Order::Ordered,
            Counterparty::new("secondport".parse().unwrap(), "ch2".parse().unwrap()),
            vec![ConnectionId::from_str("conn-on-a").unwrap()],
            "1.0".into(),
        );
        let mut ctx = MockContext::default()
            .with_client(&client_id, Height::new(0, 10).unwrap())
            .with_channel("firstport".parse().unwrap(), "ch1".parse().unwrap(), chan_end.clone());
        ctx.commit();

        Fixture {
            ctx,
            client_id,
            chan_end,
        }
    }

    #[rstest]
    fn client_state_with_proof_verifies(fixture: Fixture) {
        let Fixture { ctx, client_id, .. } = fixture;

        let response = query_client_state(&ctx, &client_id, None, true).unwrap();

        assert_eq!(response.value.latest_height(), Height::new(0, 10).unwrap());
        assert_eq!(response.proof_height, Height::new(0, 1).unwrap());
        let root = ctx.store().root_hash(1).unwrap();
        let key = ctx
            .commitment_prefix()
            .apply(ClientStatePath::new(&client_id));
        let value = RawClientState::from(response.value).encode_to_vec();
        assert!(Ics23Scheme::default()
            .verify_membership(&root, &response.proof.unwrap(), &key, &value)
            .is_ok());
    }

    #[rstest]
    fn proof_is_only_attached_on_request(fixture: Fixture) {
        let Fixture { ctx, client_id, .. } = fixture;

        let response = query_consensus_state(&ctx, &client_id, None, false).unwrap();

        assert!(response.proof.is_none());
        assert_eq!(response.value.height, Height::new(0, 10).unwrap());
    }

    #[rstest]
    fn channel_and_verified_root(fixture: Fixture) {
        let Fixture {
            ctx,
            client_id,
            chan_end,
        } = fixture;

        let channel = query_channel(
            &ctx,
            &"firstport".parse().unwrap(),
            &"ch1".parse().unwrap(),
            Some(Height::new(0, 1).unwrap()),
            true,
        )
        .unwrap();
        assert_eq!(channel.value, chan_end);

        let consensus_state = query_consensus_state(&ctx, &client_id, None, false).unwrap();
        let root =
            query_verified_root(&ctx, &client_id, Height::new(0, 10).unwrap(), None, false)
                .unwrap();
        assert_eq!(&root.value, consensus_state.value.root());
    }

    #[rstest]
    fn uncommitted_and_missing_records(fixture: Fixture) {
        let Fixture { mut ctx, .. } = fixture;
        let late = ClientId::from_str("late-client").unwrap();
        ctx = ctx.with_client(&late, Height::new(0, 3).unwrap());

        let err = query_client_state(&ctx, &late, None, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        ctx.commit();
        assert!(query_client_state(&ctx, &late, None, true).is_ok());
        let err = query_client_state(&ctx, &late, Some(Height::new(0, 1).unwrap()), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn pruned_heights_are_unavailable() {
        let client_id = ClientId::from_str("client-on-a").unwrap();
        let mut ctx: MockContext = MockContextConfig::builder()
            .pruning(PruningOptions::nothing())
            .build();
        ctx = ctx.with_client(&client_id, Height::new(0, 10).unwrap());
        ctx.commit();
        ctx.commit();

        let err = query_client_state(&ctx, &client_id, Some(Height::new(0, 1).unwrap()), true)
            .unwrap_err();

        assert!(matches!(
            err,
            QueryError::Store(StoreError::HeightUnavailable { version: 1, .. })
        ));
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[rstest]
    fn wrong_revision_is_rejected(fixture: Fixture) {
        let Fixture { ctx, client_id, .. } = fixture;

        let err = query_client_state(&ctx, &client_id, Some(Height::new(1, 1).unwrap()), false)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[rstest]
    fn host_consensus_state_and_prefix(fixture: Fixture) {
        let Fixture { ctx, .. } = fixture;

        let host = query_host_consensus_state(&ctx, None).unwrap();
        assert_eq!(host.proof_height, Height::new(0, 1).unwrap());
        assert_eq!(host.value.root, ctx.store().root_hash(1).unwrap());

        let prefix = query_commitment_prefix(&ctx).unwrap();
        assert_eq!(prefix.value.as_bytes(), b"ibc");
        assert_eq!(prefix.proof_height, Height::new(0, 2).unwrap());

        let empty = MockContext::default();
        assert!(query_host_consensus_state(&empty, None).is_err());
    }

    #[test]
    fn response_renders_as_json() {
        let response = QueryResponse {
            value: CommitmentRoot::from_bytes(&[0xab, 0xcd]),
            proof: None,
            proof_height: Height::new(0, 7).unwrap(),
        };

        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"value":"ABCD","proof":null,"proof_height":{"revision_number":0,"revision_height":7}}"#
        );
    }
}
