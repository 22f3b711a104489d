//! Canned values shared by handler tests.

use core::str::FromStr;

use crate::core::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::ics03_connection::version::get_compatible_versions;
use crate::core::ics23_commitment::commitment::CommitmentPrefix;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::signer::Signer;

/// The client type recorded for every client a mock host creates.
pub const MOCK_CLIENT_TYPE: &str = "07-tendermint";

/// The prefix every mock host commits its IBC state under.
pub const MOCK_COMMITMENT_PREFIX: &str = "ibc";

pub fn dummy_signer() -> Signer {
    Signer::from_str("cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng").expect("never fails")
}

pub fn mock_commitment_prefix() -> CommitmentPrefix {
    CommitmentPrefix::try_from(MOCK_COMMITMENT_PREFIX.as_bytes().to_vec()).expect("never fails")
}

/// An OPEN connection end on `client_id`, facing `conn_id_on_cp` on a mock
/// counterparty, with every compatible version negotiated.
pub fn open_connection_end(
    client_id: &ClientId,
    client_id_on_cp: &ClientId,
    conn_id_on_cp: &ConnectionId,
) -> ConnectionEnd {
    ConnectionEnd::new(
        State::Open,
        client_id.clone(),
        Counterparty::new(
            client_id_on_cp.clone(),
            conn_id_on_cp.clone(),
            mock_commitment_prefix(),
        ),
        get_compatible_versions(),
    )
}
