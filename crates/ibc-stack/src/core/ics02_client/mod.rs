//! ICS 02: Client tracks the consensus roots of counterparty chains, against
//! which every handshake and packet proof is verified.

pub mod client_state;
pub mod client_type;
pub mod consensus_state;
pub mod error;
pub mod events;
pub mod handler;
pub mod height;
pub mod msgs;
