//! Implementation of mocks for the host chain: a versioned merkle store
//! serving ICS-23 proofs, a ledger, a router and canned fixtures.

pub mod context;
pub mod fixtures;
pub mod router;
pub mod store;
pub mod tree;
