#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]
#![allow(clippy::result_large_err)]
//! This library implements the inter-blockchain communication (IBC) stack of
//! a replicated state machine: the on-chain half of the protocol which lets two
//! chains that do not trust each other open authenticated channels and move
//! tokens across them.
//!
//! The crate is divided into the following parts:
//!
//! + [Core](core) implements the transport, authentication and ordering layers:
//!   - [ICS-02](core::ics02_client) tracks the consensus roots of counterparty chains;
//!   - [ICS-03](core::ics03_connection) runs the connection handshake;
//!   - [ICS-04](core::ics04_channel) runs the channel handshake and sequences packets;
//!   - [ICS-05](core::ics05_port) binds ports and hands out port capabilities;
//!   - [ICS-23](core::ics23_commitment) verifies membership proofs against a root;
//!   - [ICS-24](core::ics24_host) defines identifiers, store paths and the versioned store.
//!
//! + [Applications](applications) implements the packet handlers riding on
//!   channels, currently the [ICS-20 token transfer](applications::transfer).
//!
//! + [Query](query) serves the stored IBC state, optionally with proofs, to
//!   external callers such as relayers.
//!
//! Hosts integrate the stack by implementing [`ValidationContext`] and
//! [`ExecutionContext`] over their store and feeding transactions to
//! [`core::handler::dispatch`].
//!
//! Every handler validates a message in full before it writes anything, and
//! the bundled handlers do not fail once validation has passed. A host whose
//! own [`ExecutionContext`] can still fail must treat any error returned
//! while processing a message `M` as fatal to `M`: it is expected to roll
//! back every state modification made to the context while processing `M`,
//! and typically those of the other messages in the same transaction too.
//!
//! The crate is `no_std`; the default `std` feature adds
//! `std::error::Error` impls, and `mocks` requires it.

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

mod prelude;

pub mod applications;
pub mod core;
pub mod events;
// message definitions spell out `::prost::alloc` and `::core` paths
#[allow(unused_qualifications)]
pub mod proto;
pub mod query;
pub mod serializers;
pub mod signer;

/// Re-export of the `Any` type used to carry encoded messages.
pub use proto::Any;

pub use crate::core::ics02_client::height::Height;
pub use crate::core::{ContextError, ErrorKind, ExecutionContext, ValidationContext};

#[cfg(any(test, feature = "mocks"))]
pub mod mock;

#[cfg(test)]
mod tests;
