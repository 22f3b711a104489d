//! Implementation of the core IBC protocol.
//!
//! Naming is hard in the IBC handlers, since every record has a counterpart on
//! the other chain. We remove the ambiguity by adopting the following conventions:
//! + During handshakes
//!     + we call "chain A" the chain that runs `OpenInit` and `OpenAck`
//!     + we call "chain B" the chain that runs `OpenTry` and `OpenConfirm`
//! + During packet transfers
//!     + we call "chain A" the chain that runs `SendPacket`
//!     + we call "chain B" the chain that runs `RecvPacket`
//! + In variable names,
//!     + `on_a` implies "stored on chain A"
//!     + `of_a` implies "of light client for chain A"
//!
//! So `conn_end_on_a` means "the connection end stored on chain A".

pub mod ics02_client;
pub mod ics03_connection;
pub mod ics04_channel;
pub mod ics05_port;
pub mod ics23_commitment;
pub mod ics24_host;

pub mod context;
pub mod error;
pub mod handler;
pub mod msgs;
pub mod router;

pub use context::{ExecutionContext, ValidationContext};
pub use error::{ContextError, ErrorKind, HostError};
pub use handler::{deliver, dispatch, execute, validate};
