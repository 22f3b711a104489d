//! Definitions of domain types used in the ICS2 protocol.
//!
//! Clients are created with [`MsgCreateClient`] and fed newer consensus
//! states with [`MsgUpdateClient`].

pub mod create_client;
pub mod update_client;

pub use create_client::MsgCreateClient;
pub use update_client::MsgUpdateClient;

/// Encodes all the different client messages
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientMsg {
    CreateClient(MsgCreateClient),
    UpdateClient(MsgUpdateClient),
}
