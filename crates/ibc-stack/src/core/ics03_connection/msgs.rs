//! Message definitions for the connection handshake datagrams.
//!
//! Chain A starts the handshake with [`MsgConnectionOpenInit`], chain B
//! answers with [`MsgConnectionOpenTry`], chain A acknowledges with
//! [`MsgConnectionOpenAck`] and chain B finishes with
//! [`MsgConnectionOpenConfirm`].

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;

pub use conn_open_ack::MsgConnectionOpenAck;
pub use conn_open_confirm::MsgConnectionOpenConfirm;
pub use conn_open_init::MsgConnectionOpenInit;
pub use conn_open_try::MsgConnectionOpenTry;

/// Enumeration of all possible messages that the ICS3 protocol processes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionMsg {
    OpenInit(MsgConnectionOpenInit),
    OpenTry(MsgConnectionOpenTry),
    OpenAck(MsgConnectionOpenAck),
    OpenConfirm(MsgConnectionOpenConfirm),
}
