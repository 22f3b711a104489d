//! Implementation of the fungible token transfer module (ICS-20)
//!
//! Tokens leaving their origin chain are locked in a per-channel escrow
//! account, and the receiving chain mints vouchers whose denomination is
//! prefixed with its own end of the channel. Vouchers travelling back are
//! burnt, and the origin chain releases the escrowed tokens.

pub mod amount;
pub mod coin;
pub mod context;
pub mod denom;
pub mod error;
pub mod events;
pub mod module;
pub mod msgs;
pub mod packet;

pub use amount::*;
pub use coin::*;
pub use denom::*;

/// Module identifier for the ICS20 application.
pub const MODULE_ID_STR: &str = "transfer";

/// The port identifier that the ICS20 applications
/// typically bind with.
pub const PORT_ID_STR: &str = "transfer";

/// ICS20 application current version.
pub const VERSION: &str = "ics20-1";

mod relay;

pub use relay::send_transfer::{send_transfer, send_transfer_execute, send_transfer_validate};
