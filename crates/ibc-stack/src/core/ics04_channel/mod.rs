//! ICS 04: Channel implementation that facilitates communication between
//! applications and the implementation of IBC handlers.

pub mod channel;
pub mod commitment;
pub mod error;
pub mod events;
pub mod handler;
pub mod msgs;
pub mod packet;
pub mod timeout;
pub mod version;
