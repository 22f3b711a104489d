//! ICS 05: Port binding. A port is bound once, and the returned capability is
//! the only handle allowed to drive channels on it.

pub mod capability;
pub mod error;
pub mod handler;
