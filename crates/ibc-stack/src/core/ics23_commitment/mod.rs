//! ICS 23: Commitment implementation of a cryptographic scheme that verifies
//! state transitions between chains.

pub mod commitment;
pub mod error;
pub mod merkle;
pub mod scheme;
