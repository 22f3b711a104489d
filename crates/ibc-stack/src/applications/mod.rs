//! Applications built on top of the IBC channels.

pub mod transfer;
