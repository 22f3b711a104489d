//! This module implements the processing logic for ICS20 (token transfer) message.

pub mod on_recv_packet;
pub mod send_transfer;
