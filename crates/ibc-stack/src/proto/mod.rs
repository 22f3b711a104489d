//! Protobuf definitions of every record persisted in the IBC store and every
//! message accepted by the handlers.
//!
//! Domain types convert into these with `From` and back with `TryFrom`, the
//! latter re-validating everything read off the wire or out of the store.

pub mod channel;
pub mod client;
pub mod connection;
pub mod transfer;

/// `Any` contains an arbitrary serialized message along with a URL that
/// describes the type of the serialized message.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Any {
    #[prost(string, tag = "1")]
    pub type_url: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}
