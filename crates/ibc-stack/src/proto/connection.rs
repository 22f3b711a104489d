use super::client::Height;

/// Version defines the versioning scheme used to negotiate the IBC version in
/// the connection handshake.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Version {
    #[prost(string, tag = "1")]
    pub identifier: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "2")]
    pub features: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// Counterparty defines the counterparty chain associated with a connection end.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Counterparty {
    #[prost(string, tag = "1")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub connection_id: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "3")]
    pub prefix: ::prost::alloc::vec::Vec<u8>,
}

/// ConnectionEnd defines a stateful object on a chain connected to another
/// separate one.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ConnectionEnd {
    #[prost(string, tag = "1")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub versions: ::prost::alloc::vec::Vec<Version>,
    /// current state of the connection end: 0 NONE, 1 INIT, 2 TRYOPEN, 3 OPEN.
    #[prost(int32, tag = "3")]
    pub state: i32,
    #[prost(message, optional, tag = "4")]
    pub counterparty: ::core::option::Option<Counterparty>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgConnectionOpenInit {
    #[prost(string, tag = "1")]
    pub connection_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub counterparty: ::core::option::Option<Counterparty>,
    #[prost(message, repeated, tag = "4")]
    pub versions: ::prost::alloc::vec::Vec<Version>,
    #[prost(string, tag = "5")]
    pub signer: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgConnectionOpenTry {
    #[prost(string, tag = "1")]
    pub connection_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub counterparty: ::core::option::Option<Counterparty>,
    #[prost(message, repeated, tag = "4")]
    pub counterparty_versions: ::prost::alloc::vec::Vec<Version>,
    #[prost(bytes = "vec", tag = "5")]
    pub proof_init: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "6")]
    pub proof_height: ::core::option::Option<Height>,
    #[prost(string, tag = "7")]
    pub signer: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgConnectionOpenAck {
    #[prost(string, tag = "1")]
    pub connection_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub version: ::core::option::Option<Version>,
    #[prost(bytes = "vec", tag = "3")]
    pub proof_try: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub proof_height: ::core::option::Option<Height>,
    #[prost(string, tag = "5")]
    pub signer: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgConnectionOpenConfirm {
    #[prost(string, tag = "1")]
    pub connection_id: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub proof_ack: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub proof_height: ::core::option::Option<Height>,
    #[prost(string, tag = "4")]
    pub signer: ::prost::alloc::string::String,
}
