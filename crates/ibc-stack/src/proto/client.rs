/// Height is a monotonically increasing data type that can be compared
/// against another Height for the purposes of updating and freezing clients.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Height {
    #[prost(uint64, tag = "1")]
    pub revision_number: u64,
    #[prost(uint64, tag = "2")]
    pub revision_height: u64,
}

/// The consensus state of a counterparty chain at a given height, as supplied
/// by the light client algorithm of that chain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusState {
    #[prost(string, tag = "1")]
    pub chain_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub height: ::core::option::Option<Height>,
    #[prost(bytes = "vec", tag = "3")]
    pub root: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub next_validator_set: ::prost::alloc::vec::Vec<u8>,
}

/// Client state tracked for each counterparty.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientState {
    #[prost(string, tag = "1")]
    pub client_type: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub latest_height: ::core::option::Option<Height>,
}

/// MsgCreateClient defines a message to create an IBC client.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgCreateClient {
    #[prost(string, tag = "1")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub client_type: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub consensus_state: ::core::option::Option<ConsensusState>,
    #[prost(string, tag = "4")]
    pub signer: ::prost::alloc::string::String,
}

/// MsgUpdateClient defines a message to supply a newer consensus state to a client.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgUpdateClient {
    #[prost(string, tag = "1")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub consensus_state: ::core::option::Option<ConsensusState>,
    #[prost(string, tag = "3")]
    pub signer: ::prost::alloc::string::String,
}
