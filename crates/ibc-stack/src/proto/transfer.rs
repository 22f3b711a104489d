use super::client::Height;

/// Coin defines a token with a denomination and an amount, the amount being
/// a decimal string.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Coin {
    #[prost(string, tag = "1")]
    pub denom: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub amount: ::prost::alloc::string::String,
}

/// MsgTransfer defines a msg to transfer fungible tokens (i.e Coins) between
/// ICS20 enabled chains.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgTransfer {
    #[prost(string, tag = "1")]
    pub source_port: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub source_channel: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub token: ::prost::alloc::vec::Vec<Coin>,
    #[prost(string, tag = "4")]
    pub sender: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub receiver: ::prost::alloc::string::String,
    /// whether the sending chain is the origin of the tokens.
    #[prost(bool, tag = "6")]
    pub source: bool,
    #[prost(message, optional, tag = "7")]
    pub timeout_height: ::core::option::Option<Height>,
}

/// Params defines the set of IBC transfer parameters.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Params {
    #[prost(bool, tag = "1")]
    pub send_enabled: bool,
    #[prost(bool, tag = "2")]
    pub receive_enabled: bool,
}
