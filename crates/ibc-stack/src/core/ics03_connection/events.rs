//! Types for the IBC events emitted by the connection module.

use crate::prelude::*;

use crate::core::ics24_host::identifier::{ClientId, ConnectionId};

/// The content of the `key` field for the attribute containing the connection identifier.
pub const CONN_ID_ATTRIBUTE_KEY: &str = "connection_id";
pub const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";
pub const COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY: &str = "counterparty_connection_id";
pub const COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY: &str = "counterparty_client_id";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attributes {
    pub connection_id: ConnectionId,
    pub client_id: ClientId,
    pub counterparty_connection_id: ConnectionId,
    pub counterparty_client_id: ClientId,
}

impl Attributes {
    /// Key/value pairs as they appear in the emitted event.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (CONN_ID_ATTRIBUTE_KEY, self.connection_id.to_string()),
            (CLIENT_ID_ATTRIBUTE_KEY, self.client_id.to_string()),
            (
                COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY,
                self.counterparty_client_id.to_string(),
            ),
            (
                COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY,
                self.counterparty_connection_id.to_string(),
            ),
        ]
    }
}

macro_rules! connection_event {
    ($(#[$attr:meta])* $name:ident, $conn:ident, $client:ident, $cp_conn:ident, $cp_client:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(Attributes);

        impl $name {
            pub fn new(
                $conn: ConnectionId,
                $client: ClientId,
                $cp_conn: ConnectionId,
                $cp_client: ClientId,
            ) -> Self {
                Self(Attributes {
                    connection_id: $conn,
                    client_id: $client,
                    counterparty_connection_id: $cp_conn,
                    counterparty_client_id: $cp_client,
                })
            }

            pub fn attributes(&self) -> &Attributes {
                &self.0
            }

            pub fn connection_id(&self) -> &ConnectionId {
                &self.0.connection_id
            }
        }
    };
}

connection_event!(
    /// Per our convention, this event is generated on chain A.
    OpenInit,
    conn_id_on_a,
    client_id_on_a,
    conn_id_on_b,
    client_id_on_b
);

connection_event!(
    /// Per our convention, this event is generated on chain B.
    OpenTry,
    conn_id_on_b,
    client_id_on_b,
    conn_id_on_a,
    client_id_on_a
);

connection_event!(
    /// Per our convention, this event is generated on chain A.
    OpenAck,
    conn_id_on_a,
    client_id_on_a,
    conn_id_on_b,
    client_id_on_b
);

connection_event!(
    /// Per our convention, this event is generated on chain B.
    OpenConfirm,
    conn_id_on_b,
    client_id_on_b,
    conn_id_on_a,
    client_id_on_a
);
