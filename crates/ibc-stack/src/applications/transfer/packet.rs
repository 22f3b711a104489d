//! Contains the `PacketData` type that defines the structure of token transfers' packet bytes

use crate::prelude::*;

use serde::{Deserialize, Serialize};

use super::coin::Coins;
use super::error::TokenTransferError;
use crate::signer::{Signer, SignerError};

/// Defines the structure of token transfers' packet bytes.
///
/// `source` tells the receiving chain whether the sending chain was the
/// origin of the coins, i.e. whether they were escrowed rather than burnt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketData {
    pub amount: Coins,
    pub sender: Signer,
    pub receiver: Signer,
    pub source: bool,
}

impl PacketData {
    pub fn new(amount: Coins, sender: Signer, receiver: Signer, source: bool) -> Self {
        Self {
            amount,
            sender,
            receiver,
            source,
        }
    }

    /// Stateless checks: at least one coin, positive amounts, and both
    /// accounts present.
    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        self.amount.validate()?;
        if self.sender.as_ref().trim().is_empty() || self.receiver.as_ref().trim().is_empty() {
            return Err(SignerError::EmptySigner.into());
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TokenTransferError> {
        serde_json::to_vec(self).map_err(|e| TokenTransferError::PacketDataDeserialization {
            reason: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenTransferError> {
        serde_json::from_slice(bytes).map_err(|e| TokenTransferError::PacketDataDeserialization {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const SENDER: &str = "cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng";
    const RECEIVER: &str = "cosmos1hs4a9lg6w0tq4m2yqyjxhxtn7d9q7x4dxf0ps3";

    fn packet_data(coins: &str, sender: &str, receiver: &str) -> PacketData {
        let amount = serde_json::from_str(coins).unwrap();
        let sender = serde_json::from_str(&format!("\"{sender}\"")).unwrap();
        let receiver = serde_json::from_str(&format!("\"{receiver}\"")).unwrap();
        PacketData::new(amount, sender, receiver, true)
    }

    #[rstest]
    #[case::single_coin(r#"[{"denom":"atom","amount":"100"}]"#, SENDER, RECEIVER, true)]
    #[case::several_coins(
        r#"[{"denom":"atom","amount":"100"},{"denom":"stake","amount":"1"}]"#,
        SENDER,
        RECEIVER,
        true
    )]
    #[case::no_coins("[]", SENDER, RECEIVER, false)]
    #[case::zero_amount(r#"[{"denom":"atom","amount":"0"}]"#, SENDER, RECEIVER, false)]
    #[case::missing_sender(r#"[{"denom":"atom","amount":"100"}]"#, "", RECEIVER, false)]
    #[case::missing_receiver(r#"[{"denom":"atom","amount":"100"}]"#, SENDER, "", false)]
    fn validate_basic(
        #[case] coins: &str,
        #[case] sender: &str,
        #[case] receiver: &str,
        #[case] valid: bool,
    ) {
        let data = packet_data(coins, sender, receiver);

        assert_eq!(data.validate_basic().is_ok(), valid);
    }

    #[test]
    fn packet_data_json_layout() {
        let data = packet_data(r#"[{"denom":"atom","amount":"100"}]"#, SENDER, RECEIVER);

        let bytes = data.to_bytes().unwrap();

        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            format!(
                r#"{{"amount":[{{"denom":"atom","amount":"100"}}],"sender":"{SENDER}","receiver":"{RECEIVER}","source":true}}"#
            )
        );
        assert_eq!(PacketData::from_bytes(&bytes).unwrap(), data);
    }

    #[test]
    fn negative_amount_does_not_decode() {
        let json = format!(
            r#"{{"amount":[{{"denom":"atom","amount":"-1"}}],"sender":"{SENDER}","receiver":"{RECEIVER}","source":false}}"#
        );

        assert!(PacketData::from_bytes(json.as_bytes()).is_err());
    }
}
