//! Defines coin types; the objects that are being transferred.

use crate::prelude::*;

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::denom::Denom;
use super::error::TokenTransferError;
use crate::proto::transfer::Coin as RawCoin;

/// Coin defines a token with a denomination and an amount.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination
    pub denom: Denom,
    /// Amount
    pub amount: Amount,
}

impl Coin {
    pub fn new(amount: impl Into<Amount>, denom: Denom) -> Self {
        Self {
            denom,
            amount: amount.into(),
        }
    }
}

impl FromStr for Coin {
    type Err = TokenTransferError;

    /// Parses `{amount}{denom}`, e.g. `100atom` or `100firstport/ch1/atom`.
    fn from_str(coin_str: &str) -> Result<Self, TokenTransferError> {
        let (amount, denom) = coin_str
            .chars()
            .position(|x| !x.is_ascii_digit())
            .map(|index| coin_str.split_at(index))
            .filter(|(amount, denom)| !amount.is_empty() && !denom.is_empty())
            .ok_or_else(|| TokenTransferError::InvalidCoin {
                coin: coin_str.to_string(),
            })?;

        Ok(Coin {
            amount: amount.parse()?,
            denom: denom.parse()?,
        })
    }
}

impl TryFrom<RawCoin> for Coin {
    type Error = TokenTransferError;

    fn try_from(proto: RawCoin) -> Result<Coin, Self::Error> {
        Ok(Self {
            denom: proto.denom.parse()?,
            amount: proto.amount.parse()?,
        })
    }
}

impl From<Coin> for RawCoin {
    fn from(coin: Coin) -> RawCoin {
        RawCoin {
            denom: coin.denom.to_string(),
            amount: coin.amount.to_string(),
        }
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins kept sorted by denomination, with one entry per
/// denomination.
///
/// Built through [`Coins::new`] a set only holds positive amounts, while a
/// deserialized set is taken as is and must go through
/// [`Coins::validate`] before use.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Sorts `coins`, merging entries of the same denomination, and fails on
    /// zero amounts.
    pub fn new(coins: Vec<Coin>) -> Result<Self, TokenTransferError> {
        let mut normalized = Coins::default();
        for coin in coins {
            if coin.amount.is_zero() {
                return Err(TokenTransferError::NonPositiveAmount {
                    coin: coin.to_string(),
                });
            }
            normalized.add_coin(coin)?;
        }
        Ok(normalized)
    }

    /// Checks the invariants a deserialized set may violate.
    pub fn validate(&self) -> Result<(), TokenTransferError> {
        if self.0.is_empty() {
            return Err(TokenTransferError::EmptyCoins);
        }
        for coin in &self.0 {
            if coin.amount.is_zero() {
                return Err(TokenTransferError::NonPositiveAmount {
                    coin: coin.to_string(),
                });
            }
        }
        if self.0.windows(2).any(|pair| pair[0].denom >= pair[1].denom) {
            return Err(TokenTransferError::UnsortedCoins {
                coins: self.to_string(),
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// The amount held of `denom`, zero when absent.
    pub fn amount_of(&self, denom: &Denom) -> Amount {
        self.0
            .iter()
            .find(|coin| &coin.denom == denom)
            .map(|coin| coin.amount)
            .unwrap_or_default()
    }

    fn add_coin(&mut self, coin: Coin) -> Result<(), TokenTransferError> {
        match self.0.binary_search_by(|c| c.denom.cmp(&coin.denom)) {
            Ok(pos) => {
                let existing = &mut self.0[pos];
                existing.amount = existing.amount.checked_add(coin.amount).ok_or_else(|| {
                    TokenTransferError::AmountOverflow {
                        denom: coin.denom.clone(),
                    }
                })?;
            }
            Err(pos) => self.0.insert(pos, coin),
        }
        Ok(())
    }

    /// Returns the sum of both sets.
    pub fn checked_add(&self, other: &Coins) -> Result<Coins, TokenTransferError> {
        let mut sum = self.clone();
        for coin in other.iter() {
            sum.add_coin(coin.clone())?;
        }
        Ok(sum)
    }

    /// Returns `self - other`, dropping denominations that reach zero.
    ///
    /// Fails with the first denomination `self` holds too little of.
    pub fn checked_sub(&self, other: &Coins) -> Result<Coins, Coin> {
        let mut difference = self.clone();
        for coin in other.iter() {
            let held = difference.amount_of(&coin.denom);
            let remaining = held.checked_sub(coin.amount).ok_or_else(|| Coin {
                denom: coin.denom.clone(),
                amount: held,
            })?;
            difference.0.retain(|c| c.denom != coin.denom);
            if !remaining.is_zero() {
                // The denomination was just removed, so this only inserts.
                let pos = difference.0.partition_point(|c| c.denom < coin.denom);
                difference
                    .0
                    .insert(pos, Coin::new(remaining, coin.denom.clone()));
            }
        }
        Ok(difference)
    }

    /// Applies `f` to every denomination, keeping amounts.
    pub fn try_map_denoms<F>(&self, f: F) -> Result<Coins, TokenTransferError>
    where
        F: Fn(&Denom) -> Result<Denom, TokenTransferError>,
    {
        let coins = self
            .iter()
            .map(|coin| Ok(Coin::new(coin.amount, f(&coin.denom)?)))
            .collect::<Result<Vec<_>, TokenTransferError>>()?;
        Coins::new(coins)
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        Coins(vec![coin])
    }
}

impl FromStr for Coins {
    type Err = TokenTransferError;

    /// Parses a comma separated list such as `100atom,5stake`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coins = s
            .split(',')
            .map(|coin| coin.trim().parse())
            .collect::<Result<Vec<Coin>, _>>()?;
        Coins::new(coins)
    }
}

impl Display for Coins {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(","))
    }
}

impl IntoIterator for Coins {
    type Item = Coin;
    type IntoIter = vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
