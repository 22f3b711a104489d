//! Defines the main context traits and the host-side helpers of the token
//! transfer application.

use crate::prelude::*;

use sha2::{Digest, Sha256};
use subtle_encoding::{Encoding, Hex};

use super::coin::Coins;
use super::error::TokenTransferError;
use super::{MODULE_ID_STR, VERSION};
use crate::core::ics24_host::identifier::{ChannelId, PortId};
use crate::core::{ExecutionContext, ValidationContext};
use crate::proto::transfer::Params as RawParams;
use crate::signer::Signer;

/// Returns the escrow account of the channel `port_id/channel_id`: the first
/// 20 bytes of `sha256("ics20-1" ‖ 0x00 ‖ "port/channel")`, hex encoded.
pub fn escrow_address(port_id: &PortId, channel_id: &ChannelId) -> Signer {
    let contents = format!("{port_id}/{channel_id}");

    let mut hasher = Sha256::new();
    hasher.update(VERSION.as_bytes());
    hasher.update([0]);
    hasher.update(contents.as_bytes());

    let mut hash = hasher.finalize().to_vec();
    hash.truncate(20);

    Signer::from(String::from_utf8_lossy(&Hex::lower_case().encode(hash)).into_owned())
}

/// The account of the transfer module, through which vouchers are burnt.
pub fn module_account() -> Signer {
    Signer::from(MODULE_ID_STR.to_string())
}

/// Switches a host can flip to stop the transfer application in either direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransferParams {
    pub send_enabled: bool,
    pub receive_enabled: bool,
}

impl Default for TransferParams {
    fn default() -> Self {
        Self {
            send_enabled: true,
            receive_enabled: true,
        }
    }
}

impl From<RawParams> for TransferParams {
    fn from(raw: RawParams) -> Self {
        Self {
            send_enabled: raw.send_enabled,
            receive_enabled: raw.receive_enabled,
        }
    }
}

impl From<TransferParams> for RawParams {
    fn from(params: TransferParams) -> Self {
        Self {
            send_enabled: params.send_enabled,
            receive_enabled: params.receive_enabled,
        }
    }
}

/// Read-through cache in front of the stored [`TransferParams`].
///
/// A host keeps one of these next to its store. Every write of the params
/// must be followed by [`ParamsCache::mark_stale`] so that the next read goes
/// back to the store.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ParamsCache {
    Fresh(TransferParams),
    #[default]
    Stale,
}

impl ParamsCache {
    pub fn mark_stale(&mut self) {
        *self = Self::Stale;
    }

    /// Returns the cached params, calling `load` only when the cache is stale.
    pub fn get_or_load<F, E>(&mut self, load: F) -> Result<TransferParams, E>
    where
        F: FnOnce() -> Result<TransferParams, E>,
    {
        match *self {
            Self::Fresh(params) => Ok(params),
            Self::Stale => {
                let params = load()?;
                *self = Self::Fresh(params);
                Ok(params)
            }
        }
    }
}

/// Methods required in token transfer validation, to be implemented by the host
pub trait TokenTransferValidationContext: ValidationContext {
    /// get_port returns the portID for the transfer module.
    fn get_port(&self) -> Result<PortId, TokenTransferError>;

    /// Returns the current params, read through the host's [`ParamsCache`].
    fn transfer_params(&self) -> Result<TransferParams, TokenTransferError>;

    /// Returns the balance of `account` in the host ledger.
    fn get_coins(&self, account: &Signer) -> Result<Coins, TokenTransferError>;

    /// Returns Ok() if the host chain supports sending coins.
    fn can_send_coins(&self) -> Result<(), TokenTransferError> {
        if self.transfer_params()?.send_enabled {
            Ok(())
        } else {
            Err(TokenTransferError::SendDisabled)
        }
    }

    /// Returns Ok() if the host chain supports receiving coins.
    fn can_receive_coins(&self) -> Result<(), TokenTransferError> {
        if self.transfer_params()?.receive_enabled {
            Ok(())
        } else {
            Err(TokenTransferError::ReceiveDisabled)
        }
    }

    /// Validates that the tokens can be escrowed successfully
    fn escrow_coins_validate(
        &self,
        from_account: &Signer,
        port_id: &PortId,
        channel_id: &ChannelId,
        coins: &Coins,
    ) -> Result<(), TokenTransferError> {
        ensure_funds(self, from_account, coins)?;
        ensure_room(self, &escrow_address(port_id, channel_id), coins)
    }

    /// Validates that the tokens can be unescrowed successfully
    fn unescrow_coins_validate(
        &self,
        to_account: &Signer,
        port_id: &PortId,
        channel_id: &ChannelId,
        coins: &Coins,
    ) -> Result<(), TokenTransferError> {
        ensure_funds(self, &escrow_address(port_id, channel_id), coins)
            .map_err(as_escrow_error)?;
        ensure_room(self, to_account, coins)
    }

    /// Validates the coin input and that the receiver balance can absorb it
    fn mint_coins_validate(
        &self,
        account: &Signer,
        coins: &Coins,
    ) -> Result<(), TokenTransferError> {
        coins.validate()?;
        ensure_room(self, account, coins)
    }

    /// Validates the sender account and the coin input
    fn burn_coins_validate(
        &self,
        account: &Signer,
        coins: &Coins,
    ) -> Result<(), TokenTransferError> {
        ensure_funds(self, account, coins)?;
        ensure_room(self, &module_account(), coins)
    }
}

/// Methods required in token transfer execution, to be implemented by the host
///
/// `add_coins` and `subtract_coins` are the host ledger's primitives. The
/// escrow, mint and burn steps are expressed through them.
pub trait TokenTransferExecutionContext: TokenTransferValidationContext + ExecutionContext {
    /// Credits `coins` to `account` and returns its new balance.
    fn add_coins(&mut self, account: &Signer, coins: &Coins)
        -> Result<Coins, TokenTransferError>;

    /// Debits `coins` from `account` and returns its new balance, failing with
    /// `InsufficientFunds` if the account holds too little.
    fn subtract_coins(
        &mut self,
        account: &Signer,
        coins: &Coins,
    ) -> Result<Coins, TokenTransferError>;

    /// Stores new params. Implementations must mark their [`ParamsCache`] stale.
    fn store_transfer_params(&mut self, params: TransferParams) -> Result<(), TokenTransferError>;

    /// Escrows the tokens
    fn escrow_coins_execute(
        &mut self,
        from_account: &Signer,
        port_id: &PortId,
        channel_id: &ChannelId,
        coins: &Coins,
    ) -> Result<(), TokenTransferError> {
        self.subtract_coins(from_account, coins)?;
        self.add_coins(&escrow_address(port_id, channel_id), coins)?;
        Ok(())
    }

    /// Unescrows the tokens
    fn unescrow_coins_execute(
        &mut self,
        to_account: &Signer,
        port_id: &PortId,
        channel_id: &ChannelId,
        coins: &Coins,
    ) -> Result<(), TokenTransferError> {
        self.subtract_coins(&escrow_address(port_id, channel_id), coins)
            .map_err(as_escrow_error)?;
        self.add_coins(to_account, coins)?;
        Ok(())
    }

    /// This function to enable minting ibc tokens to a user account
    fn mint_coins_execute(
        &mut self,
        account: &Signer,
        coins: &Coins,
    ) -> Result<(), TokenTransferError> {
        self.add_coins(account, coins)?;
        Ok(())
    }

    /// Burns vouchers by moving them through the module account, which then
    /// gives them up.
    fn burn_coins_execute(
        &mut self,
        account: &Signer,
        coins: &Coins,
    ) -> Result<(), TokenTransferError> {
        let module_account = module_account();
        self.subtract_coins(account, coins)?;
        self.add_coins(&module_account, coins)?;
        self.subtract_coins(&module_account, coins)?;
        Ok(())
    }
}

fn ensure_funds<Ctx>(ctx: &Ctx, account: &Signer, coins: &Coins) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext + ?Sized,
{
    let held = ctx.get_coins(account)?;
    held.checked_sub(coins)
        .map(|_| ())
        .map_err(|short| TokenTransferError::InsufficientFunds {
            account: account.clone(),
            requested: coins.amount_of(&short.denom),
            available: short.amount,
            denom: short.denom,
        })
}

/// Fails with `AmountOverflow` if crediting `coins` would overflow the balance
/// of `account`.
fn ensure_room<Ctx>(ctx: &Ctx, account: &Signer, coins: &Coins) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext + ?Sized,
{
    ctx.get_coins(account)?.checked_add(coins).map(|_| ())
}

fn as_escrow_error(err: TokenTransferError) -> TokenTransferError {
    match err {
        TokenTransferError::InsufficientFunds {
            account,
            denom,
            available,
            requested,
        } => TokenTransferError::InsufficientEscrow {
            account,
            denom,
            available,
            requested,
        },
        err => err,
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::str::FromStr;

    use super::*;

    #[test]
    fn escrow_address_is_deterministic_per_channel() {
        let port = PortId::from_str("firstport").unwrap();
        let ch1 = ChannelId::from_str("ch1").unwrap();
        let ch2 = ChannelId::from_str("ch2").unwrap();

        let escrow = escrow_address(&port, &ch1);

        assert_eq!(escrow, escrow_address(&port, &ch1));
        assert_ne!(escrow, escrow_address(&port, &ch2));
        assert_eq!(escrow.as_ref().len(), 40);
        assert!(escrow
            .as_ref()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn params_cache_reads_through_once() {
        let loads = Cell::new(0);
        let load = || {
            loads.set(loads.get() + 1);
            Ok::<_, TokenTransferError>(TransferParams {
                send_enabled: false,
                receive_enabled: true,
            })
        };
        let mut cache = ParamsCache::default();

        assert!(!cache.get_or_load(load).unwrap().send_enabled);
        assert!(!cache.get_or_load(load).unwrap().send_enabled);
        assert_eq!(loads.get(), 1);

        cache.mark_stale();
        cache.get_or_load(load).unwrap();
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn stale_cache_propagates_load_errors() {
        let mut cache = ParamsCache::default();

        let res = cache.get_or_load(|| Err(TokenTransferError::SendDisabled));

        assert!(res.is_err());
        assert_eq!(cache, ParamsCache::Stale);
    }

    #[test]
    fn params_proto_conversion() {
        let raw = RawParams::from(TransferParams::default());

        assert!(raw.send_enabled && raw.receive_enabled);
        assert_eq!(TransferParams::from(raw), TransferParams::default());
    }
}
