//! EVM-facing bank keeper
//!
//! The EVM works with 18-decimal `aaeth` while the chain stores 6-decimal
//! `uaeth`. An account's aaeth balance is its spendable uaeth times
//! [`CONVERSION_MULTIPLIER`] plus a remainder kept in the [`RemainderStore`].
//! Remainders are kept below one uaeth by converting whole units back into
//! uaeth after every credit. The `evmutil` module account holds the uaeth
//! that backs all outstanding remainders.

use log::{debug, warn};

use aether_shared_types::{AccAddress, Coin, Coins, Int};

use crate::bank::{AccountKeeper, BankKeeper, Checkpoint};
use crate::error::{EvmUtilError, FatalError};
use crate::keeper::RemainderStore;

/// Gas denom used by the EVM.
pub const EVM_DENOM: &str = "aaeth";

/// Native denom of the chain.
pub const COSMOS_DENOM: &str = "uaeth";

/// aaeth per uaeth.
pub const CONVERSION_MULTIPLIER: u64 = 1_000_000_000_000;

/// Module account backing the remainder store.
pub const MODULE_NAME: &str = "evmutil";

/// [`CONVERSION_MULTIPLIER`] as an [`Int`].
pub fn conversion_multiplier() -> Int {
    Int::from(CONVERSION_MULTIPLIER)
}

/// Checks that `coins` are valid and only hold aaeth.
pub fn validate_evm_coins(coins: &Coins) -> Result<(), EvmUtilError> {
    if coins.is_empty() {
        return Ok(());
    }
    coins
        .validate()
        .map_err(|e| EvmUtilError::InvalidCoins(format!("{}: {}", coins, e)))?;
    match coins.first() {
        Some(coin) if coins.len() == 1 && coin.denom == EVM_DENOM => Ok(()),
        _ => Err(EvmUtilError::InvalidCoins(format!(
            "invalid evm coin denom, only {} is supported",
            EVM_DENOM
        ))),
    }
}

/// Splits aaeth coins into whole uaeth and the aaeth remainder.
pub fn split_aaeth_coins(coins: &Coins) -> Result<(Coin, Int), EvmUtilError> {
    let mut uaeth = Coin::new(COSMOS_DENOM, Int::zero());
    let mut remainder = Int::zero();

    let Some(coin) = coins.first() else {
        return Ok((uaeth, remainder));
    };
    validate_evm_coins(coins)?;

    let multiplier = conversion_multiplier();
    let leftover = coin.amount.checked_mod(multiplier)?;
    if leftover.is_positive() {
        remainder = leftover;
    }
    let whole = coin.amount.checked_quo(multiplier)?;
    if whole.is_positive() {
        uaeth.amount = whole;
    }
    Ok((uaeth, remainder))
}

fn single(coin: Coin) -> Coins {
    Coins::from_unsorted(vec![coin])
}

/// Bank keeper handed to the EVM. Every mutating operation either completes
/// or leaves the bank and the remainder store as they were.
pub struct EvmBankKeeper<B> {
    bank: B,
    remainders: RemainderStore,
}

impl<B> EvmBankKeeper<B>
where
    B: BankKeeper + AccountKeeper + Checkpoint,
{
    /// Wraps `bank` and the remainder store loaded from state.
    pub fn new(bank: B, remainders: RemainderStore) -> Self {
        Self { bank, remainders }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn remainders(&self) -> &RemainderStore {
        &self.remainders
    }

    pub fn remainders_mut(&mut self) -> &mut RemainderStore {
        &mut self.remainders
    }

    /// Spendable aaeth balance of `addr`. Only [`EVM_DENOM`] may be queried.
    pub fn get_balance(&self, addr: &AccAddress, denom: &str) -> Result<Coin, EvmUtilError> {
        if denom != EVM_DENOM {
            return Err(FatalError::UnsupportedDenom {
                denom: denom.to_string(),
                expected: EVM_DENOM,
            }
            .into());
        }
        let uaeth = self.bank.spendable_coins(addr).amount_of(COSMOS_DENOM);
        let total = uaeth
            .checked_mul(conversion_multiplier())?
            .checked_add(self.remainders.get_balance(addr))?;
        Ok(Coin::new(EVM_DENOM, total))
    }

    /// Address of a module account. A missing module is fatal.
    pub fn module_address(&self, module: &str) -> Result<AccAddress, EvmUtilError> {
        self.bank
            .module_address(module)
            .ok_or_else(|| FatalError::ModuleAccountMissing(module.to_string()).into())
    }

    /// Sends aaeth from a module account to `recipient`. The module swaps one
    /// uaeth into aaeth when its remainder cannot cover the fraction.
    pub fn send_coins_from_module_to_account(
        &mut self,
        sender_module: &str,
        recipient: &AccAddress,
        amt: &Coins,
    ) -> Result<(), EvmUtilError> {
        self.atomically("send from module", |k| {
            let (uaeth, remainder) = split_aaeth_coins(amt)?;
            if uaeth.is_positive() {
                k.bank
                    .send_coins_from_module_to_account(sender_module, recipient, &single(uaeth))?;
            }

            let sender = k.module_address(sender_module)?;
            k.convert_one_if_needed(&sender, remainder)?;
            k.remainders.send_balance(&sender, recipient, remainder)?;
            k.convert_remainder(recipient)
        })
    }

    /// Sends aaeth from `sender` to a module account, swapping one of the
    /// sender's uaeth into aaeth when needed.
    pub fn send_coins_from_account_to_module(
        &mut self,
        sender: &AccAddress,
        recipient_module: &str,
        amt: &Coins,
    ) -> Result<(), EvmUtilError> {
        self.atomically("send to module", |k| {
            let (uaeth, remainder) = split_aaeth_coins(amt)?;
            if uaeth.is_positive() {
                k.bank
                    .send_coins_from_account_to_module(sender, recipient_module, &single(uaeth))?;
            }

            k.convert_one_if_needed(sender, remainder)?;
            let recipient = k.module_address(recipient_module)?;
            k.remainders.send_balance(sender, &recipient, remainder)?;
            k.convert_remainder(&recipient)
        })
    }

    /// Mints the whole uaeth part in the bank and credits the fraction as aaeth.
    pub fn mint_coins(&mut self, module: &str, amt: &Coins) -> Result<(), EvmUtilError> {
        self.atomically("mint", |k| {
            let (uaeth, remainder) = split_aaeth_coins(amt)?;
            if uaeth.is_positive() {
                k.bank.mint_coins(module, &single(uaeth))?;
            }

            let recipient = k.module_address(module)?;
            k.remainders.add_balance(&recipient, remainder)?;
            k.convert_remainder(&recipient)
        })
    }

    /// Burns aaeth held by a module account.
    pub fn burn_coins(&mut self, module: &str, amt: &Coins) -> Result<(), EvmUtilError> {
        self.atomically("burn", |k| {
            let (uaeth, remainder) = split_aaeth_coins(amt)?;
            if uaeth.is_positive() {
                k.bank.burn_coins(module, &single(uaeth))?;
            }

            let module_addr = k.module_address(module)?;
            k.convert_one_if_needed(&module_addr, remainder)?;
            k.remainders.remove_balance(&module_addr, remainder)
        })
    }

    /// Moves one uaeth of `addr` into the backing module as aaeth when its
    /// remainder is below `needed`.
    pub fn convert_one_uaeth_to_aaeth_if_needed(
        &mut self,
        addr: &AccAddress,
        needed: Int,
    ) -> Result<(), EvmUtilError> {
        self.atomically("convert to aaeth", |k| k.convert_one_if_needed(addr, needed))
    }

    /// Converts every whole uaeth held as remainder of `addr` back into uaeth.
    pub fn convert_aaeth_to_uaeth(&mut self, addr: &AccAddress) -> Result<(), EvmUtilError> {
        self.atomically("convert to uaeth", |k| k.convert_remainder(addr))
    }

    fn convert_one_if_needed(
        &mut self,
        addr: &AccAddress,
        needed: Int,
    ) -> Result<(), EvmUtilError> {
        if self.remainders.get_balance(addr) >= needed {
            return Ok(());
        }

        let one = single(Coin::new(COSMOS_DENOM, Int::one()));
        self.bank.send_coins_from_account_to_module(addr, MODULE_NAME, &one)?;
        self.remainders.add_balance(addr, conversion_multiplier())?;
        debug!("Converted 1{} of {} to {}", COSMOS_DENOM, addr, EVM_DENOM);
        Ok(())
    }

    fn convert_remainder(&mut self, addr: &AccAddress) -> Result<(), EvmUtilError> {
        let total = self.remainders.get_balance(addr);
        let whole = total.checked_quo(conversion_multiplier())?;
        if !whole.is_positive() {
            return Ok(());
        }

        let used = whole.checked_mul(conversion_multiplier())?;
        self.remainders.set_balance(addr, total.checked_sub(used)?)?;

        let backing = self.module_address(MODULE_NAME)?;
        let uaeth = Coin::new(COSMOS_DENOM, whole);
        debug!("Converting {} of {} remainder back to {}", uaeth, addr, COSMOS_DENOM);
        self.bank.send_coins(&backing, addr, &single(uaeth))?;
        Ok(())
    }

    fn atomically<T>(
        &mut self,
        operation: &str,
        f: impl FnOnce(&mut Self) -> Result<T, EvmUtilError>,
    ) -> Result<T, EvmUtilError> {
        let bank_snapshot = self.bank.checkpoint();
        let remainders = self.remainders.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Rolling back {}: {}", operation, e);
                self.bank.restore(bank_snapshot);
                self.remainders = remainders;
                Err(e)
            }
        }
    }
}
