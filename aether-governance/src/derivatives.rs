//! Derivative token holdings of a single voter.
//!
//! A voter can hold derivative tokens directly in the wallet, deposited in
//! savings, or deposited in an earn vault. All three count toward the voter's
//! governance power.

use std::collections::BTreeMap;

use log::debug;

use aether_shared_types::{AccAddress, Coin, Int, MathError};

use crate::keepers::{BankKeeper, EarnKeeper, LiquidKeeper, SavingsKeeper};

/// Derivative amounts keyed by denomination, iterated in denom order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivativeHoldings(BTreeMap<String, Int>);

impl DerivativeHoldings {
    pub fn new() -> Self {
        DerivativeHoldings(BTreeMap::new())
    }

    pub fn add(&mut self, coin: &Coin) -> Result<(), MathError> {
        let entry = self.0.entry(coin.denom.clone()).or_default();
        *entry = entry.checked_add(coin.amount)?;
        Ok(())
    }

    /// Non-zero holdings as coins sorted by denom.
    pub fn to_coins(&self) -> Vec<Coin> {
        self.0
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(denom, amount)| Coin::new(denom.clone(), *amount))
            .collect()
    }
}

/// Gathers a voter's derivative holdings across wallet, savings and earn.
pub struct HoldingsScanner<'a, B, V, E, L> {
    bank: &'a B,
    savings: &'a V,
    earn: &'a E,
    liquid: &'a L,
}

impl<'a, B, V, E, L> HoldingsScanner<'a, B, V, E, L>
where
    B: BankKeeper,
    V: SavingsKeeper,
    E: EarnKeeper,
    L: LiquidKeeper,
{
    pub fn new(bank: &'a B, savings: &'a V, earn: &'a E, liquid: &'a L) -> Self {
        Self {
            bank,
            savings,
            earn,
            liquid,
        }
    }

    pub fn holdings_of(&self, addr: &AccAddress) -> Result<DerivativeHoldings, MathError> {
        let mut holdings = DerivativeHoldings::new();
        self.add_from_wallet(addr, &mut holdings)?;
        self.add_from_savings(addr, &mut holdings)?;
        self.add_from_earn(addr, &mut holdings)?;
        Ok(holdings)
    }

    fn add_from_wallet(
        &self,
        addr: &AccAddress,
        holdings: &mut DerivativeHoldings,
    ) -> Result<(), MathError> {
        for coin in self.bank.spendable_coins(addr).iter() {
            if self.liquid.is_derivative_denom(&coin.denom) {
                holdings.add(coin)?;
            }
        }
        Ok(())
    }

    fn add_from_savings(
        &self,
        addr: &AccAddress,
        holdings: &mut DerivativeHoldings,
    ) -> Result<(), MathError> {
        let Some(deposit) = self.savings.deposit(addr) else {
            return Ok(());
        };
        for coin in deposit.amount.iter() {
            if self.liquid.is_derivative_denom(&coin.denom) {
                holdings.add(coin)?;
            }
        }
        Ok(())
    }

    fn add_from_earn(
        &self,
        addr: &AccAddress,
        holdings: &mut DerivativeHoldings,
    ) -> Result<(), MathError> {
        let Some(shares) = self.earn.vault_account_shares(addr) else {
            return Ok(());
        };
        for share in &shares {
            if !self.liquid.is_derivative_denom(&share.denom) {
                continue;
            }
            match self.earn.convert_to_assets(share) {
                Ok(coin) => holdings.add(&coin)?,
                Err(e) => debug!("Skipping earn shares {} of {}: {}", share.denom, addr, e),
            }
        }
        Ok(())
    }
}
