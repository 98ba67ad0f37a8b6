//! Store of the aaeth amounts too small to be held as uaeth.

use std::collections::BTreeMap;

use aether_shared_types::{AccAddress, Int, MathError};

use crate::error::EvmUtilError;

/// Per-account aaeth remainders. Zero balances are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemainderStore {
    balances: BTreeMap<AccAddress, Int>,
}

impl RemainderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_balance(&self, addr: &AccAddress) -> Int {
        self.balances.get(addr).copied().unwrap_or_default()
    }

    pub fn set_balance(&mut self, addr: &AccAddress, balance: Int) -> Result<(), EvmUtilError> {
        if balance.is_negative() {
            return Err(EvmUtilError::InvalidAmount(balance));
        }
        if balance.is_zero() {
            self.balances.remove(addr);
        } else {
            self.balances.insert(addr.clone(), balance);
        }
        Ok(())
    }

    pub fn add_balance(&mut self, addr: &AccAddress, amt: Int) -> Result<(), EvmUtilError> {
        if amt.is_negative() {
            return Err(EvmUtilError::InvalidAmount(amt));
        }
        let balance = self.get_balance(addr).checked_add(amt)?;
        self.set_balance(addr, balance)
    }

    pub fn remove_balance(&mut self, addr: &AccAddress, amt: Int) -> Result<(), EvmUtilError> {
        if amt.is_negative() {
            return Err(EvmUtilError::InvalidAmount(amt));
        }
        let available = self.get_balance(addr);
        let balance = available.checked_sub(amt)?;
        if balance.is_negative() {
            return Err(EvmUtilError::InsufficientFunds {
                available,
                required: amt,
            });
        }
        self.set_balance(addr, balance)
    }

    pub fn send_balance(
        &mut self,
        from: &AccAddress,
        to: &AccAddress,
        amt: Int,
    ) -> Result<(), EvmUtilError> {
        self.remove_balance(from, amt)?;
        self.add_balance(to, amt)
    }

    /// Non-zero balances in address order.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccAddress, &Int)> {
        self.balances.iter()
    }

    pub fn total(&self) -> Result<Int, MathError> {
        self.balances
            .values()
            .try_fold(Int::zero(), |acc, balance| acc.checked_add(*balance))
    }
}
