//! In-memory 6-decimal bank.
//!
//! Tracks balances, locked (non-spendable) coins, module accounts and total
//! supply. Embedders without a persistent bank and the test suites run the
//! EVM keeper on top of it.

use std::collections::BTreeMap;

use log::debug;

use aether_shared_types::{AccAddress, Coin, Coins, Int};

use crate::bank::{AccountKeeper, BankError, BankKeeper, Checkpoint, Permission};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankState {
    balances: BTreeMap<AccAddress, Coins>,
    locked: BTreeMap<AccAddress, Coins>,
    supply: Coins,
}

#[derive(Debug, Clone)]
struct ModuleAccount {
    address: AccAddress,
    permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default)]
pub struct MemBank {
    state: BankState,
    modules: BTreeMap<String, ModuleAccount>,
}

impl MemBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module account at its derived address.
    pub fn add_module_account(&mut self, name: &str, permissions: &[Permission]) -> AccAddress {
        let address = AccAddress::for_module(name);
        self.modules.insert(
            name.to_string(),
            ModuleAccount {
                address: address.clone(),
                permissions: permissions.to_vec(),
            },
        );
        address
    }

    pub fn with_module_account(mut self, name: &str, permissions: &[Permission]) -> Self {
        self.add_module_account(name, permissions);
        self
    }

    /// Credits `amt` to `addr` out of thin air, growing the supply.
    pub fn fund_account(&mut self, addr: &AccAddress, amt: &Coins) -> Result<(), BankError> {
        amt.validate()?;
        self.add_coins(addr, amt)?;
        self.state.supply = self.state.supply.checked_add(amt)?;
        Ok(())
    }

    pub fn fund_module_account(&mut self, module: &str, amt: &Coins) -> Result<(), BankError> {
        let address = self.module(module)?.address.clone();
        self.fund_account(&address, amt)
    }

    /// Replaces the coins of `addr` that may not be spent.
    pub fn set_locked(&mut self, addr: &AccAddress, locked: Coins) {
        if locked.is_empty() {
            self.state.locked.remove(addr);
        } else {
            self.state.locked.insert(addr.clone(), locked);
        }
    }

    pub fn all_balances(&self, addr: &AccAddress) -> Coins {
        self.state.balances.get(addr).cloned().unwrap_or_default()
    }

    pub fn supply(&self) -> &Coins {
        &self.state.supply
    }

    pub fn supply_of(&self, denom: &str) -> Int {
        self.state.supply.amount_of(denom)
    }

    fn module(&self, name: &str) -> Result<&ModuleAccount, BankError> {
        self.modules
            .get(name)
            .ok_or_else(|| BankError::UnknownModule(name.to_string()))
    }

    fn authorized_module(
        &self,
        name: &str,
        permission: Permission,
    ) -> Result<AccAddress, BankError> {
        let module = self.module(name)?;
        if !module.permissions.contains(&permission) {
            return Err(BankError::Unauthorized {
                module: name.to_string(),
                permission,
            });
        }
        Ok(module.address.clone())
    }

    fn add_coins(&mut self, addr: &AccAddress, amt: &Coins) -> Result<(), BankError> {
        let balance = self.all_balances(addr).checked_add(amt)?;
        self.state.balances.insert(addr.clone(), balance);
        Ok(())
    }

    /// Removes `amt` from `addr`, which must be covered by spendable coins.
    fn sub_unlocked_coins(&mut self, addr: &AccAddress, amt: &Coins) -> Result<(), BankError> {
        self.spendable_coins(addr)
            .checked_sub(amt)
            .map_err(|source| BankError::InsufficientFunds {
                address: addr.clone(),
                source,
            })?;
        let balance = self.all_balances(addr).checked_sub(amt)?;
        if balance.is_empty() {
            self.state.balances.remove(addr);
        } else {
            self.state.balances.insert(addr.clone(), balance);
        }
        Ok(())
    }
}

impl BankKeeper for MemBank {
    fn spendable_coins(&self, addr: &AccAddress) -> Coins {
        let balance = self.all_balances(addr);
        let Some(locked) = self.state.locked.get(addr) else {
            return balance;
        };
        let spendable = balance
            .iter()
            .filter_map(|coin| {
                let free = coin.amount.checked_sub(locked.amount_of(&coin.denom)).ok()?;
                free.is_positive().then(|| Coin::new(coin.denom.clone(), free))
            })
            .collect();
        Coins::from_unsorted(spendable)
    }

    fn balance(&self, addr: &AccAddress, denom: &str) -> Coin {
        Coin::new(denom, self.all_balances(addr).amount_of(denom))
    }

    fn send_coins(
        &mut self,
        from: &AccAddress,
        to: &AccAddress,
        amt: &Coins,
    ) -> Result<(), BankError> {
        amt.validate()?;
        self.sub_unlocked_coins(from, amt)?;
        self.add_coins(to, amt)?;
        debug!("Sent {} from {} to {}", amt, from, to);
        Ok(())
    }

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        to: &AccAddress,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let from = self.module(module)?.address.clone();
        self.send_coins(&from, to, amt)
    }

    fn send_coins_from_account_to_module(
        &mut self,
        from: &AccAddress,
        module: &str,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let to = self.module(module)?.address.clone();
        self.send_coins(from, &to, amt)
    }

    fn mint_coins(&mut self, module: &str, amt: &Coins) -> Result<(), BankError> {
        let address = self.authorized_module(module, Permission::Minter)?;
        amt.validate()?;
        self.add_coins(&address, amt)?;
        self.state.supply = self.state.supply.checked_add(amt)?;
        debug!("Minted {} to module {}", amt, module);
        Ok(())
    }

    fn burn_coins(&mut self, module: &str, amt: &Coins) -> Result<(), BankError> {
        let address = self.authorized_module(module, Permission::Burner)?;
        amt.validate()?;
        self.sub_unlocked_coins(&address, amt)?;
        self.state.supply = self.state.supply.checked_sub(amt)?;
        debug!("Burned {} from module {}", amt, module);
        Ok(())
    }
}

impl AccountKeeper for MemBank {
    fn module_address(&self, name: &str) -> Option<AccAddress> {
        self.modules.get(name).map(|m| m.address.clone())
    }
}

impl Checkpoint for MemBank {
    type Snapshot = BankState;

    fn checkpoint(&self) -> BankState {
        self.state.clone()
    }

    fn restore(&mut self, snapshot: BankState) {
        self.state = snapshot;
    }
}
