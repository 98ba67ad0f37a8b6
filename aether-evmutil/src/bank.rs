//! Interfaces of the 6-decimal bank the EVM keeper is layered on.

use thiserror::Error;

use aether_shared_types::{AccAddress, Coin, Coins, CoinsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Minter,
    Burner,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("{address} has insufficient funds: {source}")]
    InsufficientFunds { address: AccAddress, source: CoinsError },

    #[error("module account {0} does not exist")]
    UnknownModule(String),

    #[error("module account {module} does not have {permission:?} permission")]
    Unauthorized { module: String, permission: Permission },

    #[error("invalid coins: {0}")]
    InvalidCoins(#[from] CoinsError),
}

pub trait BankKeeper {
    /// Balance minus coins that are locked, e.g. by vesting.
    fn spendable_coins(&self, addr: &AccAddress) -> Coins;

    /// Full balance of one denom, locked coins included.
    fn balance(&self, addr: &AccAddress, denom: &str) -> Coin;

    fn send_coins(
        &mut self,
        from: &AccAddress,
        to: &AccAddress,
        amt: &Coins,
    ) -> Result<(), BankError>;

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        to: &AccAddress,
        amt: &Coins,
    ) -> Result<(), BankError>;

    fn send_coins_from_account_to_module(
        &mut self,
        from: &AccAddress,
        module: &str,
        amt: &Coins,
    ) -> Result<(), BankError>;

    fn mint_coins(&mut self, module: &str, amt: &Coins) -> Result<(), BankError>;

    fn burn_coins(&mut self, module: &str, amt: &Coins) -> Result<(), BankError>;
}

pub trait AccountKeeper {
    fn module_address(&self, name: &str) -> Option<AccAddress>;
}

/// Snapshot and rollback of a store's mutable state.
pub trait Checkpoint {
    type Snapshot;

    fn checkpoint(&self) -> Self::Snapshot;

    fn restore(&mut self, snapshot: Self::Snapshot);
}
