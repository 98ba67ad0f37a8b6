//! Genesis import and export of the remainder store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use aether_shared_types::{AccAddress, Int};

use crate::error::EvmUtilError;
use crate::keeper::RemainderStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenesisAccount {
    pub address: AccAddress,
    pub balance: Int,
}

impl GenesisAccount {
    pub fn new(address: AccAddress, balance: Int) -> Self {
        Self { address, balance }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenesisState {
    pub accounts: Vec<GenesisAccount>,
}

impl GenesisState {
    pub fn new(accounts: Vec<GenesisAccount>) -> Self {
        Self { accounts }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, EvmUtilError> {
        let state: GenesisState =
            serde_json::from_str(raw).map_err(|e| EvmUtilError::InvalidGenesis(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    pub fn to_json_string(&self) -> Result<String, EvmUtilError> {
        serde_json::to_string_pretty(self).map_err(|e| EvmUtilError::InvalidGenesis(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), EvmUtilError> {
        let mut seen = BTreeSet::new();
        for account in &self.accounts {
            if !seen.insert(&account.address) {
                return Err(EvmUtilError::InvalidGenesis(format!(
                    "duplicate account {}",
                    account.address
                )));
            }
            if account.balance.is_negative() {
                return Err(EvmUtilError::InvalidGenesis(format!(
                    "negative balance {} for {}",
                    account.balance, account.address
                )));
            }
        }
        Ok(())
    }
}

pub fn init_genesis(store: &mut RemainderStore, state: &GenesisState) -> Result<(), EvmUtilError> {
    state.validate()?;
    for account in &state.accounts {
        store.set_balance(&account.address, account.balance)?;
    }
    Ok(())
}

pub fn export_genesis(store: &RemainderStore) -> GenesisState {
    GenesisState::new(
        store
            .accounts()
            .map(|(address, balance)| GenesisAccount::new(address.clone(), *balance))
            .collect(),
    )
}
