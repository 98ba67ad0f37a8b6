//! Invariants over the remainder store and its uaeth backing.

use crate::bank::{AccountKeeper, BankKeeper};
use crate::evm_bank_keeper::{conversion_multiplier, COSMOS_DENOM, MODULE_NAME};
use crate::keeper::RemainderStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantResult {
    pub name: &'static str,
    pub message: String,
    pub broken: bool,
}

impl InvariantResult {
    fn new(name: &'static str, message: String, broken: bool) -> Self {
        Self { name, message, broken }
    }
}

/// Remainders must never exceed the uaeth held by the backing module.
pub fn fully_backed<B: BankKeeper + AccountKeeper>(
    bank: &B,
    store: &RemainderStore,
) -> InvariantResult {
    const NAME: &str = "fully-backed";
    let Some(backing) = bank.module_address(MODULE_NAME) else {
        let message = format!("module account {} does not exist", MODULE_NAME);
        return InvariantResult::new(NAME, message, true);
    };
    let reserve = bank.balance(&backing, COSMOS_DENOM).amount;
    let totals = store
        .total()
        .and_then(|total| Ok((total, reserve.checked_mul(conversion_multiplier())?)));
    match totals {
        Ok((total, backed)) if total <= backed => InvariantResult::new(
            NAME,
            format!("remainders {} backed by {}{}", total, reserve, COSMOS_DENOM),
            false,
        ),
        Ok((total, _)) => InvariantResult::new(
            NAME,
            format!("remainders {} exceed backing {}{}", total, reserve, COSMOS_DENOM),
            true,
        ),
        Err(e) => InvariantResult::new(NAME, format!("cannot total remainders: {}", e), true),
    }
}

/// Every stored remainder must be smaller than one uaeth.
pub fn small_balances(store: &RemainderStore) -> InvariantResult {
    const NAME: &str = "small-balances";
    let multiplier = conversion_multiplier();
    let oversized: Vec<String> = store
        .accounts()
        .filter(|(_, balance)| **balance >= multiplier)
        .map(|(addr, balance)| format!("{}: {}", addr, balance))
        .collect();
    if oversized.is_empty() {
        InvariantResult::new(NAME, "all remainders below one uaeth".to_string(), false)
    } else {
        InvariantResult::new(NAME, format!("remainders too large: {}", oversized.join(", ")), true)
    }
}

pub fn all_invariants<B: BankKeeper + AccountKeeper>(
    bank: &B,
    store: &RemainderStore,
) -> Vec<InvariantResult> {
    vec![fully_backed(bank, store), small_balances(store)]
}
