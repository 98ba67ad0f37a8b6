//! Savings module deposit records.

use serde::{Deserialize, Serialize};

use crate::address::AccAddress;
use crate::coin::Coins;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deposit {
    pub depositor: AccAddress,
    pub amount: Coins,
}

impl Deposit {
    pub fn new(depositor: AccAddress, amount: Coins) -> Self {
        Deposit { depositor, amount }
    }
}
