#![allow(dead_code)]

use aether_evmutil::{
    BankKeeper, EvmBankKeeper, MemBank, Permission, RemainderStore, COSMOS_DENOM, EVM_DENOM,
    MODULE_NAME,
};
use aether_shared_types::{AccAddress, Coin, Coins, Int};

/// Module the EVM mints into and burns from.
pub const EVM_MODULE: &str = "evm";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn addr(seed: u8) -> AccAddress {
    AccAddress::new(vec![seed; 20])
}

pub fn int(n: i64) -> Int {
    Int::from(n)
}

/// Valid aaeth coins; a zero amount yields the empty set.
pub fn aaeth(amount: u64) -> Coins {
    Coins::new(vec![Coin::new(EVM_DENOM, Int::from(amount))]).unwrap()
}

pub fn uaeth(amount: u64) -> Coins {
    Coins::new(vec![Coin::new(COSMOS_DENOM, Int::from(amount))]).unwrap()
}

/// Keeper over an in-memory bank with the evm and evmutil module accounts.
pub struct Suite {
    pub keeper: EvmBankKeeper<MemBank>,
    pub evm_module_addr: AccAddress,
    pub evmutil_addr: AccAddress,
}

impl Suite {
    pub fn new() -> Self {
        init_logger();
        let mut bank = MemBank::new();
        let evm_module_addr =
            bank.add_module_account(EVM_MODULE, &[Permission::Minter, Permission::Burner]);
        let evmutil_addr = bank.add_module_account(MODULE_NAME, &[]);
        Suite {
            keeper: EvmBankKeeper::new(bank, RemainderStore::new()),
            evm_module_addr,
            evmutil_addr,
        }
    }

    /// Gives `addr` `uaeth` in the bank and sets its remainder to `aaeth`.
    pub fn fund_with_aether(&mut self, addr: &AccAddress, uaeth_amount: u64, aaeth_amount: u64) {
        if uaeth_amount > 0 {
            self.keeper
                .bank_mut()
                .fund_account(addr, &uaeth(uaeth_amount))
                .unwrap();
        }
        self.keeper
            .remainders_mut()
            .set_balance(addr, Int::from(aaeth_amount))
            .unwrap();
    }

    pub fn fund_module_with_aether(&mut self, module: &str, uaeth_amount: u64, aaeth_amount: u64) {
        let module_addr = self.keeper.module_address(module).unwrap();
        self.fund_with_aether(&module_addr, uaeth_amount, aaeth_amount);
    }

    pub fn uaeth_of(&self, addr: &AccAddress) -> Int {
        self.keeper.bank().balance(addr, COSMOS_DENOM).amount
    }

    pub fn aaeth_of(&self, addr: &AccAddress) -> Int {
        self.keeper.remainders().get_balance(addr)
    }
}
