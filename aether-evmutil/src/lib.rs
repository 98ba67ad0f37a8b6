//! Aether EVM utilities
//!
//! Presents the chain's 6-decimal `uaeth` coin to the EVM as 18-decimal
//! `aaeth`, keeping the sub-uaeth part of every balance in a remainder store
//! backed by uaeth held in the `evmutil` module account.

pub mod bank;
pub mod error;
pub mod evm_bank_keeper;
pub mod genesis;
pub mod invariants;
pub mod keeper;
pub mod mem_bank;

pub use bank::{AccountKeeper, BankError, BankKeeper, Checkpoint, Permission};
pub use error::{EvmUtilError, FatalError};
pub use evm_bank_keeper::{
    conversion_multiplier, split_aaeth_coins, validate_evm_coins, EvmBankKeeper,
    CONVERSION_MULTIPLIER, COSMOS_DENOM, EVM_DENOM, MODULE_NAME,
};
pub use genesis::{export_genesis, init_genesis, GenesisAccount, GenesisState};
pub use invariants::{all_invariants, fully_backed, small_balances, InvariantResult};
pub use keeper::RemainderStore;
pub use mem_bank::MemBank;
