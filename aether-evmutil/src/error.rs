use thiserror::Error;

use aether_shared_types::{Int, MathError};

use crate::bank::BankError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvmUtilError {
    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("invalid amount {0}: must not be negative")]
    InvalidAmount(Int),

    #[error("insufficient aaeth balance: {available} is smaller than {required}")]
    InsufficientFunds { available: Int, required: Int },

    #[error("bank error: {0}")]
    Bank(#[from] BankError),

    #[error("arithmetic error: {0}")]
    Math(#[from] MathError),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error("fatal: {0}")]
    Fatal(#[from] FatalError),
}

impl EvmUtilError {
    /// Fatal errors mean the chain is misconfigured or the caller broke the
    /// keeper's contract; they must halt the transaction that hit them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EvmUtilError::Fatal(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FatalError {
    #[error("module account {0} does not exist")]
    ModuleAccountMissing(String),

    #[error("only evm denom {expected} is supported by the evm bank keeper, got {denom}")]
    UnsupportedDenom { denom: String, expected: &'static str },
}
