use thiserror::Error;

use aether_shared_types::governance::ParamsError;
use aether_shared_types::{Dec, MathError, ValAddress};

/// Errors that abort a tally pass. None of them leave votes deleted.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("tally arithmetic failed: {0}")]
    Math(#[from] MathError),

    #[error("invalid tally params: {0}")]
    Params(#[from] ParamsError),

    #[error("validator {validator} deductions {deductions} exceed delegator shares {shares}")]
    DeductionsExceedShares {
        validator: ValAddress,
        shares: Dec,
        deductions: Dec,
    },

    #[error("cannot redeem derivative {denom}: {source}")]
    Redemption {
        denom: String,
        #[source]
        source: LiquidError,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LiquidError {
    #[error("invalid derivative denom {0}")]
    InvalidDenom(String),

    #[error("invalid derivative denom {0}: validator not found")]
    ValidatorNotFound(String),

    #[error(transparent)]
    Math(#[from] MathError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EarnError {
    #[error("vault for {0} not found")]
    VaultNotFound(String),

    #[error(transparent)]
    Math(#[from] MathError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Params(#[from] ParamsError),
}
