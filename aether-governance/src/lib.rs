//! Aether governance tally
//!
//! Counts votes on a proposal with the weight of bonded stake. Delegators
//! override their validator's vote for the shares they vote with, and holders
//! of liquid staking derivatives vote with the stake backing their tokens.

pub mod config;
pub mod derivatives;
pub mod error;
pub mod keepers;
pub mod liquid;
pub mod tally;

pub use config::GovernanceConfig;
pub use derivatives::{DerivativeHoldings, HoldingsScanner};
pub use error::{ConfigError, EarnError, LiquidError, TallyError};
pub use keepers::{BankKeeper, EarnKeeper, GovKeeper, LiquidKeeper, SavingsKeeper, StakingKeeper};
pub use liquid::StakingDerivatives;
pub use tally::{TallyDecision, TallyHandler, TallyOutcome};
