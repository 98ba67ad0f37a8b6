//! Shared types for the Aether chain modules.
//!
//! Arbitrary-precision arithmetic, coins, addresses and the governance,
//! staking, liquid staking, savings and earn records consumed by the tally
//! engine and the EVM bank bridge.

pub mod address;
pub mod coin;
pub mod earn;
pub mod governance;
pub mod liquid;
pub mod math;
pub mod savings;
pub mod staking;

pub use address::{AccAddress, AddressError, ValAddress};
pub use coin::{validate_denom, Coin, Coins, CoinsError};
pub use math::{Dec, Int, MathError, PRECISION};
