//! Redemption value of derivative tokens backed by the staking module.

use aether_shared_types::liquid::DerivativeDenom;
use aether_shared_types::{Coin, Int};

use crate::error::LiquidError;
use crate::keepers::{LiquidKeeper, StakingKeeper};

/// [`LiquidKeeper`] reading validators straight from staking. Derivative
/// tokens are minted one for one against delegation shares.
pub struct StakingDerivatives<'a, S> {
    staking: &'a S,
}

impl<'a, S: StakingKeeper> StakingDerivatives<'a, S> {
    pub fn new(staking: &'a S) -> Self {
        Self { staking }
    }
}

impl<S: StakingKeeper> LiquidKeeper for StakingDerivatives<'_, S> {
    fn is_derivative_denom(&self, denom: &str) -> bool {
        match DerivativeDenom::parse(denom) {
            DerivativeDenom::Derivative(operator) => self.staking.validator(&operator).is_some(),
            DerivativeDenom::NotDerivative => false,
        }
    }

    fn staked_tokens_for_derivatives(&self, coins: &[Coin]) -> Result<Coin, LiquidError> {
        let mut total = Int::zero();
        for coin in coins {
            let operator = DerivativeDenom::parse(&coin.denom)
                .validator()
                .cloned()
                .ok_or_else(|| LiquidError::InvalidDenom(coin.denom.clone()))?;
            let validator = self
                .staking
                .validator(&operator)
                .ok_or_else(|| LiquidError::ValidatorNotFound(coin.denom.clone()))?;

            let tokens = validator.tokens_from_shares_truncated(coin.amount.to_dec()?)?;
            total = total.checked_add(tokens.truncate_int())?;
        }
        Ok(Coin::new(self.staking.bond_denom(), total))
    }
}
