//! Staking snapshot types consumed by the governance tally.

use serde::{Deserialize, Serialize};

use crate::address::{AccAddress, ValAddress};
use crate::math::{Dec, Int, MathError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BondStatus {
    Unbonded,
    Unbonding,
    Bonded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Validator {
    pub operator: ValAddress,
    /// Tokens backing the validator's delegator shares.
    pub tokens: Int,
    pub delegator_shares: Dec,
    pub status: BondStatus,
}

impl Validator {
    /// A bonded validator.
    pub fn new(operator: ValAddress, tokens: Int, delegator_shares: Dec) -> Self {
        Validator {
            operator,
            tokens,
            delegator_shares,
            status: BondStatus::Bonded,
        }
    }

    pub fn is_bonded(&self) -> bool {
        self.status == BondStatus::Bonded
    }

    /// Tokens counted toward consensus power; zero unless bonded.
    pub fn bonded_tokens(&self) -> Int {
        if self.is_bonded() {
            self.tokens
        } else {
            Int::zero()
        }
    }

    pub fn tokens_from_shares_truncated(&self, shares: Dec) -> Result<Dec, MathError> {
        shares
            .checked_mul_int(&self.tokens)?
            .checked_quo_truncate(self.delegator_shares)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Delegation {
    pub delegator: AccAddress,
    pub validator: ValAddress,
    pub shares: Dec,
}

impl Delegation {
    pub fn new(delegator: AccAddress, validator: ValAddress, shares: Dec) -> Self {
        Delegation {
            delegator,
            validator,
            shares,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_from_shares_after_slash() {
        // 90 tokens back 100 shares
        let operator = ValAddress::new(vec![1u8; 20]);
        let val = Validator::new(operator, Int::from(90u64), Dec::from_u64(100));
        let shares: Dec = "33".parse().unwrap();
        let tokens = val.tokens_from_shares_truncated(shares).unwrap();
        assert_eq!(tokens.to_string(), "29.700000000000000000");
        assert_eq!(tokens.truncate_int(), Int::from(29u64));
    }

    #[test]
    fn test_unbonded_validator_has_no_bonded_tokens() {
        let operator = ValAddress::new(vec![2u8; 20]);
        let mut val = Validator::new(operator, Int::from(10u64), Dec::from_u64(10));
        val.status = BondStatus::Unbonding;
        assert!(val.bonded_tokens().is_zero());
    }
}
