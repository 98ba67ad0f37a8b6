//! Earn vault share records.

use serde::{Deserialize, Serialize};

use crate::coin::Coin;
use crate::math::{Dec, Int, MathError};

/// Shares of the vault holding `denom`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VaultShare {
    pub denom: String,
    pub amount: Dec,
}

impl VaultShare {
    pub fn new(denom: impl Into<String>, amount: Dec) -> Self {
        VaultShare {
            denom: denom.into(),
            amount,
        }
    }
}

pub type VaultShares = Vec<VaultShare>;

/// Value of `share` in the vault's underlying asset, given the vault's
/// total issued shares and total value. Multiplies before dividing so a
/// holder of every share gets the whole vault; fractions are truncated.
pub fn convert_to_assets(
    share: &VaultShare,
    total_shares: Dec,
    total_value: &Int,
) -> Result<Coin, MathError> {
    let assets = share
        .amount
        .checked_mul_int(total_value)?
        .checked_quo_truncate(total_shares)?
        .truncate_int();
    Ok(Coin::new(share.denom.clone(), assets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_to_assets_truncates() {
        // 3 shares issued for 10 tokens: each share is worth 3.333...
        let share = VaultShare::new("baeth-01", Dec::from_u64(1));
        let coin = convert_to_assets(&share, Dec::from_u64(3), &Int::from(10u64)).unwrap();
        assert_eq!(coin.amount, Int::from(3u64));
        assert_eq!(coin.denom, "baeth-01");
    }

    #[test]
    fn test_convert_to_assets_all_shares_keep_full_value() {
        let share = VaultShare::new("baeth-01", Dec::from_u64(3));
        let coin = convert_to_assets(&share, Dec::from_u64(3), &Int::from(10u64)).unwrap();
        assert_eq!(coin.amount, Int::from(10u64));

        // 2 of 3 shares of 10 is 6.666..., truncated
        let share = VaultShare::new("baeth-01", Dec::from_u64(2));
        let coin = convert_to_assets(&share, Dec::from_u64(3), &Int::from(10u64)).unwrap();
        assert_eq!(coin.amount, Int::from(6u64));
    }

    #[test]
    fn test_convert_to_assets_empty_vault() {
        let share = VaultShare::new("baeth-01", Dec::from_u64(1));
        assert_eq!(
            convert_to_assets(&share, Dec::zero(), &Int::from(10u64)),
            Err(MathError::DivisionByZero)
        );
    }
}
