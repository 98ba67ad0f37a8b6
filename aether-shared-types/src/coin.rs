//! Denominated amounts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::{Int, MathError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoinsError {
    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    #[error("coin {0} amount is not positive")]
    NonPositiveAmount(String),

    #[error("duplicate denomination {0}")]
    DuplicateDenom(String),

    #[error("denomination {0} is not sorted")]
    Unsorted(String),

    #[error("insufficient {denom}: {available} is smaller than {required}")]
    Insufficient {
        denom: String,
        available: Int,
        required: Int,
    },

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Checks a denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), CoinsError> {
    let mut chars = denom.chars();
    let first_ok = chars.next().map_or(false, |c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if !(3..=128).contains(&denom.len()) || !first_ok || !rest_ok {
        return Err(CoinsError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Int,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: Int) -> Self {
        Coin {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins. Built through [`Coins::new`] it is sorted by denom,
/// duplicate free and holds only positive amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// A set with no coins.
    pub fn empty() -> Self {
        Coins(Vec::new())
    }

    /// Drops zero amounts, sorts by denom and validates the result.
    pub fn new(coins: Vec<Coin>) -> Result<Self, CoinsError> {
        let mut coins: Vec<Coin> = coins.into_iter().filter(|c| !c.is_zero()).collect();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        let coins = Coins(coins);
        coins.validate()?;
        Ok(coins)
    }

    /// Keeps the input exactly as given. Call [`Coins::validate`] before
    /// trusting it.
    pub fn from_unsorted(coins: Vec<Coin>) -> Self {
        Coins(coins)
    }

    /// Checks the invariants listed on [`Coins`] plus denom syntax.
    pub fn validate(&self) -> Result<(), CoinsError> {
        let mut previous: Option<&str> = None;
        for coin in &self.0 {
            if let Some(prev) = previous {
                if prev == coin.denom {
                    return Err(CoinsError::DuplicateDenom(coin.denom.clone()));
                }
            }
            validate_denom(&coin.denom)?;
            if let Some(prev) = previous {
                if coin.denom.as_str() < prev {
                    return Err(CoinsError::Unsorted(coin.denom.clone()));
                }
            }
            if !coin.is_positive() {
                return Err(CoinsError::NonPositiveAmount(coin.to_string()));
            }
            previous = Some(coin.denom.as_str());
        }
        Ok(())
    }

    /// Amount held in `denom`, zero when absent.
    pub fn amount_of(&self, denom: &str) -> Int {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// Coin with the lowest denom.
    pub fn first(&self) -> Option<&Coin> {
        self.0.first()
    }

    /// Adds `other` denomination by denomination.
    pub fn checked_add(&self, other: &Coins) -> Result<Coins, CoinsError> {
        let mut sums: BTreeMap<&str, Int> = BTreeMap::new();
        for coin in self.iter().chain(other.iter()) {
            let entry = sums.entry(coin.denom.as_str()).or_default();
            *entry = entry.checked_add(coin.amount)?;
        }
        Ok(Coins(
            sums.into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(denom, amount)| Coin::new(denom, amount))
                .collect(),
        ))
    }

    /// Subtracts `other`, failing if any denomination would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Result<Coins, CoinsError> {
        let mut remaining: BTreeMap<&str, Int> =
            self.iter().map(|c| (c.denom.as_str(), c.amount)).collect();
        for coin in other.iter() {
            let available = remaining.get(coin.denom.as_str()).copied().unwrap_or_default();
            let left = available.checked_sub(coin.amount)?;
            if left.is_negative() {
                return Err(CoinsError::Insufficient {
                    denom: coin.denom.clone(),
                    available,
                    required: coin.amount,
                });
            }
            remaining.insert(coin.denom.as_str(), left);
        }
        Ok(Coins(
            remaining
                .into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(denom, amount)| Coin::new(denom, amount))
                .collect(),
        ))
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
