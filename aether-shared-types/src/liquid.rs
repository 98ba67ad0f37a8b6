//! Liquid staking derivative denominations.
//!
//! Each validator has its own derivative token, denominated
//! `baeth-<operator address hex>`.

use crate::address::ValAddress;

pub const DERIVATIVE_DENOM_PREFIX: &str = "baeth";
pub const DENOM_SEPARATOR: char = '-';

/// Result of resolving a denomination to the validator it derives from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DerivativeDenom {
    Derivative(ValAddress),
    NotDerivative,
}

impl DerivativeDenom {
    pub fn parse(denom: &str) -> Self {
        let mut parts = denom.split(DENOM_SEPARATOR);
        let (prefix, addr, rest) = (parts.next(), parts.next(), parts.next());
        match (prefix, addr, rest) {
            (Some(DERIVATIVE_DENOM_PREFIX), Some(addr), None) => ValAddress::from_hex(addr)
                .map(DerivativeDenom::Derivative)
                .unwrap_or(DerivativeDenom::NotDerivative),
            _ => DerivativeDenom::NotDerivative,
        }
    }

    pub fn validator(&self) -> Option<&ValAddress> {
        match self {
            DerivativeDenom::Derivative(addr) => Some(addr),
            DerivativeDenom::NotDerivative => None,
        }
    }
}

/// Denomination of the derivative token minted against `validator`.
pub fn derivative_denom(validator: &ValAddress) -> String {
    format!("{}{}{}", DERIVATIVE_DENOM_PREFIX, DENOM_SEPARATOR, validator)
}
