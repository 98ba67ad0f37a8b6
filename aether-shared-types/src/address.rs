//! Account and validator operator addresses.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Length of addresses derived for module accounts.
pub const MODULE_ADDRESS_LEN: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address")]
    Empty,

    #[error("invalid hex address {0}: {1}")]
    InvalidHex(String, String),
}

macro_rules! address_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(#[serde(with = "hex")] Vec<u8>);

        impl $name {
            pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
                $name(bytes.into())
            }

            pub fn from_hex(s: &str) -> Result<Self, AddressError> {
                if s.is_empty() {
                    return Err(AddressError::Empty);
                }
                hex::decode(s)
                    .map($name)
                    .map_err(|e| AddressError::InvalidHex(s.to_string(), e.to_string()))
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(&self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0))
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

address_type!(
    /// Address of an account (user or module).
    AccAddress
);

address_type!(
    /// Operator address of a validator.
    ValAddress
);

impl AccAddress {
    /// Deterministic address of a named module account.
    pub fn for_module(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        AccAddress(digest[..MODULE_ADDRESS_LEN].to_vec())
    }
}

impl From<&AccAddress> for ValAddress {
    fn from(addr: &AccAddress) -> Self {
        ValAddress(addr.0.clone())
    }
}

impl From<&ValAddress> for AccAddress {
    fn from(addr: &ValAddress) -> Self {
        AccAddress(addr.0.clone())
    }
}
