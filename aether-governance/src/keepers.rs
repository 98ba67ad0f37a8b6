//! Interfaces of the modules the tally reads from.
//!
//! Implementations are supplied by the host application. Every read goes to
//! the backing store; nothing here is cached.

use aether_shared_types::earn::{VaultShare, VaultShares};
use aether_shared_types::governance::{TallyParams, Vote};
use aether_shared_types::savings::Deposit;
use aether_shared_types::staking::{Delegation, Validator};
use aether_shared_types::{AccAddress, Coin, Coins, Int, ValAddress};

use crate::error::{EarnError, LiquidError};

pub trait StakingKeeper {
    /// Bonded validators, highest power first.
    fn bonded_validators_by_power(&self) -> Vec<Validator>;

    fn validator(&self, operator: &ValAddress) -> Option<Validator>;

    /// All delegations made by `delegator`.
    fn delegations(&self, delegator: &AccAddress) -> Vec<Delegation>;

    fn total_bonded_tokens(&self) -> Int;

    fn bond_denom(&self) -> String;
}

pub trait GovKeeper {
    /// Votes recorded for a proposal, in any order.
    fn votes(&self, proposal_id: u64) -> Vec<Vote>;

    fn delete_vote(&mut self, proposal_id: u64, voter: &AccAddress);

    fn tally_params(&self) -> TallyParams;
}

pub trait BankKeeper {
    fn spendable_coins(&self, addr: &AccAddress) -> Coins;
}

pub trait SavingsKeeper {
    fn deposit(&self, depositor: &AccAddress) -> Option<Deposit>;
}

pub trait EarnKeeper {
    fn vault_account_shares(&self, owner: &AccAddress) -> Option<VaultShares>;

    /// Value of `share` in the vault's underlying asset.
    fn convert_to_assets(&self, share: &VaultShare) -> Result<Coin, EarnError>;
}

pub trait LiquidKeeper {
    /// True if `denom` is the derivative of an existing validator.
    fn is_derivative_denom(&self, denom: &str) -> bool;

    /// Staked tokens redeemable for the given derivative coins.
    fn staked_tokens_for_derivatives(&self, coins: &[Coin]) -> Result<Coin, LiquidError>;
}
