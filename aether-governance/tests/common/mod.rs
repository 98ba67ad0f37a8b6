#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use aether_governance::{BankKeeper, EarnError, EarnKeeper, GovKeeper, SavingsKeeper, StakingKeeper};
use aether_shared_types::earn::{self, VaultShare, VaultShares};
use aether_shared_types::governance::{TallyParams, Vote, WeightedVoteOption};
use aether_shared_types::liquid::derivative_denom;
use aether_shared_types::savings::Deposit;
use aether_shared_types::staking::{Delegation, Validator};
use aether_shared_types::{AccAddress, Coin, Coins, Dec, Int, ValAddress};

pub const BOND_DENOM: &str = "uaeth";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn addr(seed: u8) -> AccAddress {
    AccAddress::new(vec![seed; 20])
}

pub fn val_addr(seed: u8) -> ValAddress {
    ValAddress::new(vec![seed; 20])
}

pub fn int(n: u64) -> Int {
    Int::from(n)
}

pub fn dec(s: &str) -> Dec {
    s.parse().unwrap()
}

pub fn derivative(seed: u8, amount: u64) -> Coin {
    Coin::new(derivative_denom(&val_addr(seed)), int(amount))
}

#[derive(Default)]
pub struct MemStaking {
    pub validators: BTreeMap<ValAddress, Validator>,
    pub delegations: Vec<Delegation>,
}

impl MemStaking {
    pub fn add_validator(&mut self, validator: Validator) {
        self.validators.insert(validator.operator.clone(), validator);
    }

    pub fn delegate(&mut self, delegator: AccAddress, validator: ValAddress, shares: Dec) {
        self.delegations.push(Delegation::new(delegator, validator, shares));
    }
}

impl StakingKeeper for MemStaking {
    fn bonded_validators_by_power(&self) -> Vec<Validator> {
        let mut bonded: Vec<Validator> = self
            .validators
            .values()
            .filter(|v| v.is_bonded())
            .cloned()
            .collect();
        bonded.sort_by(|a, b| b.tokens.cmp(&a.tokens));
        bonded
    }

    fn validator(&self, operator: &ValAddress) -> Option<Validator> {
        self.validators.get(operator).cloned()
    }

    fn delegations(&self, delegator: &AccAddress) -> Vec<Delegation> {
        self.delegations.iter().filter(|d| &d.delegator == delegator).cloned().collect()
    }

    fn total_bonded_tokens(&self) -> Int {
        self.validators
            .values()
            .fold(Int::zero(), |acc, v| acc.checked_add(v.bonded_tokens()).unwrap())
    }

    fn bond_denom(&self) -> String {
        BOND_DENOM.to_string()
    }
}

#[derive(Default)]
pub struct MemGov {
    pub votes: BTreeMap<(u64, AccAddress), Vote>,
    pub params: TallyParams,
}

impl MemGov {
    pub fn vote(&mut self, proposal_id: u64, voter: AccAddress, options: Vec<WeightedVoteOption>) {
        self.votes
            .insert((proposal_id, voter.clone()), Vote::new(proposal_id, voter, options));
    }

    pub fn vote_count(&self, proposal_id: u64) -> usize {
        self.votes.keys().filter(|(id, _)| *id == proposal_id).count()
    }
}

impl GovKeeper for MemGov {
    fn votes(&self, proposal_id: u64) -> Vec<Vote> {
        // Newest voter first so the tally cannot rely on store order.
        self.votes
            .values()
            .rev()
            .filter(|v| v.proposal_id == proposal_id)
            .cloned()
            .collect()
    }

    fn delete_vote(&mut self, proposal_id: u64, voter: &AccAddress) {
        self.votes.remove(&(proposal_id, voter.clone()));
    }

    fn tally_params(&self) -> TallyParams {
        self.params.clone()
    }
}

#[derive(Default)]
pub struct MemBank {
    pub spendable: HashMap<AccAddress, Coins>,
}

impl MemBank {
    pub fn set(&mut self, owner: AccAddress, coins: Vec<Coin>) {
        self.spendable.insert(owner, Coins::new(coins).unwrap());
    }
}

impl BankKeeper for MemBank {
    fn spendable_coins(&self, addr: &AccAddress) -> Coins {
        self.spendable.get(addr).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct MemSavings {
    pub deposits: HashMap<AccAddress, Deposit>,
}

impl MemSavings {
    pub fn add_deposit(&mut self, depositor: AccAddress, coins: Vec<Coin>) {
        let deposit = Deposit::new(depositor.clone(), Coins::new(coins).unwrap());
        self.deposits.insert(depositor, deposit);
    }
}

impl SavingsKeeper for MemSavings {
    fn deposit(&self, depositor: &AccAddress) -> Option<Deposit> {
        self.deposits.get(depositor).cloned()
    }
}

/// Vaults keyed by denom holding (total shares, total value).
#[derive(Default)]
pub struct MemEarn {
    pub shares: HashMap<AccAddress, VaultShares>,
    pub vaults: HashMap<String, (Dec, Int)>,
}

impl MemEarn {
    pub fn open_vault(&mut self, denom: &str, total_shares: Dec, total_value: Int) {
        self.vaults.insert(denom.to_string(), (total_shares, total_value));
    }

    pub fn add_shares(&mut self, owner: AccAddress, share: VaultShare) {
        self.shares.entry(owner).or_default().push(share);
    }
}

impl EarnKeeper for MemEarn {
    fn vault_account_shares(&self, owner: &AccAddress) -> Option<VaultShares> {
        self.shares.get(owner).cloned()
    }

    fn convert_to_assets(&self, share: &VaultShare) -> Result<Coin, EarnError> {
        let (total_shares, total_value) = self
            .vaults
            .get(&share.denom)
            .ok_or_else(|| EarnError::VaultNotFound(share.denom.clone()))?;
        Ok(earn::convert_to_assets(share, *total_shares, total_value)?)
    }
}

/// All keepers a tally reads from.
#[derive(Default)]
pub struct Fixture {
    pub staking: MemStaking,
    pub gov: MemGov,
    pub bank: MemBank,
    pub savings: MemSavings,
    pub earn: MemEarn,
}
