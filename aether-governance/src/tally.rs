//! Proposal tallying
//!
//! A tally pass snapshots the bonded validator set, walks every vote in voter
//! order and accumulates voting power from three sources:
//!
//! * shares the voter delegated directly,
//! * liquid staking derivatives the voter holds in wallet, savings or earn,
//! * the voter's own validator, if the voter operates one.
//!
//! Power counted through a delegator is deducted from the validator so that
//! it is never counted twice. Votes are only deleted once a decision has been
//! reached, so a failed pass can be retried against unchanged state.

use std::collections::BTreeMap;

use log::{debug, info};

use aether_shared_types::governance::{
    Proposal, ProposalStatus, TallyParams, TallyResult, ValidatorGovInfo, Vote, WeightedVoteOption,
};
use aether_shared_types::liquid::DerivativeDenom;
use aether_shared_types::staking::Validator;
use aether_shared_types::{Dec, Int, MathError, ValAddress};

use crate::derivatives::HoldingsScanner;
use crate::error::TallyError;
use crate::keepers::{
    BankKeeper, EarnKeeper, GovKeeper, LiquidKeeper, SavingsKeeper, StakingKeeper,
};

/// Why a proposal passed or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TallyDecision {
    /// Nothing is bonded, so no quorum can be measured.
    NoBondedTokens,
    QuorumNotReached,
    /// Every counted vote was Abstain.
    AllAbstain,
    Vetoed,
    Passed,
    Rejected,
}

impl TallyDecision {
    pub fn passes(self) -> bool {
        matches!(self, TallyDecision::Passed)
    }

    /// Deposits are burned when quorum is missed or the proposal is vetoed.
    pub fn burns_deposits(self) -> bool {
        matches!(self, TallyDecision::QuorumNotReached | TallyDecision::Vetoed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyOutcome {
    pub passes: bool,
    pub burn_deposits: bool,
    pub results: TallyResult,
    pub decision: TallyDecision,
}

impl TallyOutcome {
    fn new(decision: TallyDecision, results: TallyResult) -> Self {
        TallyOutcome {
            passes: decision.passes(),
            burn_deposits: decision.burns_deposits(),
            results,
            decision,
        }
    }

    /// `(passes, burn_deposits, results)` as returned by the governance hook.
    pub fn as_tuple(&self) -> (bool, bool, TallyResult) {
        (self.passes, self.burn_deposits, self.results.clone())
    }
}

/// Tallies proposals against the staking, bank, savings, earn and liquid
/// modules. All of them are only read.
pub struct TallyHandler<'a, S, B, V, E, L> {
    staking: &'a S,
    holdings: HoldingsScanner<'a, B, V, E, L>,
    liquid: &'a L,
}

impl<'a, S, B, V, E, L> TallyHandler<'a, S, B, V, E, L>
where
    S: StakingKeeper,
    B: BankKeeper,
    V: SavingsKeeper,
    E: EarnKeeper,
    L: LiquidKeeper,
{
    pub fn new(staking: &'a S, bank: &'a B, savings: &'a V, earn: &'a E, liquid: &'a L) -> Self {
        Self {
            staking,
            holdings: HoldingsScanner::new(bank, savings, earn, liquid),
            liquid,
        }
    }

    /// Tallies `proposal` and deletes its votes once a decision is reached.
    pub fn tally<G: GovKeeper>(
        &self,
        gov: &mut G,
        proposal: &Proposal,
    ) -> Result<TallyOutcome, TallyError> {
        let params = gov.tally_params();
        params.validate()?;

        let mut votes = gov.votes(proposal.proposal_id);
        votes.sort_by(|a, b| a.voter.cmp(&b.voter));

        let mut pass = TallyPass::new(self.staking.bonded_validators_by_power());
        for vote in &votes {
            self.count_vote(&mut pass, vote)?;
        }
        pass.count_validators()?;

        let decision = decide(
            &params,
            &pass.results,
            pass.total_voting_power,
            self.staking.total_bonded_tokens(),
        )?;

        for vote in &votes {
            gov.delete_vote(proposal.proposal_id, &vote.voter);
        }

        info!(
            "Tallied proposal {}: {:?} with {} votes, total power {}",
            proposal.proposal_id,
            decision,
            votes.len(),
            pass.total_voting_power
        );
        Ok(TallyOutcome::new(decision, pass.results))
    }

    /// Tallies `proposal` and records the result and final status on it.
    pub fn finalize<G: GovKeeper>(
        &self,
        gov: &mut G,
        proposal: &mut Proposal,
    ) -> Result<TallyOutcome, TallyError> {
        let outcome = self.tally(gov, proposal)?;
        proposal.status = if outcome.passes {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Rejected
        };
        proposal.final_tally_result = outcome.results.clone();
        Ok(outcome)
    }

    fn count_vote(&self, pass: &mut TallyPass, vote: &Vote) -> Result<(), TallyError> {
        let operator = ValAddress::from(&vote.voter);
        if let Some(val) = pass.validators.get_mut(&operator) {
            val.vote = vote.options.clone();
        }

        for delegation in self.staking.delegations(&vote.voter) {
            let Some(val) = pass.validators.get_mut(&delegation.validator) else {
                continue;
            };
            val.delegator_deductions = val.delegator_deductions.checked_add(delegation.shares)?;
            let power = delegation
                .shares
                .checked_mul_int(&val.bonded_tokens)?
                .checked_quo(val.delegator_shares)?;
            pass.distribute(&vote.options, power)?;
        }

        let holdings = self.holdings.holdings_of(&vote.voter)?;
        for coin in holdings.to_coins() {
            // Holdings are sorted by denom, anything past the first
            // non-derivative is ignored.
            let validator = match DerivativeDenom::parse(&coin.denom) {
                DerivativeDenom::Derivative(validator) => validator,
                DerivativeDenom::NotDerivative => {
                    debug!("Stopping derivative scan of {} at {}", vote.voter, coin.denom);
                    break;
                }
            };
            if let Some(val) = pass.validators.get_mut(&validator) {
                val.delegator_deductions =
                    val.delegator_deductions.checked_add(coin.amount.to_dec()?)?;
            }

            let staked = self
                .liquid
                .staked_tokens_for_derivatives(std::slice::from_ref(&coin))
                .map_err(|source| TallyError::Redemption {
                    denom: coin.denom.clone(),
                    source,
                })?;
            pass.distribute(&vote.options, staked.amount.to_dec()?)?;
        }

        debug!("Counted vote of {} on proposal {}", vote.voter, vote.proposal_id);
        Ok(())
    }
}

/// Working state of a single tally.
struct TallyPass {
    validators: BTreeMap<ValAddress, ValidatorGovInfo>,
    results: TallyResult,
    total_voting_power: Dec,
}

impl TallyPass {
    fn new(bonded: Vec<Validator>) -> Self {
        let validators = bonded
            .into_iter()
            .map(|v| {
                let info = ValidatorGovInfo::new(
                    v.operator.clone(),
                    v.bonded_tokens(),
                    v.delegator_shares,
                );
                (v.operator, info)
            })
            .collect();
        TallyPass {
            validators,
            results: TallyResult::empty(),
            total_voting_power: Dec::zero(),
        }
    }

    fn distribute(&mut self, options: &[WeightedVoteOption], power: Dec) -> Result<(), MathError> {
        add_weighted(&mut self.results, &mut self.total_voting_power, options, power)
    }

    /// Adds the power validators keep after delegator deductions.
    fn count_validators(&mut self) -> Result<(), TallyError> {
        for val in self.validators.values() {
            if val.vote.is_empty() {
                continue;
            }
            let remaining = val
                .delegator_shares
                .checked_sub(val.delegator_deductions)
                .map_err(|_| TallyError::DeductionsExceedShares {
                    validator: val.address.clone(),
                    shares: val.delegator_shares,
                    deductions: val.delegator_deductions,
                })?;
            let power = remaining
                .checked_mul_int(&val.bonded_tokens)?
                .checked_quo(val.delegator_shares)?;
            add_weighted(&mut self.results, &mut self.total_voting_power, &val.vote, power)?;
        }
        Ok(())
    }
}

fn add_weighted(
    results: &mut TallyResult,
    total: &mut Dec,
    options: &[WeightedVoteOption],
    power: Dec,
) -> Result<(), MathError> {
    for option in options {
        results.add_power(option.option, power.checked_mul(option.weight)?)?;
    }
    *total = total.checked_add(power)?;
    Ok(())
}

fn decide(
    params: &TallyParams,
    results: &TallyResult,
    total_voting_power: Dec,
    total_bonded: Int,
) -> Result<TallyDecision, TallyError> {
    if total_bonded.is_zero() {
        return Ok(TallyDecision::NoBondedTokens);
    }

    let participation = total_voting_power.checked_quo(total_bonded.to_dec()?)?;
    if participation < params.quorum {
        return Ok(TallyDecision::QuorumNotReached);
    }

    // Rounding of split votes can leave abstain a hair above the total.
    let non_abstaining = total_voting_power.checked_sub(results.abstain).ok();
    if non_abstaining == Some(Dec::zero()) {
        return Ok(TallyDecision::AllAbstain);
    }

    if results.no_with_veto.checked_quo(total_voting_power)? > params.veto_threshold {
        return Ok(TallyDecision::Vetoed);
    }

    match non_abstaining {
        Some(base) if results.yes.checked_quo(base)? > params.threshold => {
            Ok(TallyDecision::Passed)
        }
        _ => Ok(TallyDecision::Rejected),
    }
}
