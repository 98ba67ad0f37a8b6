//! Data structures for Aether's on-chain governance tally.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{AccAddress, ValAddress};
use crate::math::{Dec, Int, MathError};

/// Enumerates the possible choices for a vote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VoteOption {
    Yes,
    Abstain,
    No,
    NoWithVeto,
}

/// One option of a (possibly split) vote together with its weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WeightedVoteOption {
    pub option: VoteOption,
    pub weight: Dec,
}

impl WeightedVoteOption {
    pub fn new(option: VoteOption, weight: Dec) -> Self {
        WeightedVoteOption { option, weight }
    }
}

/// A vote putting the full weight on a single option.
pub fn non_split_vote(option: VoteOption) -> Vec<WeightedVoteOption> {
    vec![WeightedVoteOption::new(option, Dec::one())]
}

/// Represents a vote cast on a governance proposal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Vote {
    /// The proposal being voted on.
    pub proposal_id: u64,
    /// The account that cast the vote.
    pub voter: AccAddress,
    /// Weighted options; weights are expected to sum to one.
    pub options: Vec<WeightedVoteOption>,
}

impl Vote {
    pub fn new(proposal_id: u64, voter: AccAddress, options: Vec<WeightedVoteOption>) -> Self {
        Vote {
            proposal_id,
            voter,
            options,
        }
    }
}

/// Accumulated voting power per option.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TallyResult {
    pub yes: Dec,
    pub abstain: Dec,
    pub no: Dec,
    pub no_with_veto: Dec,
}

impl TallyResult {
    pub fn empty() -> Self {
        TallyResult::default()
    }

    pub fn add_power(&mut self, option: VoteOption, power: Dec) -> Result<(), MathError> {
        let slot = match option {
            VoteOption::Yes => &mut self.yes,
            VoteOption::Abstain => &mut self.abstain,
            VoteOption::No => &mut self.no,
            VoteOption::NoWithVeto => &mut self.no_with_veto,
        };
        *slot = slot.checked_add(power)?;
        Ok(())
    }

    pub fn total(&self) -> Result<Dec, MathError> {
        self.yes
            .checked_add(self.abstain)?
            .checked_add(self.no)?
            .checked_add(self.no_with_veto)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    VotingPeriod,
    Passed,
    Rejected,
}

/// A governance proposal as seen by the tally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Proposal {
    pub proposal_id: u64,
    pub status: ProposalStatus,
    pub final_tally_result: TallyResult,
}

impl Proposal {
    pub fn new(proposal_id: u64) -> Self {
        Proposal {
            proposal_id,
            status: ProposalStatus::VotingPeriod,
            final_tally_result: TallyResult::empty(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: Dec },
}

/// Thresholds applied when deciding a proposal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct TallyParams {
    /// Minimum fraction of bonded tokens that must vote.
    pub quorum: Dec,
    /// Fraction of non-abstaining power that must vote Yes.
    pub threshold: Dec,
    /// Fraction of all power voting NoWithVeto that vetoes the proposal.
    pub veto_threshold: Dec,
}

impl Default for TallyParams {
    fn default() -> Self {
        TallyParams {
            quorum: Dec::from_raw(Dec::one().raw() * 334u64 / 1000u64),
            threshold: Dec::from_raw(Dec::one().raw() / 2u64),
            veto_threshold: Dec::from_raw(Dec::one().raw() * 334u64 / 1000u64),
        }
    }
}

impl TallyParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("quorum", self.quorum),
            ("threshold", self.threshold),
            ("veto_threshold", self.veto_threshold),
        ] {
            if value > Dec::one() {
                return Err(ParamsError::OutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Per-validator working record for one tally pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorGovInfo {
    pub address: ValAddress,
    pub bonded_tokens: Int,
    pub delegator_shares: Dec,
    /// Shares already counted through delegator votes or derivative holdings.
    pub delegator_deductions: Dec,
    pub vote: Vec<WeightedVoteOption>,
}

impl ValidatorGovInfo {
    pub fn new(address: ValAddress, bonded_tokens: Int, delegator_shares: Dec) -> Self {
        ValidatorGovInfo {
            address,
            bonded_tokens,
            delegator_shares,
            delegator_deductions: Dec::zero(),
            vote: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tally_params() {
        let params = TallyParams::default();
        assert_eq!(params.quorum, "0.334".parse().unwrap());
        assert_eq!(params.threshold, "0.5".parse().unwrap());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_out_of_range() {
        let params = TallyParams {
            quorum: Dec::from_u64(2),
            ..TallyParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::OutOfRange { name: "quorum", .. })
        ));
    }

    #[test]
    fn test_tally_result_accumulates() {
        let mut result = TallyResult::empty();
        result.add_power(VoteOption::Yes, Dec::from_u64(3)).unwrap();
        result.add_power(VoteOption::Yes, Dec::from_u64(2)).unwrap();
        result.add_power(VoteOption::NoWithVeto, Dec::one()).unwrap();
        assert_eq!(result.yes, Dec::from_u64(5));
        assert_eq!(result.total().unwrap(), Dec::from_u64(6));
    }
}
