//! Ballot counting and rejection escalation.

use std::collections::BTreeMap;

use crate::domain::rules::MAX_REJECTIONS;
use crate::domain::state::VotePhase;

/// Where a voting attempt stands after a ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Pending { cast: usize, needed: usize },
    Approved,
    Rejected,
}

/// Strict majority of `electorate`; ties reject.
pub fn is_approved(yes: usize, electorate: usize) -> bool {
    yes * 2 > electorate
}

/// Tally the ballots once every player has voted.
pub fn tally(votes: &BTreeMap<String, bool>, electorate: usize) -> VoteOutcome {
    if votes.len() < electorate {
        return VoteOutcome::Pending {
            cast: votes.len(),
            needed: electorate,
        };
    }
    let yes = votes.values().filter(|&&v| v).count();
    if is_approved(yes, electorate) {
        VoteOutcome::Approved
    } else {
        VoteOutcome::Rejected
    }
}

/// What happens after a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Same leader proposes again in the next phase.
    Retry { phase: VotePhase, rejections: u8 },
    /// Third consecutive rejection: the enemies take the round.
    Forfeit,
}

/// Escalate given the rejection count before this rejection.
pub fn escalate(prior_rejections: u8) -> Escalation {
    let rejections = prior_rejections.saturating_add(1);
    if rejections >= MAX_REJECTIONS {
        Escalation::Forfeit
    } else {
        Escalation::Retry {
            phase: VotePhase::after_rejections(rejections),
            rejections,
        }
    }
}
