use multiversx_sc::api::ManagedTypeApi;

use crate::types::{Proposal, ProposalStatus};

/// Voting window: 24 hours in seconds
pub const VOTING_PERIOD: u64 = 86_400;

/// A passed proposal can be executed until 31 days after creation
pub const EXECUTION_WINDOW: u64 = 31 * 86_400;

/// 25% participation: total_votes * QUORUM_DIVISOR >= member_snapshot
pub const QUORUM_DIVISOR: u64 = 4;

/// Derives the lifecycle status of a stored proposal at block timestamp `now`.
///
/// Nothing here reads storage, so the same record always yields the same
/// status for the same timestamp. Missing proposals are `NoStatus` and are
/// resolved by the caller.
pub fn proposal_status<M: ManagedTypeApi>(proposal: &Proposal<M>, now: u64) -> ProposalStatus {
    if now <= proposal.created_at + VOTING_PERIOD {
        return ProposalStatus::InProgress;
    }

    if !quorum_reached(proposal.total_votes_cast, proposal.member_snapshot)
        || !majority_reached(proposal.yes_votes_cast, proposal.total_votes_cast)
    {
        return ProposalStatus::Rejected;
    }

    if proposal.executed {
        return ProposalStatus::ExecutionSuccess;
    }

    if now > proposal.created_at + EXECUTION_WINDOW {
        return ProposalStatus::ExecutionSunset;
    }

    ProposalStatus::Passed
}

pub fn quorum_reached(total_votes_cast: u64, member_snapshot: u64) -> bool {
    total_votes_cast * QUORUM_DIVISOR >= member_snapshot
}

/// Strict majority of the cast votes; a tie is not a majority.
pub fn majority_reached(yes_votes_cast: u64, total_votes_cast: u64) -> bool {
    yes_votes_cast * 2 > total_votes_cast
}
