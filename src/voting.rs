multiversx_sc::imports!();

use crate::errors::{
    ERR_ALREADY_VOTED, ERR_CANNOT_VOTE_FOR_PROPOSAL, ERR_CAST_VOTE_INCORRECT_1,
    ERR_CAST_VOTE_INCORRECT_2, ERR_CAST_VOTE_INCORRECT_3, ERR_CAST_VOTE_INCORRECT_4,
    ERR_INCORRECT_VOTE, ERR_MEMBER_JOINED_AFTER_PROPOSAL_CREATION, ERR_NOT_A_VALID_MEMBER,
    ERR_PROPOSAL_REQUIRED,
};
use crate::signature::{self, SignatureHalf, CONTRACT_NAME};
use crate::types::{ProposalId, ProposalStatus, VoteStatus};
use crate::{membership, proposals};

#[multiversx_sc::module]
pub trait VotingModule:
    membership::MembershipModule + proposals::ProposalsModule + signature::SignatureModule
{
    // ========================================================
    // ENDPOINT: castVote
    // ========================================================

    #[endpoint(castVote)]
    fn cast_vote(&self, proposal_id: ProposalId<Self::Api>, vote: u8) {
        let caller = self.blockchain().get_caller();
        self.require_member(&caller);

        self.record_vote(&caller, &proposal_id, vote);
    }

    // ========================================================
    // ENDPOINT: castVoteBySig
    // `signer` takes the place of the recovery byte: Ed25519 keys
    // cannot be recovered from a signature.
    // ========================================================

    #[endpoint(castVoteBySig)]
    fn cast_vote_by_sig(
        &self,
        proposal_id: ProposalId<Self::Api>,
        vote: u8,
        signer: ManagedAddress,
        r: SignatureHalf<Self::Api>,
        s: SignatureHalf<Self::Api>,
    ) {
        let domain_separator = self.own_domain_separator();
        self.cast_signed_vote(&domain_separator, &proposal_id, vote, &signer, &r, &s);
    }

    // ========================================================
    // ENDPOINT: castVotesBySig
    // All or nothing: one bad entry fails the whole batch.
    // ========================================================

    #[endpoint(castVotesBySig)]
    fn cast_votes_by_sig(
        &self,
        proposal_ids: ManagedVec<ProposalId<Self::Api>>,
        votes: ManagedVec<u8>,
        signers: ManagedVec<ManagedAddress>,
        rs: ManagedVec<SignatureHalf<Self::Api>>,
        ss: ManagedVec<SignatureHalf<Self::Api>>,
    ) {
        let count = proposal_ids.len();
        require!(count > 0, ERR_PROPOSAL_REQUIRED);
        require!(votes.len() == count, ERR_CAST_VOTE_INCORRECT_1);
        require!(signers.len() == count, ERR_CAST_VOTE_INCORRECT_2);
        require!(rs.len() == count, ERR_CAST_VOTE_INCORRECT_3);
        require!(ss.len() == count, ERR_CAST_VOTE_INCORRECT_4);

        let domain_separator = self.own_domain_separator();
        for index in 0..count {
            self.cast_signed_vote(
                &domain_separator,
                &proposal_ids.get(index),
                votes.get(index),
                &signers.get(index),
                &rs.get(index),
                &ss.get(index),
            );
        }
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn cast_signed_vote(
        &self,
        domain_separator: &ManagedByteArray<Self::Api, 32>,
        proposal_id: &ProposalId<Self::Api>,
        vote: u8,
        signer: &ManagedAddress,
        r: &SignatureHalf<Self::Api>,
        s: &SignatureHalf<Self::Api>,
    ) {
        require!(
            !self.proposals(proposal_id).is_empty(),
            ERR_CANNOT_VOTE_FOR_PROPOSAL
        );
        require!(self.is_member(signer), ERR_NOT_A_VALID_MEMBER);

        let voter = self.recover_vote_signer(domain_separator, proposal_id, vote, signer, r, s);
        self.record_vote(&voter, proposal_id, vote);
    }

    /// Shared by direct and signed votes; `voter` is already known to be a member.
    fn record_vote(&self, voter: &ManagedAddress, proposal_id: &ProposalId<Self::Api>, vote: u8) {
        let vote_status = match VoteStatus::from_choice(vote) {
            Some(vote_status) => vote_status,
            None => sc_panic!(ERR_INCORRECT_VOTE),
        };

        require!(
            self.get_proposal_status(proposal_id) == ProposalStatus::InProgress,
            ERR_CANNOT_VOTE_FOR_PROPOSAL
        );

        let member = self.members(voter).get();
        let mut proposal = self.proposals(proposal_id).get();
        require!(
            member.join_index < proposal.member_snapshot,
            ERR_MEMBER_JOINED_AFTER_PROPOSAL_CREATION
        );
        require!(
            self.votes_tally(proposal_id, voter).is_empty(),
            ERR_ALREADY_VOTED
        );

        self.votes_tally(proposal_id, voter).set(vote_status);
        proposal.total_votes_cast += 1;
        if vote_status == VoteStatus::Yes {
            proposal.yes_votes_cast += 1;
        }
        self.proposals(proposal_id).set(&proposal);

        self.vote_casted_event(proposal_id, voter, vote);
    }

    fn own_domain_separator(&self) -> ManagedByteArray<Self::Api, 32> {
        self.domain_separator(
            &ManagedBuffer::from(CONTRACT_NAME),
            &self.chain_id().get(),
            &self.blockchain().get_sc_address(),
        )
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(votesTally)]
    fn get_votes_tally(&self, proposal_id: &ProposalId<Self::Api>, voter: &ManagedAddress) -> VoteStatus {
        self.votes_tally(proposal_id, voter).get()
    }

    #[view(getDomainSeparator)]
    fn get_domain_separator(&self) -> ManagedByteArray<Self::Api, 32> {
        self.own_domain_separator()
    }

    /// The 32-byte message a member signs off-chain to vote `vote` on `proposal_id`.
    #[view(getVoteDigest)]
    fn get_vote_digest(&self, proposal_id: &ProposalId<Self::Api>, vote: u8) -> ManagedByteArray<Self::Api, 32> {
        let domain_separator = self.own_domain_separator();
        self.vote_digest(&domain_separator, proposal_id, vote)
    }

    #[view(CONTRACT_NAME)]
    fn contract_name(&self) -> ManagedBuffer {
        ManagedBuffer::from(CONTRACT_NAME)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("voteCasted")]
    fn vote_casted_event(
        &self,
        #[indexed] proposal_id: &ProposalId<Self::Api>,
        #[indexed] voter: &ManagedAddress,
        vote: u8,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("chainId")]
    fn chain_id(&self) -> SingleValueMapper<ManagedBuffer>;

    #[storage_mapper("votesTally")]
    fn votes_tally(
        &self,
        proposal_id: &ProposalId<Self::Api>,
        voter: &ManagedAddress,
    ) -> SingleValueMapper<VoteStatus>;
}
