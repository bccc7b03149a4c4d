multiversx_sc::imports!();

use crate::errors::{
    ERR_DESCRIPTION_CANNOT_BE_EMPTY, ERR_DESCRIPTION_MORE_THAN_250_CHARS,
    ERR_PROPOSAL_CANNOT_BE_EMPTY, ERR_PROPOSAL_ENCODING, ERR_PROPOSAL_EXISTS, ERR_PROPOSAL_INCORRECT_PARAMS_1,
    ERR_PROPOSAL_INCORRECT_PARAMS_2,
};
use crate::membership;
use crate::status;
use crate::types::{Proposal, ProposalId, ProposalStatus};

/// Maximum description length, in bytes
pub const MAX_DESCRIPTION_LEN: usize = 250;

#[multiversx_sc::module]
pub trait ProposalsModule: membership::MembershipModule {
    // ========================================================
    // ENDPOINT: propose
    // Any member can propose. Identical content maps to the same id.
    // ========================================================

    #[endpoint(propose)]
    fn propose(
        &self,
        targets: ManagedVec<ManagedAddress>,
        values: ManagedVec<BigUint>,
        payloads: ManagedVec<ManagedBuffer>,
        description: ManagedBuffer,
    ) -> ProposalId<Self::Api> {
        let caller = self.blockchain().get_caller();
        self.require_member(&caller);

        require!(!targets.is_empty(), ERR_PROPOSAL_CANNOT_BE_EMPTY);
        require!(
            values.len() == targets.len(),
            ERR_PROPOSAL_INCORRECT_PARAMS_1
        );
        require!(
            payloads.len() == targets.len(),
            ERR_PROPOSAL_INCORRECT_PARAMS_2
        );
        require!(!description.is_empty(), ERR_DESCRIPTION_CANNOT_BE_EMPTY);
        require!(
            description.len() <= MAX_DESCRIPTION_LEN,
            ERR_DESCRIPTION_MORE_THAN_250_CHARS
        );

        let proposal_id = self.get_proposal_id(&targets, &values, &payloads, &description);
        // A stored id stays taken, whatever the proposal's status.
        require!(self.proposals(&proposal_id).is_empty(), ERR_PROPOSAL_EXISTS);

        let proposal = Proposal {
            id: proposal_id.clone(),
            targets,
            values,
            payloads,
            description,
            created_at: self.blockchain().get_block_timestamp(),
            member_snapshot: self.member_count().get(),
            yes_votes_cast: 0,
            total_votes_cast: 0,
            executed: false,
        };
        self.proposals(&proposal_id).set(&proposal);

        self.proposal_created_event(
            &proposal_id,
            &caller,
            &proposal.targets,
            &proposal.values,
            &proposal.payloads,
            &proposal.description,
        );

        proposal_id
    }

    // ========================================================
    // Identity
    // ========================================================

    /// keccak-256 over the nested encoding of the three action lists followed
    /// by the raw description bytes.
    #[view(getProposalId)]
    fn get_proposal_id(
        &self,
        targets: &ManagedVec<ManagedAddress>,
        values: &ManagedVec<BigUint>,
        payloads: &ManagedVec<ManagedBuffer>,
        description: &ManagedBuffer,
    ) -> ProposalId<Self::Api> {
        let mut encoded = ManagedBuffer::new();
        require!(
            targets.dep_encode(&mut encoded).is_ok()
                && values.dep_encode(&mut encoded).is_ok()
                && payloads.dep_encode(&mut encoded).is_ok(),
            ERR_PROPOSAL_ENCODING
        );
        encoded.append(description);

        self.crypto().keccak256(encoded)
    }

    // ========================================================
    // Status
    // ========================================================

    #[view(getProposalStatus)]
    fn get_proposal_status(&self, proposal_id: &ProposalId<Self::Api>) -> ProposalStatus {
        if self.proposals(proposal_id).is_empty() {
            return ProposalStatus::NoStatus;
        }

        let proposal = self.proposals(proposal_id).get();
        status::proposal_status(&proposal, self.blockchain().get_block_timestamp())
    }

    #[view(proposals)]
    fn get_proposal(&self, proposal_id: &ProposalId<Self::Api>) -> OptionalValue<Proposal<Self::Api>> {
        if self.proposals(proposal_id).is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(self.proposals(proposal_id).get())
        }
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: &ProposalId<Self::Api>,
        #[indexed] proposer: &ManagedAddress,
        #[indexed] targets: &ManagedVec<ManagedAddress>,
        #[indexed] values: &ManagedVec<BigUint>,
        #[indexed] payloads: &ManagedVec<ManagedBuffer>,
        description: &ManagedBuffer,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("proposals")]
    fn proposals(&self, proposal_id: &ProposalId<Self::Api>) -> SingleValueMapper<Proposal<Self::Api>>;
}
