#![no_std]

multiversx_sc::imports!();

pub mod errors;
pub mod execution;
pub mod membership;
pub mod nft_marketplace_proxy;
pub mod proposals;
pub mod signature;
pub mod status;
pub mod types;
pub mod voting;

use membership::MEMBERSHIP_CONTRIBUTION;
use status::{EXECUTION_WINDOW, VOTING_PERIOD};
use types::Admin;

// ============================================================
// Contract
// ============================================================

/// Membership-gated organization: members join with a fixed contribution,
/// propose action bundles and vote on them (directly or through signed
/// off-chain attestations); admins execute bundles that passed.
#[multiversx_sc::contract]
pub trait GgDao:
    membership::MembershipModule
    + proposals::ProposalsModule
    + signature::SignatureModule
    + voting::VotingModule
    + execution::ExecutionModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    /// The deployer becomes the master account and an executing admin.
    /// `chain_id` is bound into every signed vote.
    #[init]
    fn init(&self, marketplace_address: ManagedAddress, chain_id: ManagedBuffer) {
        let master = self.blockchain().get_caller();
        self.master().set(&master);
        self.admins(&master).set(Admin { is_exec: true });

        self.marketplace_address().set(&marketplace_address);
        self.chain_id().set(&chain_id);
        self.member_count().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getDaoConfig)]
    fn get_dao_config(&self) -> MultiValue5<BigUint, u64, u64, ManagedAddress, ManagedBuffer> {
        (
            BigUint::from(MEMBERSHIP_CONTRIBUTION),
            VOTING_PERIOD,
            EXECUTION_WINDOW,
            self.marketplace_address().get(),
            self.chain_id().get(),
        )
            .into()
    }
}
