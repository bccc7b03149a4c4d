multiversx_sc::imports!();

use crate::errors::{
    ERR_CANNOT_ALTER_MASTER, ERR_MUST_CONTRIBUTE_1_ETH, ERR_ONLY_FOR_MEMBERS, ERR_ONLY_MASTER,
    ERR_SENDER_ALREADY_MEMBER,
};
use crate::types::{Admin, Member};

/// Exact contribution required to join: 1 EGLD
pub const MEMBERSHIP_CONTRIBUTION: u64 = 1_000_000_000_000_000_000;

/// Members, admins and the master account. Admin rights and membership are
/// independent of each other.
#[multiversx_sc::module]
pub trait MembershipModule {
    // ========================================================
    // ENDPOINT: becomeMember
    // ========================================================

    #[endpoint(becomeMember)]
    #[payable("EGLD")]
    fn become_member(&self) {
        let caller = self.blockchain().get_caller();
        require!(self.members(&caller).is_empty(), ERR_SENDER_ALREADY_MEMBER);

        let payment_amount = self.call_value().egld_value().clone_value();
        require!(
            payment_amount == MEMBERSHIP_CONTRIBUTION,
            ERR_MUST_CONTRIBUTE_1_ETH
        );

        let join_index = self.member_count().get();
        self.members(&caller).set(Member {
            is_voter: true,
            join_index,
        });
        self.member_count().set(join_index + 1);

        self.member_added_event(&caller);
    }

    // ========================================================
    // ENDPOINTS: admin management (master only)
    // ========================================================

    #[endpoint(addAdmin)]
    fn add_admin(&self, admin: ManagedAddress) {
        self.require_master();

        self.admins(&admin).set(Admin { is_exec: true });
        self.admin_updated_event(&admin, true);
    }

    #[endpoint(removeAdmin)]
    fn remove_admin(&self, admin: ManagedAddress) {
        self.require_master();
        require!(admin != self.master().get(), ERR_CANNOT_ALTER_MASTER);

        self.admins(&admin).set(Admin { is_exec: false });
        self.admin_updated_event(&admin, false);
    }

    // ========================================================
    // Capability checks
    // ========================================================

    fn is_member(&self, address: &ManagedAddress) -> bool {
        !self.members(address).is_empty()
    }

    fn require_member(&self, address: &ManagedAddress) -> Member {
        require!(self.is_member(address), ERR_ONLY_FOR_MEMBERS);
        self.members(address).get()
    }

    fn require_master(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.master().get(), ERR_ONLY_MASTER);
    }

    #[view(isExecutor)]
    fn is_executor(&self, address: &ManagedAddress) -> bool {
        *address == self.master().get() || self.admin_record(address).is_exec
    }

    fn admin_record(&self, address: &ManagedAddress) -> Admin {
        if self.admins(address).is_empty() {
            return Admin::default();
        }
        self.admins(address).get()
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(members)]
    fn get_member(&self, address: &ManagedAddress) -> OptionalValue<Member> {
        if self.is_member(address) {
            OptionalValue::Some(self.members(address).get())
        } else {
            OptionalValue::None
        }
    }

    #[view(admins)]
    fn get_admin(&self, address: &ManagedAddress) -> Admin {
        self.admin_record(address)
    }

    #[view(memberCount)]
    fn get_member_count(&self) -> u64 {
        self.member_count().get()
    }

    #[view(getMaster)]
    fn get_master(&self) -> ManagedAddress {
        self.master().get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("memberAdded")]
    fn member_added_event(&self, #[indexed] member: &ManagedAddress);

    #[event("adminUpdated")]
    fn admin_updated_event(&self, #[indexed] admin: &ManagedAddress, #[indexed] is_exec: bool);

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("master")]
    fn master(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("members")]
    fn members(&self, address: &ManagedAddress) -> SingleValueMapper<Member>;

    #[storage_mapper("memberCount")]
    fn member_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("admins")]
    fn admins(&self, address: &ManagedAddress) -> SingleValueMapper<Admin>;
}
