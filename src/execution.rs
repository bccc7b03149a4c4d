multiversx_sc::imports!();

use crate::errors::{
    ERR_FAIL_WITHOUT_MESSAGE, ERR_INSUFFICIENT_FUNDS_TO_PURCHASE, ERR_ONLY_ADMIN,
    ERR_ONLY_CALLABLE_BY_CONTRACT, ERR_ONLY_PASSED_PROPOSALS, ERR_PRICE_INCREASED,
};
use crate::nft_marketplace_proxy;
use crate::types::{ActionCall, ProposalId, ProposalStatus};
use crate::{membership, proposals};

/// The only endpoint an action may invoke on the organization itself.
pub const BUY_NFT_ENDPOINT: &[u8] = b"buyNft";

#[multiversx_sc::module]
pub trait ExecutionModule: membership::MembershipModule + proposals::ProposalsModule {
    // ========================================================
    // ENDPOINT: execute
    // Admins (or the master) run a passed bundle. Any failing
    // action reverts the whole transaction, earlier actions included.
    // ========================================================

    #[endpoint(execute)]
    fn execute(
        &self,
        targets: ManagedVec<ManagedAddress>,
        values: ManagedVec<BigUint>,
        payloads: ManagedVec<ManagedBuffer>,
        description: ManagedBuffer,
    ) {
        let proposal_id = self.get_proposal_id(&targets, &values, &payloads, &description);
        require!(
            self.get_proposal_status(&proposal_id) == ProposalStatus::Passed,
            ERR_ONLY_PASSED_PROPOSALS
        );

        let caller = self.blockchain().get_caller();
        require!(self.is_executor(&caller), ERR_ONLY_ADMIN);

        // Marked before dispatch so a callee cannot run the bundle twice.
        // A failed dispatch reverts the flag with everything else.
        self.proposals(&proposal_id)
            .update(|proposal| proposal.executed = true);

        for index in 0..targets.len() {
            self.dispatch_action(
                &targets.get(index),
                &values.get(index),
                &payloads.get(index),
            );
        }

        self.proposal_executed_event(&proposal_id, &caller);
    }

    // ========================================================
    // ENDPOINT: buyNft
    // Reachable only through `execute`, which dispatches it in-process.
    // ========================================================

    #[payable("EGLD")]
    #[endpoint(buyNft)]
    fn buy_nft(&self, collection: TokenIdentifier, nonce: u64) {
        let caller = self.blockchain().get_caller();
        require!(
            caller == self.blockchain().get_sc_address(),
            ERR_ONLY_CALLABLE_BY_CONTRACT
        );

        let value = self.call_value().egld_value().clone_value();
        self.purchase_collectible(collection, nonce, &value);
    }

    // ========================================================
    // INTERNAL: action dispatch
    // ========================================================

    fn dispatch_action(&self, target: &ManagedAddress, value: &BigUint, payload: &ManagedBuffer) {
        let call: ActionCall<Self::Api> = if payload.is_empty() {
            ActionCall {
                endpoint_name: ManagedBuffer::new(),
                arguments: ManagedVec::new(),
            }
        } else {
            match ActionCall::top_decode(payload.clone()) {
                Ok(call) => call,
                Err(_) => sc_panic!(ERR_FAIL_WITHOUT_MESSAGE),
            }
        };

        if *target == self.blockchain().get_sc_address() {
            self.dispatch_internal_action(&call, value);
            return;
        }

        require!(*value <= self.egld_balance(), ERR_FAIL_WITHOUT_MESSAGE);

        if call.endpoint_name.is_empty() {
            if *value > 0u64 {
                self.send().direct_egld(target, value);
            }
            return;
        }

        let mut contract_call = self
            .tx()
            .to(target)
            .egld(value)
            .raw_call(call.endpoint_name);
        for argument in call.arguments.iter() {
            contract_call = contract_call.argument(&*argument);
        }
        contract_call.sync_call();
    }

    fn dispatch_internal_action(&self, call: &ActionCall<Self::Api>, value: &BigUint) {
        require!(
            call.endpoint_name == ManagedBuffer::from(BUY_NFT_ENDPOINT) && call.arguments.len() == 2,
            ERR_FAIL_WITHOUT_MESSAGE
        );

        let collection = match TokenIdentifier::top_decode(call.arguments.get(0).clone_value()) {
            Ok(collection) => collection,
            Err(_) => sc_panic!(ERR_FAIL_WITHOUT_MESSAGE),
        };
        let nonce = match u64::top_decode(call.arguments.get(1).clone_value()) {
            Ok(nonce) => nonce,
            Err(_) => sc_panic!(ERR_FAIL_WITHOUT_MESSAGE),
        };

        self.purchase_collectible(collection, nonce, value);
    }

    /// Forwards exactly `value` to the marketplace, provided the current
    /// price does not exceed it.
    fn purchase_collectible(&self, collection: TokenIdentifier, nonce: u64, value: &BigUint) {
        require!(*value <= self.egld_balance(), ERR_INSUFFICIENT_FUNDS_TO_PURCHASE);

        let marketplace = self.marketplace_address().get();
        let price: BigUint = self
            .tx()
            .to(&marketplace)
            .typed(nft_marketplace_proxy::NftMarketplaceProxy)
            .get_price(collection.clone(), nonce)
            .returns(ReturnsResult)
            .sync_call();
        require!(price <= *value, ERR_PRICE_INCREASED);

        self.tx()
            .to(&marketplace)
            .typed(nft_marketplace_proxy::NftMarketplaceProxy)
            .buy(collection.clone(), nonce)
            .egld(value)
            .sync_call();

        self.collectible_purchased_event(&collection, nonce, &price);
    }

    fn egld_balance(&self) -> BigUint {
        self.blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("collectiblePurchased")]
    fn collectible_purchased_event(
        &self,
        #[indexed] collection: &TokenIdentifier,
        #[indexed] nonce: u64,
        price: &BigUint,
    );

    #[event("proposalExecuted")]
    fn proposal_executed_event(
        &self,
        #[indexed] proposal_id: &ProposalId<Self::Api>,
        admin: &ManagedAddress,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("marketplaceAddress")]
    fn marketplace_address(&self) -> SingleValueMapper<ManagedAddress>;
}
