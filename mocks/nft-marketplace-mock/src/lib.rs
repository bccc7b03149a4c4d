#![no_std]

multiversx_sc::imports!();

/// Stand-in marketplace for scenario tests: every collectible costs the
/// same fixed price and goes to whoever pays it first.
#[multiversx_sc::contract]
pub trait NftMarketplaceMock {
    #[init]
    fn init(&self, price: BigUint) {
        self.price().set(&price);
    }

    #[view(getPrice)]
    fn get_price(&self, _collection: TokenIdentifier, _nonce: u64) -> BigUint {
        self.price().get()
    }

    #[endpoint(buy)]
    #[payable("EGLD")]
    fn buy(&self, collection: TokenIdentifier, nonce: u64) {
        let payment = self.call_value().egld_value().clone_value();
        require!(payment >= self.price().get(), "Insufficient payment");
        require!(
            self.owner_of(&collection, nonce).is_empty(),
            "Already sold"
        );

        let buyer = self.blockchain().get_caller();
        self.owner_of(&collection, nonce).set(&buyer);
    }

    #[view(ownerOf)]
    #[storage_mapper("ownerOf")]
    fn owner_of(&self, collection: &TokenIdentifier, nonce: u64) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("price")]
    fn price(&self) -> SingleValueMapper<BigUint>;
}
