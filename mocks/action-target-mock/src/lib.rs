#![no_std]

multiversx_sc::imports!();

/// Generic call target for scenario tests. Records every call it accepts;
/// `failAction` always fails.
#[multiversx_sc::contract]
pub trait ActionTargetMock {
    #[init]
    fn init(&self) {}

    #[endpoint(recordAction)]
    #[payable("EGLD")]
    fn record_action(&self, label: ManagedBuffer) {
        let payment = self.call_value().egld_value().clone_value();
        self.received().update(|received| *received += &payment);
        self.labels().push(&label);
    }

    #[endpoint(failAction)]
    #[payable("EGLD")]
    fn fail_action(&self) {
        sc_panic!("ACTION_TARGET_FAILED");
    }

    #[view(getReceived)]
    #[storage_mapper("received")]
    fn received(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("labels")]
    fn labels(&self) -> VecMapper<ManagedBuffer>;
}
