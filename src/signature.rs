multiversx_sc::imports!();

use crate::types::ProposalId;

/// Name field of the signing domain.
pub const CONTRACT_NAME: &[u8] = b"GGDao";

const DOMAIN_TYPE: &[u8] = b"EIP712Domain(string name,string chainId,address verifyingContract)";
const VOTE_TYPE: &[u8] = b"Vote(uint256 proposalId,uint8 vote)";
const DIGEST_PREFIX: &[u8] = b"\x19\x01";

pub const SIGNATURE_HALF_LEN: usize = 32;

/// One half (`r` or `s`) of an Ed25519 signature.
pub type SignatureHalf<M> = ManagedByteArray<M, SIGNATURE_HALF_LEN>;

/// Typed-data digests for off-chain votes. Everything here is computed from
/// its arguments alone; callers supply the domain explicitly.
#[multiversx_sc::module]
pub trait SignatureModule {
    fn domain_separator(
        &self,
        name: &ManagedBuffer,
        chain_id: &ManagedBuffer,
        verifying_contract: &ManagedAddress,
    ) -> ManagedByteArray<Self::Api, 32> {
        let mut encoded = ManagedBuffer::new();
        encoded.append(self.crypto().keccak256(ManagedBuffer::from(DOMAIN_TYPE)).as_managed_buffer());
        encoded.append(self.crypto().keccak256(name).as_managed_buffer());
        encoded.append(self.crypto().keccak256(chain_id).as_managed_buffer());
        encoded.append(verifying_contract.as_managed_buffer());

        self.crypto().keccak256(encoded)
    }

    fn vote_struct_hash(
        &self,
        proposal_id: &ProposalId<Self::Api>,
        vote: u8,
    ) -> ManagedByteArray<Self::Api, 32> {
        let mut vote_word = [0u8; 32];
        vote_word[31] = vote;

        let mut encoded = ManagedBuffer::new();
        encoded.append(self.crypto().keccak256(ManagedBuffer::from(VOTE_TYPE)).as_managed_buffer());
        encoded.append(proposal_id.as_managed_buffer());
        encoded.append_bytes(&vote_word);

        self.crypto().keccak256(encoded)
    }

    fn vote_digest(
        &self,
        domain_separator: &ManagedByteArray<Self::Api, 32>,
        proposal_id: &ProposalId<Self::Api>,
        vote: u8,
    ) -> ManagedByteArray<Self::Api, 32> {
        let mut encoded = ManagedBuffer::new_from_bytes(DIGEST_PREFIX);
        encoded.append(domain_separator.as_managed_buffer());
        encoded.append(self.vote_struct_hash(proposal_id, vote).as_managed_buffer());

        self.crypto().keccak256(encoded)
    }

    /// Checks that `signer` produced `(r, s)` over the vote digest and
    /// returns the signer. An invalid signature aborts the transaction.
    fn recover_vote_signer(
        &self,
        domain_separator: &ManagedByteArray<Self::Api, 32>,
        proposal_id: &ProposalId<Self::Api>,
        vote: u8,
        signer: &ManagedAddress,
        r: &SignatureHalf<Self::Api>,
        s: &SignatureHalf<Self::Api>,
    ) -> ManagedAddress {
        let digest = self.vote_digest(domain_separator, proposal_id, vote);

        let mut signature = r.as_managed_buffer().clone();
        signature.append(s.as_managed_buffer());

        self.crypto().verify_ed25519(
            signer.as_managed_buffer(),
            digest.as_managed_buffer(),
            &signature,
        );

        signer.clone()
    }
}
