// Shared scenario setup for the GGDao whitebox tests.
//
// Members are backed by Ed25519 keys so that they can sign votes off-chain:
// a member's account address is its verifying key.

#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use multiversx_sc::codec::TopEncode;
use multiversx_sc_scenario::imports::*;

use action_target_mock::ActionTargetMock;
use gg_dao::execution::ExecutionModule;
use gg_dao::membership::MembershipModule;
use gg_dao::proposals::ProposalsModule;
use gg_dao::types::{ActionCall, ProposalId, ProposalStatus};
use gg_dao::voting::VotingModule;
use gg_dao::GgDao;
use nft_marketplace_mock::NftMarketplaceMock;

pub const OWNER: TestAddress = TestAddress::new("owner");
pub const ADMIN: TestAddress = TestAddress::new("admin");
pub const OUTSIDER: TestAddress = TestAddress::new("outsider");

pub const GG_DAO_ADDRESS: TestSCAddress = TestSCAddress::new("gg-dao");
pub const MARKETPLACE_ADDRESS: TestSCAddress = TestSCAddress::new("nft-marketplace");
pub const ACTION_TARGET_ADDRESS: TestSCAddress = TestSCAddress::new("action-target");

pub const GG_DAO_CODE: MxscPath = MxscPath::new("output/gg-dao.mxsc.json");
pub const MARKETPLACE_CODE: MxscPath =
    MxscPath::new("mocks/nft-marketplace-mock/output/nft-marketplace-mock.mxsc.json");
pub const ACTION_TARGET_CODE: MxscPath =
    MxscPath::new("mocks/action-target-mock/output/action-target-mock.mxsc.json");

pub const CHAIN_ID: &str = "local-testnet";
pub const ONE_EGLD: u64 = 1_000_000_000_000_000_000;
pub const HALF_EGLD: u64 = ONE_EGLD / 2;
pub const DAY: u64 = 86_400;
pub const START_TIMESTAMP: u64 = 1_700_000_000;

pub const NFT_COLLECTION: &str = "GGNFT-a1b2c3";
pub const NFT_NONCE: u64 = 11;

pub const VOTE_YES: u8 = 1;
pub const VOTE_NO: u8 = 2;

pub struct Member {
    pub key: SigningKey,
    pub address: Address,
}

impl Member {
    pub fn new(seed: u8) -> Self {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let address = Address::from(key.verifying_key().to_bytes());
        Member { key, address }
    }

    /// Splits the Ed25519 signature over `digest` into its `(r, s)` halves.
    pub fn sign(&self, digest: &[u8; 32]) -> ([u8; 32], [u8; 32]) {
        let signature = self.key.sign(digest).to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&signature[..32]);
        s.copy_from_slice(&signature[32..]);
        (r, s)
    }
}

// ============================================================
// Proposal fixtures
// ============================================================

#[derive(Clone)]
pub enum Payload {
    Empty,
    Call(&'static str, Vec<Vec<u8>>),
    Raw(Vec<u8>),
}

#[derive(Clone)]
pub struct Action {
    pub target: Address,
    pub value: u64,
    pub payload: Payload,
}

#[derive(Clone)]
pub struct TestProposal {
    pub actions: Vec<Action>,
    pub description: String,
}

impl TestProposal {
    pub fn new(description: &str) -> Self {
        TestProposal {
            actions: Vec::new(),
            description: description.to_string(),
        }
    }

    pub fn action(mut self, target: Address, value: u64, payload: Payload) -> Self {
        self.actions.push(Action {
            target,
            value,
            payload,
        });
        self
    }

    pub fn targets(&self) -> ManagedVec<DebugApi, ManagedAddress<DebugApi>> {
        self.actions
            .iter()
            .map(|action| ManagedAddress::from(&action.target))
            .collect()
    }

    pub fn values(&self) -> ManagedVec<DebugApi, BigUint<DebugApi>> {
        self.actions
            .iter()
            .map(|action| BigUint::from(action.value))
            .collect()
    }

    pub fn payloads(&self) -> ManagedVec<DebugApi, ManagedBuffer<DebugApi>> {
        self.actions
            .iter()
            .map(|action| encode_payload(&action.payload))
            .collect()
    }

    pub fn description(&self) -> ManagedBuffer<DebugApi> {
        ManagedBuffer::from(self.description.as_bytes())
    }
}

pub fn encode_payload(payload: &Payload) -> ManagedBuffer<DebugApi> {
    match payload {
        Payload::Empty => ManagedBuffer::new(),
        Payload::Call(endpoint, arguments) => {
            let call = ActionCall::<DebugApi> {
                endpoint_name: ManagedBuffer::from(endpoint.as_bytes()),
                arguments: arguments
                    .iter()
                    .map(|argument| ManagedBuffer::from(argument.as_slice()))
                    .collect(),
            };
            let mut encoded = ManagedBuffer::new();
            call.top_encode(&mut encoded).unwrap();
            encoded
        },
        Payload::Raw(bytes) => ManagedBuffer::from(bytes.as_slice()),
    }
}

pub fn record_action(label: &str) -> Payload {
    Payload::Call("recordAction", vec![label.as_bytes().to_vec()])
}

pub fn buy_nft(collection: &str, nonce: u64) -> Payload {
    let mut encoded_nonce = Vec::new();
    nonce.top_encode(&mut encoded_nonce).unwrap();
    Payload::Call("buyNft", vec![collection.as_bytes().to_vec(), encoded_nonce])
}

/// Two calls on the generic action target, 1 EGLD each.
pub fn two_recorded_actions() -> TestProposal {
    TestProposal::new("dummy description")
        .action(
            ACTION_TARGET_ADDRESS.to_address(),
            ONE_EGLD,
            record_action("first"),
        )
        .action(
            ACTION_TARGET_ADDRESS.to_address(),
            ONE_EGLD,
            record_action("second"),
        )
}

pub fn internal_nft_purchase(value: u64) -> TestProposal {
    TestProposal::new("buy a collectible").action(
        GG_DAO_ADDRESS.to_address(),
        value,
        buy_nft(NFT_COLLECTION, NFT_NONCE),
    )
}

// ============================================================
// World setup
// ============================================================

pub struct GgDaoSetup {
    pub world: ScenarioWorld,
    pub members: Vec<Member>,
}

pub fn world() -> ScenarioWorld {
    let mut world = ScenarioWorld::new();
    world.register_contract(GG_DAO_CODE, gg_dao::ContractBuilder);
    world.register_contract(MARKETPLACE_CODE, nft_marketplace_mock::ContractBuilder);
    world.register_contract(ACTION_TARGET_CODE, action_target_mock::ContractBuilder);
    world
}

impl GgDaoSetup {
    /// Deploys the organization and its collaborators, then lets
    /// `member_count` key-backed accounts join.
    pub fn new(member_count: u8) -> Self {
        let mut world = world();

        world.account(OWNER).nonce(1).balance(ONE_EGLD);
        world.account(ADMIN).nonce(1).balance(ONE_EGLD);
        world.account(OUTSIDER).nonce(1).balance(2 * ONE_EGLD);
        world.current_block().block_timestamp(START_TIMESTAMP);

        world
            .tx()
            .from(OWNER)
            .raw_deploy()
            .code(MARKETPLACE_CODE)
            .new_address(MARKETPLACE_ADDRESS)
            .whitebox(nft_marketplace_mock::contract_obj, |sc| {
                sc.init(BigUint::from(ONE_EGLD));
            });

        world
            .tx()
            .from(OWNER)
            .raw_deploy()
            .code(ACTION_TARGET_CODE)
            .new_address(ACTION_TARGET_ADDRESS)
            .whitebox(action_target_mock::contract_obj, |sc| {
                sc.init();
            });

        world
            .tx()
            .from(OWNER)
            .raw_deploy()
            .code(GG_DAO_CODE)
            .new_address(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.init(
                    ManagedAddress::from(MARKETPLACE_ADDRESS.to_address()),
                    ManagedBuffer::from(CHAIN_ID),
                );
            });

        let mut setup = GgDaoSetup {
            world,
            members: Vec::new(),
        };
        for _ in 0..member_count {
            setup.add_member();
        }
        setup
    }

    /// Creates a funded key-backed account and makes it join.
    pub fn add_member(&mut self) -> usize {
        let index = self.members.len();
        let member = Member::new(index as u8 + 1);

        self.world
            .account(&member.address)
            .nonce(1)
            .balance(2 * ONE_EGLD);
        self.world
            .tx()
            .from(&member.address)
            .to(GG_DAO_ADDRESS)
            .egld(ONE_EGLD)
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.become_member();
            });

        self.members.push(member);
        index
    }

    pub fn member(&self, index: usize) -> Address {
        self.members[index].address.clone()
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    // ========================================================
    // Proposals
    // ========================================================

    pub fn proposal_id(&mut self, proposal: &TestProposal) -> [u8; 32] {
        let mut proposal_id = [0u8; 32];
        self.world
            .query()
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                proposal_id = sc
                    .get_proposal_id(
                        &proposal.targets(),
                        &proposal.values(),
                        &proposal.payloads(),
                        &proposal.description(),
                    )
                    .to_byte_array();
            });
        proposal_id
    }

    pub fn propose(&mut self, proposer: &Address, proposal: &TestProposal) -> [u8; 32] {
        let mut proposal_id = [0u8; 32];
        self.world
            .tx()
            .from(proposer)
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                proposal_id = sc
                    .propose(
                        proposal.targets(),
                        proposal.values(),
                        proposal.payloads(),
                        proposal.description(),
                    )
                    .to_byte_array();
            });
        proposal_id
    }

    pub fn propose_expect_err(&mut self, proposer: &Address, proposal: &TestProposal, err: &str) {
        self.world
            .tx()
            .from(proposer)
            .to(GG_DAO_ADDRESS)
            .returns(ExpectError(4, err))
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.propose(
                    proposal.targets(),
                    proposal.values(),
                    proposal.payloads(),
                    proposal.description(),
                );
            });
    }

    pub fn status(&mut self, proposal_id: &[u8; 32]) -> ProposalStatus {
        let mut status = ProposalStatus::NoStatus;
        self.world
            .query()
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                status = sc.get_proposal_status(&managed_id(proposal_id));
            });
        status
    }

    /// `(yes_votes_cast, total_votes_cast, executed)`
    pub fn tally(&mut self, proposal_id: &[u8; 32]) -> (u64, u64, bool) {
        let mut tally = (0, 0, false);
        self.world
            .query()
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                let proposal = sc.proposals(&managed_id(proposal_id)).get();
                tally = (
                    proposal.yes_votes_cast,
                    proposal.total_votes_cast,
                    proposal.executed,
                );
            });
        tally
    }

    // ========================================================
    // Votes
    // ========================================================

    pub fn vote(&mut self, voter: &Address, proposal_id: &[u8; 32], vote: u8) {
        self.world
            .tx()
            .from(voter)
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.cast_vote(managed_id(proposal_id), vote);
            });
    }

    pub fn vote_expect_err(&mut self, voter: &Address, proposal_id: &[u8; 32], vote: u8, err: &str) {
        self.world
            .tx()
            .from(voter)
            .to(GG_DAO_ADDRESS)
            .returns(ExpectError(4, err))
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.cast_vote(managed_id(proposal_id), vote);
            });
    }

    /// Members 0..3 vote yes, members 3..5 vote no.
    pub fn three_yes_two_no(&mut self, proposal_id: &[u8; 32]) {
        for index in 0..3 {
            let voter = self.member(index);
            self.vote(&voter, proposal_id, VOTE_YES);
        }
        for index in 3..5 {
            let voter = self.member(index);
            self.vote(&voter, proposal_id, VOTE_NO);
        }
    }

    pub fn vote_tally_of(&mut self, proposal_id: &[u8; 32], voter: &Address) -> u8 {
        let mut choice = 0;
        self.world
            .query()
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                choice = sc
                    .get_votes_tally(&managed_id(proposal_id), &ManagedAddress::from(voter))
                    .as_choice();
            });
        choice
    }

    pub fn vote_digest(&mut self, proposal_id: &[u8; 32], vote: u8) -> [u8; 32] {
        let mut digest = [0u8; 32];
        self.world
            .query()
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                digest = sc
                    .get_vote_digest(&managed_id(proposal_id), vote)
                    .to_byte_array();
            });
        digest
    }

    /// Signs `(proposal_id, vote)` with the key of member `signer`.
    pub fn signed_vote(&mut self, signer: usize, proposal_id: &[u8; 32], vote: u8) -> SignedVote {
        let digest = self.vote_digest(proposal_id, vote);
        let member = &self.members[signer];
        let (r, s) = member.sign(&digest);
        SignedVote {
            proposal_id: *proposal_id,
            vote,
            signer: member.address.clone(),
            r,
            s,
        }
    }

    pub fn cast_signed(&mut self, relayer: &Address, signed: &SignedVote) {
        self.world
            .tx()
            .from(relayer)
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.cast_vote_by_sig(
                    managed_id(&signed.proposal_id),
                    signed.vote,
                    ManagedAddress::from(&signed.signer),
                    ManagedByteArray::new_from_bytes(&signed.r),
                    ManagedByteArray::new_from_bytes(&signed.s),
                );
            });
    }

    pub fn cast_signed_expect_err(&mut self, relayer: &Address, signed: &SignedVote, err: &str) {
        self.cast_signed_expect_status(relayer, signed, 4, err);
    }

    pub fn cast_signed_expect_status(
        &mut self,
        relayer: &Address,
        signed: &SignedVote,
        status: u64,
        err: &str,
    ) {
        self.world
            .tx()
            .from(relayer)
            .to(GG_DAO_ADDRESS)
            .returns(ExpectError(status, err))
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.cast_vote_by_sig(
                    managed_id(&signed.proposal_id),
                    signed.vote,
                    ManagedAddress::from(&signed.signer),
                    ManagedByteArray::new_from_bytes(&signed.r),
                    ManagedByteArray::new_from_bytes(&signed.s),
                );
            });
    }

    pub fn cast_batch(&mut self, relayer: &Address, batch: &SignedBatch) {
        self.world
            .tx()
            .from(relayer)
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.cast_votes_by_sig(
                    batch.proposal_ids(),
                    batch.votes(),
                    batch.signers(),
                    batch.rs(),
                    batch.ss(),
                );
            });
    }

    pub fn cast_batch_expect_err(&mut self, relayer: &Address, batch: &SignedBatch, err: &str) {
        self.world
            .tx()
            .from(relayer)
            .to(GG_DAO_ADDRESS)
            .returns(ExpectError(4, err))
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.cast_votes_by_sig(
                    batch.proposal_ids(),
                    batch.votes(),
                    batch.signers(),
                    batch.rs(),
                    batch.ss(),
                );
            });
    }

    // ========================================================
    // Execution
    // ========================================================

    pub fn execute(&mut self, executor: &Address, proposal: &TestProposal) {
        self.world
            .tx()
            .from(executor)
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.execute(
                    proposal.targets(),
                    proposal.values(),
                    proposal.payloads(),
                    proposal.description(),
                );
            });
    }

    pub fn execute_expect_err(&mut self, executor: &Address, proposal: &TestProposal, err: &str) {
        self.world
            .tx()
            .from(executor)
            .to(GG_DAO_ADDRESS)
            .returns(ExpectError(4, err))
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.execute(
                    proposal.targets(),
                    proposal.values(),
                    proposal.payloads(),
                    proposal.description(),
                );
            });
    }

    pub fn add_admin(&mut self, admin: TestAddress) {
        self.world
            .tx()
            .from(OWNER)
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.add_admin(ManagedAddress::from(admin.to_address()));
            });
    }

    pub fn remove_admin(&mut self, admin: TestAddress) {
        self.world
            .tx()
            .from(OWNER)
            .to(GG_DAO_ADDRESS)
            .whitebox(gg_dao::contract_obj, |sc| {
                sc.remove_admin(ManagedAddress::from(admin.to_address()));
            });
    }

    /// Balances are checked on the world state; contracts can only read
    /// their own balance.
    pub fn check_egld_balance(&mut self, address: &Address, expected: u64) {
        self.world
            .check_account(address)
            .balance(BigUint::<StaticApi>::from_bytes_be(&expected.to_be_bytes()));
    }
}

pub struct SignedVote {
    pub proposal_id: [u8; 32],
    pub vote: u8,
    pub signer: Address,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

/// Column-wise batch arguments; each column may be trimmed independently
/// to exercise the length checks.
#[derive(Default)]
pub struct SignedBatch {
    pub proposal_ids: Vec<[u8; 32]>,
    pub votes: Vec<u8>,
    pub signers: Vec<Address>,
    pub rs: Vec<[u8; 32]>,
    pub ss: Vec<[u8; 32]>,
}

impl SignedBatch {
    pub fn from_votes(signed_votes: Vec<SignedVote>) -> Self {
        let mut batch = SignedBatch::default();
        for signed in signed_votes {
            batch.proposal_ids.push(signed.proposal_id);
            batch.votes.push(signed.vote);
            batch.signers.push(signed.signer);
            batch.rs.push(signed.r);
            batch.ss.push(signed.s);
        }
        batch
    }

    fn proposal_ids(&self) -> ManagedVec<DebugApi, ProposalId<DebugApi>> {
        self.proposal_ids.iter().map(managed_id).collect()
    }

    fn votes(&self) -> ManagedVec<DebugApi, u8> {
        self.votes.iter().copied().collect()
    }

    fn signers(&self) -> ManagedVec<DebugApi, ManagedAddress<DebugApi>> {
        self.signers.iter().map(ManagedAddress::from).collect()
    }

    fn rs(&self) -> ManagedVec<DebugApi, ManagedByteArray<DebugApi, 32>> {
        self.rs
            .iter()
            .map(|r| ManagedByteArray::new_from_bytes(r))
            .collect()
    }

    fn ss(&self) -> ManagedVec<DebugApi, ManagedByteArray<DebugApi, 32>> {
        self.ss
            .iter()
            .map(|s| ManagedByteArray::new_from_bytes(s))
            .collect()
    }
}

pub fn managed_id(proposal_id: &[u8; 32]) -> ProposalId<DebugApi> {
    ManagedByteArray::new_from_bytes(proposal_id)
}
