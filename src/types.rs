multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub const PROPOSAL_ID_LEN: usize = 32;

/// Content-addressed proposal identity (keccak-256 of the proposal content).
pub type ProposalId<M> = ManagedByteArray<M, PROPOSAL_ID_LEN>;

pub const VOTE_YES: u8 = 1;
pub const VOTE_NO: u8 = 2;

// ============================================================
// Roles
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Member {
    /// Always true; every member votes.
    pub is_voter: bool,
    /// Ordinal assigned on join; compared against a proposal's member snapshot.
    pub join_index: u64,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug, Default)]
pub struct Admin {
    pub is_exec: bool,
}

// ============================================================
// Proposal status (derived on read, never stored)
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProposalStatus {
    NoStatus,
    /// Voting window is open.
    InProgress,
    /// Quorum and majority reached; execution window is open.
    Passed,
    /// Voting closed without quorum or without a strict majority.
    Rejected,
    /// Every action of the bundle ran. Terminal.
    ExecutionSuccess,
    /// Passed but never executed before the execution window closed. Terminal.
    ExecutionSunset,
}

// ============================================================
// Proposal record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: ProposalId<M>,
    pub targets: ManagedVec<M, ManagedAddress<M>>,
    pub values: ManagedVec<M, BigUint<M>>,
    pub payloads: ManagedVec<M, ManagedBuffer<M>>,
    pub description: ManagedBuffer<M>,
    pub created_at: u64,
    /// Member count when the proposal was created; quorum denominator.
    pub member_snapshot: u64,
    pub yes_votes_cast: u64,
    pub total_votes_cast: u64,
    pub executed: bool,
}

// ============================================================
// Votes
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoteStatus {
    None,
    Yes,
    No,
}

impl VoteStatus {
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            VOTE_YES => Some(VoteStatus::Yes),
            VOTE_NO => Some(VoteStatus::No),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> u8 {
        match self {
            VoteStatus::None => 0,
            VoteStatus::Yes => VOTE_YES,
            VoteStatus::No => VOTE_NO,
        }
    }
}

// ============================================================
// Action payloads
// ============================================================

/// Decoded form of a proposal payload. An empty endpoint name is a plain transfer.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ActionCall<M: ManagedTypeApi> {
    pub endpoint_name: ManagedBuffer<M>,
    pub arguments: ManagedVec<M, ManagedBuffer<M>>,
}
