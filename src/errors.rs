// Membership
pub const ERR_SENDER_ALREADY_MEMBER: &str = "SENDER_ALREADY_MEMBER";
pub const ERR_MUST_CONTRIBUTE_1_ETH: &str = "MUST_CONTRIBUTE_1_ETH";
pub const ERR_ONLY_FOR_MEMBERS: &str = "ONLY_FOR_MEMBERS";
pub const ERR_NOT_A_VALID_MEMBER: &str = "NOT_A_VALID_MEMBER";
pub const ERR_MEMBER_JOINED_AFTER_PROPOSAL_CREATION: &str = "MEMBER_JOINED_AFTER_PROPSAL_CREATION";

// Governance roles
pub const ERR_ONLY_MASTER: &str = "ONLY_MASTER";
pub const ERR_ONLY_ADMIN: &str = "ONLY_ADMIN";
pub const ERR_CANNOT_ALTER_MASTER: &str = "CANNOT_ALTER_MASTER";

// Proposal shape
pub const ERR_PROPOSAL_CANNOT_BE_EMPTY: &str = "PROPOSAL_CANNOT_BE_EMPTY";
pub const ERR_PROPOSAL_INCORRECT_PARAMS_1: &str = "PROPOSAL_INCORRECT_PARAMS_1";
pub const ERR_PROPOSAL_INCORRECT_PARAMS_2: &str = "PROPOSAL_INCORRECT_PARAMS_2";
pub const ERR_DESCRIPTION_CANNOT_BE_EMPTY: &str = "DESCRIPTION_CANNOT_BE_EMPTY";
pub const ERR_DESCRIPTION_MORE_THAN_250_CHARS: &str = "DESCRIPTION_MORE_THAN_250_CHARS";
pub const ERR_PROPOSAL_EXISTS: &str = "PROPOSAL_EXISTS";
pub const ERR_PROPOSAL_ENCODING: &str = "PROPOSAL_ENCODING_FAILED";

// Voting
pub const ERR_INCORRECT_VOTE: &str = "INCORRECT_VOTE";
pub const ERR_CANNOT_VOTE_FOR_PROPOSAL: &str = "CANNOT_VOTE_FOR_PROPOSAL";
pub const ERR_ALREADY_VOTED: &str = "ALREADY_VOTED";
pub const ERR_PROPOSAL_REQUIRED: &str = "PROPOSAL_REQUIRED";
pub const ERR_CAST_VOTE_INCORRECT_1: &str = "CAST_VOTE_INCORRECT_1";
pub const ERR_CAST_VOTE_INCORRECT_2: &str = "CAST_VOTE_INCORRECT_2";
pub const ERR_CAST_VOTE_INCORRECT_3: &str = "CAST_VOTE_INCORRECT_3";
pub const ERR_CAST_VOTE_INCORRECT_4: &str = "CAST_VOTE_INCORRECT_4";

// Execution
pub const ERR_ONLY_PASSED_PROPOSALS: &str = "ONLY_PASSED_PROPOSALS";
pub const ERR_FAIL_WITHOUT_MESSAGE: &str = "GG_DAO_FAIL_WITHOUT_MESSAGE";
pub const ERR_PRICE_INCREASED: &str = "PRICE_INCREASED";
pub const ERR_INSUFFICIENT_FUNDS_TO_PURCHASE: &str = "INSUFFICIENT_FUNDS_TO_PURCHASE";
pub const ERR_ONLY_CALLABLE_BY_CONTRACT: &str = "ONLY_CALLABLE_BY_CONTRACT";
