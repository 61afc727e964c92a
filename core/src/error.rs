use thiserror::Error;

use crate::identity::Address;
use crate::state::Phase;

/// Reasons an action is rejected.
///
/// Every variant is terminal for the action that produced it: no state is
/// mutated and nothing is retried.
#[derive(Debug, Error, PartialEq)]
pub enum MarketError {
    /// Caller identity does not match the account the action requires.
    #[error("unauthorized caller {caller}, expected {expected}")]
    Unauthorized { caller: Address, expected: Address },

    /// Action is not legal in the current lifecycle phase.
    /// `phase` is `None` when nothing has been deployed yet.
    #[error("action `{action}` not allowed in phase {phase:?}")]
    InvalidPhase {
        action: &'static str,
        phase: Option<Phase>,
    },

    /// Arguments or transfer group do not have the required shape.
    #[error("malformed group: {0}")]
    MalformedGroup(#[from] GroupError),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("state error: {0}")]
    State(#[from] StateError),
}

/// Structural mismatches between a call and what its action requires.
#[derive(Debug, Error, PartialEq)]
pub enum GroupError {
    #[error("expected {expected} argument(s), got {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("integer argument is {0} bytes long, at most 8 allowed")]
    InvalidInteger(usize),

    #[error("identity argument is {0} bytes long, expected 32")]
    InvalidAddress(usize),

    #[error("sell price {0} overflows when scaled to micro-units")]
    PriceOverflow(u64),

    #[error("expected {expected} transfer(s), got {found}")]
    TransferCount { expected: usize, found: usize },

    #[error("transfer {index} should be a {expected}")]
    UnexpectedKind {
        index: usize,
        expected: &'static str,
    },

    #[error("payment must go to the owner {expected}, not {found}")]
    PaymentReceiver { expected: Address, found: Address },

    #[error("payment of {found} does not match price {expected}")]
    PaymentAmount { expected: u64, found: u64 },

    #[error("payment sent by {payer}, but the call was made by {caller}")]
    PayerMismatch { payer: Address, caller: Address },

    #[error("owner cannot buy their own asset")]
    SelfPurchase,

    #[error("asset must be released by the escrow {expected}, not {found}")]
    AssetSender { expected: Address, found: Address },

    #[error("transfer moves asset {found}, expected {expected}")]
    AssetMismatch { expected: u64, found: u64 },

    #[error("asset transfer of {0} units, expected exactly 1")]
    AssetAmount(u64),
}

/// Errors that might occur while parsing an [`Address`].
#[derive(Debug, Error, PartialEq)]
pub enum IdentityError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cannot parse identity from empty string")]
    EmptyIdentity,

    #[error("identity must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Errors when reading a persisted global-state layout.
#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("missing key {0}")]
    MissingKey(&'static str),

    #[error("key {0} holds the wrong value type")]
    WrongType(&'static str),

    #[error("unknown phase code {0}")]
    UnknownPhase(u64),

    #[error("snapshot decoding failed: {0}")]
    Decode(String),
}
