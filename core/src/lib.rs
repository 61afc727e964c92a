//! Authorization and state-transition logic for an escrow-mediated,
//! single-asset marketplace.
//!
//! A [`Configuration`] is passed into every action and a new one is returned
//! on success; rejected actions return a [`MarketError`] and change nothing.

/// Decoding of action names and raw arguments
pub mod action;
/// Runtime-facing dispatch and the store-backed [`Market`]
pub mod dispatch;
pub mod error;
/// Account identities and asset handles
pub mod identity;
/// JSON parameter and state files
#[cfg(feature = "json")]
pub mod interface;
/// Action preconditions and transitions
pub mod market;
/// Global configuration, its persisted layout and the store contract
pub mod state;
/// Transfers grouped with a call
pub mod transfer;

#[cfg(test)]
mod utils;

pub use action::Action;
pub use dispatch::{dispatch, validate, ActionRequest, Market};
pub use error::{GroupError, IdentityError, MarketError, StateError};
pub use identity::{Address, AssetId};
pub use market::MICRO_UNITS;
pub use state::{Configuration, GlobalState, MemoryStore, Phase, StateStore};
pub use transfer::{BuyGroup, Transfer, TransferKind};

pub type Result<T> = std::result::Result<T, MarketError>;
