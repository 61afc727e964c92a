//! Entry point from the executing runtime: resolve an action by name,
//! validate it against the stored configuration and commit the result.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "json")]
use serde_with::{hex::Hex, serde_as};
use tracing::{debug, info, info_span};

use crate::action::Action;
use crate::error::MarketError;
use crate::identity::Address;
use crate::market;
use crate::state::{Configuration, StateStore};
use crate::transfer::Transfer;
use crate::Result;

/// A single call as submitted by the runtime: the action name, its caller,
/// raw arguments and the transfers grouped with it.
#[cfg_attr(feature = "json", serde_as)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: String,
    pub caller: Address,
    #[cfg_attr(feature = "json", serde_as(as = "Vec<Hex>"))]
    #[cfg_attr(feature = "json", serde(default))]
    pub args: Vec<Vec<u8>>,
    #[cfg_attr(feature = "json", serde(default))]
    pub transfers: Vec<Transfer>,
}

impl ActionRequest {
    /// Builds the raw request for an already decoded action.
    pub fn new(action: &Action, caller: Address, transfers: Vec<Transfer>) -> Self {
        Self {
            action: action.name().to_string(),
            caller,
            args: action.to_args(),
            transfers,
        }
    }
}

/// Checks `action` against `current` and computes the next configuration.
///
/// Lifecycle hooks return the configuration unchanged.
pub fn validate(
    current: Option<&Configuration>,
    action: &Action,
    caller: &Address,
    transfers: &[Transfer],
) -> Result<Configuration> {
    let deployed = || {
        current.ok_or(MarketError::InvalidPhase {
            action: action.name(),
            phase: None,
        })
    };

    match *action {
        Action::Deploy { asset_id, owner } => {
            market::deploy(current, caller, asset_id, owner, transfers)
        }
        Action::InitializeEscrow { escrow_address } => {
            deployed()?.initialize_escrow(caller, escrow_address, transfers)
        }
        Action::MakeSellOffer { sell_price } => {
            deployed()?.make_sell_offer(caller, sell_price, transfers)
        }
        Action::Buy => deployed()?.buy(caller, transfers),
        Action::StopSellOffer => deployed()?.stop_sell_offer(caller, transfers),
        Action::OptIn | Action::CloseOut | Action::Delete | Action::ClearState => {
            deployed().copied()
        }
    }
}

/// Resolves `action_name` and validates it.
///
/// # Errors
///
/// Exactly one [`MarketError`] describing the first failed precondition.
pub fn dispatch(
    current: Option<&Configuration>,
    action_name: &str,
    caller: &Address,
    args: &[Vec<u8>],
    transfers: &[Transfer],
) -> Result<Configuration> {
    let _span = info_span!("dispatch", action = action_name, caller = %caller).entered();

    let result =
        Action::parse(action_name, args).and_then(|a| validate(current, &a, caller, transfers));
    match &result {
        Ok(next) => info!(phase = ?next.phase, owner = %next.owner, "Action authorized"),
        Err(e) => debug!(reason = %e, "Action rejected"),
    }
    result
}

/// A deployment bound to its [`StateStore`].
///
/// `submit` takes `&mut self`, so calls against one store are serialized.
#[derive(Debug, Clone, Default)]
pub struct Market<S> {
    store: S,
}

impl<S: StateStore> Market<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current configuration, if deployed.
    pub fn configuration(&self) -> Option<Configuration> {
        self.store.read()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Validates `request` and, only if authorized, writes the new
    /// configuration back to the store.
    pub fn submit(&mut self, request: &ActionRequest) -> Result<Configuration> {
        let current = self.store.read();
        let next = dispatch(
            current.as_ref(),
            &request.action,
            &request.caller,
            &request.args,
            &request.transfers,
        )?;
        self.store.write(next);
        Ok(next)
    }
}
