//! Marketplace state machine: preconditions and transitions of every action.
//!
//! Each transition borrows the current [`Configuration`] and returns the next
//! one. A rejected action returns an error and leaves nothing to roll back.

use crate::error::{GroupError, MarketError};
use crate::identity::{Address, AssetId};
use crate::state::{Configuration, Phase};
use crate::transfer::{BuyGroup, Transfer};
use crate::Result;

/// Smallest ledger denomination per whole unit of price.
pub const MICRO_UNITS: u64 = 1_000_000;

/// Scales a whole-unit price to micro-units.
///
/// A zero price is accepted; overflow is rejected.
pub fn scale_price(sell_price: u64) -> std::result::Result<u64, GroupError> {
    sell_price
        .checked_mul(MICRO_UNITS)
        .ok_or(GroupError::PriceOverflow(sell_price))
}

/// Creates the configuration. Only legal while nothing is deployed.
pub fn deploy(
    current: Option<&Configuration>,
    deployer: &Address,
    asset_id: AssetId,
    owner: Option<Address>,
    transfers: &[Transfer],
) -> Result<Configuration> {
    if let Some(config) = current {
        return Err(invalid_phase("deploy", config.phase));
    }
    no_transfers(transfers)?;
    Ok(Configuration::new(
        *deployer,
        asset_id,
        owner.unwrap_or(*deployer),
    ))
}

impl Configuration {
    /// Records the escrow account and moves to [`Phase::Ready`].
    pub fn initialize_escrow(
        &self,
        caller: &Address,
        escrow_address: Address,
        transfers: &[Transfer],
    ) -> Result<Self> {
        self.require_phase("initializeEscrow", |p| p == Phase::Uninitialized)?;
        require_caller(caller, &self.admin)?;
        no_transfers(transfers)?;

        Ok(Self {
            escrow_address,
            phase: Phase::Ready,
            ..*self
        })
    }

    /// Lists the asset at `sell_price` whole units.
    pub fn make_sell_offer(
        &self,
        caller: &Address,
        sell_price: u64,
        transfers: &[Transfer],
    ) -> Result<Self> {
        self.require_phase("makeSellOffer", |p| p == Phase::Ready)?;
        require_caller(caller, &self.owner)?;
        no_transfers(transfers)?;

        Ok(Self {
            price: scale_price(sell_price)?,
            phase: Phase::Listed,
            ..*self
        })
    }

    /// Validates a purchase group and hands ownership to the buyer.
    ///
    /// The group must be a payment of exactly `price` from the caller to the
    /// owner, followed by a release of one unit of the asset by the escrow.
    pub fn buy(&self, caller: &Address, transfers: &[Transfer]) -> Result<Self> {
        self.require_phase("buy", |p| p == Phase::Listed)?;

        let BuyGroup { payment, asset } = BuyGroup::from_transfers(transfers)?;

        if payment.receiver != self.owner {
            return Err(GroupError::PaymentReceiver {
                expected: self.owner,
                found: payment.receiver,
            }
            .into());
        }
        if payment.amount != self.price {
            return Err(GroupError::PaymentAmount {
                expected: self.price,
                found: payment.amount,
            }
            .into());
        }
        if payment.sender != *caller {
            return Err(GroupError::PayerMismatch {
                payer: payment.sender,
                caller: *caller,
            }
            .into());
        }
        if payment.sender == self.owner {
            return Err(GroupError::SelfPurchase.into());
        }
        if asset.sender != self.escrow_address {
            return Err(GroupError::AssetSender {
                expected: self.escrow_address,
                found: asset.sender,
            }
            .into());
        }
        if asset.asset_id != self.asset_id {
            return Err(GroupError::AssetMismatch {
                expected: self.asset_id,
                found: asset.asset_id,
            }
            .into());
        }
        if asset.amount != 1 {
            return Err(GroupError::AssetAmount(asset.amount).into());
        }

        Ok(Self {
            owner: *caller,
            phase: Phase::Ready,
            ..*self
        })
    }

    /// Withdraws any offer. Legal from `Ready` as well as `Listed`.
    pub fn stop_sell_offer(&self, caller: &Address, transfers: &[Transfer]) -> Result<Self> {
        self.require_phase("stopSellOffer", |p| p != Phase::Uninitialized)?;
        require_caller(caller, &self.owner)?;
        no_transfers(transfers)?;

        Ok(Self {
            phase: Phase::Ready,
            ..*self
        })
    }

    fn require_phase(&self, action: &'static str, allowed: impl Fn(Phase) -> bool) -> Result<()> {
        if allowed(self.phase) {
            Ok(())
        } else {
            Err(invalid_phase(action, self.phase))
        }
    }
}

fn invalid_phase(action: &'static str, phase: Phase) -> MarketError {
    MarketError::InvalidPhase {
        action,
        phase: Some(phase),
    }
}

fn require_caller(caller: &Address, expected: &Address) -> Result<()> {
    if caller == expected {
        Ok(())
    } else {
        Err(MarketError::Unauthorized {
            caller: *caller,
            expected: *expected,
        })
    }
}

fn no_transfers(transfers: &[Transfer]) -> Result<()> {
    if transfers.is_empty() {
        Ok(())
    } else {
        Err(GroupError::TransferCount {
            expected: 0,
            found: transfers.len(),
        }
        .into())
    }
}
