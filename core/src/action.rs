//! Actions a caller can request and how their raw arguments are decoded.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::error::{GroupError, MarketError};
use crate::identity::{Address, AssetId};

pub const DEPLOY: &str = "deploy";
pub const INITIALIZE_ESCROW: &str = "initializeEscrow";
pub const MAKE_SELL_OFFER: &str = "makeSellOffer";
pub const BUY: &str = "buy";
pub const STOP_SELL_OFFER: &str = "stopSellOffer";
pub const OPT_IN: &str = "optIn";
pub const CLOSE_OUT: &str = "closeOut";
pub const DELETE: &str = "delete";
pub const CLEAR_STATE: &str = "clearState";

/// A decoded action request.
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(tag = "action", rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create the configuration. `owner` defaults to the deployer.
    Deploy {
        asset_id: AssetId,
        owner: Option<Address>,
    },
    InitializeEscrow { escrow_address: Address },
    /// `sell_price` is in whole units.
    MakeSellOffer { sell_price: u64 },
    Buy,
    StopSellOffer,
    /// Lifecycle hooks, accepted without touching the configuration.
    OptIn,
    CloseOut,
    Delete,
    ClearState,
}

impl Action {
    /// Decodes an action from its name and raw byte arguments.
    ///
    /// # Errors
    ///
    /// [`MarketError::UnknownAction`] for unrecognized names and
    /// [`MarketError::MalformedGroup`] when the argument count or encoding
    /// is wrong.
    pub fn parse(name: &str, args: &[Vec<u8>]) -> Result<Self, MarketError> {
        let action = match name {
            DEPLOY => match args {
                [asset] => Self::Deploy {
                    asset_id: btoi(asset)?,
                    owner: None,
                },
                [asset, owner] => Self::Deploy {
                    asset_id: btoi(asset)?,
                    owner: Some(address_arg(owner)?),
                },
                _ => {
                    return Err(GroupError::ArgumentCount {
                        expected: if args.is_empty() { 1 } else { 2 },
                        found: args.len(),
                    }
                    .into())
                }
            },
            INITIALIZE_ESCROW => {
                let [escrow] = exact::<1>(args)?;
                Self::InitializeEscrow {
                    escrow_address: address_arg(escrow)?,
                }
            }
            MAKE_SELL_OFFER => {
                let [price] = exact::<1>(args)?;
                Self::MakeSellOffer {
                    sell_price: btoi(price)?,
                }
            }
            BUY => {
                exact::<0>(args)?;
                Self::Buy
            }
            STOP_SELL_OFFER => {
                exact::<0>(args)?;
                Self::StopSellOffer
            }
            OPT_IN => Self::OptIn,
            CLOSE_OUT => Self::CloseOut,
            DELETE => Self::Delete,
            CLEAR_STATE => Self::ClearState,
            other => return Err(MarketError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Deploy { .. } => DEPLOY,
            Self::InitializeEscrow { .. } => INITIALIZE_ESCROW,
            Self::MakeSellOffer { .. } => MAKE_SELL_OFFER,
            Self::Buy => BUY,
            Self::StopSellOffer => STOP_SELL_OFFER,
            Self::OptIn => OPT_IN,
            Self::CloseOut => CLOSE_OUT,
            Self::Delete => DELETE,
            Self::ClearState => CLEAR_STATE,
        }
    }

    /// Encodes back into raw arguments accepted by [`Action::parse`].
    pub fn to_args(&self) -> Vec<Vec<u8>> {
        match self {
            Self::Deploy { asset_id, owner } => {
                let mut args = vec![itob(*asset_id)];
                args.extend(owner.map(|o| o.as_bytes().to_vec()));
                args
            }
            Self::InitializeEscrow { escrow_address } => vec![escrow_address.as_bytes().to_vec()],
            Self::MakeSellOffer { sell_price } => vec![itob(*sell_price)],
            _ => Vec::new(),
        }
    }

    /// Whether this is one of the unconditional lifecycle hooks.
    pub fn is_hook(&self) -> bool {
        matches!(
            self,
            Self::OptIn | Self::CloseOut | Self::Delete | Self::ClearState
        )
    }
}

fn exact<const N: usize>(args: &[Vec<u8>]) -> Result<&[Vec<u8>; N], GroupError> {
    args.try_into().map_err(|_| GroupError::ArgumentCount {
        expected: N,
        found: args.len(),
    })
}

/// Big-endian bytes to integer; at most 8 bytes, empty is zero.
pub fn btoi(bytes: &[u8]) -> Result<u64, GroupError> {
    if bytes.len() > 8 {
        return Err(GroupError::InvalidInteger(bytes.len()));
    }
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Integer to 8 big-endian bytes.
pub fn itob(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

fn address_arg(bytes: &[u8]) -> Result<Address, GroupError> {
    Address::from_slice(bytes).map_err(|_| GroupError::InvalidAddress(bytes.len()))
}
