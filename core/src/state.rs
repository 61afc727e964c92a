//! Global configuration of a marketplace deployment and the store holding it.

use std::collections::BTreeMap;

use bincode::config::standard;
use bincode::{Decode, Encode};
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::identity::{Address, AssetId};

/// Lifecycle of a deployment.
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Encode, Decode, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Deployed; no escrow account set yet.
    Uninitialized,
    /// Escrow holds the asset; not for sale.
    Ready,
    /// Asset offered for sale at `price`.
    Listed,
}

impl Phase {
    /// Integer code stored in the persisted layout.
    pub fn code(self) -> u64 {
        match self {
            Self::Uninitialized => 0,
            Self::Ready => 1,
            Self::Listed => 2,
        }
    }
}

impl TryFrom<u64> for Phase {
    type Error = StateError;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Ready),
            2 => Ok(Self::Listed),
            other => Err(StateError::UnknownPhase(other)),
        }
    }
}

/// The singleton configuration every action reads and returns.
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Encode, Decode, PartialEq, Eq)]
pub struct Configuration {
    /// Account allowed to set up the escrow. Never changes.
    pub admin: Address,
    /// Custodian holding the asset. [`Address::ZERO`] until initialized.
    pub escrow_address: Address,
    /// The single tradable asset.
    pub asset_id: AssetId,
    /// Current beneficial owner.
    pub owner: Address,
    /// Ask price in micro-units; only meaningful while [`Phase::Listed`].
    pub price: u64,
    pub phase: Phase,
}

impl Configuration {
    /// Fresh configuration as created by a deployment.
    pub fn new(admin: Address, asset_id: AssetId, owner: Address) -> Self {
        Self {
            admin,
            escrow_address: Address::ZERO,
            asset_id,
            owner,
            price: 0,
            phase: Phase::Uninitialized,
        }
    }

    /// Current ask price, if the asset is listed.
    pub fn ask(&self) -> Option<u64> {
        (self.phase == Phase::Listed).then_some(self.price)
    }

    /// Encodes into the binary snapshot format.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Encoding into a Vec cannot fail for plain fixed-size fields.
        bincode::encode_to_vec(*self, standard()).unwrap_or_default()
    }

    /// Decodes a binary snapshot produced by [`Configuration::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let (config, _) = bincode::decode_from_slice(bytes, standard())
            .map_err(|e| StateError::Decode(e.to_string()))?;
        Ok(config)
    }
}

/// Read/replace access to the persisted configuration.
///
/// Implementations must replace the whole value on `write`; the embedding
/// runtime serializes calls so no two actions observe each other half-way.
pub trait StateStore {
    /// Current configuration, or `None` before deployment.
    fn read(&self) -> Option<Configuration>;

    fn write(&mut self, config: Configuration);
}

/// In-memory [`StateStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: Option<Configuration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Configuration) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> Option<Configuration> {
        self.config
    }

    fn write(&mut self, config: Configuration) {
        self.config = Some(config);
    }
}

/// Storage slots requested from the runtime.
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSchema {
    pub num_uints: u64,
    pub num_byte_slices: u64,
}

/// Global slots: phase, price and asset handle as integers;
/// admin, escrow and owner as byte strings.
pub const GLOBAL_SCHEMA: StateSchema = StateSchema {
    num_uints: 3,
    num_byte_slices: 3,
};

/// No per-account state.
pub const LOCAL_SCHEMA: StateSchema = StateSchema {
    num_uints: 0,
    num_byte_slices: 0,
};

pub const KEY_ADMIN: &str = "APP_ADMIN";
pub const KEY_ESCROW: &str = "ESCROW_ADDRESS";
pub const KEY_OWNER: &str = "ASA_OWNER";
pub const KEY_PHASE: &str = "APP_STATE";
pub const KEY_PRICE: &str = "ASA_PRICE";
pub const KEY_ASSET: &str = "ASA_ID";

/// A single slot value in the flat layout.
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalValue {
    Uint(u64),
    Bytes(#[cfg_attr(feature = "json", serde(with = "hex::serde"))] Vec<u8>),
}

/// Flat key/value layout of a [`Configuration`] as the runtime persists it.
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlobalState(pub BTreeMap<String, GlobalValue>);

impl GlobalState {
    pub fn get(&self, key: &str) -> Option<&GlobalValue> {
        self.0.get(key)
    }

    fn uint(&self, key: &'static str) -> Result<u64, StateError> {
        match self.0.get(key) {
            Some(GlobalValue::Uint(v)) => Ok(*v),
            Some(GlobalValue::Bytes(_)) => Err(StateError::WrongType(key)),
            None => Err(StateError::MissingKey(key)),
        }
    }

    fn address(&self, key: &'static str) -> Result<Address, StateError> {
        match self.0.get(key) {
            Some(GlobalValue::Bytes(b)) => {
                Address::from_slice(b).map_err(|_| StateError::WrongType(key))
            }
            Some(GlobalValue::Uint(_)) => Err(StateError::WrongType(key)),
            None => Err(StateError::MissingKey(key)),
        }
    }

    /// Number of integer and byte-string slots in use.
    pub fn schema(&self) -> StateSchema {
        let num_uints = self
            .0
            .values()
            .filter(|v| matches!(v, GlobalValue::Uint(_)))
            .count() as u64;
        StateSchema {
            num_uints,
            num_byte_slices: self.0.len() as u64 - num_uints,
        }
    }
}

impl From<&Configuration> for GlobalState {
    fn from(c: &Configuration) -> Self {
        let bytes = |a: &Address| GlobalValue::Bytes(a.as_bytes().to_vec());
        let map = BTreeMap::from([
            (KEY_ADMIN.to_string(), bytes(&c.admin)),
            (KEY_ESCROW.to_string(), bytes(&c.escrow_address)),
            (KEY_OWNER.to_string(), bytes(&c.owner)),
            (KEY_PHASE.to_string(), GlobalValue::Uint(c.phase.code())),
            (KEY_PRICE.to_string(), GlobalValue::Uint(c.price)),
            (KEY_ASSET.to_string(), GlobalValue::Uint(c.asset_id)),
        ]);
        Self(map)
    }
}

impl TryFrom<&GlobalState> for Configuration {
    type Error = StateError;

    fn try_from(state: &GlobalState) -> Result<Self, Self::Error> {
        Ok(Self {
            admin: state.address(KEY_ADMIN)?,
            escrow_address: state.address(KEY_ESCROW)?,
            asset_id: state.uint(KEY_ASSET)?,
            owner: state.address(KEY_OWNER)?,
            price: state.uint(KEY_PRICE)?,
            phase: Phase::try_from(state.uint(KEY_PHASE)?)?,
        })
    }
}
