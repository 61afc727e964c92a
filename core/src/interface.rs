//! Core types for JSON (de)serialization of deployment parameters and
//! persisted marketplace state.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::dispatch::ActionRequest;
use crate::identity::{Address, AssetId};
use crate::state::{Configuration, GlobalState};

/// Default path to deployment params template.
pub const MARKET_PARAMS_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../templates/market_params.json"
);

/// Default path to the persisted global state.
pub const MARKET_STATE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../templates/market_state.json"
);

/// Reads a JSON-encoded file from the given `path` and deserializes into type `T`.
///
/// # Errors
///
/// Returns an `anyhow::Error` if the file cannot be opened, read, or parsed.
pub fn load_market_data<P, T>(path: P) -> anyhow::Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("loading market data: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("parsing JSON from {:?}", path))
}

/// Writes `data` (serializable) as pretty-printed JSON to the given `path`.
///
/// # Errors
///
/// Returns an `anyhow::Error` if the file cannot be created or data cannot be serialized.
pub fn save_market_data<P, T>(path: P, data: &T) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating file {:?}", path))?;
    serde_json::to_writer_pretty(file, data)
        .with_context(|| format!("serializing to JSON to {:?}", path))
}

/// Loads a persisted key/value layout and decodes it into a [`Configuration`].
pub fn load_configuration<P: AsRef<Path>>(path: P) -> anyhow::Result<Configuration> {
    let layout: GlobalState = load_market_data(path)?;
    Configuration::try_from(&layout).context("decoding global state layout")
}

/// Saves `config` in its flat key/value layout.
pub fn save_configuration<P: AsRef<Path>>(path: P, config: &Configuration) -> anyhow::Result<()> {
    save_market_data(path, &GlobalState::from(config))
}

/// Parameters of a new deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployParams {
    /// Becomes the admin.
    pub deployer: Address,
    /// The asset to trade.
    pub asset_id: AssetId,
    /// Initial owner; the deployer when absent.
    #[serde(default)]
    pub owner: Option<Address>,
}

impl DeployParams {
    /// The `deploy` request these parameters describe.
    pub fn into_request(self) -> ActionRequest {
        let action = Action::Deploy {
            asset_id: self.asset_id,
            owner: self.owner,
        };
        ActionRequest::new(&action, self.deployer, Vec::new())
    }
}
