use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::balance::BalanceMap;
use super::session::SessionState;
use super::token::{Token, TopAsset};
use crate::chain::ChainId;
use crate::error::Error;

/// Immutable snapshot of the host store, as read by the projections.
///
/// Slices that projections memoize on are shared behind `Arc`s: a host that
/// builds the next snapshot with `..previous.clone()` keeps unchanged slices
/// pointer-equal, which is what the caches key on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub network: NetworkState,

    #[serde(default)]
    pub swaps: Arc<SessionState>,

    #[serde(default)]
    pub swaps_controller: SwapsControllerState,

    #[serde(default)]
    pub token_balances: TokenBalancesState,
}

impl AppState {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
    pub chain_id: ChainId,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self {
            chain_id: ChainId::MAINNET,
        }
    }
}

/// Catalog state owned by the swaps controller. Both lists stay `None`
/// until the controller has fetched them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapsControllerState {
    #[serde(default)]
    pub tokens: Option<Arc<Vec<Token>>>,

    #[serde(default)]
    pub top_assets: Option<Arc<Vec<TopAsset>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesState {
    #[serde(default)]
    pub contract_balances: Option<Arc<BalanceMap>>,
}
