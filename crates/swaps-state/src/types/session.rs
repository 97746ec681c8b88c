use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chain::ChainId;

/// Per-chain swaps session flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSession {
    #[serde(default)]
    pub is_live: bool,

    /// Other per-chain fields the host stores next to liveness.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChainSession {
    pub fn live() -> Self {
        Self {
            is_live: true,
            ..Self::default()
        }
    }

    pub fn with_liveness(&self, is_live: bool) -> Self {
        Self {
            is_live,
            extra: self.extra.clone(),
        }
    }
}

/// Long-lived swaps session state: liveness per chain plus a global
/// onboarding flag.
///
/// On the wire chain entries sit beside the flag, keyed by chain id:
/// `{ "1": { "isLive": true }, "hasOnboarded": false }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(flatten)]
    pub chains: BTreeMap<ChainId, ChainSession>,

    #[serde(default)]
    pub has_onboarded: bool,
}

impl SessionState {
    /// Initial state: swaps live on the canonical chain only, not onboarded.
    pub fn new(canonical_chain_id: ChainId) -> Self {
        let mut chains = BTreeMap::new();
        chains.insert(canonical_chain_id, ChainSession::live());
        Self {
            chains,
            has_onboarded: false,
        }
    }

    /// Unset chains are not live.
    pub fn is_live(&self, chain_id: ChainId) -> bool {
        self.chains.get(&chain_id).is_some_and(|c| c.is_live)
    }

    /// New state with one chain's liveness set, all else untouched.
    pub fn with_liveness(&self, chain_id: ChainId, is_live: bool) -> Self {
        let mut chains = self.chains.clone();
        let entry = chains
            .get(&chain_id)
            .map(|c| c.with_liveness(is_live))
            .unwrap_or_else(|| ChainSession {
                is_live,
                ..ChainSession::default()
            });
        chains.insert(chain_id, entry);
        Self {
            chains,
            has_onboarded: self.has_onboarded,
        }
    }

    pub fn with_onboarded(&self, has_onboarded: bool) -> Self {
        Self {
            chains: self.chains.clone(),
            has_onboarded,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(ChainId::MAINNET)
    }
}
