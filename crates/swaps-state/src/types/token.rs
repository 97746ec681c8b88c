use serde::{Deserialize, Serialize};

use crate::address;

/// A swappable token from the swaps catalog.
///
/// Only `address` and `name` are interpreted here; every other field the
/// catalog carries (symbol, decimals, icon, ...) is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub address: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Token {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Identity key: the lowercase address.
    pub fn key(&self) -> String {
        address::normalize(&self.address)
    }

    /// Same token with its display name replaced; all other fields kept.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }
}

/// A ranking hint pointing at a token by address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopAsset {
    pub address: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TopAsset {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            extra: serde_json::Map::new(),
        }
    }
}
