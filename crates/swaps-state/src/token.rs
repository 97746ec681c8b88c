use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::address;
use crate::error::Error;

/// Token metadata from the canonical contract-metadata catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMeta {
    pub name: String,

    #[serde(default)]
    pub symbol: String,

    #[serde(default)]
    pub decimals: u8,
}

/// Trait for token metadata catalogs keyed by EIP-55 checksummed address.
pub trait TokenCatalog: Send + Sync {
    fn lookup(&self, checksummed: &str) -> Option<TokenMeta>;
}

/// A no-op catalog that never knows a token.
pub struct EmptyCatalog;

impl TokenCatalog for EmptyCatalog {
    fn lookup(&self, _checksummed: &str) -> Option<TokenMeta> {
        None
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tokens: HashMap<String, TokenMeta>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the checksummed form of `address`, whatever its casing.
    pub fn insert(&mut self, address: &str, meta: TokenMeta) -> Result<(), Error> {
        self.tokens.insert(address::checksum(address)?, meta);
        Ok(())
    }

    /// Load a `{ address: { name, symbol, decimals } }` JSON object.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: HashMap<String, TokenMeta> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (address, meta) in raw {
            catalog.insert(&address, meta)?;
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenCatalog for StaticCatalog {
    fn lookup(&self, checksummed: &str) -> Option<TokenMeta> {
        self.tokens.get(checksummed).cloned()
    }
}
