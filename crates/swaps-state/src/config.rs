use serde::{Deserialize, Serialize};

use crate::chain::ChainId;
use crate::error::Error;

/// Number of tokens shown in the default swap list when the user holds fewer.
pub const DEFAULT_MAX_TOKENS: usize = 5;

/// Swaps state configuration. Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwapsConfig {
    /// Chain whose token metadata catalog is trusted for enrichment, and on
    /// which swaps start out live.
    pub canonical_chain_id: ChainId,

    /// Minimum length of the default display list.
    pub max_default_tokens: usize,
}

impl Default for SwapsConfig {
    fn default() -> Self {
        Self {
            canonical_chain_id: ChainId::MAINNET,
            max_default_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl SwapsConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_default_tokens == 0 {
            return Err(Error::Config(
                "maxDefaultTokens must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_keys() {
        let config = SwapsConfig::from_json("{}").unwrap();
        assert_eq!(config, SwapsConfig::default());
        assert_eq!(config.max_default_tokens, 5);
        assert_eq!(config.canonical_chain_id, ChainId::MAINNET);
    }

    #[test]
    fn test_overrides() {
        let config =
            SwapsConfig::from_json(r#"{ "canonicalChainId": "0x38", "maxDefaultTokens": 8 }"#)
                .unwrap();
        assert_eq!(config.canonical_chain_id, ChainId(56));
        assert_eq!(config.max_default_tokens, 8);
    }

    #[test]
    fn test_rejects_zero_max() {
        let result = SwapsConfig::from_json(r#"{ "maxDefaultTokens": 0 }"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SwapsConfig::from_json("{ not json"),
            Err(Error::Parse(_))
        ));
    }
}
