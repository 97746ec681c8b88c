use std::sync::Arc;

use tracing::trace;

use crate::address;
use crate::chain::ChainId;
use crate::token::TokenCatalog;
use crate::types::token::Token;

/// Attaches catalog display names to tokens on the canonical chain.
///
/// The catalog is keyed by mainnet contract addresses, so on any other chain
/// tokens pass through untouched.
#[derive(Clone)]
pub struct Enricher {
    canonical_chain_id: ChainId,
    catalog: Arc<dyn TokenCatalog>,
}

impl Enricher {
    pub fn new(canonical_chain_id: ChainId, catalog: Arc<dyn TokenCatalog>) -> Self {
        Self {
            canonical_chain_id,
            catalog,
        }
    }

    pub fn applies_to(&self, chain_id: ChainId) -> bool {
        chain_id == self.canonical_chain_id
    }

    /// Pointwise enrichment of an owned list. Order and length are kept.
    pub fn enrich(&self, chain_id: ChainId, tokens: Vec<Token>) -> Vec<Token> {
        if !self.applies_to(chain_id) {
            return tokens;
        }
        tokens.into_iter().map(|t| self.enrich_token(t)).collect()
    }

    /// Enrichment of a shared list. Off the canonical chain the same `Arc`
    /// comes back.
    pub fn enrich_shared(&self, chain_id: ChainId, tokens: &Arc<Vec<Token>>) -> Arc<Vec<Token>> {
        if !self.applies_to(chain_id) {
            return Arc::clone(tokens);
        }
        Arc::new(
            tokens
                .iter()
                .map(|t| self.enrich_token(t.clone()))
                .collect(),
        )
    }

    fn enrich_token(&self, token: Token) -> Token {
        let checksummed = match address::checksum(&token.address) {
            Ok(a) => a,
            Err(_) => {
                trace!(address = %token.address, "unparseable token address, not enriched");
                return token;
            }
        };
        match self.catalog.lookup(&checksummed) {
            Some(meta) => token.with_name(meta.name),
            None => {
                trace!(address = %checksummed, "token not in catalog, not enriched");
                token
            }
        }
    }
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("canonical_chain_id", &self.canonical_chain_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{StaticCatalog, TokenMeta};

    const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
    const USDT: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

    fn catalog() -> Arc<dyn TokenCatalog> {
        let mut catalog = StaticCatalog::new();
        catalog
            .insert(
                DAI,
                TokenMeta {
                    name: "Dai Stablecoin".to_string(),
                    symbol: "DAI".to_string(),
                    decimals: 18,
                },
            )
            .unwrap();
        Arc::new(catalog)
    }

    fn token(address: &str, name: Option<&str>) -> Token {
        Token {
            name: name.map(str::to_string),
            ..Token::new(address)
        }
    }

    #[test]
    fn test_enrich_on_mainnet() {
        let enricher = Enricher::new(ChainId::MAINNET, catalog());
        let tokens = vec![
            token(USDT, Some("USDT")),
            token(DAI, Some("DAI")),
            token("not-an-address", None),
        ];

        let out = enricher.enrich(ChainId::MAINNET, tokens.clone());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], tokens[0]);
        assert_eq!(out[1].name.as_deref(), Some("Dai Stablecoin"));
        assert_eq!(out[1].address, DAI);
        assert_eq!(out[2], tokens[2]);
    }

    #[test]
    fn test_off_mainnet_is_identity() {
        let enricher = Enricher::new(ChainId::MAINNET, catalog());
        let tokens = Arc::new(vec![token(DAI, Some("DAI"))]);

        let out = enricher.enrich_shared(ChainId(56), &tokens);
        assert!(Arc::ptr_eq(&out, &tokens));
        assert_eq!(enricher.enrich(ChainId(137), tokens.to_vec()), *tokens);
    }

    #[test]
    fn test_shared_on_mainnet_builds_new_list() {
        let enricher = Enricher::new(ChainId::MAINNET, catalog());
        let tokens = Arc::new(vec![token(DAI, None)]);

        let out = enricher.enrich_shared(ChainId::MAINNET, &tokens);
        assert!(!Arc::ptr_eq(&out, &tokens));
        assert_eq!(out[0].name.as_deref(), Some("Dai Stablecoin"));
        assert_eq!(tokens[0].name, None);
    }
}
