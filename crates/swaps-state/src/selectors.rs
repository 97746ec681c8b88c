use std::sync::Arc;

use tracing::debug;

use crate::accessors;
use crate::chain::ChainId;
use crate::config::SwapsConfig;
use crate::enrich::Enricher;
use crate::memo::Memo;
use crate::projection::{self, TokenIndex};
use crate::token::TokenCatalog;
use crate::types::balance::BalanceMap;
use crate::types::session::SessionState;
use crate::types::state::AppState;
use crate::types::token::{Token, TopAsset};

type TokenList = Option<Arc<Vec<Token>>>;

/// Memoized read APIs over [`AppState`] snapshots.
///
/// Each read declares the slices it depends on and only recomputes when one
/// of them changes. Shared slices compare by `Arc` identity, so a read on an
/// unchanged slice hands back the very same `Arc` as before.
pub struct Selectors {
    config: SwapsConfig,
    enricher: Enricher,
    liveness: Memo<(Arc<SessionState>, ChainId), bool>,
    onboarded: Memo<Arc<SessionState>, bool>,
    tokens: Memo<(ChainId, TokenList), Arc<Vec<Token>>>,
    tokens_by_address: Memo<TokenList, Arc<TokenIndex>>,
    tokens_with_balance: Memo<(ChainId, TokenList, Option<Arc<BalanceMap>>), Arc<Vec<Token>>>,
    top_assets: Memo<(ChainId, TokenList, Option<Arc<Vec<TopAsset>>>), Arc<Vec<Token>>>,
}

/// Per-read recomputation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recomputations {
    pub liveness: usize,
    pub onboarded: usize,
    pub tokens: usize,
    pub tokens_by_address: usize,
    pub tokens_with_balance: usize,
    pub top_assets: usize,
}

impl Selectors {
    pub fn new(config: SwapsConfig, catalog: Arc<dyn TokenCatalog>) -> Self {
        let enricher = Enricher::new(config.canonical_chain_id, catalog);
        Self {
            config,
            enricher,
            liveness: Memo::new("liveness"),
            onboarded: Memo::new("onboarded"),
            tokens: Memo::new("tokens"),
            tokens_by_address: Memo::new("tokens_by_address"),
            tokens_with_balance: Memo::new("tokens_with_balance"),
            top_assets: Memo::new("top_assets"),
        }
    }

    /// Selectors with the default config.
    pub fn with_catalog(catalog: Arc<dyn TokenCatalog>) -> Self {
        Self::new(SwapsConfig::default(), catalog)
    }

    pub fn config(&self) -> &SwapsConfig {
        &self.config
    }

    /// Whether swaps are live on the active chain.
    pub fn is_live(&self, state: &AppState) -> bool {
        let deps = (
            Arc::clone(accessors::session_state(state)),
            accessors::chain_id(state),
        );
        self.liveness.get_or_compute(deps, |(session, chain_id)| {
            let live = projection::is_live(session, *chain_id);
            debug!(chain_id = %chain_id, live, "recomputed swaps liveness");
            live
        })
    }

    pub fn has_onboarded(&self, state: &AppState) -> bool {
        let deps = Arc::clone(accessors::session_state(state));
        self.onboarded
            .get_or_compute(deps, |session| projection::has_onboarded(session))
    }

    /// The whole swaps catalog, enriched on the canonical chain.
    pub fn tokens(&self, state: &AppState) -> Arc<Vec<Token>> {
        let deps = (
            accessors::chain_id(state),
            accessors::swaps_tokens(state).cloned(),
        );
        self.tokens.get_or_compute(deps, |(chain_id, tokens)| {
            let list = projection::tokens(&self.enricher, *chain_id, tokens.as_ref());
            debug!(chain_id = %chain_id, count = list.len(), "recomputed swaps tokens");
            list
        })
    }

    /// Address index of the swaps catalog.
    pub fn tokens_by_address(&self, state: &AppState) -> Arc<TokenIndex> {
        let deps = accessors::swaps_tokens(state).cloned();
        self.tokens_by_address.get_or_compute(deps, |tokens| {
            let index = projection::tokens_by_address(tokens.as_deref().map(Vec::as_slice));
            debug!(count = index.len(), "recomputed swaps token index");
            Arc::new(index)
        })
    }

    /// Default display list: held tokens first, padded up to the configured
    /// maximum.
    pub fn tokens_with_balance(&self, state: &AppState) -> Arc<Vec<Token>> {
        let deps = (
            accessors::chain_id(state),
            accessors::swaps_tokens(state).cloned(),
            accessors::balances(state).cloned(),
        );
        self.tokens_with_balance
            .get_or_compute(deps, |(chain_id, tokens, balances)| {
                let list = projection::tokens_with_balance(
                    &self.enricher,
                    *chain_id,
                    tokens.as_deref().map(Vec::as_slice),
                    balances.as_deref(),
                    self.config.max_default_tokens,
                );
                debug!(chain_id = %chain_id, count = list.len(), "recomputed default swap tokens");
                Arc::new(list)
            })
    }

    /// Catalog tokens matching the top-assets hints, in hint order.
    pub fn top_assets(&self, state: &AppState) -> Arc<Vec<Token>> {
        let deps = (
            accessors::chain_id(state),
            accessors::swaps_tokens(state).cloned(),
            accessors::top_assets(state).cloned(),
        );
        self.top_assets
            .get_or_compute(deps, |(chain_id, tokens, top_assets)| {
                let list = projection::top_assets(
                    &self.enricher,
                    *chain_id,
                    tokens.as_deref().map(Vec::as_slice),
                    top_assets.as_deref().map(Vec::as_slice),
                );
                debug!(chain_id = %chain_id, count = list.len(), "recomputed swap top assets");
                Arc::new(list)
            })
    }

    pub fn recomputations(&self) -> Recomputations {
        Recomputations {
            liveness: self.liveness.recomputations(),
            onboarded: self.onboarded.recomputations(),
            tokens: self.tokens.recomputations(),
            tokens_by_address: self.tokens_by_address.recomputations(),
            tokens_with_balance: self.tokens_with_balance.recomputations(),
            top_assets: self.top_assets.recomputations(),
        }
    }

    /// Drop every cached projection.
    pub fn clear(&self) {
        self.liveness.clear();
        self.onboarded.clear();
        self.tokens.clear();
        self.tokens_by_address.clear();
        self.tokens_with_balance.clear();
        self.top_assets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{EmptyCatalog, StaticCatalog, TokenMeta};
    use crate::types::balance::Balance;
    use crate::types::state::{NetworkState, SwapsControllerState, TokenBalancesState};

    const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";

    fn addr(n: u64) -> String {
        format!("0x{n:040x}")
    }

    fn state_with(chain_id: ChainId, tokens: Vec<Token>) -> AppState {
        AppState {
            network: NetworkState { chain_id },
            swaps_controller: SwapsControllerState {
                tokens: Some(Arc::new(tokens)),
                top_assets: Some(Arc::new(vec![TopAsset::new(addr(2))])),
            },
            token_balances: TokenBalancesState {
                contract_balances: Some(Arc::new(
                    [(addr(3), Balance::from(9))].into_iter().collect(),
                )),
            },
            ..AppState::default()
        }
    }

    fn dai_catalog() -> Arc<dyn TokenCatalog> {
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

    #[test]
    fn test_reads_are_cached_per_snapshot() {
        let selectors = Selectors::with_catalog(Arc::new(EmptyCatalog));
        let state = state_with(ChainId::MAINNET, (1..=6).map(|i| Token::new(addr(i))).collect());

        let a = selectors.tokens_with_balance(&state);
        let b = selectors.tokens_with_balance(&state);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a[0].address, addr(3));
        assert_eq!(a.len(), 5);

        let top = selectors.top_assets(&state);
        assert!(Arc::ptr_eq(&top, &selectors.top_assets(&state)));
        assert_eq!(top[0].address, addr(2));

        let index = selectors.tokens_by_address(&state);
        assert!(index.contains(&addr(6)));
        assert!(Arc::ptr_eq(&index, &selectors.tokens_by_address(&state)));

        assert!(selectors.is_live(&state));
        assert!(selectors.is_live(&state));
        assert!(!selectors.has_onboarded(&state));

        assert_eq!(
            selectors.recomputations(),
            Recomputations {
                liveness: 1,
                onboarded: 1,
                tokens: 0,
                tokens_by_address: 1,
                tokens_with_balance: 1,
                top_assets: 1,
            }
        );
    }

    #[test]
    fn test_balance_change_only_invalidates_dependents() {
        let selectors = Selectors::with_catalog(Arc::new(EmptyCatalog));
        let state = state_with(ChainId::MAINNET, (1..=6).map(|i| Token::new(addr(i))).collect());
        let tokens = selectors.tokens(&state);
        let top = selectors.top_assets(&state);
        selectors.tokens_with_balance(&state);

        let next = AppState {
            token_balances: TokenBalancesState {
                contract_balances: Some(Arc::new(
                    [(addr(5), Balance::from(1))].into_iter().collect(),
                )),
            },
            ..state.clone()
        };

        assert!(Arc::ptr_eq(&tokens, &selectors.tokens(&next)));
        assert!(Arc::ptr_eq(&top, &selectors.top_assets(&next)));
        assert_eq!(selectors.tokens_with_balance(&next)[0].address, addr(5));

        let counts = selectors.recomputations();
        assert_eq!(counts.tokens, 1);
        assert_eq!(counts.top_assets, 1);
        assert_eq!(counts.tokens_with_balance, 2);
    }

    #[test]
    fn test_chain_switch_recomputes_chain_dependents() {
        let selectors = Selectors::with_catalog(dai_catalog());
        let state = state_with(ChainId::MAINNET, vec![Token::new(DAI)]);

        let mainnet = selectors.tokens(&state);
        assert_eq!(mainnet[0].name.as_deref(), Some("Dai Stablecoin"));
        selectors.tokens_by_address(&state);

        let bsc = AppState {
            network: NetworkState { chain_id: ChainId(56) },
            ..state.clone()
        };
        let raw = selectors.tokens(&bsc);
        assert_eq!(raw[0].name, None);
        assert!(Arc::ptr_eq(
            &raw,
            state.swaps_controller.tokens.as_ref().unwrap()
        ));
        assert!(!selectors.is_live(&bsc));

        selectors.tokens_by_address(&bsc);
        assert_eq!(selectors.recomputations().tokens_by_address, 1);
        assert_eq!(selectors.recomputations().tokens, 2);
    }

    #[test]
    fn test_missing_slices_degrade() {
        let selectors = Selectors::with_catalog(Arc::new(EmptyCatalog));
        let state = AppState::default();
        assert!(selectors.tokens(&state).is_empty());
        assert!(selectors.tokens_by_address(&state).is_empty());
        assert!(selectors.tokens_with_balance(&state).is_empty());
        assert!(selectors.top_assets(&state).is_empty());
        assert!(selectors.is_live(&state));
        assert!(!selectors.has_onboarded(&state));
    }

    #[test]
    fn test_memoized_matches_unmemoized() {
        let selectors = Selectors::with_catalog(dai_catalog());
        let state = state_with(
            ChainId::MAINNET,
            vec![Token::new(addr(1)), Token::new(DAI), Token::new(addr(3))],
        );
        let enricher = Enricher::new(ChainId::MAINNET, dai_catalog());
        let tokens = state.swaps_controller.tokens.as_deref().map(Vec::as_slice);
        let balances = state.token_balances.contract_balances.as_deref();

        let direct = projection::tokens_with_balance(&enricher, ChainId::MAINNET, tokens, balances, 5);
        assert_eq!(*selectors.tokens_with_balance(&state), direct);
    }

    #[test]
    fn test_configured_max() {
        let config = SwapsConfig {
            max_default_tokens: 2,
            ..SwapsConfig::default()
        };
        let selectors = Selectors::new(config, Arc::new(EmptyCatalog));
        let state = state_with(ChainId::MAINNET, (1..=6).map(|i| Token::new(addr(i))).collect());
        let out = selectors.tokens_with_balance(&state);
        let got: Vec<&str> = out.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(got, vec![addr(3), addr(1)]);
        assert_eq!(selectors.config().max_default_tokens, 2);
    }

    #[test]
    fn test_clear_drops_cache() {
        let selectors = Selectors::with_catalog(Arc::new(EmptyCatalog));
        let state = state_with(ChainId::MAINNET, vec![Token::new(addr(1))]);
        let first = selectors.tokens_with_balance(&state);
        selectors.clear();
        let second = selectors.tokens_with_balance(&state);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }
}
