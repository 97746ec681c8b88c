//! Pure projections over explicit inputs.
//!
//! These are the uncached forms of the reads exposed by
//! [`Selectors`](crate::selectors::Selectors); for the same inputs both give
//! structurally equal results. Missing inputs degrade to empty lists and
//! `false`, never to errors.

use std::collections::HashSet;
use std::sync::Arc;

use num_bigint::BigUint;

use crate::address;
use crate::chain::ChainId;
use crate::enrich::Enricher;
use crate::types::balance::BalanceMap;
use crate::types::session::SessionState;
use crate::types::token::{Token, TopAsset};

/// Set of token addresses in the catalog, for existence checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenIndex {
    addresses: HashSet<String>,
}

impl TokenIndex {
    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(&address::normalize(address))
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

pub fn is_live(session: &SessionState, chain_id: ChainId) -> bool {
    session.is_live(chain_id)
}

pub fn has_onboarded(session: &SessionState) -> bool {
    session.has_onboarded
}

/// Full catalog, enriched on the canonical chain.
pub fn tokens(
    enricher: &Enricher,
    chain_id: ChainId,
    tokens: Option<&Arc<Vec<Token>>>,
) -> Arc<Vec<Token>> {
    match tokens {
        Some(tokens) => enricher.enrich_shared(chain_id, tokens),
        None => Arc::new(Vec::new()),
    }
}

pub fn tokens_by_address(tokens: Option<&[Token]>) -> TokenIndex {
    let addresses = tokens
        .unwrap_or_default()
        .iter()
        .map(Token::key)
        .collect();
    TokenIndex { addresses }
}

/// Default swap list: tokens the user holds first, padded with catalog
/// tokens up to `max`.
///
/// Held tokens keep their catalog order, never their balance order, and are
/// never cut even when there are more than `max` of them. The scan over the
/// catalog stops as soon as every held token has been seen and `max` tokens
/// have been collected.
pub fn tokens_with_balance(
    enricher: &Enricher,
    chain_id: ChainId,
    tokens: Option<&[Token]>,
    balances: Option<&BalanceMap>,
    max: usize,
) -> Vec<Token> {
    let Some(tokens) = tokens else {
        return Vec::new();
    };

    let held: HashSet<String> = ranked_holdings(balances).into_iter().collect();

    // Duplicate catalog entries count once towards `captured`.
    let mut captured: HashSet<String> = HashSet::new();
    let mut with_balance = Vec::new();
    let mut without_balance = Vec::new();
    for token in tokens {
        let key = token.key();
        if held.contains(&key) {
            with_balance.push(token.clone());
            captured.insert(key);
        } else {
            without_balance.push(token.clone());
        }
        if captured.len() == held.len() && with_balance.len() + without_balance.len() >= max {
            break;
        }
    }

    let keep = with_balance.len().max(max);
    let mut merged = with_balance;
    merged.extend(without_balance);
    merged.truncate(keep);
    enricher.enrich(chain_id, merged)
}

/// Lowercased addresses with a strictly positive balance, largest first.
/// Equal balances keep the map's order; malformed balances are skipped.
pub fn ranked_holdings(balances: Option<&BalanceMap>) -> Vec<String> {
    let Some(balances) = balances else {
        return Vec::new();
    };

    let mut held: Vec<(&str, &BigUint)> = balances
        .iter()
        .filter_map(|(addr, balance)| balance.positive_amount().map(|amount| (addr, amount)))
        .collect();
    held.sort_by(|(_, a), (_, b)| b.cmp(a));
    held.into_iter()
        .map(|(addr, _)| address::normalize(addr))
        .collect()
}

/// Catalog tokens matching the top-assets hints, in hint order. Hints with
/// no matching token are dropped.
pub fn top_assets(
    enricher: &Enricher,
    chain_id: ChainId,
    tokens: Option<&[Token]>,
    top_assets: Option<&[TopAsset]>,
) -> Vec<Token> {
    let (Some(tokens), Some(top_assets)) = (tokens, top_assets) else {
        return Vec::new();
    };

    let matched = top_assets
        .iter()
        .filter_map(|asset| {
            tokens
                .iter()
                .find(|t| address::same(&t.address, &asset.address))
                .cloned()
        })
        .collect();
    enricher.enrich(chain_id, matched)
}
