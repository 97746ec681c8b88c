//! Narrow reads of the slices the projections depend on.

use std::sync::Arc;

use crate::chain::ChainId;
use crate::types::balance::BalanceMap;
use crate::types::session::SessionState;
use crate::types::state::AppState;
use crate::types::token::{Token, TopAsset};

pub fn chain_id(state: &AppState) -> ChainId {
    state.network.chain_id
}

pub fn session_state(state: &AppState) -> &Arc<SessionState> {
    &state.swaps
}

pub fn swaps_tokens(state: &AppState) -> Option<&Arc<Vec<Token>>> {
    state.swaps_controller.tokens.as_ref()
}

pub fn top_assets(state: &AppState) -> Option<&Arc<Vec<TopAsset>>> {
    state.swaps_controller.top_assets.as_ref()
}

pub fn balances(state: &AppState) -> Option<&Arc<BalanceMap>> {
    state.token_balances.contract_balances.as_ref()
}
