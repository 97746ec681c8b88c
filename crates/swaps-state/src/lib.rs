pub mod accessors;
pub mod address;
pub mod chain;
pub mod config;
pub mod enrich;
pub mod error;
pub mod memo;
pub mod projection;
pub mod reducer;
pub mod selectors;
pub mod token;
pub mod types;

use std::sync::Arc;

// Re-exports for convenience
pub use chain::ChainId;
pub use config::SwapsConfig;
pub use error::Error;
pub use reducer::{reduce, SwapsAction};
pub use selectors::{Recomputations, Selectors};
pub use token::{EmptyCatalog, StaticCatalog, TokenCatalog, TokenMeta};
pub use types::balance::{Balance, BalanceMap};
pub use types::session::SessionState;
pub use types::state::AppState;
pub use types::token::{Token, TopAsset};

/// Session state a store starts with under `config`.
pub fn initial_session_state(config: &SwapsConfig) -> Arc<SessionState> {
    Arc::new(SessionState::new(config.canonical_chain_id))
}

/// Parse a dispatched action and apply it to the swaps session slice of
/// `state`, returning the next snapshot. Other slices are shared untouched.
pub fn dispatch(state: &AppState, action_json: &str) -> Result<AppState, Error> {
    let action = SwapsAction::from_json(action_json)?;
    Ok(AppState {
        swaps: reduce(&state.swaps, &action),
        ..state.clone()
    })
}
