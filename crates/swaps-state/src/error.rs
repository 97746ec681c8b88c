use thiserror::Error;

/// Unified error type for the swaps state library.
///
/// Errors only surface at the parsing and configuration edges. Projections
/// and session transitions degrade to neutral values instead of failing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid chain id: {0}")]
    InvalidChainId(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
