//! Swaps session transitions.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, trace};

use crate::chain::ChainId;
use crate::error::Error;
use crate::types::session::SessionState;

/// Dispatch type for setting liveness on a chain.
pub const SET_SWAPS_LIVENESS: &str = "SET_SWAPS_LIVENESS";
/// Dispatch type for setting the onboarding flag.
pub const SWAPS_SET_HAS_ONBOARDED: &str = "SWAPS_SET_HAS_ONBOARDED";

/// An event delivered to the swaps session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SwapsAction {
    SetLiveness { chain_id: ChainId, live: bool },
    SetHasOnboarded(bool),
    /// Any other dispatch type. Ignored.
    Other(String),
}

/// Wire shape of a dispatched action: `{ "type": ..., "payload": ... }`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LivenessPayload {
    chain_id: ChainId,
    live: bool,
}

impl SwapsAction {
    /// Parse a dispatched action from JSON. Unknown types become
    /// [`SwapsAction::Other`]; a known type with a bad payload is an error.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let envelope: Envelope = serde_json::from_str(json)?;
        Self::from_envelope(envelope)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        let envelope: Envelope = serde_json::from_value(value)?;
        Self::from_envelope(envelope)
    }

    fn from_envelope(envelope: Envelope) -> Result<Self, Error> {
        match envelope.kind.as_str() {
            SET_SWAPS_LIVENESS | "SET_LIVENESS" => {
                let payload: LivenessPayload = serde_json::from_value(envelope.payload)?;
                Ok(Self::SetLiveness {
                    chain_id: payload.chain_id,
                    live: payload.live,
                })
            }
            SWAPS_SET_HAS_ONBOARDED | "SET_HAS_ONBOARDED" => {
                Ok(Self::SetHasOnboarded(truthy(&envelope.payload)))
            }
            _ => Ok(Self::Other(envelope.kind)),
        }
    }
}

/// JavaScript-style truthiness of a JSON value.
fn truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Apply an action to the session state.
///
/// Ignored actions return the same `Arc`, so projections keyed on the
/// session state stay cached.
pub fn reduce(state: &Arc<SessionState>, action: &SwapsAction) -> Arc<SessionState> {
    match action {
        SwapsAction::SetLiveness { chain_id, live } => {
            debug!(chain_id = %chain_id, live = *live, "swaps liveness set");
            Arc::new(state.with_liveness(*chain_id, *live))
        }
        SwapsAction::SetHasOnboarded(value) => {
            debug!(has_onboarded = *value, "swaps onboarding set");
            Arc::new(state.with_onboarded(*value))
        }
        SwapsAction::Other(kind) => {
            trace!(action = %kind, "ignoring action");
            Arc::clone(state)
        }
    }
}
