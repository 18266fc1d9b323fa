//! Cross-feature hint signals.
//!
//! The trivia mini-game and the travel assistant never call each other
//! directly; they exchange these two payloads over the HintBridge channel
//! pair. Fire-and-forget, no acknowledgement, no retry.

use serde::{Deserialize, Serialize};

/// Emitted by an open challenge asking the assistant for help.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRequested {
    pub spot_id: u32,
    pub spot_name: String,
}

/// The assistant's reply, routed back to the challenge that asked.
/// Consumed only by a still-open challenge matching `spot_id`; dropped
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintDelivered {
    pub spot_id: u32,
    pub hint_text: String,
}
