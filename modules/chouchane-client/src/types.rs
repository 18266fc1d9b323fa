//! Wire types for the Chouchane API.
//!
//! `TurnResponse` is the raw phase-tagged reply shape shared by the start,
//! reset, yasmine and qa endpoints. Domain code converts it into
//! [`AssistantTurn`], a union keyed on the phase, so fields that only exist
//! in one phase cannot be read in the other.

use chachia_common::{Phase, Role};
use serde::Deserialize;

/// Raw reply from the start/reset/yasmine/qa endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnResponse {
    pub session_id: String,
    pub workflow: String,
    pub phase: Phase,
    pub reply: String,
    #[serde(default)]
    pub partners: Option<String>,
    #[serde(default)]
    pub chosen_place: Option<String>,
}

/// One assistant turn, discriminated on the conversation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantTurn {
    Yasmine {
        reply: String,
        partners: Option<String>,
        chosen_place: Option<String>,
    },
    Qa {
        reply: String,
        partners: Option<String>,
    },
}

impl AssistantTurn {
    pub fn phase(&self) -> Phase {
        match self {
            AssistantTurn::Yasmine { .. } => Phase::Yasmine,
            AssistantTurn::Qa { .. } => Phase::Qa,
        }
    }

    pub fn reply(&self) -> &str {
        match self {
            AssistantTurn::Yasmine { reply, .. } | AssistantTurn::Qa { reply, .. } => reply,
        }
    }

    /// The secondary "partners" block, if non-empty after trimming.
    pub fn partners(&self) -> Option<&str> {
        let partners = match self {
            AssistantTurn::Yasmine { partners, .. } | AssistantTurn::Qa { partners, .. } => {
                partners.as_deref()
            }
        };
        partners.map(str::trim).filter(|p| !p.is_empty())
    }
}

impl TurnResponse {
    pub fn into_turn(self) -> AssistantTurn {
        match self.phase {
            Phase::Yasmine => AssistantTurn::Yasmine {
                reply: self.reply,
                partners: self.partners,
                chosen_place: self.chosen_place,
            },
            Phase::Qa => AssistantTurn::Qa {
                reply: self.reply,
                partners: self.partners,
            },
        }
    }
}

/// One entry of a stored conversation history. The backend records the
/// assistant side under the role `"model"`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub text: String,
}

impl HistoryEntry {
    pub fn role(&self) -> Role {
        match self.role.as_str() {
            "model" | "assistant" => Role::Assistant,
            _ => Role::User,
        }
    }
}

/// Full server-side session state, fetched when a cached session id needs
/// rehydrating in a fresh context.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub phase: Phase,
    #[serde(default)]
    pub yasmine_history: Vec<HistoryEntry>,
    #[serde(default)]
    pub qa_history: Vec<HistoryEntry>,
}

/// A Tunisia destination from GET /places.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub name: String,
    pub region: String,
    pub vibe: String,
    pub description: String,
    #[serde(default)]
    pub top_activities: Vec<String>,
    pub insider_tip: String,
    pub season: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    pub places: Vec<Place>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub workflow: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_response_decodes_with_optional_fields_absent() {
        let json = r#"{
            "session_id": "abc",
            "workflow": "chachia",
            "phase": "yasmine",
            "reply": "Ahla!"
        }"#;
        let turn: TurnResponse = serde_json::from_str(json).unwrap();
        assert_eq!(turn.phase, Phase::Yasmine);
        assert!(turn.partners.is_none());
        assert!(turn.chosen_place.is_none());
    }

    #[test]
    fn unknown_phase_fails_to_decode() {
        let json = r#"{
            "session_id": "abc",
            "workflow": "chachia",
            "phase": "phase3",
            "reply": "hi"
        }"#;
        assert!(serde_json::from_str::<TurnResponse>(json).is_err());
    }

    #[test]
    fn turn_union_is_keyed_on_phase() {
        let turn = TurnResponse {
            session_id: "s".into(),
            workflow: "w".into(),
            phase: Phase::Qa,
            reply: "answer".into(),
            partners: Some("  Partner deals  ".into()),
            chosen_place: None,
        }
        .into_turn();
        assert_eq!(turn.phase(), Phase::Qa);
        assert_eq!(turn.reply(), "answer");
        assert_eq!(turn.partners(), Some("Partner deals"));
    }

    #[test]
    fn blank_partners_block_is_dropped() {
        let turn = AssistantTurn::Qa {
            reply: "r".into(),
            partners: Some("   ".into()),
        };
        assert_eq!(turn.partners(), None);
    }

    #[test]
    fn model_role_maps_to_assistant() {
        let entry = HistoryEntry {
            role: "model".into(),
            text: "hello".into(),
        };
        assert_eq!(entry.role(), Role::Assistant);
        let entry = HistoryEntry {
            role: "user".into(),
            text: "hi".into(),
        };
        assert_eq!(entry.role(), Role::User);
    }
}
