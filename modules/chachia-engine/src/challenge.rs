//! The Harissa trivia mini-game.
//!
//! Per-challenge state machine: `Unopened -> Open -> Solved`, where a wrong
//! guess keeps the challenge open for retry. A correct answer latches
//! `solved` permanently; only an explicit session reset clears it.

use std::collections::HashMap;

use chachia_common::{HintDelivered, HintRequested, Spot};
use tracing::{debug, info};

/// Cumulative hints allowed per spot per session.
pub const MAX_HINTS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct ChallengeState {
    pub attempted: bool,
    pub solved: bool,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

#[derive(Debug, Default)]
pub struct ChallengeEngine {
    states: HashMap<u32, ChallengeState>,
    open_spot: Option<u32>,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl ChallengeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the challenge for a spot. Silent no-op for spots without one.
    /// Returns whether a challenge is now open.
    pub fn open(&mut self, spot: &Spot) -> bool {
        if spot.challenge.is_none() {
            return false;
        }
        self.states.entry(spot.id).or_default();
        self.open_spot = Some(spot.id);
        debug!(spot_id = spot.id, "harissa challenge opened");
        true
    }

    pub fn close(&mut self) {
        self.open_spot = None;
    }

    pub fn open_spot(&self) -> Option<u32> {
        self.open_spot
    }

    pub fn is_solved(&self, spot_id: u32) -> bool {
        self.states.get(&spot_id).is_some_and(|s| s.solved)
    }

    pub fn state(&self, spot_id: u32) -> Option<&ChallengeState> {
        self.states.get(&spot_id)
    }

    /// Check a guess against the spot's stored answer. Both sides are
    /// trimmed and lowercased. An empty guess is not a submission at all
    /// and produces no feedback.
    pub fn submit_guess(&mut self, spot: &Spot, guess: &str) -> Option<GuessOutcome> {
        let challenge = spot.challenge.as_ref()?;
        let guess = normalize(guess);
        if guess.is_empty() {
            return None;
        }

        let state = self.states.entry(spot.id).or_default();
        state.attempted = true;

        if guess == normalize(&challenge.answer) {
            state.solved = true;
            info!(spot_id = spot.id, "harissa challenge solved");
            Some(GuessOutcome::Correct)
        } else {
            Some(GuessOutcome::Incorrect)
        }
    }

    /// Build a hint request for the spot's challenge. Refuses once the
    /// per-spot hint budget is spent or when the spot has no challenge.
    pub fn request_hint(&self, spot: &Spot) -> Option<HintRequested> {
        spot.challenge.as_ref()?;
        let used = self.states.get(&spot.id).map_or(0, |s| s.hints.len());
        if used >= MAX_HINTS {
            debug!(spot_id = spot.id, used, "hint budget exhausted");
            return None;
        }
        Some(HintRequested {
            spot_id: spot.id,
            spot_name: spot.name.clone(),
        })
    }

    /// Accept a delivered hint, but only for the challenge that is
    /// currently open and matches the spot id. Anything else is dropped.
    pub fn apply_hint(&mut self, delivered: &HintDelivered) -> bool {
        if self.open_spot != Some(delivered.spot_id) {
            debug!(spot_id = delivered.spot_id, "hint dropped: no matching open challenge");
            return false;
        }
        let state = self.states.entry(delivered.spot_id).or_default();
        if state.hints.len() >= MAX_HINTS {
            return false;
        }
        state.hints.push(delivered.hint_text.clone());
        true
    }
}
