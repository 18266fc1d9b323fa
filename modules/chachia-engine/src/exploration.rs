//! Orchestration of the map mini-game.
//!
//! `Exploration` owns the collection store and the challenge engine behind
//! one lock, publishes `MapEvent`s for the UI, and drives the two
//! fixed-delay presentations: the celebration display (3.5 s) and the
//! Harissa auto-open scheduled 300 ms after it ends, so the two never
//! visually overlap.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chachia_common::{HintDelivered, HintRequested, Position, Spot};
use tokio::sync::mpsc;
use tracing::debug;

use crate::catalog::SpotCatalog;
use crate::challenge::{ChallengeEngine, ChallengeState, GuessOutcome};
use crate::collection::{
    rank_by_distance, CollectRejected, CollectionEvent, CollectionStore,
};
use crate::scheduler::{schedule_once, OneShot};

/// How long the celebratory display stays up after a collection.
pub const CELEBRATION_DURATION: Duration = Duration::from_millis(3500);

/// Delay before a collected spot's challenge auto-opens: celebration end
/// plus a 300 ms gap.
pub const CHALLENGE_OPEN_DELAY: Duration = Duration::from_millis(3800);

/// Events the map UI reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    Collected(CollectionEvent),
    CelebrationEnded { spot_id: u32 },
    ChallengeOpened { spot_id: u32 },
}

struct Inner {
    store: CollectionStore,
    challenges: ChallengeEngine,
    events: mpsc::UnboundedSender<MapEvent>,
    timers: Vec<OneShot>,
}

pub struct Exploration {
    catalog: Arc<SpotCatalog>,
    inner: Arc<Mutex<Inner>>,
}

impl Exploration {
    pub fn new(catalog: Arc<SpotCatalog>) -> (Self, mpsc::UnboundedReceiver<MapEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let exploration = Self {
            catalog,
            inner: Arc::new(Mutex::new(Inner {
                store: CollectionStore::new(),
                challenges: ChallengeEngine::new(),
                events: tx,
                timers: Vec::new(),
            })),
        };
        (exploration, rx)
    }

    pub fn catalog(&self) -> &SpotCatalog {
        &self.catalog
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Attempt to collect a spot from the given position. On success the
    /// celebration and, for unsolved challenge spots, the auto-open are
    /// scheduled; rejections are quiet domain outcomes.
    pub fn collect(
        &self,
        spot: &Spot,
        user_pos: Position,
    ) -> Result<CollectionEvent, CollectRejected> {
        let mut inner = self.lock();
        inner.timers.retain(|t| !t.is_finished());

        let event = inner.store.collect(spot, user_pos)?;
        let _ = inner.events.send(MapEvent::Collected(event.clone()));

        let events = inner.events.clone();
        let spot_id = spot.id;
        inner.timers.push(schedule_once(CELEBRATION_DURATION, move || {
            let _ = events.send(MapEvent::CelebrationEnded { spot_id });
        }));

        if spot.challenge.is_some() && !inner.challenges.is_solved(spot.id) {
            let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
            let spot = spot.clone();
            inner.timers.push(schedule_once(CHALLENGE_OPEN_DELAY, move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let mut guard = inner.lock().unwrap_or_else(|e| e.into_inner());
                if !guard.challenges.is_solved(spot.id) && guard.challenges.open(&spot) {
                    debug!(spot_id = spot.id, "harissa auto-open");
                    let _ = guard.events.send(MapEvent::ChallengeOpened { spot_id: spot.id });
                }
            }));
        }

        Ok(event)
    }

    pub fn is_collectible(&self, spot: &Spot, user_pos: Position) -> bool {
        self.lock().store.is_collectible(spot, user_pos)
    }

    pub fn is_collected(&self, spot_id: u32) -> bool {
        self.lock().store.is_collected(spot_id)
    }

    pub fn total_xp(&self) -> u32 {
        self.lock().store.total_xp()
    }

    /// Catalog spots sorted by ascending distance from the user.
    pub fn ranked_spots(&self, user_pos: Position) -> Vec<(&Spot, f64)> {
        rank_by_distance(self.catalog.spots(), user_pos)
    }

    /// Manually open a spot's challenge (the "Harissa time" button on an
    /// already-collected spot).
    pub fn open_challenge(&self, spot: &Spot) -> bool {
        self.lock().challenges.open(spot)
    }

    pub fn close_challenge(&self) {
        self.lock().challenges.close();
    }

    pub fn open_challenge_spot(&self) -> Option<u32> {
        self.lock().challenges.open_spot()
    }

    pub fn submit_guess(&self, spot: &Spot, guess: &str) -> Option<GuessOutcome> {
        self.lock().challenges.submit_guess(spot, guess)
    }

    pub fn is_solved(&self, spot_id: u32) -> bool {
        self.lock().challenges.is_solved(spot_id)
    }

    pub fn challenge_state(&self, spot_id: u32) -> Option<ChallengeState> {
        self.lock().challenges.state(spot_id).cloned()
    }

    pub fn request_hint(&self, spot: &Spot) -> Option<HintRequested> {
        self.lock().challenges.request_hint(spot)
    }

    pub fn apply_hint(&self, delivered: &HintDelivered) -> bool {
        self.lock().challenges.apply_hint(delivered)
    }

    /// Cancel outstanding timers. Called on teardown; pending celebration
    /// and auto-open presentations are UI conveniences and may be lost.
    pub fn shutdown(&self) {
        self.lock().timers.clear();
    }
}
