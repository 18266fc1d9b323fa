//! Per-session collection state: which spots are collectible or collected,
//! and the accumulated XP.
//!
//! A spot moves `Uncollected -> Collected` exactly once; there is no
//! de-collection. Rejections are expected outcomes, not failures the user
//! ever sees as errors.

use std::collections::HashSet;

use chachia_common::{haversine_km, Position, Rarity, Spot};
use thiserror::Error;
use tracing::info;

/// A spot is collectible while the user is within this distance of it.
pub const COLLECTION_RADIUS_KM: f64 = 0.5;

/// Why a collect attempt did not go through.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectRejected {
    #[error("spot is {distance_km:.2} km away, outside the {COLLECTION_RADIUS_KM} km radius")]
    OutOfRange { distance_km: f64 },

    #[error("spot already collected")]
    AlreadyCollected,
}

/// Published on each successful collection; feeds the celebration display
/// and the challenge auto-open.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEvent {
    pub spot_id: u32,
    pub name: String,
    pub rarity: Rarity,
    pub xp: u32,
    pub new_total_xp: u32,
}

#[derive(Debug, Default)]
pub struct CollectionStore {
    collected: HashSet<u32>,
    total_xp: u32,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff the spot is within the collection radius and not yet
    /// collected.
    pub fn is_collectible(&self, spot: &Spot, user_pos: Position) -> bool {
        !self.collected.contains(&spot.id)
            && haversine_km(spot.position, user_pos) <= COLLECTION_RADIUS_KM
    }

    pub fn is_collected(&self, spot_id: u32) -> bool {
        self.collected.contains(&spot_id)
    }

    pub fn total_xp(&self) -> u32 {
        self.total_xp
    }

    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    /// Collect a spot. Idempotent: re-collecting is `AlreadyCollected` and
    /// never adds XP twice.
    pub fn collect(
        &mut self,
        spot: &Spot,
        user_pos: Position,
    ) -> Result<CollectionEvent, CollectRejected> {
        if self.collected.contains(&spot.id) {
            return Err(CollectRejected::AlreadyCollected);
        }

        let distance_km = haversine_km(spot.position, user_pos);
        if distance_km > COLLECTION_RADIUS_KM {
            return Err(CollectRejected::OutOfRange { distance_km });
        }

        self.collected.insert(spot.id);
        self.total_xp += spot.xp;
        info!(spot_id = spot.id, spot = %spot.name, xp = spot.xp, total_xp = self.total_xp, "chachia collected");

        Ok(CollectionEvent {
            spot_id: spot.id,
            name: spot.name.clone(),
            rarity: spot.rarity,
            xp: spot.xp,
            new_total_xp: self.total_xp,
        })
    }
}

/// Sort spots by ascending distance from the user for display. Stable sort,
/// so equidistant spots keep catalog order.
pub fn rank_by_distance(spots: &[Spot], user_pos: Position) -> Vec<(&Spot, f64)> {
    let mut ranked: Vec<(&Spot, f64)> = spots
        .iter()
        .map(|s| (s, haversine_km(s.position, user_pos)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}
