use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Geo types ---

/// A geographic coordinate pair. Immutable value; produced by a location
/// source or the Tunisia-center fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Fallback position when geolocation is denied or unsupported.
pub const TUNISIA_CENTER: Position = Position {
    lat: 36.8065,
    lng: 10.1615,
};

/// Haversine great-circle distance between two positions in kilometers.
pub fn haversine_km(a: Position, b: Position) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_KM * c
}

// --- Spot types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Standard,
    Rare,
    Legendary,
    Cultural,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rarity::Standard => write!(f, "standard"),
            Rarity::Rare => write!(f, "rare"),
            Rarity::Legendary => write!(f, "legendary"),
            Rarity::Cultural => write!(f, "cultural"),
        }
    }
}

/// A trivia question attached to a spot. Answer comparison is
/// case-insensitive, whitespace-trimmed exact match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub question: String,
    pub answer: String,
}

/// A collectible chachia tied to a real-world coordinate. Built from
/// configuration data at load time; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub rarity: Rarity,
    pub xp: u32,
    pub challenge: Option<Challenge>,
}

// --- Conversation types ---

/// The two sequential modes of the backend conversation: itinerary
/// recommendation (yasmine), then open Q&A. Any other wire value is an
/// external-contract violation, not a silent default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Every conversation begins in the recommendation phase.
    #[default]
    Yasmine,
    Qa,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Yasmine => write!(f, "yasmine"),
            Phase::Qa => write!(f, "qa"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the visible message log. Append-only within a phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}
