pub mod config;
pub mod signals;
pub mod types;

pub use config::Config;
pub use signals::{HintDelivered, HintRequested};
pub use types::{
    haversine_km, Challenge, ChatMessage, Phase, Position, Rarity, Role, Spot, TUNISIA_CENTER,
};
