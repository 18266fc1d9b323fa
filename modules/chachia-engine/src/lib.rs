pub mod catalog;
pub mod challenge;
pub mod collection;
pub mod exploration;
pub mod location;
pub mod scheduler;

pub use catalog::SpotCatalog;
pub use challenge::{ChallengeEngine, ChallengeState, GuessOutcome, MAX_HINTS};
pub use collection::{
    rank_by_distance, CollectRejected, CollectionEvent, CollectionStore, COLLECTION_RADIUS_KM,
};
pub use exploration::{Exploration, MapEvent, CELEBRATION_DURATION, CHALLENGE_OPEN_DELAY};
pub use location::{resolve_position, FixedLocation, LocationSource, UnavailableLocation};
pub use scheduler::{schedule_once, OneShot};
