pub mod api;
pub mod bridge;
pub mod controller;

pub use api::ChouchaneApi;
pub use bridge::HintBridge;
pub use controller::{SessionError, SessionPhaseController, SessionSignal, NAVIGATION_DELAY};
