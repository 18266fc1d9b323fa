//! Geolocation seam.
//!
//! Position acquisition is a one-shot asynchronous request. When the source
//! is denied or unsupported the map stays fully usable at the Tunisia-center
//! fallback; the flag lets the UI tell the user passively.

use anyhow::Result;
use async_trait::async_trait;
use chachia_common::{Position, TUNISIA_CENTER};
use tracing::warn;

#[async_trait]
pub trait LocationSource: Send + Sync {
    /// One-shot position fix. Errors mean denied or unsupported.
    async fn locate(&self) -> Result<Position>;
}

/// A source that always reports the same position.
pub struct FixedLocation(pub Position);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn locate(&self) -> Result<Position> {
        Ok(self.0)
    }
}

/// A source with no fix to give, for headless runs and denied permissions.
pub struct UnavailableLocation;

#[async_trait]
impl LocationSource for UnavailableLocation {
    async fn locate(&self) -> Result<Position> {
        anyhow::bail!("geolocation unavailable")
    }
}

/// Resolve the user position, falling back to Tunisia center when the
/// source fails. The second element is true when the fallback was used.
pub async fn resolve_position(source: &dyn LocationSource) -> (Position, bool) {
    match source.locate().await {
        Ok(pos) => (pos, false),
        Err(e) => {
            warn!(error = %e, "location unavailable, using Tunisia center");
            (TUNISIA_CENTER, true)
        }
    }
}
