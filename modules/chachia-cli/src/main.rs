use std::env;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chachia_common::{Config, Position};
use chachia_engine::{
    resolve_position, Exploration, FixedLocation, LocationSource, SpotCatalog,
    UnavailableLocation, COLLECTION_RADIUS_KM,
};
use chachia_session::{HintBridge, SessionPhaseController};
use chouchane_client::ChouchaneClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("chachia=info".parse()?))
        .init();

    info!("Chachia smoke runner starting...");

    // Load config
    let config = Config::from_env();
    info!(api = config.api_base_url.as_str(), "Using Chouchane API");

    // Resolve the user position: CHACHIA_LAT/CHACHIA_LNG, else the
    // Tunisia-center fallback.
    let source: Box<dyn LocationSource> = match (env_f64("CHACHIA_LAT"), env_f64("CHACHIA_LNG")) {
        (Some(lat), Some(lng)) => Box::new(FixedLocation(Position::new(lat, lng))),
        _ => Box::new(UnavailableLocation),
    };
    let (user_pos, degraded) = resolve_position(source.as_ref()).await;
    if degraded {
        info!("No position provided; reporting distances from Tunisia center");
    }

    // Offline map report: every spot, nearest first.
    let catalog = Arc::new(SpotCatalog::builtin());
    let (exploration, _map_events) = Exploration::new(catalog.clone());
    println!("Spots by distance from ({:.4}, {:.4}):", user_pos.lat, user_pos.lng);
    for (spot, distance_km) in exploration.ranked_spots(user_pos) {
        let reachable = if distance_km <= COLLECTION_RADIUS_KM {
            "COLLECTIBLE"
        } else {
            "out of range"
        };
        println!(
            "  #{:<2} {:<28} {:>8.2} km  {:<9} {:>3} XP  [{}]",
            spot.id, spot.name, distance_km, spot.rarity, spot.xp, reachable
        );
    }
    exploration.shutdown();

    // Remote smoke: health, places, one session round trip. A dead backend
    // is reported, not fatal; the map report above already ran.
    let client = ChouchaneClient::new(&config.api_base_url);
    match client.health().await {
        Ok(health) => info!(status = health.status.as_str(), workflow = health.workflow.as_str(), "Chouchane API healthy"),
        Err(e) => {
            warn!(error = %e, "Chouchane API unreachable; skipping session smoke");
            return Ok(());
        }
    }

    let places = client.list_places().await?;
    info!(count = places.len(), "Fetched places");
    for place in places.iter().take(3) {
        println!("  {} ({}) — {}", place.name, place.region, place.vibe);
    }

    let bridge = Arc::new(HintBridge::new());
    let (controller, _signals) = SessionPhaseController::new(client, bridge);
    let session_id = controller.ensure_session().await?;
    let phase = controller.phase().await;
    info!(session_id = session_id.as_str(), %phase, "Session started");
    for message in controller.messages().await {
        println!("  [{:?}] {}", message.role, message.text);
    }

    Ok(())
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key).ok()?.parse().ok()
}
