//! Typed in-process relay between the trivia mini-game and the assistant.
//!
//! Requests flow over an mpsc channel to their single consumer (the session
//! controller); deliveries are broadcast so whichever challenge is open can
//! filter by spot id. No acknowledgement, no retry, and a delivery with no
//! interested listener is simply dropped.

use std::sync::Mutex;

use chachia_common::{HintDelivered, HintRequested};
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

const DELIVERY_CAPACITY: usize = 16;

pub struct HintBridge {
    request_tx: mpsc::UnboundedSender<HintRequested>,
    request_rx: Mutex<Option<mpsc::UnboundedReceiver<HintRequested>>>,
    delivery_tx: broadcast::Sender<HintDelivered>,
}

impl HintBridge {
    pub fn new() -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (delivery_tx, _) = broadcast::channel(DELIVERY_CAPACITY);
        Self {
            request_tx,
            request_rx: Mutex::new(Some(request_rx)),
            delivery_tx,
        }
    }

    /// Fire-and-forget hint request from an open challenge.
    pub fn request_hint(&self, request: HintRequested) {
        debug!(spot_id = request.spot_id, "hint requested");
        let _ = self.request_tx.send(request);
    }

    /// Claim the request stream. There is exactly one consumer; subsequent
    /// calls return `None`.
    pub fn take_requests(&self) -> Option<mpsc::UnboundedReceiver<HintRequested>> {
        self.request_rx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    /// Publish an assistant hint back toward whichever challenge asked.
    pub fn deliver(&self, hint: HintDelivered) {
        debug!(spot_id = hint.spot_id, "hint delivered");
        // No subscriber means no challenge is open; the hint is dropped.
        let _ = self.delivery_tx.send(hint);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HintDelivered> {
        self.delivery_tx.subscribe()
    }
}

impl Default for HintBridge {
    fn default() -> Self {
        Self::new()
    }
}
