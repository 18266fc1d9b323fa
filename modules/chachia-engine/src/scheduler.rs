//! One-shot timers for UI-convenience delays.
//!
//! Celebration auto-hide, challenge auto-open and the post-transition
//! navigation delay all run through `schedule_once`, so tests can drive
//! them deterministically under tokio's paused clock. Timers are fire-once
//! and best-effort; dropping the handle cancels a timer that has not fired.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a scheduled action. Aborts the timer on drop or on `cancel`.
#[derive(Debug)]
pub struct OneShot {
    handle: JoinHandle<()>,
}

impl OneShot {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for OneShot {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `action` once after `delay`. Requires a tokio runtime.
pub fn schedule_once<F>(delay: Duration, action: F) -> OneShot
where
    F: FnOnce() + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        action();
    });
    OneShot { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn fires_exactly_once_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_in_timer = fired.clone();
        let timer = schedule_once(Duration::from_secs(6), move || {
            fired_in_timer.fetch_add(1, Ordering::SeqCst);
        });
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0, "must not fire early");

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1, "one-shot must not re-fire");
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_in_timer = fired.clone();
        let timer = schedule_once(Duration::from_secs(6), move || {
            fired_in_timer.fetch_add(1, Ordering::SeqCst);
        });

        timer.cancel();
        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_in_timer = fired.clone();
        drop(schedule_once(Duration::from_secs(6), move || {
            fired_in_timer.fetch_add(1, Ordering::SeqCst);
        }));

        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
