// =============================================================================
// Request pacer — minimum-interval rate limiting for outbound calls
// =============================================================================
//
// The exchange asks clients to stay under a few requests per second. Instead
// of sleeping unconditionally between scan iterations, the pacer reserves a
// send slot per call: each acquire is scheduled at least `min_interval` after
// the previous one, and only waits out the remainder that has not already
// elapsed. The scan loop itself never sleeps.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::trace;

/// Serializes outbound requests to at most one per `min_interval`.
pub struct RequestPacer {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Create a pacer with the given minimum spacing. A zero interval
    /// disables pacing entirely.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Wait until a send slot is available.
    ///
    /// The slot is reserved under the lock and the wait happens outside it,
    /// so concurrent callers are each assigned their own slot and spacing
    /// holds across tasks.
    pub async fn acquire(&self) {
        let wait = {
            let mut next = self.next_slot.lock();
            let now = Instant::now();
            let slot = match *next {
                Some(t) if t > now => t,
                _ => now,
            };
            *next = Some(slot + self.min_interval);
            slot.saturating_duration_since(now)
        };

        if !wait.is_zero() {
            trace!(wait_ms = wait.as_millis() as u64, "pacing outbound request");
            tokio::time::sleep(wait).await;
        }
    }
}

impl std::fmt::Debug for RequestPacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPacer")
            .field("min_interval", &self.min_interval)
            .finish()
    }
}
