//! Minimum-spacing gate for outbound requests

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::OsmError;

/// Enforces a minimum interval between consecutive requests
///
/// One gate covers every upstream the owning client talks to, so it limits
/// the client's total request rate rather than a per-service budget. The lock
/// is held while waiting: concurrent callers queue behind each other, in no
/// guaranteed order.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_issued: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a gate with the given spacing (zero disables waiting)
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_issued: Mutex::new(None),
        }
    }

    #[cfg(test)]
    pub(crate) const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request may be issued, then claim the slot
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Canceled`] if `cancel` fires while waiting for the
    /// lock or the interval. The last-issued timestamp is left untouched.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), OsmError> {
        if self.min_interval.is_zero() {
            return Ok(());
        }

        let mut last_issued = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(OsmError::Canceled),
            guard = self.last_issued.lock() => guard,
        };

        if let Some(previous) = *last_issued {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting outbound request");
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(OsmError::Canceled),
                    () = tokio::time::sleep(wait) => {},
                }
            }
        }

        *last_issued = Some(Instant::now());
        Ok(())
    }

    #[cfg(test)]
    async fn last_issued(&self) -> Option<Instant> {
        *self.last_issued.lock().await
    }
}
