use crate::utils::error::SourceError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

// Roughly 30 years; stands in for durations too large to add to an Instant.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Point in time shared by every task of one lookup.
///
/// Created once per race and copied into each adapter. Every blocking I/O
/// step is bounded by it, so no adapter outlives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(duration: Duration) -> Self {
        let now = Instant::now();
        Self {
            at: now.checked_add(duration).unwrap_or(now + FAR_FUTURE),
        }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Resolves once the deadline has passed.
    pub async fn expired(&self) {
        tokio::time::sleep_until(self.at).await
    }

    /// Runs `fut` until it completes or the deadline passes, whichever is first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, SourceError>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout_at(self.at, fut)
            .await
            .map_err(|_| SourceError::DeadlineExceeded)
    }
}
