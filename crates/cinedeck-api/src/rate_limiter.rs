//! Minimum-interval request pacing.

use std::time::{Duration, Instant};

/// Spaces consecutive requests to one upstream by at least `min_interval`.
///
/// Each client owns one limiter behind a `tokio::sync::Mutex`, so the
/// spacing holds across concurrent callers of the same client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RateLimiter {
    /// Minimum interval between requests.
    min_interval: Duration,
    /// When the previous request was released.
    last_request: Option<Instant>,
}

impl RateLimiter {
    /// TMDB allows roughly 40 requests per second.
    pub(crate) const TMDB_INTERVAL: Duration = Duration::from_millis(25);

    /// The file-search worker is a free shared endpoint; stay polite.
    pub(crate) const FILE_SEARCH_INTERVAL: Duration = Duration::from_millis(500);

    /// Creates a limiter that has not released any request yet.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Waits until the next request may be sent, then records it.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval.saturating_sub(elapsed)).await;
            }
        }

        self.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_is_not_delayed() {
        // Arrange
        let mut limiter = RateLimiter::new(Duration::from_secs(1));

        // Act
        let start = Instant::now();
        limiter.wait().await;

        // Assert
        assert!(start.elapsed() < Duration::from_millis(100));
        assert!(limiter.last_request.is_some());
    }

    #[tokio::test]
    async fn test_second_request_waits_for_interval() {
        // Arrange
        let mut limiter = RateLimiter::new(Duration::from_millis(50));

        // Act
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;

        // Assert
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_upstream_intervals() {
        assert_eq!(RateLimiter::TMDB_INTERVAL, Duration::from_millis(25));
        assert!(RateLimiter::FILE_SEARCH_INTERVAL > RateLimiter::TMDB_INTERVAL);
    }
}
