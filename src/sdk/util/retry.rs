use crate::sdk::error::ProviderError;
use std::thread;
use std::time::Duration;

/// Bounded retry with exponential backoff, carried by each collaborator's
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Zero behaves like one.
    pub max_attempts: u32,
    /// Sleep after the first failed attempt.
    pub backoff: Duration,
    /// Growth factor applied to `backoff` after each further failure.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
            multiplier: 1,
        }
    }

    /// Sleep before attempt `failed + 1`, given `failed` failures so far.
    pub fn delay_after(&self, failed: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(failed.saturating_sub(1));
        self.backoff.saturating_mul(factor)
    }

    /// Runs `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// `op` receives the 1-based attempt number. Non-transient errors are
    /// returned immediately; running out of attempts wraps the last error in
    /// [`ProviderError::Exhausted`].
    pub fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, ProviderError>
    where
        F: FnMut(u32) -> Result<T, ProviderError>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) if attempt >= max_attempts => {
                    if max_attempts == 1 {
                        return Err(e);
                    }
                    return Err(ProviderError::Exhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    log::warn!(
                        "Error fetching {}: {}, retrying {}/{}",
                        what,
                        e,
                        attempt,
                        max_attempts
                    );
                    thread::sleep(self.delay_after(attempt));
                    attempt += 1;
                }
            }
        }
    }
}
