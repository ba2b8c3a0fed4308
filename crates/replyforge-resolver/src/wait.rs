//! Bounded polling wait for asynchronously rendered DOM.
//!
//! The host page renders message content after navigation, so reads must
//! wait for elements to materialize. The wait self-cancels at the deadline;
//! a caller that wants to abandon it early just drops the future.

use std::future::Future;
use std::time::Duration;

/// Bounds for one polling wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitOptions {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(100),
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::new(3000)
    }
}

/// Poll `probe` until it yields a value or the deadline passes.
///
/// Returns `Ok(None)` on deadline expiry so the caller can classify the
/// timeout in its own error taxonomy. Probe errors propagate immediately.
pub async fn wait_for<T, E, F, Fut>(options: &WaitOptions, mut probe: F) -> Result<Option<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let start = tokio::time::Instant::now();

    loop {
        if let Some(value) = probe().await? {
            return Ok(Some(value));
        }

        if start.elapsed() >= options.timeout {
            return Ok(None);
        }

        tokio::time::sleep(options.poll_interval).await;
    }
}
