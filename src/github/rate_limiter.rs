use chrono::Utc;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

pub struct RateLimiter {
    state: Arc<Mutex<RateLimitState>>,
    requests_per_minute: u32,
}

struct RateLimitState {
    remaining: u32,
    reset_at: Option<Instant>,
    requests_this_minute: u32,
    minute_start: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_requests_per_minute(30)
    }

    /// Soft cap on requests per minute; 0 disables it.
    pub fn with_requests_per_minute(requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(RateLimitState {
                remaining: 5000,
                reset_at: None,
                requests_this_minute: 0,
                minute_start: Instant::now(),
            })),
            requests_per_minute,
        }
    }

    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        // Check if we need to wait for rate limit reset
        if state.remaining == 0 {
            if let Some(reset_at) = state.reset_at {
                let now = Instant::now();
                if reset_at > now {
                    let wait_duration = reset_at - now;
                    drop(state);
                    tracing::info!("Rate limited, waiting {:?}", wait_duration);
                    sleep(wait_duration).await;
                    state = self.state.lock().await;
                }
            }
            state.reset_at = None;
            state.remaining = 1;
        }

        if self.requests_per_minute == 0 {
            return;
        }

        let minute_elapsed = state.minute_start.elapsed();
        if minute_elapsed < Duration::from_secs(60) {
            if state.requests_this_minute >= self.requests_per_minute {
                let wait_time = Duration::from_secs(60) - minute_elapsed;
                drop(state);
                tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                sleep(wait_time).await;
                state = self.state.lock().await;
                state.requests_this_minute = 0;
                state.minute_start = Instant::now();
            }
        } else {
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        }

        state.requests_this_minute += 1;
    }

    pub async fn update_from_headers(&self, headers: &HeaderMap) {
        let Some(remaining) = header_number::<u32>(headers, "x-ratelimit-remaining") else {
            return;
        };
        let reset = header_number::<i64>(headers, "x-ratelimit-reset");

        let mut state = self.state.lock().await;
        state.remaining = remaining;
        state.reset_at = reset.and_then(|reset_timestamp| {
            let wait_secs = reset_timestamp - Utc::now().timestamp();
            (wait_secs > 0).then(|| Instant::now() + Duration::from_secs(wait_secs as u64))
        });
    }

    pub async fn remaining(&self) -> u32 {
        self.state.lock().await.remaining
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds until the window in `x-ratelimit-reset` opens again.
pub fn seconds_until_reset(headers: &HeaderMap) -> u64 {
    header_number::<i64>(headers, "x-ratelimit-reset")
        .map(|reset| (reset - Utc::now().timestamp()).max(0) as u64)
        .unwrap_or(60)
}

pub(crate) fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[tokio::test]
    async fn test_update_from_headers() {
        let limiter = RateLimiter::with_requests_per_minute(0);
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("42"));
        limiter.update_from_headers(&headers).await;
        assert_eq!(limiter.remaining().await, 42);
    }

    #[tokio::test]
    async fn test_missing_headers_leave_state_alone() {
        let limiter = RateLimiter::with_requests_per_minute(0);
        limiter.update_from_headers(&HeaderMap::new()).await;
        assert_eq!(limiter.remaining().await, 5000);
    }

    #[tokio::test]
    async fn test_exhausted_without_reset_does_not_block() {
        let limiter = RateLimiter::with_requests_per_minute(0);
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        limiter.update_from_headers(&headers).await;
        limiter.wait().await;
        assert_eq!(limiter.remaining().await, 1);
    }

    #[test]
    fn test_seconds_until_reset_defaults_to_a_minute() {
        assert_eq!(seconds_until_reset(&HeaderMap::new()), 60);
    }
}
