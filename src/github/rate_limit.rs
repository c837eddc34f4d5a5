use std::sync::Mutex;

use reqwest::Response;

use crate::models::RateLimitSnapshot;

/// Records the `x-ratelimit-*` headers GitHub attaches to every response.
///
/// This is a passive tracker: it never delays or retries requests, it only
/// keeps the latest quota figures so the response envelope can report them.
pub struct RateLimitTracker {
    state: Mutex<RateLimitSnapshot>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitSnapshot::default()),
        }
    }

    pub fn update_from_response(&self, response: &Response) {
        let remaining: Option<u32> = header_value(response, "x-ratelimit-remaining");
        let reset: Option<u64> = header_value(response, "x-ratelimit-reset");

        if remaining.is_none() && reset.is_none() {
            return;
        }

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if remaining.is_some() {
            state.remaining = remaining;
        }
        if reset.is_some() {
            state.reset = reset;
        }
    }

    pub fn snapshot(&self) -> RateLimitSnapshot {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn header_value<T: std::str::FromStr>(response: &Response, name: &str) -> Option<T> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

impl Default for RateLimitTracker {
    fn default() -> Self {
        Self::new()
    }
}
