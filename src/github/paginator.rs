use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::github::rate_limit::RateLimitTracker;

const PER_PAGE: u32 = 100;

pub struct Paginator<'a> {
    client: &'a Client,
    tracker: &'a RateLimitTracker,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, tracker: &'a RateLimitTracker) -> Self {
        Self { client, tracker }
    }

    /// Fetches pages until a short page, a missing `Link: rel="next"`, or
    /// `max_items` accumulated items, whichever comes first.
    ///
    /// `resource` names the target in error and log messages.
    pub async fn fetch_limited<T: DeserializeOwned>(
        &self,
        base_url: &str,
        max_items: usize,
        resource: &str,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let separator = if base_url.contains('?') { "&" } else { "?" };
            let url = format!("{}{}per_page={}&page={}", base_url, separator, PER_PAGE, page);

            tracing::debug!("Fetching: {}", url);
            let response = self.client.get(&url).send().await?;
            self.tracker.update_from_response(&response);

            let status = response.status();
            if !status.is_success() {
                return Err(classify_status(status, resource));
            }

            // Check for next page in Link header
            let has_next = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.contains("rel=\"next\""))
                .unwrap_or(false);

            let items: Vec<T> = response.json().await?;
            let items_count = items.len();
            all_items.extend(items);

            if all_items.len() >= max_items || !has_next || items_count < PER_PAGE as usize {
                break;
            }

            page += 1;
        }

        all_items.truncate(max_items);
        Ok(all_items)
    }
}

/// Maps a non-success upstream status onto the crate taxonomy.
pub(crate) fn classify_status(status: StatusCode, resource: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(resource.to_string()),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
        other => Error::Upstream(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "octocat"),
            Error::NotFound(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "octocat"),
            Error::RateLimited
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "octocat"),
            Error::RateLimited
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "octocat"),
            Error::Upstream(StatusCode::INTERNAL_SERVER_ERROR)
        ));
    }
}
