use crate::config::CollectorConfig;
use crate::error::Result;
use crate::models::RateLimitState;
use crate::types::{GitHubRepo, GitHubUserDetail};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

pub const PER_PAGE: u32 = 100;
const LOW_RATE_LIMIT: u32 = 10;
const USER_AGENT: &str = concat!("repo-audience/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    client: Client,
    config: CollectorConfig,
    last_rate_limit: Mutex<Option<RateLimitState>>,
}

impl GitHubClient {
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            client,
            config,
            last_rate_limit: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Rate limit state seen on the most recent response, if it carried one.
    pub fn rate_limit(&self) -> Option<RateLimitState> {
        self.last_rate_limit.lock().ok().and_then(|state| state.clone())
    }

    async fn try_get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .query(query);
        if !self.config.token.is_empty() {
            request = request.header("Authorization", format!("token {}", self.config.token));
        }

        let response = request.send().await?;

        if let Some(state) = rate_limit_state(response.headers()) {
            let remaining = state.remaining;
            if let Ok(mut last) = self.last_rate_limit.lock() {
                *last = Some(state);
            }
            if remaining < LOW_RATE_LIMIT {
                warn!(remaining, "Rate limit low, adding delay");
                sleep(Duration::from_secs(1)).await;
            }
        }

        match response.status() {
            StatusCode::OK => Ok(Some(response.json::<T>().await?)),
            status => {
                debug!(%status, url, "Request returned no data");
                Ok(None)
            }
        }
    }

    /// Authenticated GET returning the decoded body on HTTP 200.
    ///
    /// Any other status, a transport failure, or an undecodable body all
    /// yield `None`; the caller treats them as "no data".
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Option<T> {
        match self.try_get(url, query).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url, error = %e, "Request failed");
                None
            }
        }
    }

    pub async fn get_repository(&self) -> Option<GitHubRepo> {
        self.get_json(&self.config.repo_url(), &[]).await
    }

    pub async fn get_user(&self, login: &str) -> Option<GitHubUserDetail> {
        self.get_json(&self.config.user_url(login), &[]).await
    }
}

/// Parse rate limit headers; `None` when the response carries none.
pub fn rate_limit_state(headers: &HeaderMap) -> Option<RateLimitState> {
    let remaining = headers
        .get("X-RateLimit-Remaining")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u32>().ok())?;

    let limit = headers
        .get("X-RateLimit-Limit")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(5000);

    let reset_time = headers
        .get("X-RateLimit-Reset")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
        .unwrap_or_else(|| Utc::now() + chrono::Duration::hours(1));

    Some(RateLimitState {
        remaining,
        limit,
        reset_time,
        is_limited: remaining == 0,
    })
}
