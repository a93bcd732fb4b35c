//! HTTP plumbing shared by every source
//!
//! One `reqwest::Client` serves the whole run. All fetches go through
//! [`Fetcher::fetch_text`], which applies the retry policy: transport
//! errors, timeouts, and non-success statuses are all treated as transient
//! and the same request is reissued, with no backoff. Under the default
//! [`RetryPolicy::Forever`] a permanently failing endpoint therefore hangs
//! the run; that is the documented operational trade-off, and tests inject
//! a bounded policy instead.

use crate::{Result, TallyError};
use reqwest::Client;
use std::time::Duration;

/// How many times a failing fetch is reissued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Retry unconditionally until the fetch succeeds
    Forever,

    /// Give up after this many attempts (used by tests and diagnostics)
    Limited(u32),
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `attempts` failures
    pub fn allows(&self, attempts: u32) -> bool {
        match self {
            RetryPolicy::Forever => true,
            RetryPolicy::Limited(max) => attempts < *max,
        }
    }
}

/// Builds the HTTP client shared by all workers
///
/// Timeouts bound a single attempt, not the retry loop around it.
pub fn build_http_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("reel-tally/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Retrying text fetcher used by every source implementation
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches the body at `url` as text, retrying per the policy
    ///
    /// An attempt fails on a transport error, a timeout, a non-success
    /// status, or a body read error. Failures are logged at debug level and
    /// never surfaced unless the policy runs out.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let mut attempts: u32 = 0;

        loop {
            match self.attempt(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempts += 1;
                    tracing::debug!("Fetch attempt {} for {} failed: {}", attempts, url, e);

                    if !self.policy.allows(attempts) {
                        return Err(TallyError::RetriesExhausted {
                            url: url.to_string(),
                            attempts,
                        });
                    }
                }
            }
        }
    }

    async fn attempt(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TallyError::Http {
                url: url.to_string(),
                source,
            })?;

        let response = response
            .error_for_status()
            .map_err(|source| TallyError::Http {
                url: url.to_string(),
                source,
            })?;

        response.text().await.map_err(|source| TallyError::Http {
            url: url.to_string(),
            source,
        })
    }
}
