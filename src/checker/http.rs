// src/checker/http.rs
// =============================================================================
// This module checks if a single URL is reachable by making HTTP requests.
//
// Key functionality:
// - Makes an HTTP HEAD request first (lightweight, no body download)
// - Falls back to GET if HEAD fails (some servers refuse HEAD)
// - Follows redirects up to a limit, then uses the last response
// - Applies the same per-request timeout to both attempts
//
// "Reachable" means the request completed at the transport level. We do not
// look at the status code: a 404 page is still a server that answered.
//
// Rust concepts:
// - Traits: LinkClient hides the network so tests can swap in a fake
// - async-trait: lets trait methods be async
// - Duration: type-safe time spans
// =============================================================================

use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;

use super::error::{CheckError, ProbeError};

pub const DEFAULT_WORKER_COUNT: usize = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

// Settings shared (read-only) by every worker during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Timeout applied to each HEAD and each GET request on its own
    pub timeout: Duration,
    /// Redirect hops to follow before settling on the last response
    pub max_redirects: usize,
    /// Number of concurrent workers in the verification pool
    pub worker_count: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }
}

// Classification of a link after probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// HEAD or GET completed
    Reachable,
    /// Both HEAD and GET failed
    Unreachable,
}

/// The network operations the prober needs.
///
/// `Ok(())` means the request completed; the response itself is discarded.
#[async_trait]
pub trait LinkClient: Send + Sync {
    async fn head(&self, url: &str) -> Result<(), ProbeError>;
    async fn get(&self, url: &str) -> Result<(), ProbeError>;
}

// The real client, backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    // Builds one client for the whole run.
    // reqwest::Client keeps a connection pool, so every worker shares it.
    pub fn new(config: &ProbeConfig) -> Result<Self, CheckError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect_policy(config.max_redirects))
            .user_agent(concat!("link-sentinel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

// Follows redirects until `max_redirects` hops have been made.
// At the limit we stop and keep the last response instead of failing,
// so a long redirect chain still counts as a completed request.
fn redirect_policy(max_redirects: usize) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        // previous() includes the original URL, so this allows max_redirects hops
        if attempt.previous().len() > max_redirects {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

#[async_trait]
impl LinkClient for HttpClient {
    async fn head(&self, url: &str) -> Result<(), ProbeError> {
        self.client.head(url).send().await?;
        Ok(())
    }

    async fn get(&self, url: &str) -> Result<(), ProbeError> {
        self.client.get(url).send().await?;
        Ok(())
    }
}

// Checks a single link
//
// Parameters:
//   client: anything implementing LinkClient (borrowed, shared by workers)
//   url: the link to check
//
// Returns: Reachable on the first request that completes, Unreachable if
// both the HEAD and the GET fail.
//
// Any HEAD failure triggers the GET, whether it was a timeout, a refused
// connection or a malformed URL.
pub async fn probe(client: &dyn LinkClient, url: &str) -> LinkStatus {
    let head_err = match client.head(url).await {
        Ok(()) => {
            tracing::debug!(%url, "HEAD succeeded");
            return LinkStatus::Reachable;
        }
        Err(e) => e,
    };

    tracing::debug!(%url, error = %head_err, "HEAD failed, falling back to GET");

    match client.get(url).await {
        Ok(()) => {
            tracing::debug!(%url, "GET succeeded");
            LinkStatus::Reachable
        }
        Err(e) => {
            tracing::debug!(%url, error = %e, "GET failed, link is unreachable");
            LinkStatus::Unreachable
        }
    }
}
