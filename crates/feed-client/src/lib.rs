//! # feed-client
//!
//! HTTP client for the paginated post-listing endpoint.
//!
//! One request shape only: `GET {endpoint}?_page=<n>&_limit=<size>`, answered
//! with a JSON array of posts. The client does not retry or back off; callers
//! decide what a failed page means.

mod error;
mod http;
mod listing;

pub use error::ClientError;
pub use listing::{page_url, parse_listing};

use std::future::Future;
use std::time::Duration;

use feed_core::Post;
use reqwest::Url;

/// Anything that can serve listing pages.
///
/// [`ListingClient`] is the production implementation; the session driver only
/// depends on this trait so it can run against in-memory sources.
pub trait PageSource: Send + Sync + 'static {
    /// Load page `page` holding at most `limit` posts.
    fn load_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Post>, ClientError>> + Send;
}

/// HTTP client for one listing endpoint.
#[derive(Debug, Clone)]
pub struct ListingClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ListingClient {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute `http`/`https` URL, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be built.
    pub fn new(endpoint: &str, timeout: Duration, user_agent: &str) -> Result<Self, ClientError> {
        let endpoint = parse_endpoint(endpoint)?;
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, endpoint })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PageSource for ListingClient {
    fn load_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Post>, ClientError>> + Send {
        self.fetch_page(page, limit)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
