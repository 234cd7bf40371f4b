//! Listing page request and response mapping.

use feed_core::Post;
use reqwest::Url;

use crate::{ListingClient, error::ClientError, http::check_response};

/// Build the URL for one page, keeping any query the endpoint already has.
#[must_use]
pub fn page_url(endpoint: &Url, page: u32, limit: u32) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("_page", &page.to_string())
        .append_pair("_limit", &limit.to_string());
    url
}

/// Decode a listing body into posts.
///
/// # Errors
///
/// Returns [`ClientError::Parse`] if the body is not a JSON array of posts.
pub fn parse_listing(body: &[u8]) -> Result<Vec<Post>, ClientError> {
    serde_json::from_slice(body).map_err(|e| ClientError::Parse(e.to_string()))
}

impl ListingClient {
    /// Fetch one page of posts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the endpoint answers with
    /// a non-success status, or the body is not a list of posts.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Post>, ClientError> {
        let url = page_url(&self.endpoint, page, limit);
        tracing::debug!(%url, page, limit, "fetching listing page");

        let resp = check_response(self.http.get(url).send().await?).await?;
        let body = resp.bytes().await?;
        let posts = parse_listing(&body)?;

        tracing::debug!(page, count = posts.len(), "listing page received");
        Ok(posts)
    }
}
