//! Response status checks for the listing endpoint.

use crate::error::ClientError;

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ClientError::RateLimited`], waiting time
///   taken from `Retry-After` (60 s if absent or not a number).
/// - **Any other non-success status** → [`ClientError::Api`] with the status
///   code and response body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = parse_retry_after(&resp);
        tracing::warn!(retry_after_secs = retry_after, "listing endpoint rate limited");
        return Err(ClientError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as delay-seconds.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, retry_after: Option<&str>, body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[test]
    fn retry_after_accepts_padded_seconds() {
        assert_eq!(parse_retry_after(&response(429, Some(" 15 "), "")), 15);
    }

    #[test]
    fn retry_after_falls_back_when_missing_or_http_date() {
        assert_eq!(parse_retry_after(&response(429, None, "")), 60);
        assert_eq!(
            parse_retry_after(&response(429, Some("Wed, 21 Oct 2026 07:28:00 GMT"), "")),
            60
        );
    }

    #[tokio::test]
    async fn too_many_requests_maps_to_rate_limited() {
        let err = check_response(response(429, Some("30"), "slow down"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn not_found_keeps_status_and_body() {
        let err = check_response(response(404, None, "{}")).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "{}");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let err = check_response(response(503, None, "")).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn success_statuses_pass_through() {
        for status in [200, 204] {
            let resp = check_response(response(status, None, "[]")).await.unwrap();
            assert_eq!(resp.status().as_u16(), status);
        }
    }
}
