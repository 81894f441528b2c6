//! Single-attempt endpoint probing.
//!
//! # Responsibilities
//! - Issue exactly one request per call with a hard deadline
//! - Classify the result into an `AttemptOutcome`
//!
//! # Classification (priority order)
//! 1. Deadline exceeded → `Timeout`
//! 2. Network/DNS/TLS failure → `ConnectionError`
//! 3. Status equals `expected_status` → `Success` (3xx expectations see
//!    the first response, other expectations see the redirect target)
//! 4. Any other status → `UnexpectedStatus`

use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;

use crate::health::types::{AttemptOutcome, EndpointSpec};
use crate::resilience::timeouts;

/// One network attempt against one endpoint. Implementations keep no
/// per-endpoint memory between calls.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, spec: &EndpointSpec) -> AttemptOutcome;
}

/// HTTP(S) probe backed by shared `reqwest` clients.
///
/// Redirects are followed unless the endpoint expects a 3xx status, in
/// which case the first response is the one classified.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    no_redirect: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(Policy::default())?,
            no_redirect: build_client(Policy::none())?,
        })
    }

    fn client_for(&self, spec: &EndpointSpec) -> &reqwest::Client {
        if (300..400).contains(&spec.expected_status) {
            &self.no_redirect
        } else {
            &self.client
        }
    }
}

fn build_client(redirects: Policy) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("health-monitor/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .redirect(redirects)
        // Every attempt opens its own connection.
        .pool_max_idle_per_host(0)
        .build()
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, spec: &EndpointSpec) -> AttemptOutcome {
        let request = self
            .client_for(spec)
            .request(spec.method.clone(), spec.url.clone())
            .send();

        match timeouts::enforce(spec.timeout, request).await {
            Err(_) => AttemptOutcome::Timeout,
            Ok(Err(e)) if e.is_timeout() => AttemptOutcome::Timeout,
            Ok(Err(e)) => AttemptOutcome::ConnectionError {
                detail: error_detail(&e),
            },
            Ok(Ok(response)) => classify_status(response.status().as_u16(), spec.expected_status),
        }
    }
}

/// Map a received status code onto an outcome.
pub fn classify_status(status_code: u16, expected_status: u16) -> AttemptOutcome {
    if status_code == expected_status {
        AttemptOutcome::Success { status_code }
    } else {
        AttemptOutcome::UnexpectedStatus { status_code }
    }
}

// reqwest's Display stops at the outermost layer; walk the sources so the
// detail names the actual DNS/TLS/socket failure.
fn error_detail(error: &reqwest::Error) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200, 200), AttemptOutcome::Success { status_code: 200 });
        assert_eq!(classify_status(204, 204), AttemptOutcome::Success { status_code: 204 });
        assert_eq!(
            classify_status(200, 204),
            AttemptOutcome::UnexpectedStatus { status_code: 200 }
        );
        assert_eq!(
            classify_status(500, 200),
            AttemptOutcome::UnexpectedStatus { status_code: 500 }
        );
    }

    #[test]
    fn test_http_probe_builds() {
        assert!(HttpProbe::new().is_ok());
    }
}
