//! Blocking HTTP transport shared by the service clients.
//!
//! The core traits are synchronous so they stay embeddable in synchronous
//! callers. [`BlockingTransport`] bridges them to async `reqwest` by
//! blocking on a Tokio runtime: its own current-thread runtime by default,
//! or the caller's runtime through [`tokio::task::block_in_place`] when
//! invoked from inside a multi-threaded runtime.

use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Default user agent for service requests.
pub const DEFAULT_USER_AGENT: &str = "optiroute/0.1";

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while constructing an HTTP client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured base URL is not an absolute HTTP(S) URL.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// Rejected URL.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },
}

/// Raw reply from a service: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpReply {
    pub(crate) status: u16,
    pub(crate) body: String,
}

impl HttpReply {
    pub(crate) const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failure before a reply body was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransportFailure {
    Timeout { timeout_secs: u64 },
    Network { message: String },
}

/// `reqwest` client plus the runtime used to drive it synchronously.
pub(crate) struct BlockingTransport {
    client: Client,
    runtime: Runtime,
    timeout: Duration,
}

impl std::fmt::Debug for BlockingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingTransport")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BlockingTransport {
    pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    /// Issue a `GET` and collect the reply, whatever its status.
    pub(crate) fn get(&self, url: &Url) -> Result<HttpReply, TransportFailure> {
        debug!("GET {url}");
        self.block_on(self.get_async(url))
    }

    async fn get_async(&self, url: &Url) -> Result<HttpReply, TransportFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.classify(&err))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| self.classify(&err))?;
        Ok(HttpReply { status, body })
    }

    fn classify(&self, error: &reqwest::Error) -> TransportFailure {
        if error.is_timeout() {
            TransportFailure::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            TransportFailure::Network {
                message: error.to_string(),
            }
        }
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// Inside a multi-threaded runtime the caller's runtime is used through
    /// `block_in_place`; otherwise, including from a `current_thread`
    /// runtime, the owned runtime is used. The latter may deadlock if the
    /// caller's runtime drives IO this request depends on.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Parse and normalise a configured base URL.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ClientBuildError> {
    let invalid = |reason: String| ClientBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason,
    };
    let url =
        Url::parse(raw.trim().trim_end_matches('/')).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid("expected an http or https URL".to_owned()));
    }
    Ok(url)
}

/// Append `segments` to the path of `base`.
pub(crate) fn endpoint_url<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// First line of a reply body, for error messages.
pub(crate) fn body_excerpt(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    body.lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(MAX_CHARS)
        .collect()
}
