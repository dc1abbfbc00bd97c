//! Client for the upstream origin.
//!
//! # Responsibilities
//! - Build the target URI (base URL + request target, verbatim, never
//!   normalized or re-encoded)
//! - Issue the GET with the caller's User-Agent, or the configured default
//! - Follow redirects, up to a fixed hop count
//! - Enforce the total deadline, redirects and body read included
//! - Classify the outcome: relayable response, origin status, or failure

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{
        header::{InvalidHeaderValue, LOCATION, USER_AGENT},
        uri::InvalidUri,
        HeaderMap, HeaderValue, Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use crate::config::UpstreamConfig;

/// Redirect hops followed before the last 3xx is handed back as-is.
const MAX_REDIRECTS: usize = 10;

/// Why an upstream fetch did not produce a relayable response.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The origin answered, but not with a success status.
    #[error("upstream returned {0}")]
    Status(StatusCode),
    #[error("invalid upstream URI {url:?}: {source}")]
    InvalidUri {
        url: String,
        #[source]
        source: InvalidUri,
    },
    #[error("unusable redirect location {0:?}")]
    BadRedirect(String),
    /// Refused, DNS, reset, malformed response.
    #[error("request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),
    #[error("reading response body: {0}")]
    Body(#[from] axum::Error),
    #[error("no complete response within {0:?}")]
    Timeout(Duration),
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let status = match self {
            UpstreamError::Status(status) => status,
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, Body::empty()).into_response()
    }
}

/// A successful origin response, fully buffered.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Shared HTTP client bound to one origin.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    base_url: String,
    default_user_agent: HeaderValue,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, InvalidHeaderValue> {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            default_user_agent: HeaderValue::from_str(&config.user_agent)?,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Full URL for a request target.
    pub fn url_for(&self, target: &str) -> String {
        format!("{}{}", self.base_url, target)
    }

    /// GET `target` from the origin.
    ///
    /// `user_agent` is forwarded byte for byte when present.
    pub async fn fetch(
        &self,
        target: &str,
        user_agent: Option<HeaderValue>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let user_agent = user_agent.unwrap_or_else(|| self.default_user_agent.clone());

        tokio::time::timeout(self.timeout, self.follow(self.url_for(target), user_agent))
            .await
            .map_err(|_| UpstreamError::Timeout(self.timeout))?
    }

    async fn follow(
        &self,
        mut url: String,
        user_agent: HeaderValue,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let mut hops = 0;
        loop {
            let uri = Uri::try_from(url.as_str()).map_err(|source| UpstreamError::InvalidUri {
                url: url.clone(),
                source,
            })?;

            let mut request = Request::new(Body::empty());
            *request.uri_mut() = uri;
            request.headers_mut().insert(USER_AGENT, user_agent.clone());

            let response = self.client.request(request).await?;
            let status = response.status();

            if is_followed_redirect(status) && hops < MAX_REDIRECTS {
                if let Some(next) = redirect_target(&url, response.headers())? {
                    tracing::debug!(from = %url, to = %next, status = %status, "Following upstream redirect");
                    hops += 1;
                    url = next;
                    continue;
                }
            }

            if !status.is_success() {
                return Err(UpstreamError::Status(status));
            }

            let (parts, body) = response.into_parts();
            let body = axum::body::to_bytes(Body::new(body), usize::MAX).await?;

            return Ok(UpstreamResponse {
                status,
                headers: parts.headers,
                body,
            });
        }
    }
}

fn is_followed_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Absolute URL a redirect points at, resolved against the current one.
///
/// `None` when the response carries no `Location`; the 3xx is then relayed.
fn redirect_target(current: &str, headers: &HeaderMap) -> Result<Option<String>, UpstreamError> {
    let Some(location) = headers.get(LOCATION) else {
        return Ok(None);
    };

    let location = location
        .to_str()
        .map_err(|_| UpstreamError::BadRedirect(String::from_utf8_lossy(location.as_bytes()).into_owned()))?;

    Url::parse(current)
        .and_then(|base| base.join(location))
        .map(|next| Some(next.to_string()))
        .map_err(|_| UpstreamError::BadRedirect(location.to_string()))
}
