//! A single HTTP GET with a bounded timeout.
//!
//! The fetcher follows redirects and never retries. Every failure is an
//! [`Error`] that maps to an UNKNOWN [`Verdict`]: the probe could not tell
//! whether the monitored system is fine or not.
use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client as HttpClient, Response, StatusCode, Version};
use thiserror::Error;
use url::Url;

use super::status::Verdict;

/// Default timeout for connecting and for the whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The `User-Agent` header sent unless the configuration says otherwise.
pub const DEFAULT_USER_AGENT: &str = "nagios-check";

const MAX_REDIRECTS: usize = 20;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Invalid URL `{locator}`: {source}")]
    InvalidLocator { locator: String, source: url::ParseError },

    #[error("Unsupported scheme `{scheme}` in URL `{locator}`")]
    UnsupportedScheme { locator: String, scheme: String },

    #[error("Failed to build the HTTP client: {err}")]
    ClientBuilding { err: Arc<reqwest::Error> },

    #[error("Request to {url} timed out after {}s", .timeout.as_secs())]
    Timeout { url: Url, timeout: Duration },

    #[error("Could not connect to {url}: {err}")]
    Connection { url: Url, err: Arc<reqwest::Error> },

    #[error("Request to {url} failed: {err}")]
    Request { url: Url, err: Arc<reqwest::Error> },

    #[error("{url} returned a non-success status: {code}")]
    UnsuccessfulResponse { url: Url, code: StatusCode },

    #[error("Failed to read the response body from {url}: {err}")]
    Body { url: Url, err: Arc<reqwest::Error> },
}

impl Error {
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::unknown(format!("UNKNOWN - {self}"))
    }
}

/// Removes every whitespace character from a locator.
///
/// Locators are often pasted into monitoring configs with stray spaces or
/// line breaks.
#[must_use]
pub fn sanitize_locator(locator: &str) -> String {
    locator.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Sanitizes a locator and parses it as an `http` or `https` URL.
///
/// # Errors
///
/// Will return an error if the locator is not a valid URL once the whitespace
/// has been removed, or if its scheme is not `http` or `https`.
pub fn parse_locator(locator: &str) -> Result<Url, Error> {
    let sanitized = sanitize_locator(locator);

    let url = Url::parse(&sanitized).map_err(|source| Error::InvalidLocator {
        locator: locator.to_owned(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::UnsupportedScheme {
            locator: locator.to_owned(),
            scheme: scheme.to_owned(),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: HttpClient,
    timeout: Duration,
}

impl Fetcher {
    /// # Errors
    ///
    /// Will return an error if the HTTP client cannot be built, for example
    /// when the user agent is not a valid header value.
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self, Error> {
        let mut builder = HttpClient::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS));

        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent.to_owned());
        }

        let client = builder.build().map_err(|e| Error::ClientBuilding { err: e.into() })?;

        Ok(Self { client, timeout })
    }

    /// Fetches the body of a resource.
    ///
    /// # Errors
    ///
    /// Will return an error if there is no response within the timeout, if
    /// the response status is not a `2xx` one, or if the body cannot be read.
    pub async fn fetch_body(&self, url: &Url) -> Result<Vec<u8>, Error> {
        let response = self.get(url).await?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::UnsuccessfulResponse {
                url: url.clone(),
                code: status,
            });
        }

        let body = response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                self.timed_out(url)
            } else {
                Error::Body {
                    url: url.clone(),
                    err: err.into(),
                }
            }
        })?;

        tracing::debug!(%url, bytes = body.len(), "body received");

        Ok(body.to_vec())
    }

    /// Fetches a resource and returns the status line of the final response,
    /// whatever the status code is. For example: `HTTP/1.1 404 Not Found`.
    ///
    /// # Errors
    ///
    /// Will return an error if there is no response within the timeout.
    pub async fn fetch_status_line(&self, url: &Url) -> Result<String, Error> {
        let response = self.get(url).await?;

        Ok(status_line(response.version(), response.status()))
    }

    async fn get(&self, url: &Url) -> Result<Response, Error> {
        tracing::debug!(%url, timeout = ?self.timeout, "fetching");

        let response = self.client.get(url.clone()).send().await.map_err(|err| {
            if err.is_timeout() {
                self.timed_out(url)
            } else if err.is_connect() {
                Error::Connection {
                    url: url.clone(),
                    err: err.into(),
                }
            } else {
                Error::Request {
                    url: url.clone(),
                    err: err.into(),
                }
            }
        })?;

        tracing::debug!(%url, final_url = %response.url(), status = %response.status(), "response received");

        Ok(response)
    }

    fn timed_out(&self, url: &Url) -> Error {
        Error::Timeout {
            url: url.clone(),
            timeout: self.timeout,
        }
    }
}

fn status_line(version: Version, status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{version:?} {} {reason}", status.as_u16()),
        None => format!("{version:?} {}", status.as_u16()),
    }
}
