//! HTTP transport for Chartwell API communication.
//!
//! Endpoints talk to the server through the [`Transport`] trait: synchronous,
//! blocking calls that either return the raw response bytes or fail. The
//! stock implementation is [`HttpTransport`], a blocking reqwest client that
//! injects the session's auth token and translates non-2xx statuses into
//! [`ApiError::Server`]. Tests substitute an in-memory implementation.
//!
//! Retries, backoff, timeouts, and cancellation are out of scope at this
//! layer; a request blocks until the exchange completes or fails.

use std::sync::Arc;

use crate::error::ApiError;
use crate::session::Session;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The header carrying the session's auth token.
pub const AUTH_TOKEN_HEADER: &str = "X-Chartwell-Auth-Token";

/// Optional paging parameters for list requests.
///
/// # Example
///
/// ```rust
/// use chartwell_api::RequestOptions;
///
/// let options = RequestOptions::new().page_number(2).page_size(50);
/// assert_eq!(
///     options.to_query(),
///     vec![("pageNumber", "2".to_string()), ("pageSize", "50".to_string())]
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    page_number: Option<u32>,
    page_size: Option<u32>,
}

impl RequestOptions {
    /// Creates empty options (server defaults apply).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page_number: None,
            page_size: None,
        }
    }

    /// Requests a specific page, starting at 1.
    #[must_use]
    pub const fn page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Requests a specific page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Renders the options as query parameters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page_number) = self.page_number {
            query.push(("pageNumber", page_number.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        query
    }
}

/// The blocking HTTP collaborator endpoints are built on.
///
/// Implementations must check the session is signed in before issuing a
/// request, and must surface non-2xx responses as errors rather than bytes.
pub trait Transport: Send + Sync {
    /// Issues a GET and returns the response body.
    fn get(&self, url: &str, options: Option<&RequestOptions>) -> Result<Vec<u8>, ApiError>;

    /// Issues a PUT with an XML body and returns the response body.
    fn put(&self, url: &str, body: &str) -> Result<Vec<u8>, ApiError>;

    /// Issues a POST with an XML body and returns the response body.
    fn post(&self, url: &str, body: &str) -> Result<Vec<u8>, ApiError>;

    /// Issues a DELETE and returns the response body.
    fn delete(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

/// Blocking reqwest-backed [`Transport`].
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    session: Arc<Session>,
}

impl HttpTransport {
    /// Creates a transport bound to the given session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying HTTP client cannot be
    /// constructed (e.g. TLS initialization failure).
    pub fn new(session: Arc<Session>) -> Result<Self, ApiError> {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let client = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .user_agent(format!(
                "Chartwell API Library v{SDK_VERSION} | Rust {rust_version}"
            ))
            .build()?;
        Ok(Self { client, session })
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        // Auth and token checks happen before anything touches the network.
        self.session.ensure_signed_in()?;
        let token = self.session.auth_token().unwrap_or_default();

        let response = request.header(AUTH_TOKEN_HEADER, token).send()?;
        let code = response.status().as_u16();
        let bytes = response.bytes()?.to_vec();

        if (200..300).contains(&code) {
            Ok(bytes)
        } else {
            Err(ApiError::Server {
                code,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            })
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, options: Option<&RequestOptions>) -> Result<Vec<u8>, ApiError> {
        let mut request = self.client.get(url);
        if let Some(options) = options {
            request = request.query(&options.to_query());
        }
        self.send(request)
    }

    fn put(&self, url: &str, body: &str) -> Result<Vec<u8>, ApiError> {
        self.send(
            self.client
                .put(url)
                .header(reqwest::header::CONTENT_TYPE, "application/xml")
                .body(body.to_string()),
        )
    }

    fn post(&self, url: &str, body: &str) -> Result<Vec<u8>, ApiError> {
        self.send(
            self.client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/xml")
                .body(body.to_string()),
        )
    }

    fn delete(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.send(self.client.delete(url))
    }
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};
