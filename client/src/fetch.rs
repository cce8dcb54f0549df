//! The HTTP boundary of the client.
//!
//! The client never talks to the network itself:
//! every request goes through an injected [`Fetcher`].
use crate::TransportError;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode};

#[cfg(feature = "http_client")]
mod _reqwest;
#[cfg(feature = "http_client")]
pub use _reqwest::ReqwestFetcher;

#[cfg(test)]
pub(crate) mod mock;

/// An HTTP request, without its URL.
#[derive(Clone, Debug)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,
    /// The request headers.
    pub headers: HeaderMap,
    /// The request body, if any.
    pub body: Option<String>,
}

impl Request {
    /// A request with method `method`, no header and no body.
    pub fn new(method: Method) -> Self {
        Request {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The value of header `name`, if present and readable as text.
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// An HTTP response, with its body read as text.
#[derive(Clone, Debug)]
pub struct Response {
    /// The URL of the response, after redirections.
    pub url: String,
    /// The status code.
    pub status: StatusCode,
    /// The reason phrase.
    pub status_text: String,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body.
    pub body: String,
}

impl Response {
    /// A response from `url` with status `status`, its canonical reason phrase,
    /// no header and an empty body.
    pub fn new(url: impl Into<String>, status: StatusCode) -> Self {
        Response {
            url: url.into(),
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Whether the status is a success (2xx).
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// The value of header `name`, if present and readable as text.
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Performs HTTP requests on behalf of the client.
///
/// Implementors decide about authentication, redirections and timeouts.
/// An unsuccessful status is not an error at this level:
/// only a request that got no response at all is.
pub trait Fetcher {
    /// Send `request` to `url`.
    fn fetch(&self, url: &str, request: Request) -> Result<Response, TransportError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str, request: Request) -> Result<Response, TransportError> {
        (**self).fetch(url, request)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn fetch(&self, url: &str, request: Request) -> Result<Response, TransportError> {
        (**self).fetch(url, request)
    }
}

/// A [`Fetcher`] refusing every request,
/// for clients that only work on in-memory data.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFetcher;

/// The error raised by [`NoFetcher`].
#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error("no fetcher is configured")]
pub struct NoFetcherError;

impl Fetcher for NoFetcher {
    fn fetch(&self, url: &str, _request: Request) -> Result<Response, TransportError> {
        log::debug!("refusing request to {url}");
        Err(Box::new(NoFetcherError))
    }
}
