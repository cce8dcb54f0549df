use super::{Fetcher, Request, Response};
use crate::TransportError;
use reqwest::blocking::Client;

/// A [`Fetcher`] sending requests with [`reqwest`]'s blocking client.
#[derive(Clone, Debug, Default)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// A fetcher using a default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the underlying [`reqwest::blocking::Client`],
    /// e.g. to add authentication headers.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

impl Fetcher for ReqwestFetcher {
    fn fetch(&self, url: &str, request: Request) -> Result<Response, TransportError> {
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let resp = builder.send()?;
        let url = resp.url().to_string();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text()?;
        Ok(Response {
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url,
            status,
            headers,
            body,
        })
    }
}
