//! A recording [`Fetcher`] replaying canned responses.
use super::{Fetcher, Request, Response};
use crate::TransportError;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers requests with the queued responses, in order,
/// and records every request it receives.
///
/// A queued response with an empty URL takes the URL of the request.
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: RefCell<VecDeque<Response>>,
    requests: RefCell<Vec<(String, Request)>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `response`.
    pub fn respond(self, response: Response) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    /// Queue a response with status `status` and the given headers and body.
    pub fn respond_with(
        self,
        status: u16,
        headers: &[(&'static str, &'static str)],
        body: &str,
    ) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        let mut response = Response::new("", status).with_body(body);
        for &(name, value) in headers {
            response = response.with_header(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        self.respond(response)
    }

    /// The requests received so far.
    pub fn requests(&self) -> Vec<(String, Request)> {
        self.requests.borrow().clone()
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, url: &str, request: Request) -> Result<Response, TransportError> {
        self.requests.borrow_mut().push((url.to_string(), request));
        let mut response = self
            .responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| format!("no response queued for {url}"))?;
        if response.url.is_empty() {
            response.url = url.to_string();
        }
        Ok(response)
    }
}

pub(crate) fn test_setup() {
    TEST_SETUP.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

static TEST_SETUP: std::sync::Once = std::sync::Once::new();
