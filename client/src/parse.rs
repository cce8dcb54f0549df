//! Turning a response into a [`SolidDataset`].
use crate::fetch::Response;
use crate::resource_info::{mime_type, resource_info_from_response};
use crate::turtle::{parse_turtle, TURTLE};
use crate::{ClientError, DocumentError, FetchError, Result};
use http::header::CONTENT_TYPE;
use solid_dataset::{assemble, AssembleOptions, SolidDataset};
use solid_term::Quad;
use std::collections::BTreeMap;
use std::fmt;

/// A parser turning a document body into quads,
/// relative IRIs being resolved against the given base.
pub type ParserFn = fn(body: &str, base: &str) -> Result<Vec<Quad>, DocumentError>;

/// How responses are parsed into datasets.
#[derive(Clone)]
pub struct ParseOptions {
    assemble: AssembleOptions,
    parsers: BTreeMap<String, ParserFn>,
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("assemble", &self.assemble)
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        let mut parsers = BTreeMap::new();
        parsers.insert(TURTLE.to_string(), parse_turtle as ParserFn);
        ParseOptions {
            assemble: AssembleOptions::default(),
            parsers,
        }
    }
}

impl ParseOptions {
    /// Parse Turtle only, with the default assembly options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `parser` for documents of MIME type `mime_type`.
    pub fn with_parser(mut self, mime_type: impl Into<String>, parser: ParserFn) -> Self {
        self.parsers.insert(mime_type.into(), parser);
        self
    }

    /// Set the number of distinct blank nodes beyond which chains are no longer inlined.
    pub fn with_chain_detection_threshold(mut self, threshold: usize) -> Self {
        self.assemble = self.assemble.with_chain_detection_threshold(threshold);
        self
    }

    /// The assembly options.
    pub fn assemble_options(&self) -> &AssembleOptions {
        &self.assemble
    }

    /// The MIME types that can be parsed, sorted.
    pub fn content_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.parsers.keys().map(String::as_str)
    }

    /// The value of the `Accept` header of requests for datasets.
    pub fn accept_header(&self) -> String {
        let types: Vec<&str> = self.content_types().collect();
        if types.is_empty() {
            TURTLE.to_string()
        } else {
            types.join(", ")
        }
    }

    fn parser(&self, mime_type: &str) -> Option<ParserFn> {
        self.parsers.get(mime_type).copied()
    }
}

/// Parse the body of `response` into a dataset
/// carrying the metadata of `response` and an empty change log.
pub fn response_to_solid_dataset(
    response: &Response,
    options: &ParseOptions,
) -> Result<SolidDataset> {
    let url = &response.url;
    if !response.ok() {
        return Err(FetchError::new(
            format!(
                "Fetching the SolidDataset at [{url}] failed: [{}] [{}].",
                response.status.as_u16(),
                response.status_text
            ),
            response,
        )
        .into());
    }
    let content_type = response
        .header(CONTENT_TYPE)
        .ok_or_else(|| ClientError::NoContentType(url.clone()))?;
    let mime_type = mime_type(content_type);
    let parser = options
        .parser(mime_type)
        .ok_or_else(|| ClientError::NoParser {
            url: url.clone(),
            mime_type: mime_type.to_string(),
            available: options.content_types().collect::<Vec<_>>().join(", "),
        })?;
    let quads = parser(&response.body, url).map_err(|source| ClientError::Parse {
        url: url.clone(),
        content_type: content_type.to_string(),
        source,
    })?;
    log::debug!("parsed {} quads from {url}", quads.len());
    let dataset = assemble(quads, options.assemble_options().clone())?;
    let mut info = resource_info_from_response(response)?;
    info.is_raw_data = false;
    Ok(dataset.with_resource_info(info))
}
