use http::StatusCode;
use solid_acl::AclError;
use solid_dataset::{AssembleError, ThingError};
use solid_link::LinkError;
use solid_term::TermError;

/// Type alias for `Result` with default error `ClientError`.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// The error type of a [`Fetcher`](crate::fetch::Fetcher) that could not complete a request.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// A request was answered with an unsuccessful status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    /// What failed, with the status of the response.
    pub message: String,
    /// The URL of the response.
    pub url: String,
    /// The status of the response.
    pub status: StatusCode,
    /// The reason phrase of the response.
    pub status_text: String,
}

impl FetchError {
    /// An error for `response`, described by `message`.
    pub fn new(message: impl Into<String>, response: &crate::fetch::Response) -> Self {
        FetchError {
            message: message.into(),
            url: response.url.clone(),
            status: response.status,
            status_text: response.status_text.clone(),
        }
    }
}

/// A Turtle document could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Syntax error reported by the Turtle parser.
    #[error(transparent)]
    Turtle(#[from] rio_turtle::TurtleError),
    /// The base IRI given to the parser is not a valid IRI.
    #[error("Invalid base IRI <{base}>: {reason}")]
    InvalidBase {
        /// The rejected base IRI.
        base: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A term that Turtle cannot express, or that the data model does not support.
    #[error("Unsupported term in Turtle document: {0}")]
    UnsupportedTerm(String),
    /// A parsed triple was rejected by the data model.
    #[error(transparent)]
    Term(#[from] TermError),
    /// The serialized document could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any error raised by the [`SolidClient`](crate::SolidClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an unsuccessful status.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The fetcher could not complete the request.
    #[error("Requesting [{url}] failed: {source}")]
    Transport {
        /// The requested URL.
        url: String,
        /// The error raised by the fetcher.
        source: TransportError,
    },
    /// The response carries no `Content-Type`.
    #[error("Could not determine the content type of the Resource at [{0}].")]
    NoContentType(String),
    /// No parser is registered for the content type of the response.
    #[error("The Resource at [{url}] has a MIME type of [{mime_type}], but the only parsers available are for the following MIME types: [{available}].")]
    NoParser {
        /// The URL of the resource.
        url: String,
        /// The MIME type of the resource.
        mime_type: String,
        /// The MIME types that can be parsed, comma-separated.
        available: String,
    },
    /// The body of the response could not be parsed.
    #[error("Encountered an error parsing the Resource at [{url}] with content type [{content_type}]: {source}")]
    Parse {
        /// The URL of the resource.
        url: String,
        /// The `Content-Type` of the resource.
        content_type: String,
        /// The parser error.
        source: DocumentError,
    },
    /// The parsed quads could not be assembled into a dataset.
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    /// A document to send could not be serialized.
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// The `Link` header of a response is malformed.
    #[error("Invalid Link header from [{url}]: {source}")]
    Link {
        /// The URL of the response.
        url: String,
        /// The parser error.
        source: LinkError,
    },
    /// A header value to send is invalid.
    #[error(transparent)]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    /// A URL could not be parsed or resolved.
    #[error("Invalid URL [{url}]: {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// The parser error.
        source: url::ParseError,
    },
    /// The container to create already exists.
    #[error("The Container at [{0}] already exists, and therefore cannot be created again.")]
    ContainerExists(String),
    /// The data could not be handled by the Thing API.
    #[error(transparent)]
    Thing(#[from] ThingError),
    /// A quad could not be rebuilt from a dataset.
    #[error(transparent)]
    Term(#[from] TermError),
    /// An ACL could not be handled.
    #[error(transparent)]
    Acl(#[from] AclError),
}

impl ClientError {
    /// The status of the response, if this error was caused by an unsuccessful one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Fetch(err) => Some(err.status),
            _ => None,
        }
    }
}
