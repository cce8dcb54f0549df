use solid_term::{TermError, TermKind};
use thiserror::Error;

/// Type alias for `Result` with default error `ThingError`.
pub type Result<T, E = ThingError> = std::result::Result<T, E>;

/// Invalid input given to the Thing and SolidDataset API.
///
/// These errors are raised before anything else happens,
/// so the input dataset or Thing is never partially updated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThingError {
    /// A Thing was expected, but something else (e.g. a blank node) was given.
    #[error("Expected a Thing, but received: [{0}].")]
    ThingExpected(String),
    /// The URL identifying a Thing is not a valid absolute URL.
    #[error("Expected a valid URL to identify a Thing, but received: [{0}].")]
    ValidThingUrlExpected(String),
    /// The URL identifying a property is not a valid absolute URL.
    #[error("Expected a valid URL to identify a property, but received: [{0}].")]
    ValidPropertyUrlExpected(String),
    /// A URL value is not a valid absolute URL.
    #[error("Expected a valid URL value, but received: [{0}].")]
    ValidValueUrlExpected(String),
    /// The URL of a local Thing was requested without a base to resolve it against.
    #[error("The URL of a Thing that has not been persisted cannot be determined without a base URL: [{0}].")]
    LocalThingWithoutBase(String),
    /// A quad could not be rebuilt from the dataset.
    #[error(transparent)]
    Term(#[from] TermError),
}

/// A quad could not be folded into a SolidDataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// Only named graphs and the default graph are supported.
    #[error("Cannot parse Quads with nodes of type [{0}] as their Graph node.")]
    UnsupportedGraph(TermKind),
    /// Only IRIs and blank nodes are supported as subjects.
    #[error("Cannot parse Quads with nodes of type [{0}] as their Subject node.")]
    UnsupportedSubject(TermKind),
    /// Only IRIs, literals and blank nodes are supported as objects.
    #[error("Objects of type [{0}] are not supported.")]
    UnsupportedObject(TermKind),
}
