use thiserror::Error;

/// Type alias for `Result` with default error `TermError`.
///
/// Can be used like `std::result::Result` as well.
pub type Result<T, E = TermError> = std::result::Result<T, E>;

/// This error is raised when a term is used in a position that does not accept its kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TermError {
    /// A quad component has a kind that is not allowed in its position
    /// (e.g. a literal as graph name).
    #[error("Cannot use nodes of type [{kind}] as the {position} of a Quad: {term}")]
    UnsupportedKind {
        /// Where the term was used.
        position: QuadPosition,
        /// The kind of the faulty term.
        kind: crate::TermKind,
        /// The faulty term, in N-Triples syntax.
        term: String,
    },
}

/// The four positions of a [`Quad`](crate::Quad).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuadPosition {
    /// Subject position
    Subject,
    /// Predicate position
    Predicate,
    /// Object position
    Object,
    /// Graph name position
    Graph,
}

impl std::fmt::Display for QuadPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let txt = match self {
            QuadPosition::Subject => "subject",
            QuadPosition::Predicate => "predicate",
            QuadPosition::Object => "object",
            QuadPosition::Graph => "graph",
        };
        f.write_str(txt)
    }
}
