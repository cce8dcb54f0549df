/// An error raised while parsing a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// A character that can not start a token in the current state.
    #[error("Unexpected character \"{found}\" at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Its position, in characters, in the unfolded header value.
        offset: usize,
    },
    /// A `<` with no matching `>`.
    #[error("Expected end of URI delimiter at offset {offset}")]
    UnterminatedUri {
        /// Position of the `<`.
        offset: usize,
    },
    /// An attribute with no `=`.
    #[error("Expected attribute delimiter at offset {offset}")]
    MissingAttributeDelimiter {
        /// Position where the attribute name starts.
        offset: usize,
    },
}
