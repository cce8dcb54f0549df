//! This crate is part of [solid_rs],
//! a [Solid] client toolkit in Rust.
//!
//! It parses and serializes HTTP `Link` headers as defined by [RFC 8288].
//!
//! ```
//! # use solid_link::Link;
//! let link: Link = r#"<https://example.org/doc.acl>; rel="acl", <a>; rel="next last""#.parse()?;
//! assert_eq!(link.rel("acl")[0].uri, "https://example.org/doc.acl");
//! assert_eq!(link.len(), 3);
//! # Ok::<(), solid_link::LinkError>(())
//! ```
//!
//! [solid_rs]: https://docs.rs/solid_client/latest/solid_client/
//! [Solid]: https://solidproject.org/
//! [RFC 8288]: https://www.rfc-editor.org/rfc/rfc8288
#![deny(missing_docs)]

mod _error;
pub use _error::*;
mod _format;
mod _link;
pub use _link::*;
mod _parser;
