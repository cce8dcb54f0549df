//! This crate is part of [solid_rs],
//! a [Solid] client toolkit in Rust.
//!
//! It defines the RDF data model shared by the other crates:
//! * [`Term`], a closed sum type over [`NamedNode`], [`BlankNode`], [`Literal`],
//!   [`Variable`] and the default graph, with structural equality;
//! * [`Quad`], whose constructor rejects components of the wrong kind;
//! * [`DataFactory`](factory::DataFactory), which owns its own blank node counter;
//! * the vocabularies in [`ns`].
//!
//! [solid_rs]: https://docs.rs/solid_client/latest/solid_client/
//! [Solid]: https://solidproject.org/
#![deny(missing_docs)]

mod _display;
mod _error;
pub use _error::*;
mod _quad;
pub use _quad::*;
mod _term;
pub use _term::*;

pub mod factory;
pub mod ns;

pub use factory::DataFactory;
