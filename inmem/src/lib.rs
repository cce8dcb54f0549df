//! This crate is part of [solid_rs],
//! a [Solid] client toolkit in Rust.
//!
//! It provides [`DatasetCore`], an in-memory quad store
//! with three nested indexes per graph.
//!
//! [solid_rs]: https://docs.rs/solid_client/latest/solid_client/
//! [Solid]: https://solidproject.org/
#![deny(missing_docs)]

pub mod dataset;
pub mod index;

pub use dataset::DatasetCore;
