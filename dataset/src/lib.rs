//! This crate is part of [solid_rs],
//! a [Solid] client toolkit in Rust.
//!
//! It provides the immutable data API of a Solid client:
//! * [`Thing`], a subject with its values grouped by property and kind,
//!   with typed getters, adders, setters and removers;
//! * [`SolidDataset`], a set of Things grouped by graph,
//!   which records its changes in a [`ChangeLog`]
//!   and remembers the [`ResourceInfo`] of the resource it came from;
//! * [`assemble`], which folds a stream of quads into a dataset,
//!   and [`SolidDataset::to_quads`], which flattens it back;
//! * the [`literal`] codec for booleans, datetimes, decimals and integers;
//! * [`markdown`] renderings for debugging and error messages.
//!
//! [solid_rs]: https://docs.rs/solid_client/latest/solid_client/
//! [Solid]: https://solidproject.org/
#![deny(missing_docs)]

mod _error;
pub use _error::*;
mod change_log;
pub use change_log::*;
mod dataset;
pub use dataset::*;
mod resource_info;
pub use resource_info::*;

pub mod assemble;
pub mod literal;
pub mod local;
pub mod markdown;
pub mod thing;

pub use assemble::{assemble, AssembleOptions, DatasetAssembler};
pub use thing::{BlankNodeObject, Objects, Predicates, Thing};
