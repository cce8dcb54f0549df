//! This crate is part of [solid_rs],
//! a [Solid] client toolkit in Rust.
//!
//! It reads and rewrites [Web Access Control] lists.
//! An ACL is a [`SolidDataset`](solid_dataset::SolidDataset)
//! whose `acl:Authorization` Things are the rules;
//! [`AclDataset`] pairs it with the resource it governs.
//!
//! * [`rules`] holds the rule engine: matching, access mode combination,
//!   actor removal and pruning of empty rules;
//! * [`access`] offers agent, group and public getters and setters on top of it.
//!
//! [solid_rs]: https://docs.rs/solid_client/latest/solid_client/
//! [Solid]: https://solidproject.org/
//! [Web Access Control]: https://solid.github.io/web-access-control-spec/
#![deny(missing_docs)]

mod _acl;
pub use _acl::*;
mod _error;
pub use _error::*;

pub mod access;
pub mod rules;

pub use solid_dataset::Access;
