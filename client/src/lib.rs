//! A toolkit for reading and writing data in [Solid] Pods.
//!
//! Data is handled as immutable [`SolidDataset`]s, made of [`Thing`]s,
//! which are read from and written to a Pod by a [`SolidClient`].
//! The client never touches the network by itself:
//! requests go through a [`Fetcher`](fetch::Fetcher),
//! which decides about authentication.
//! With the `http_client` feature, [`ReqwestFetcher`](fetch::ReqwestFetcher)
//! provides one based on `reqwest`.
//!
//! Access to resources is governed by Web Access Control lists,
//! see [`SolidClient::get_solid_dataset_with_acl`] and the [`wac`] crate.
//!
//! # Getting Started
//!
//! ```
//! use solid_client::{create_solid_dataset, Thing};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let alien = Thing::create_named("alien")
//!     .set_string_no_locale("https://schema.org/name", "Alien")?
//!     .set_integer("https://schema.org/duration", 117)?;
//! let movies = create_solid_dataset().set_thing(&alien)?;
//! assert_eq!(movies.change_log().additions().len(), 2);
//! println!("{}", solid_client::markdown::solid_dataset_as_markdown(&movies));
//! // with a fetcher, the dataset could now be saved:
//! // client.save_solid_dataset_at("https://pod.example/movies", &movies)?;
//! # Ok(())
//! # }
//! ```
//!
//! [Solid]: https://solidproject.org/
#![deny(missing_docs)]

mod _error;
pub use _error::*;
mod client;
pub use client::*;

mod acl;
pub mod fetch;
pub mod parse;
pub mod resource_info;
pub mod turtle;

pub use parse::ParseOptions;
pub use resource_info::{parse_wac_allow, ResourceInfoOptions};

pub use solid_dataset::{
    assemble, literal, local, markdown, thing, Access, AssembleOptions, ChangeLog,
    HasResourceInfo, ResourceInfo, SolidDataset, Thing, ThingQuery, WacPermissions,
};

pub use solid_acl as wac;
pub use solid_dataset as dataset;
pub use solid_inmem as inmem;
pub use solid_link as link;
pub use solid_term as term;
