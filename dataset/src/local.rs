//! Local nodes: placeholder IRIs for Things that have no URL yet.
//!
//! A local node IRI is [`LOCAL_NODE_PREFIX`] followed by a name.
//! Once the dataset holding it is saved at some resource URL,
//! it is rewritten to `<resource URL>#<name>`.
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

/// Prefix reserved for local node IRIs.
pub const LOCAL_NODE_PREFIX: &str = "https://inrupt.com/.well-known/sdk-local-node/";

/// Whether `iri` is a local node IRI.
pub fn is_local_node_iri(iri: &str) -> bool {
    iri.starts_with(LOCAL_NODE_PREFIX)
}

/// The name of a local node, i.e. its IRI without the reserved prefix.
pub fn local_node_name(iri: &str) -> &str {
    iri.strip_prefix(LOCAL_NODE_PREFIX).unwrap_or(iri)
}

/// The local node IRI for `name`.
pub fn local_node_iri(name: &str) -> String {
    format!("{LOCAL_NODE_PREFIX}{name}")
}

/// Resolve the local node called `name` against `resource_iri`,
/// replacing its fragment.
///
/// Falls back to plain concatenation if `resource_iri` is not a valid URL.
pub fn resolve_local_iri(name: &str, resource_iri: &str) -> String {
    match Url::parse(resource_iri) {
        Ok(mut url) => {
            url.set_fragment(Some(name));
            url.to_string()
        }
        Err(_) => format!("{resource_iri}#{name}"),
    }
}

/// A fresh name for a local node: the current time in milliseconds
/// followed by random digits.
///
/// Names are unique with high probability only.
pub fn generate_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix: u64 = rand::thread_rng().gen_range(0..1_000_000_000_000);
    format!("{millis}{suffix:012}")
}

/// Whether `iri` is a blank node identifier of the form `_:id`.
pub fn is_blank_node_id(iri: &str) -> bool {
    iri.starts_with("_:")
}
