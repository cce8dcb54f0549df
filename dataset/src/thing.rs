//! [`Thing`]s: the subjects of a [`SolidDataset`](crate::SolidDataset),
//! with their values grouped by property and by kind.
//!
//! A Thing is immutable:
//! every `add_*`, `set_*` and `remove_*` method returns a new Thing
//! sharing the untouched parts of the original.
use crate::local::{generate_name, is_blank_node_id, is_local_node_iri, local_node_iri, local_node_name};
use crate::{Result, ThingError};
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

mod _add;
mod _get;
mod _remove;

/// The values of a Thing, keyed by property IRI.
pub type Predicates = BTreeMap<String, Arc<Objects>>;

/// The values of one property of a Thing, grouped by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Objects {
    /// IRI values.
    pub named_nodes: Vec<String>,
    /// Literal values other than language-tagged strings,
    /// as lexical forms keyed by datatype IRI.
    pub literals: BTreeMap<String, Vec<String>>,
    /// Language-tagged strings keyed by lower-cased language tag.
    pub lang_strings: BTreeMap<String, Vec<String>>,
    /// Blank node values.
    pub blank_nodes: Vec<BlankNodeObject>,
}

impl Objects {
    /// Whether there is no value at all.
    pub fn is_empty(&self) -> bool {
        self.named_nodes.is_empty()
            && self.literals.values().all(Vec::is_empty)
            && self.lang_strings.values().all(Vec::is_empty)
            && self.blank_nodes.is_empty()
    }
}

/// A blank node used as a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlankNodeObject {
    /// A reference `_:id` to a blank node described elsewhere in the graph.
    Reference(String),
    /// A blank node referenced only here, described inline by its own values.
    Inline(Predicates),
}

/// A subject and the values of its properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thing {
    url: Arc<str>,
    predicates: Arc<Predicates>,
}

impl Thing {
    /// A new empty Thing identified by a fresh local node.
    pub fn create() -> Self {
        Thing::create_named(&generate_name())
    }

    /// A new empty Thing identified by the local node `name`;
    /// once saved, its URL will be `<resource URL>#<name>`.
    pub fn create_named(name: &str) -> Self {
        Thing::new_unchecked(local_node_iri(name))
    }

    /// A new empty Thing identified by `url`.
    pub fn create_at(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        if !is_valid_url(url) {
            return Err(ThingError::ValidThingUrlExpected(url.to_string()));
        }
        Ok(Thing::new_unchecked(url))
    }

    pub(crate) fn new_unchecked(url: impl Into<Arc<str>>) -> Self {
        Thing {
            url: url.into(),
            predicates: Arc::default(),
        }
    }

    /// The IRI of this Thing: its URL, a local node IRI or a blank node id `_:id`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All values of this Thing.
    pub fn predicates(&self) -> &Predicates {
        &self.predicates
    }

    /// The values of `property`, if any.
    pub fn objects(&self, property: &str) -> Option<&Objects> {
        self.predicates.get(property).map(Arc::as_ref)
    }

    /// Whether no property of this Thing holds a value.
    pub fn is_empty(&self) -> bool {
        self.predicates.values().all(|objects| objects.is_empty())
    }

    /// Whether this Thing is identified by a local node, i.e. has not been saved yet.
    pub fn is_local(&self) -> bool {
        is_local_node_iri(&self.url)
    }

    /// Whether this Thing is a blank node.
    pub fn is_blank_node(&self) -> bool {
        is_blank_node_id(&self.url)
    }

    /// The URL of this Thing.
    ///
    /// For a local Thing, it is resolved against `base`, which is then required.
    pub fn as_url(&self, base: Option<&str>) -> Result<String> {
        if self.is_blank_node() {
            return Err(ThingError::ThingExpected(self.url.to_string()));
        }
        if !self.is_local() {
            return Ok(self.url.to_string());
        }
        let name = local_node_name(&self.url);
        match base {
            Some(base) => Ok(crate::local::resolve_local_iri(name, base)),
            None => Err(ThingError::LocalThingWithoutBase(format!("#{name}"))),
        }
    }

    /// Whether `self` and `other` are the very same value, not merely equal ones.
    pub fn ptr_eq(&self, other: &Thing) -> bool {
        Arc::ptr_eq(&self.url, &other.url) && Arc::ptr_eq(&self.predicates, &other.predicates)
    }

    /// Copy of this Thing identified by `url`.
    pub(crate) fn with_url(&self, url: &str) -> Thing {
        if *self.url == *url {
            return self.clone();
        }
        Thing {
            url: url.into(),
            predicates: self.predicates.clone(),
        }
    }

    /// Copy of this Thing with `predicates` as values.
    pub(crate) fn with_predicates(&self, predicates: Predicates) -> Thing {
        Thing {
            url: self.url.clone(),
            predicates: Arc::new(predicates),
        }
    }

    /// Mutable access to the values of `property`, for Things under construction.
    ///
    /// Shared parts are copied first, so other Things are never affected.
    pub(crate) fn objects_mut(&mut self, property: &str) -> &mut Objects {
        let predicates = Arc::make_mut(&mut self.predicates);
        Arc::make_mut(predicates.entry(property.to_string()).or_default())
    }

    /// Copy of this Thing where the values of `property` are updated by `update`.
    ///
    /// `property` is dropped altogether if it is left without values.
    fn update_objects(&self, property: &str, update: impl FnOnce(&mut Objects)) -> Thing {
        let mut thing = self.clone();
        update(thing.objects_mut(property));
        if thing.objects(property).is_some_and(Objects::is_empty) {
            Arc::make_mut(&mut thing.predicates).remove(property);
        }
        thing
    }
}

impl AsRef<str> for Thing {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// Whether `iri` parses as an absolute URL.
pub(crate) fn is_valid_url(iri: &str) -> bool {
    Url::parse(iri).is_ok()
}

/// Check that `property` is a valid URL.
pub(crate) fn property_iri(property: &str) -> Result<&str> {
    if is_valid_url(property) {
        Ok(property)
    } else {
        Err(ThingError::ValidPropertyUrlExpected(property.to_string()))
    }
}
