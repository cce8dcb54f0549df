//! [`SolidDataset`]: an immutable set of [`Thing`]s, grouped by graph,
//! with the metadata of its resource and a change log.
use crate::local::{is_local_node_iri, local_node_name, resolve_local_iri};
use crate::thing::{BlankNodeObject, Objects, Predicates};
use crate::{ChangeLog, HasResourceInfo, ResourceInfo, Result, Thing, ThingError};
use solid_term::{DataFactory, NamedNode, Quad, Term};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// The name of a graph of a [`SolidDataset`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GraphKey {
    /// The default graph.
    Default,
    /// A named graph.
    Named(String),
}

impl GraphKey {
    /// The graph named `scope`, or the default graph if `None`.
    pub fn from_scope(scope: Option<&str>) -> Self {
        match scope {
            Some(iri) => GraphKey::Named(iri.to_string()),
            None => GraphKey::Default,
        }
    }

    /// This graph name as a term.
    pub fn to_term(&self) -> Term {
        match self {
            GraphKey::Default => Term::DefaultGraph,
            GraphKey::Named(iri) => NamedNode::new(iri.as_str()).into(),
        }
    }
}

impl fmt::Display for GraphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKey::Default => f.write_str("default"),
            GraphKey::Named(iri) => f.write_str(iri),
        }
    }
}

/// The Things of one graph, keyed by URL (or blank node id `_:id`).
pub type Graph = BTreeMap<String, Thing>;

/// Options for selecting Things in a [`SolidDataset`].
#[derive(Clone, Debug, Default)]
pub struct ThingQuery {
    scope: Option<String>,
    accept_blank_nodes: bool,
}

impl ThingQuery {
    /// Look in the default graph, ignoring blank nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look in the graph named `scope` instead of the default graph.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Whether [`SolidDataset::get_thing_all`] also returns blank nodes.
    pub fn with_blank_nodes(mut self, accept: bool) -> Self {
        self.accept_blank_nodes = accept;
        self
    }

    fn graph_key(&self) -> GraphKey {
        GraphKey::from_scope(self.scope.as_deref())
    }
}

/// Something identifying a Thing to remove from a dataset.
#[derive(Clone, Copy, Debug)]
pub enum ThingRef<'a> {
    /// The Thing itself.
    Thing(&'a Thing),
    /// Its IRI as a term.
    NamedNode(&'a NamedNode),
    /// Its IRI, possibly a local node IRI.
    Iri(&'a str),
}

impl<'a> From<&'a Thing> for ThingRef<'a> {
    fn from(thing: &'a Thing) -> Self {
        ThingRef::Thing(thing)
    }
}

impl<'a> From<&'a NamedNode> for ThingRef<'a> {
    fn from(node: &'a NamedNode) -> Self {
        ThingRef::NamedNode(node)
    }
}

impl<'a> From<&'a str> for ThingRef<'a> {
    fn from(iri: &'a str) -> Self {
        ThingRef::Iri(iri)
    }
}

/// An immutable set of Things, grouped by graph.
///
/// Every update returns a new dataset,
/// sharing the graphs and Things it did not touch with the original.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolidDataset {
    graphs: Arc<BTreeMap<GraphKey, Arc<Graph>>>,
    change_log: ChangeLog,
    resource_info: Option<ResourceInfo>,
}

impl SolidDataset {
    /// An empty dataset, not attached to any resource.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_graphs(graphs: BTreeMap<GraphKey, Graph>) -> Self {
        SolidDataset {
            graphs: Arc::new(graphs.into_iter().map(|(k, g)| (k, Arc::new(g))).collect()),
            ..Default::default()
        }
    }

    /// The graphs of this dataset.
    pub fn graphs(&self) -> impl Iterator<Item = (&GraphKey, &Graph)> + '_ {
        self.graphs.iter().map(|(k, g)| (k, g.as_ref()))
    }

    /// The graph named `key`, if it holds anything.
    pub fn graph(&self, key: &GraphKey) -> Option<&Graph> {
        self.graphs.get(key).map(Arc::as_ref)
    }

    /// The changes made since this dataset was fetched.
    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    /// Copy of this dataset with `change_log` as its change log.
    pub fn with_change_log(&self, change_log: ChangeLog) -> SolidDataset {
        SolidDataset {
            change_log,
            ..self.clone()
        }
    }

    /// Copy of this dataset attached to the resource described by `info`.
    pub fn with_resource_info(&self, info: ResourceInfo) -> SolidDataset {
        SolidDataset {
            resource_info: Some(info),
            ..self.clone()
        }
    }

    /// Whether this dataset was fetched from, or saved to, a server.
    pub fn has_server_resource_info(&self) -> bool {
        self.resource_info.is_some()
    }

    /// Resolve `iri` against the source URL of this dataset if it is a local node
    /// and the source URL is known.
    fn resolve_iri(&self, iri: &str) -> String {
        match &self.resource_info {
            Some(info) if is_local_node_iri(iri) => {
                resolve_local_iri(local_node_name(iri), info.source_url())
            }
            _ => iri.to_string(),
        }
    }

    /// The Thing identified by `url` in the graph selected by `query`.
    ///
    /// A local node IRI is resolved against the source URL of this dataset, when known.
    pub fn get_thing(&self, url: impl AsRef<str>, query: &ThingQuery) -> Result<Option<&Thing>> {
        let url = url.as_ref();
        if !crate::thing::is_valid_url(url) {
            return Err(ThingError::ValidThingUrlExpected(url.to_string()));
        }
        let iri = self.resolve_iri(url);
        Ok(self.graph(&query.graph_key()).and_then(|g| g.get(&iri)))
    }

    /// All Things of the graph selected by `query`.
    pub fn get_thing_all(&self, query: &ThingQuery) -> Vec<&Thing> {
        let Some(graph) = self.graph(&query.graph_key()) else {
            return vec![];
        };
        graph
            .values()
            .filter(|thing| query.accept_blank_nodes || !thing.is_blank_node())
            .collect()
    }

    /// Copy of this dataset where `thing` replaces the Thing with the same URL
    /// in the default graph.
    ///
    /// The triples of the replaced Thing are logged as deleted,
    /// those of `thing` as added.
    /// A local `thing` is resolved against the source URL of this dataset, when known.
    pub fn set_thing(&self, thing: &Thing) -> Result<SolidDataset> {
        let iri = self.resolve_iri(thing.url());
        let thing = thing.with_url(&iri);
        let factory = DataFactory::new();
        let mut blanks = self.blank_ids(&factory);
        blanks.reserve_in(thing.predicates());
        let subject = subject_term(&iri);
        let previous = self.graph(&GraphKey::Default).and_then(|g| g.get(&iri));
        let deletions = match previous {
            Some(previous) => {
                predicates_to_quads(previous.predicates(), &subject, &Term::DefaultGraph, &blanks)?
            }
            None => vec![],
        };
        let additions =
            predicates_to_quads(thing.predicates(), &subject, &Term::DefaultGraph, &blanks)?;
        log::trace!(
            "setting thing {iri}: {} deletions, {} additions",
            deletions.len(),
            additions.len()
        );
        let mut dataset = self.update_graph(&GraphKey::Default, |graph| {
            graph.insert(iri.clone(), thing);
        });
        dataset.change_log = self
            .change_log
            .with_deletions(deletions)
            .with_additions(additions);
        Ok(dataset)
    }

    /// Copy of this dataset without the given Thing in the default graph.
    ///
    /// Its triples are logged as deleted.
    /// Local node IRIs (and local Things) are resolved against the source URL
    /// of this dataset, when known.
    pub fn remove_thing<'a>(&self, thing: impl Into<ThingRef<'a>>) -> Result<SolidDataset> {
        let iri = match thing.into() {
            ThingRef::NamedNode(node) => node.iri().to_string(),
            ThingRef::Iri(iri) => self.resolve_iri(iri),
            ThingRef::Thing(thing) => self.resolve_iri(thing.url()),
        };
        let Some(previous) = self.graph(&GraphKey::Default).and_then(|g| g.get(&iri)) else {
            return Ok(self.clone());
        };
        let factory = DataFactory::new();
        let deletions = predicates_to_quads(
            previous.predicates(),
            &subject_term(&iri),
            &Term::DefaultGraph,
            &self.blank_ids(&factory),
        )?;
        let mut dataset = self.update_graph(&GraphKey::Default, |graph| {
            graph.remove(&iri);
        });
        dataset.change_log = self.change_log.with_deletions(deletions);
        Ok(dataset)
    }

    /// Copy of this dataset where the graph `key` is updated by `update`.
    ///
    /// The other graphs are shared with `self`.
    pub(crate) fn update_graph(&self, key: &GraphKey, update: impl FnOnce(&mut Graph)) -> SolidDataset {
        let mut graphs = (*self.graphs).clone();
        let graph = graphs.entry(key.clone()).or_default();
        update(Arc::make_mut(graph));
        SolidDataset {
            graphs: Arc::new(graphs),
            ..self.clone()
        }
    }

    /// Copy of this dataset where every local node,
    /// as a subject or as a value, anywhere in the dataset,
    /// is rewritten to `<resource_iri>#<name>`.
    pub fn resolve_local_iris(&self, resource_iri: &str) -> SolidDataset {
        let resolve = |iri: &str| -> String {
            if is_local_node_iri(iri) {
                format!("{resource_iri}#{}", local_node_name(iri))
            } else {
                iri.to_string()
            }
        };
        let graphs = self
            .graphs
            .iter()
            .map(|(key, graph)| {
                let graph: Graph = graph
                    .values()
                    .map(|thing| {
                        let url = resolve(thing.url());
                        let thing = thing
                            .with_url(&url)
                            .with_predicates(resolve_predicates(thing.predicates(), &resolve));
                        (url, thing)
                    })
                    .collect();
                (key.clone(), Arc::new(graph))
            })
            .collect();
        SolidDataset {
            graphs: Arc::new(graphs),
            ..self.clone()
        }
    }

    /// All quads of this dataset.
    ///
    /// Inline blank nodes are given fresh identifiers by `factory`,
    /// skipping those already labelling a blank node of this dataset.
    pub fn to_quads(&self, factory: &DataFactory) -> Result<Vec<Quad>, solid_term::TermError> {
        let blanks = self.blank_ids(factory);
        let mut quads = vec![];
        for (key, graph) in self.graphs.iter() {
            let graph_term = key.to_term();
            for (iri, thing) in graph.iter() {
                quads.extend(predicates_to_quads(
                    thing.predicates(),
                    &subject_term(iri),
                    &graph_term,
                    &blanks,
                )?);
            }
        }
        Ok(quads)
    }

    /// A [`BlankIds`] minting from `factory` around the labels used in this dataset.
    fn blank_ids<'a>(&self, factory: &'a DataFactory) -> BlankIds<'a> {
        let mut blanks = BlankIds::new(factory);
        for graph in self.graphs.values() {
            for (iri, thing) in graph.iter() {
                if let Some(id) = iri.strip_prefix("_:") {
                    blanks.taken.insert(id.to_string());
                }
                blanks.reserve_in(thing.predicates());
            }
        }
        blanks
    }
}

/// Blank node identifiers for inline blank nodes,
/// never equal to a label already in use.
pub(crate) struct BlankIds<'a> {
    factory: &'a DataFactory,
    taken: BTreeSet<String>,
}

impl<'a> BlankIds<'a> {
    pub(crate) fn new(factory: &'a DataFactory) -> Self {
        BlankIds {
            factory,
            taken: BTreeSet::new(),
        }
    }

    /// Mark every blank node reference in `predicates` (nested ones included) as taken.
    pub(crate) fn reserve_in(&mut self, predicates: &Predicates) {
        for objects in predicates.values() {
            for blank in &objects.blank_nodes {
                match blank {
                    BlankNodeObject::Reference(id) => {
                        let id = id.strip_prefix("_:").unwrap_or(id);
                        self.taken.insert(id.to_string());
                    }
                    BlankNodeObject::Inline(nested) => self.reserve_in(nested),
                }
            }
        }
    }

    fn fresh(&self) -> solid_term::BlankNode {
        loop {
            let node = self.factory.blank_node(None);
            if !self.taken.contains(node.id()) {
                return node;
            }
        }
    }
}

impl HasResourceInfo for SolidDataset {
    fn resource_info(&self) -> Option<&ResourceInfo> {
        self.resource_info.as_ref()
    }
}

/// The term for a subject key: a blank node for `_:id`, an IRI otherwise.
pub(crate) fn subject_term(iri: &str) -> Term {
    match iri.strip_prefix("_:") {
        Some(id) => solid_term::BlankNode::new(id).into(),
        None => NamedNode::new(iri).into(),
    }
}

/// The quads describing `subject` by `predicates`, in `graph`.
///
/// For each property, literals come first, then language-tagged strings,
/// then IRIs, then blank nodes; inline blank nodes are followed by their own quads.
pub(crate) fn predicates_to_quads(
    predicates: &Predicates,
    subject: &Term,
    graph: &Term,
    blanks: &BlankIds,
) -> Result<Vec<Quad>, solid_term::TermError> {
    let factory = blanks.factory;
    let mut quads = vec![];
    for (property, objects) in predicates {
        let predicate = factory.named_node(property.as_str());
        let quad = |object: Term| {
            factory.quad(subject.clone(), predicate.clone(), object, Some(graph.clone()))
        };
        for (datatype, values) in &objects.literals {
            for lex in values {
                let literal = factory.typed_literal(lex.as_str(), factory.named_node(datatype.as_str()));
                quads.push(quad(literal.into())?);
            }
        }
        for (locale, values) in &objects.lang_strings {
            for lex in values {
                quads.push(quad(factory.literal(lex.as_str(), Some(locale.as_str())).into())?);
            }
        }
        for iri in &objects.named_nodes {
            quads.push(quad(factory.named_node(iri.as_str()).into())?);
        }
        for blank in &objects.blank_nodes {
            match blank {
                BlankNodeObject::Reference(id) => {
                    let id = id.strip_prefix("_:").unwrap_or(id);
                    quads.push(quad(factory.blank_node(Some(id)).into())?);
                }
                BlankNodeObject::Inline(nested) => {
                    let node: Term = blanks.fresh().into();
                    quads.push(quad(node.clone())?);
                    quads.extend(predicates_to_quads(nested, &node, graph, blanks)?);
                }
            }
        }
    }
    Ok(quads)
}

fn resolve_predicates(predicates: &Predicates, resolve: &impl Fn(&str) -> String) -> Predicates {
    predicates
        .iter()
        .map(|(property, objects)| {
            let needs_update = objects.named_nodes.iter().any(|iri| is_local_node_iri(iri))
                || objects
                    .blank_nodes
                    .iter()
                    .any(|b| matches!(b, BlankNodeObject::Inline(_)));
            if !needs_update {
                return (property.clone(), objects.clone());
            }
            let resolved = Objects {
                named_nodes: objects.named_nodes.iter().map(|iri| resolve(iri)).collect(),
                blank_nodes: objects
                    .blank_nodes
                    .iter()
                    .map(|b| match b {
                        BlankNodeObject::Inline(nested) => {
                            BlankNodeObject::Inline(resolve_predicates(nested, resolve))
                        }
                        other => other.clone(),
                    })
                    .collect(),
                ..Objects::clone(objects)
            };
            (property.clone(), Arc::new(resolved))
        })
        .collect()
}
