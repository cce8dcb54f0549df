//! Folding a stream of quads into a [`SolidDataset`].
//!
//! Quads without blank nodes are added as they come.
//! Quads involving blank nodes are buffered until the end of the stream,
//! where blank nodes forming a simple chain from a single referrer
//! are inlined into their referrer rather than kept as `_:id` references.
use crate::dataset::{Graph, GraphKey};
use crate::thing::{BlankNodeObject, Objects, Predicates, Thing};
use crate::{AssembleError, SolidDataset};
use solid_inmem::DatasetCore;
use solid_term::ns::rdf;
use solid_term::{BlankNode, Quad, Term};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

/// Default for [`AssembleOptions::chain_detection_threshold`].
pub const DEFAULT_CHAIN_DETECTION_THRESHOLD: usize = 20;

/// Options of the [`DatasetAssembler`].
#[derive(Clone, Debug)]
pub struct AssembleOptions {
    chain_detection_threshold: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        AssembleOptions {
            chain_detection_threshold: DEFAULT_CHAIN_DETECTION_THRESHOLD,
        }
    }
}

impl AssembleOptions {
    /// The default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of distinct blank nodes for which chains are detected.
    ///
    /// Above it, every blank node is kept as a reference.
    pub fn chain_detection_threshold(&self) -> usize {
        self.chain_detection_threshold
    }

    /// Set the maximum number of distinct blank nodes for which chains are detected.
    pub fn with_chain_detection_threshold(mut self, threshold: usize) -> Self {
        self.chain_detection_threshold = threshold;
        self
    }
}

/// Builds a [`SolidDataset`] from quads pushed one at a time.
#[derive(Debug, Default)]
pub struct DatasetAssembler {
    options: AssembleOptions,
    graphs: BTreeMap<GraphKey, Graph>,
    blank_quads: DatasetCore,
    blank_order: Vec<Quad>,
}

impl DatasetAssembler {
    /// An assembler with the given options.
    pub fn new(options: AssembleOptions) -> Self {
        DatasetAssembler {
            options,
            ..Default::default()
        }
    }

    /// Add `quad` to the dataset under construction.
    pub fn push(&mut self, quad: Quad) -> Result<&mut Self, AssembleError> {
        check_kinds(&quad)?;
        if quad.has_blank_node() {
            if !self.blank_quads.has(&quad) {
                self.blank_order.push(quad.clone());
                self.blank_quads.add(quad);
            }
        } else {
            add_quad(&mut self.graphs, &quad, &Inliner::none())?;
        }
        Ok(self)
    }

    /// Process the buffered blank node quads and return the dataset.
    pub fn finish(mut self) -> Result<SolidDataset, AssembleError> {
        let blank_nodes = distinct_blank_nodes(&self.blank_order);
        let chain_nodes = if blank_nodes.len() <= self.options.chain_detection_threshold {
            chain_blank_nodes(&self.blank_quads, &blank_nodes)
        } else {
            log::warn!(
                "{} blank nodes exceed the chain detection threshold of {}; keeping them as references",
                blank_nodes.len(),
                self.options.chain_detection_threshold
            );
            HashSet::new()
        };
        log::trace!(
            "{} buffered blank node quads, {} chain blank nodes",
            self.blank_order.len(),
            chain_nodes.len()
        );
        let inliner = Inliner {
            chain: Some((&chain_nodes, &self.blank_quads)),
        };
        for quad in &self.blank_order {
            let is_chain_subject = quad
                .subject()
                .as_blank_node()
                .is_some_and(|b| chain_nodes.contains(b));
            if !is_chain_subject {
                add_quad(&mut self.graphs, quad, &inliner)?;
            }
        }
        Ok(SolidDataset::from_graphs(self.graphs))
    }
}

/// Assemble `quads` into a dataset.
pub fn assemble(
    quads: impl IntoIterator<Item = Quad>,
    options: AssembleOptions,
) -> Result<SolidDataset, AssembleError> {
    let mut assembler = DatasetAssembler::new(options);
    for quad in quads {
        assembler.push(quad)?;
    }
    assembler.finish()
}

impl SolidDataset {
    /// Copy of this dataset with `quad` added, blank nodes being kept as references.
    pub fn add_quad(&self, quad: &Quad) -> Result<SolidDataset, AssembleError> {
        check_kinds(quad)?;
        let key = graph_key(quad.graph())?;
        let mut result = Ok(());
        let dataset = self.update_graph(&key, |graph| {
            result = add_to_graph(graph, quad, &Inliner::none());
        });
        result.map(|_| dataset)
    }
}

/// Decides whether a blank node object is inlined, and describes it if so.
struct Inliner<'a> {
    chain: Option<(&'a HashSet<BlankNode>, &'a DatasetCore)>,
}

impl Inliner<'_> {
    /// Keep every blank node as a reference.
    fn none() -> Self {
        Inliner { chain: None }
    }

    fn object(&self, node: &BlankNode) -> Result<BlankNodeObject, AssembleError> {
        let quads = match self.chain {
            Some((chain_nodes, quads)) if chain_nodes.contains(node) => quads,
            _ => return Ok(BlankNodeObject::Reference(format!("_:{}", node.id()))),
        };
        let subject = Term::from(node.clone());
        let described = quads.match_quads(Some(&subject), None, None, None);
        let (blank, other): (Vec<&Quad>, Vec<&Quad>) =
            described.iter().partition(|q| q.object().is_blank_node());
        let mut predicates = Predicates::new();
        for quad in other.into_iter().chain(blank) {
            let objects = predicates
                .entry(quad.predicate().iri().to_string())
                .or_insert_with(|| Arc::new(Objects::default()));
            add_object(Arc::make_mut(objects), quad.object(), self)?;
        }
        Ok(BlankNodeObject::Inline(predicates))
    }
}

fn check_kinds(quad: &Quad) -> Result<(), AssembleError> {
    graph_key(quad.graph())?;
    match quad.subject() {
        Term::NamedNode(_) | Term::BlankNode(_) => {}
        other => return Err(AssembleError::UnsupportedSubject(other.kind())),
    }
    match quad.object() {
        Term::NamedNode(_) | Term::BlankNode(_) | Term::Literal(_) => Ok(()),
        other => Err(AssembleError::UnsupportedObject(other.kind())),
    }
}

fn graph_key(graph: &Term) -> Result<GraphKey, AssembleError> {
    match graph {
        Term::DefaultGraph => Ok(GraphKey::Default),
        Term::NamedNode(n) => Ok(GraphKey::Named(n.iri().to_string())),
        other => Err(AssembleError::UnsupportedGraph(other.kind())),
    }
}

fn add_quad(
    graphs: &mut BTreeMap<GraphKey, Graph>,
    quad: &Quad,
    inliner: &Inliner,
) -> Result<(), AssembleError> {
    let graph = graphs.entry(graph_key(quad.graph())?).or_default();
    add_to_graph(graph, quad, inliner)
}

fn add_to_graph(graph: &mut Graph, quad: &Quad, inliner: &Inliner) -> Result<(), AssembleError> {
    let subject = match quad.subject() {
        Term::NamedNode(n) => n.iri().to_string(),
        Term::BlankNode(b) => format!("_:{}", b.id()),
        other => return Err(AssembleError::UnsupportedSubject(other.kind())),
    };
    let thing = graph
        .entry(subject.clone())
        .or_insert_with(|| Thing::new_unchecked(subject));
    add_object(thing.objects_mut(quad.predicate().iri()), quad.object(), inliner)
}

fn add_object(objects: &mut Objects, object: &Term, inliner: &Inliner) -> Result<(), AssembleError> {
    match object {
        Term::NamedNode(n) => objects.named_nodes.push(n.iri().to_string()),
        Term::Literal(lit) if lit.datatype().iri() == rdf::langString => {
            let locale = lit.language().unwrap_or_default().to_lowercase();
            objects
                .lang_strings
                .entry(locale)
                .or_default()
                .push(lit.lexical().to_string());
        }
        Term::Literal(lit) => objects
            .literals
            .entry(lit.datatype().iri().to_string())
            .or_default()
            .push(lit.lexical().to_string()),
        Term::BlankNode(b) => objects.blank_nodes.push(inliner.object(b)?),
        other => return Err(AssembleError::UnsupportedObject(other.kind())),
    }
    Ok(())
}

fn distinct_blank_nodes(quads: &[Quad]) -> BTreeSet<BlankNode> {
    quads
        .iter()
        .flat_map(|q| [q.subject(), q.object()])
        .filter_map(|t| t.as_blank_node().cloned())
        .collect()
}

/// The blank nodes that can be inlined into their referrer:
/// those referenced from exactly one distinct subject, and not part of a cycle.
fn chain_blank_nodes(quads: &DatasetCore, nodes: &BTreeSet<BlankNode>) -> HashSet<BlankNode> {
    nodes
        .iter()
        .filter(|node| {
            let object = Term::from((*node).clone());
            let referrers: BTreeSet<Term> = quads
                .match_quads(None, None, Some(&object), None)
                .iter()
                .map(|q| q.subject().clone())
                .collect();
            referrers.len() == 1 && !is_in_cycle(quads, node)
        })
        .cloned()
        .collect()
}

/// Whether `node` can be reached from itself by following blank node values.
fn is_in_cycle(quads: &DatasetCore, node: &BlankNode) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![node.clone()];
    while let Some(current) = stack.pop() {
        let subject = Term::from(current);
        for quad in &quads.match_quads(Some(&subject), None, None, None) {
            if let Some(next) = quad.object().as_blank_node() {
                if next == node {
                    return true;
                }
                if visited.insert(next.clone()) {
                    stack.push(next.clone());
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod test;
