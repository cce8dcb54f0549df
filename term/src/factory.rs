//! A [`DataFactory`] builds terms and quads.
//!
//! Each factory owns its blank node counter,
//! so that independent stores or sessions never share generated identifiers.

use crate::ns::xsd;
use crate::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A factory for [terms](Term) and [quads](Quad).
#[derive(Debug, Default)]
pub struct DataFactory {
    last_blank_id: AtomicU64,
}

impl DataFactory {
    /// A new factory, whose blank node counter starts at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// A named node.
    pub fn named_node(&self, iri: impl Into<Arc<str>>) -> NamedNode {
        NamedNode::new(iri)
    }

    /// A blank node with the given id,
    /// or with a fresh id `b1`, `b2`, ... if `id` is `None`.
    pub fn blank_node(&self, id: Option<&str>) -> BlankNode {
        match id {
            Some(id) => BlankNode::new(id),
            None => {
                let n = self.last_blank_id.fetch_add(1, Ordering::Relaxed) + 1;
                BlankNode::new(format!("b{n}"))
            }
        }
    }

    /// A literal.
    ///
    /// If `language_or_datatype` contains no colon, it is a language tag;
    /// otherwise it is a datatype IRI.
    /// Without it, the datatype is `xsd:string`.
    pub fn literal(&self, lexical: impl Into<Arc<str>>, language_or_datatype: Option<&str>) -> Literal {
        match language_or_datatype {
            None => Literal::new_dt(lexical, NamedNode::new(xsd::string)),
            Some(tag) if !tag.contains(':') => Literal::new_lang(lexical, tag),
            Some(dt) => Literal::new_dt(lexical, NamedNode::new(dt)),
        }
    }

    /// A literal with an explicit datatype.
    pub fn typed_literal(&self, lexical: impl Into<Arc<str>>, datatype: NamedNode) -> Literal {
        Literal::new_dt(lexical, datatype)
    }

    /// A variable.
    pub fn variable(&self, name: impl Into<Arc<str>>) -> Variable {
        Variable::new(name)
    }

    /// The default graph.
    pub fn default_graph(&self) -> Term {
        Term::DefaultGraph
    }

    /// A quad; `graph` defaults to the default graph.
    pub fn quad(
        &self,
        subject: impl Into<Term>,
        predicate: impl Into<Term>,
        object: impl Into<Term>,
        graph: Option<Term>,
    ) -> Result<Quad> {
        Quad::new(subject, predicate, object, graph.unwrap_or(Term::DefaultGraph))
    }

    /// A quad in the default graph.
    pub fn triple(
        &self,
        subject: impl Into<Term>,
        predicate: impl Into<Term>,
        object: impl Into<Term>,
    ) -> Result<Quad> {
        Quad::new_triple(subject, predicate, object)
    }
}
