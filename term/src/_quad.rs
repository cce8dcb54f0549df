// this module is transparently re-exported by its parent `lib`
use crate::*;

/// An RDF quad.
///
/// The constructor enforces that
/// the subject is a named node or a blank node,
/// the object is not the default graph,
/// and the graph is a named node or the default graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quad {
    subject: Term,
    predicate: NamedNode,
    object: Term,
    graph: Term,
}

impl Quad {
    /// Build a quad, checking the kind of each component.
    pub fn new(
        subject: impl Into<Term>,
        predicate: impl Into<Term>,
        object: impl Into<Term>,
        graph: impl Into<Term>,
    ) -> Result<Self> {
        let subject = subject.into();
        let predicate = predicate.into();
        let object = object.into();
        let graph = graph.into();
        check_kind(&subject, QuadPosition::Subject, |k| {
            matches!(k, TermKind::NamedNode | TermKind::BlankNode)
        })?;
        check_kind(&object, QuadPosition::Object, |k| k != TermKind::DefaultGraph)?;
        check_kind(&graph, QuadPosition::Graph, |k| {
            matches!(k, TermKind::NamedNode | TermKind::DefaultGraph)
        })?;
        let predicate = match predicate {
            Term::NamedNode(n) => n,
            other => return Err(unsupported(&other, QuadPosition::Predicate)),
        };
        Ok(Quad {
            subject,
            predicate,
            object,
            graph,
        })
    }

    /// Build a quad in the default graph.
    pub fn new_triple(
        subject: impl Into<Term>,
        predicate: impl Into<Term>,
        object: impl Into<Term>,
    ) -> Result<Self> {
        Quad::new(subject, predicate, object, Term::DefaultGraph)
    }

    /// The subject of this quad.
    pub fn subject(&self) -> &Term {
        &self.subject
    }

    /// The predicate of this quad.
    pub fn predicate(&self) -> &NamedNode {
        &self.predicate
    }

    /// The object of this quad.
    pub fn object(&self) -> &Term {
        &self.object
    }

    /// The graph name of this quad.
    pub fn graph(&self) -> &Term {
        &self.graph
    }

    /// Whether the subject or the object of this quad is a blank node.
    pub fn has_blank_node(&self) -> bool {
        self.subject.is_blank_node() || self.object.is_blank_node()
    }

    /// Copy of this quad moved to the default graph.
    pub fn to_triple(&self) -> Quad {
        Quad {
            graph: Term::DefaultGraph,
            ..self.clone()
        }
    }
}

fn check_kind(
    term: &Term,
    position: QuadPosition,
    accept: impl Fn(TermKind) -> bool,
) -> Result<()> {
    if accept(term.kind()) {
        Ok(())
    } else {
        Err(unsupported(term, position))
    }
}

fn unsupported(term: &Term, position: QuadPosition) -> TermError {
    TermError::UnsupportedKind {
        position,
        kind: term.kind(),
        term: term.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn ex(suffix: &str) -> NamedNode {
        NamedNode::new(format!("https://example.org/{suffix}"))
    }

    #[test]
    fn valid_quad() -> TestResult {
        let q = Quad::new(ex("s"), ex("p"), Literal::new_simple("o"), ex("g"))?;
        assert_eq!(q.subject(), &Term::from(ex("s")));
        assert_eq!(q.predicate(), &ex("p"));
        assert_eq!(q.graph(), &Term::from(ex("g")));
        assert!(!q.has_blank_node());
        assert!(q.to_triple().graph().is_default_graph());
        Ok(())
    }

    #[test]
    fn literal_graph_is_rejected() {
        let err = Quad::new(ex("s"), ex("p"), ex("o"), Literal::new_simple("g")).unwrap_err();
        assert!(matches!(
            err,
            TermError::UnsupportedKind {
                position: QuadPosition::Graph,
                kind: TermKind::Literal,
                ..
            }
        ));
    }

    #[test]
    fn blank_graph_is_rejected() {
        assert!(Quad::new(ex("s"), ex("p"), ex("o"), BlankNode::new("g")).is_err());
    }

    #[test]
    fn blank_predicate_is_rejected() {
        let err = Quad::new_triple(ex("s"), BlankNode::new("p"), ex("o")).unwrap_err();
        assert!(matches!(
            err,
            TermError::UnsupportedKind {
                position: QuadPosition::Predicate,
                ..
            }
        ));
    }

    #[test]
    fn default_graph_object_is_rejected() {
        assert!(Quad::new_triple(ex("s"), ex("p"), Term::DefaultGraph).is_err());
    }

    #[test]
    fn literal_subject_is_rejected() {
        assert!(Quad::new_triple(Literal::new_simple("s"), ex("p"), ex("o")).is_err());
    }

    #[test]
    fn blank_nodes_are_detected() -> TestResult {
        let q = Quad::new_triple(ex("s"), ex("p"), BlankNode::new("b"))?;
        assert!(q.has_blank_node());
        Ok(())
    }
}
