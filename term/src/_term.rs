// this module is transparently re-exported by its parent `lib`
use crate::ns::{rdf, xsd};
use std::sync::Arc;

/// An IRI used as an RDF term.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedNode(Arc<str>);

impl NamedNode {
    /// Build a named node. The IRI is not checked.
    pub fn new(iri: impl Into<Arc<str>>) -> Self {
        NamedNode(iri.into())
    }

    /// The IRI of this node.
    pub fn iri(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NamedNode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NamedNode {
    fn from(iri: &str) -> Self {
        NamedNode::new(iri)
    }
}

/// A blank node, identified by a document-local id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode(Arc<str>);

impl BlankNode {
    /// Build a blank node with the given id (without the `_:` prefix).
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        BlankNode(id.into())
    }

    /// The identifier of this blank node, without the `_:` prefix.
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// An RDF literal.
///
/// A literal with a language tag always has `rdf:langString` as datatype,
/// and a literal built without datatype has `xsd:string`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    lexical: Arc<str>,
    datatype: NamedNode,
    language: Option<Arc<str>>,
}

impl Literal {
    /// A plain string literal (datatype `xsd:string`).
    pub fn new_simple(lexical: impl Into<Arc<str>>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: NamedNode::new(xsd::string),
            language: None,
        }
    }

    /// A literal of the given datatype.
    pub fn new_dt(lexical: impl Into<Arc<str>>, datatype: NamedNode) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype,
            language: None,
        }
    }

    /// A language-tagged string (datatype `rdf:langString`).
    pub fn new_lang(lexical: impl Into<Arc<str>>, language: impl Into<Arc<str>>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: NamedNode::new(rdf::langString),
            language: Some(language.into()),
        }
    }

    /// The lexical form.
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The datatype IRI.
    pub fn datatype(&self) -> &NamedNode {
        &self.datatype
    }

    /// The language tag, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// A query variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(Arc<str>);

impl Variable {
    /// Build a variable with the given name (without the `?` prefix).
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Variable(name.into())
    }

    /// The name of this variable.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// The different kinds of [`Term`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// See [`NamedNode`]
    NamedNode,
    /// See [`BlankNode`]
    BlankNode,
    /// See [`Literal`]
    Literal,
    /// See [`Variable`]
    Variable,
    /// The default graph
    DefaultGraph,
}

impl std::fmt::Display for TermKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let txt = match self {
            TermKind::NamedNode => "NamedNode",
            TermKind::BlankNode => "BlankNode",
            TermKind::Literal => "Literal",
            TermKind::Variable => "Variable",
            TermKind::DefaultGraph => "DefaultGraph",
        };
        f.write_str(txt)
    }
}

/// An RDF term.
///
/// Equality is structural: two terms are equal iff they have the same kind
/// and the same IRI, id, name or lexical form, datatype and language.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// An IRI
    NamedNode(NamedNode),
    /// A blank node
    BlankNode(BlankNode),
    /// A literal
    Literal(Literal),
    /// A variable
    Variable(Variable),
    /// The default graph, only valid as a graph name
    DefaultGraph,
}

impl Term {
    /// The kind of this term.
    pub fn kind(&self) -> TermKind {
        match self {
            Term::NamedNode(_) => TermKind::NamedNode,
            Term::BlankNode(_) => TermKind::BlankNode,
            Term::Literal(_) => TermKind::Literal,
            Term::Variable(_) => TermKind::Variable,
            Term::DefaultGraph => TermKind::DefaultGraph,
        }
    }

    /// The textual value of this term:
    /// the IRI, blank node id, lexical form or variable name.
    /// The default graph has an empty value.
    pub fn value(&self) -> &str {
        match self {
            Term::NamedNode(n) => n.iri(),
            Term::BlankNode(b) => b.id(),
            Term::Literal(l) => l.lexical(),
            Term::Variable(v) => v.name(),
            Term::DefaultGraph => "",
        }
    }

    /// Is this term a named node?
    pub fn is_named_node(&self) -> bool {
        matches!(self, Term::NamedNode(_))
    }

    /// Is this term a blank node?
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Is this term the default graph?
    pub fn is_default_graph(&self) -> bool {
        matches!(self, Term::DefaultGraph)
    }

    /// This term as a named node, if it is one.
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            Term::NamedNode(n) => Some(n),
            _ => None,
        }
    }

    /// This term as a blank node, if it is one.
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Term::BlankNode(b) => Some(b),
            _ => None,
        }
    }

    /// This term as a literal, if it is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl From<NamedNode> for Term {
    fn from(n: NamedNode) -> Self {
        Term::NamedNode(n)
    }
}

impl From<BlankNode> for Term {
    fn from(b: BlankNode) -> Self {
        Term::BlankNode(b)
    }
}

impl From<Literal> for Term {
    fn from(l: Literal) -> Self {
        Term::Literal(l)
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl PartialEq<NamedNode> for Term {
    fn eq(&self, other: &NamedNode) -> bool {
        self.as_named_node() == Some(other)
    }
}
