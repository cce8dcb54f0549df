// this module is transparently re-exported by its parent `lib`
//
// Implement the Display trait for terms and quads, using the N-Triples syntax.

use crate::ns::xsd;
use crate::*;
use std::fmt;

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri())
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        quoted_string(f, self.lexical())?;
        f.write_str("\"")?;
        match self.language() {
            Some(tag) => write!(f, "@{tag}"),
            None if self.datatype().iri() == xsd::string => Ok(()),
            None => write!(f, "^^{}", self.datatype()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(n) => n.fmt(f),
            Term::BlankNode(b) => b.fmt(f),
            Term::Literal(l) => l.fmt(f),
            Term::Variable(v) => v.fmt(f),
            Term::DefaultGraph => Ok(()),
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject(), self.predicate(), self.object())?;
        if !self.graph().is_default_graph() {
            write!(f, " {}", self.graph())?;
        }
        f.write_str(" .")
    }
}

/// Write `txt` escaping the characters that can not appear verbatim
/// in an N-Triples quoted string.
pub(crate) fn quoted_string<W: fmt::Write>(w: &mut W, txt: &str) -> fmt::Result {
    for chr in txt.chars() {
        match chr {
            '\n' => w.write_str("\\n")?,
            '\r' => w.write_str("\\r")?,
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            c => w.write_char(c)?,
        }
    }
    Ok(())
}
