//! Turtle reading and writing, based on [`rio_turtle`].
use crate::DocumentError;
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::model as rio;
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleFormatter, TurtleParser};
use solid_dataset::local::{is_local_node_iri, local_node_name};
use solid_term::ns::xsd;
use solid_term::{BlankNode, Literal, NamedNode, Quad, Term};

/// The content type of Turtle documents.
pub const TURTLE: &str = "text/turtle";

/// Parse the Turtle document `body`, resolving relative IRIs against `base`.
pub fn parse_turtle(body: &str, base: &str) -> Result<Vec<Quad>, DocumentError> {
    let base = Iri::parse(base.to_string()).map_err(|err| DocumentError::InvalidBase {
        base: base.to_string(),
        reason: err.to_string(),
    })?;
    let mut quads = vec![];
    TurtleParser::new(body.as_bytes(), Some(base)).parse_all(
        &mut |t| -> Result<(), DocumentError> {
            quads.push(from_rio(&t)?);
            Ok(())
        },
    )?;
    log::trace!("parsed {} triples", quads.len());
    Ok(quads)
}

fn from_rio(triple: &rio::Triple) -> Result<Quad, DocumentError> {
    let subject: Term = match triple.subject {
        rio::Subject::NamedNode(n) => NamedNode::new(n.iri).into(),
        rio::Subject::BlankNode(b) => BlankNode::new(b.id).into(),
        _ => return Err(DocumentError::UnsupportedTerm(triple.subject.to_string())),
    };
    let object: Term = match triple.object {
        rio::Term::NamedNode(n) => NamedNode::new(n.iri).into(),
        rio::Term::BlankNode(b) => BlankNode::new(b.id).into(),
        rio::Term::Literal(rio::Literal::Simple { value }) => Literal::new_simple(value).into(),
        rio::Term::Literal(rio::Literal::LanguageTaggedString { value, language }) => {
            Literal::new_lang(value, language).into()
        }
        rio::Term::Literal(rio::Literal::Typed { value, datatype }) => {
            Literal::new_dt(value, NamedNode::new(datatype.iri)).into()
        }
        _ => return Err(DocumentError::UnsupportedTerm(triple.object.to_string())),
    };
    Ok(Quad::new_triple(
        subject,
        NamedNode::new(triple.predicate.iri),
        object,
    )?)
}

/// Serialize the triples of `quads` (graph names are ignored) as Turtle.
///
/// Local node IRIs are written as relative IRIs `<#name>`,
/// so that the server resolves them against the URL of the document.
pub fn serialize_turtle<'a>(
    quads: impl IntoIterator<Item = &'a Quad>,
) -> Result<String, DocumentError> {
    let mut formatter = TurtleFormatter::new(Vec::new());
    for quad in quads {
        let subject_iri;
        let subject = match quad.subject() {
            Term::NamedNode(n) => {
                subject_iri = relative_local_iri(n.iri());
                rio::Subject::NamedNode(rio::NamedNode { iri: &subject_iri })
            }
            Term::BlankNode(b) => rio::Subject::BlankNode(rio::BlankNode { id: b.id() }),
            other => return Err(DocumentError::UnsupportedTerm(other.to_string())),
        };
        let object_iri;
        let object = match quad.object() {
            Term::NamedNode(n) => {
                object_iri = relative_local_iri(n.iri());
                rio::Term::NamedNode(rio::NamedNode { iri: &object_iri })
            }
            Term::BlankNode(b) => rio::Term::BlankNode(rio::BlankNode { id: b.id() }),
            Term::Literal(lit) => rio::Term::Literal(to_rio_literal(lit)),
            other => return Err(DocumentError::UnsupportedTerm(other.to_string())),
        };
        formatter.format(&rio::Triple {
            subject,
            predicate: rio::NamedNode {
                iri: quad.predicate().iri(),
            },
            object,
        })?;
    }
    let bytes = formatter.finish()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn to_rio_literal(lit: &Literal) -> rio::Literal<'_> {
    match lit.language() {
        Some(language) => rio::Literal::LanguageTaggedString {
            value: lit.lexical(),
            language,
        },
        None if lit.datatype().iri() == xsd::string => rio::Literal::Simple {
            value: lit.lexical(),
        },
        None => rio::Literal::Typed {
            value: lit.lexical(),
            datatype: rio::NamedNode {
                iri: lit.datatype().iri(),
            },
        },
    }
}

fn relative_local_iri(iri: &str) -> String {
    if is_local_node_iri(iri) {
        format!("#{}", local_node_name(iri))
    } else {
        iri.to_string()
    }
}
