//! Human-readable renderings of Things, datasets and change logs,
//! used in error messages and for debugging.
use crate::literal::{
    deserialize_boolean, deserialize_datetime, deserialize_decimal, deserialize_integer,
};
use crate::local::{is_local_node_iri, local_node_name, resolve_local_iri};
use crate::{HasResourceInfo, SolidDataset, Thing, ThingQuery};
use solid_term::ns::{rdf, xsd};
use solid_term::Term;
use std::collections::BTreeMap;
use std::fmt::Write;

/// A Markdown description of `thing`, listing its values by property.
pub fn thing_as_markdown(thing: &Thing) -> String {
    let mut md = if thing.is_local() {
        format!(
            "## Thing (no URL yet, identifier: `#{}`)\n",
            local_node_name(thing.url())
        )
    } else {
        format!("## Thing: {}\n", thing.url())
    };
    if thing.predicates().is_empty() {
        md.push_str("\n<empty>\n");
        return md;
    }
    for property in thing.predicates().keys() {
        let _ = write!(md, "\nProperty: {property}\n");
        for value in thing.get_term_all(property).unwrap_or_default() {
            let _ = writeln!(md, "- {}", readable_value(&value));
        }
    }
    md
}

/// A Markdown description of every Thing of the default graph of `dataset`,
/// with a summary of their pending changes.
pub fn solid_dataset_as_markdown(dataset: &SolidDataset) -> String {
    let mut md = match dataset.source_url() {
        Some(url) => format!("# SolidDataset: {url}\n"),
        None => "# SolidDataset (no URL yet)\n".to_string(),
    };
    let things = dataset.get_thing_all(&ThingQuery::new());
    if things.is_empty() {
        md.push_str("\n<empty>\n");
        return md;
    }
    for thing in things {
        md.push('\n');
        md.push_str(&thing_as_markdown(thing));
        if !dataset.change_log().is_empty() {
            let _ = write!(md, "\n{}\n", change_summary(dataset, thing));
        }
    }
    md
}

/// A Markdown description of the pending changes of `dataset`, by Thing and property.
pub fn change_log_as_markdown(dataset: &SolidDataset) -> String {
    let Some(source) = dataset.source_url() else {
        return "This is a newly initialized SolidDataset, so there is no source to compare it to."
            .to_string();
    };
    let log = dataset.change_log();
    if log.is_empty() {
        return format!(
            "## Changes compared to {source}\n\n\
             This SolidDataset has not been modified since it was fetched from {source}.\n"
        );
    }

    // thing -> property -> (deleted, added)
    let mut changes: BTreeMap<String, BTreeMap<String, (Vec<&Term>, Vec<&Term>)>> =
        BTreeMap::new();
    let deleted = log.deletions().iter().map(|q| (q, false));
    let added = log.additions().iter().map(|q| (q, true));
    for (quad, is_addition) in deleted.chain(added) {
        let Some(subject) = quad.subject().as_named_node() else {
            continue;
        };
        let subject = if is_local_node_iri(subject.iri()) {
            resolve_local_iri(local_node_name(subject.iri()), source)
        } else {
            subject.iri().to_string()
        };
        let entry = changes
            .entry(subject)
            .or_default()
            .entry(quad.predicate().iri().to_string())
            .or_default();
        if is_addition {
            entry.1.push(quad.object());
        } else {
            entry.0.push(quad.object());
        }
    }

    let mut md = format!("## Changes compared to {source}\n");
    for (thing, properties) in changes {
        let _ = write!(md, "\n### Thing: {thing}\n");
        for (property, (deleted, added)) in properties {
            let _ = write!(md, "\nProperty: {property}\n");
            if !deleted.is_empty() {
                md.push_str("- Removed:\n");
                for value in deleted {
                    let _ = writeln!(md, "  - {}", readable_value(value));
                }
            }
            if !added.is_empty() {
                md.push_str("- Added:\n");
                for value in added {
                    let _ = writeln!(md, "  - {}", readable_value(value));
                }
            }
        }
    }
    md
}

fn change_summary(dataset: &SolidDataset, thing: &Thing) -> String {
    let count = |quads: &[solid_term::Quad]| {
        quads
            .iter()
            .filter(|q| q.subject().value() == thing.url() && q.subject().is_named_node())
            .count()
    };
    let additions = count(dataset.change_log().additions());
    let deletions = count(dataset.change_log().deletions());
    let additions = match additions {
        1 => "1 new value added".to_string(),
        n => format!("{n} new values added"),
    };
    let deletions = match deletions {
        1 => "1 value removed".to_string(),
        n => format!("{n} values removed"),
    };
    format!("({additions} / {deletions})")
}

/// A short description of `value` mentioning its kind,
/// e.g. `<https://example.org> (URL)` or `42 (integer)`.
pub fn readable_value(value: &Term) -> String {
    match value {
        Term::NamedNode(n) => format!("<{}> (URL)", n.iri()),
        Term::Literal(lit) => {
            let lex = lit.lexical();
            let invalid = || format!("Invalid data: `{lex}`");
            match lit.datatype().iri() {
                xsd::boolean => {
                    let val = deserialize_boolean(lex).map(|b| b.to_string());
                    format!("{} (boolean)", val.unwrap_or_else(invalid))
                }
                xsd::dateTime => {
                    let val = deserialize_datetime(lex)
                        .map(|d| d.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
                    format!("{} (datetime)", val.unwrap_or_else(invalid))
                }
                xsd::decimal => {
                    let val = deserialize_decimal(lex).map(|d| d.to_string());
                    format!("{} (decimal)", val.unwrap_or_else(invalid))
                }
                xsd::integer => {
                    let val = deserialize_integer(lex).map(|i| i.to_string());
                    format!("{} (integer)", val.unwrap_or_else(invalid))
                }
                rdf::langString => {
                    format!("\"{lex}\" ({} string)", lit.language().unwrap_or_default())
                }
                xsd::string => format!("\"{lex}\" (string)"),
                datatype => format!("[{lex}] (Literal of type: `{datatype}`)"),
            }
        }
        Term::BlankNode(b) => format!("[{}] (BlankNode)", b.id()),
        Term::Variable(v) => format!("?{} (Variable)", v.name()),
        Term::DefaultGraph => "(default graph)".to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::*;
    use solid_term::{BlankNode, Literal, NamedNode};
    use test_case::test_case;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "https://schema.org/name";

    #[test_case(NamedNode::new("https://example.org/").into(), "<https://example.org/> (URL)")]
    #[test_case(Literal::new_dt("1", NamedNode::new(xsd::boolean)).into(), "true (boolean)")]
    #[test_case(Literal::new_dt("yes", NamedNode::new(xsd::boolean)).into(), "Invalid data: `yes` (boolean)")]
    #[test_case(Literal::new_dt("1990-11-12T13:37:42Z", NamedNode::new(xsd::dateTime)).into(), "Mon, 12 Nov 1990 13:37:42 GMT (datetime)")]
    #[test_case(Literal::new_dt("4.50", NamedNode::new(xsd::decimal)).into(), "4.5 (decimal)")]
    #[test_case(Literal::new_dt("042", NamedNode::new(xsd::integer)).into(), "42 (integer)")]
    #[test_case(Literal::new_lang("Alien", "en").into(), "\"Alien\" (en string)")]
    #[test_case(Literal::new_simple("Alien").into(), "\"Alien\" (string)")]
    #[test_case(Literal::new_dt("P1D", NamedNode::new("http://www.w3.org/2001/XMLSchema#duration")).into(), "[P1D] (Literal of type: `http://www.w3.org/2001/XMLSchema#duration`)")]
    #[test_case(BlankNode::new("b1").into(), "[b1] (BlankNode)")]
    fn readable_values(value: Term, expected: &str) {
        assert_eq!(readable_value(&value), expected);
    }

    #[test]
    fn empty_thing() {
        let md = thing_as_markdown(&Thing::create_named("draft"));
        assert_eq!(md, "## Thing (no URL yet, identifier: `#draft`)\n\n<empty>\n");
    }

    #[test]
    fn thing_with_values() -> TestResult {
        let thing = Thing::create_at("https://pod.example/movies#m1")?
            .add_string_no_locale(NAME, "Alien")?;
        assert_eq!(
            thing_as_markdown(&thing),
            "## Thing: https://pod.example/movies#m1\n\nProperty: https://schema.org/name\n- \"Alien\" (string)\n"
        );
        Ok(())
    }

    #[test]
    fn new_dataset() {
        assert_eq!(
            solid_dataset_as_markdown(&SolidDataset::new()),
            "# SolidDataset (no URL yet)\n\n<empty>\n"
        );
        assert_eq!(
            change_log_as_markdown(&SolidDataset::new()),
            "This is a newly initialized SolidDataset, so there is no source to compare it to."
        );
    }

    #[test]
    fn dataset_with_changes() -> TestResult {
        let source = "https://pod.example/movies";
        let thing = Thing::create_at("https://pod.example/movies#m1")?
            .add_string_no_locale(NAME, "Alien")?;
        let dataset = SolidDataset::new()
            .with_resource_info(ResourceInfo::new(source))
            .set_thing(&thing)?;
        let md = solid_dataset_as_markdown(&dataset);
        assert!(md.starts_with("# SolidDataset: https://pod.example/movies\n"));
        assert!(md.ends_with("(1 new value added / 0 values removed)\n"));

        let dataset = dataset.set_thing(&thing.set_string_no_locale(NAME, "Aliens")?)?;
        assert_eq!(
            change_log_as_markdown(&dataset),
            "## Changes compared to https://pod.example/movies\n\n\
             ### Thing: https://pod.example/movies#m1\n\n\
             Property: https://schema.org/name\n\
             - Added:\n  - \"Aliens\" (string)\n"
        );
        Ok(())
    }

    #[test]
    fn unmodified_dataset() {
        let dataset =
            SolidDataset::new().with_resource_info(ResourceInfo::new("https://pod.example/movies"));
        assert_eq!(
            change_log_as_markdown(&dataset),
            "## Changes compared to https://pod.example/movies\n\n\
             This SolidDataset has not been modified since it was fetched from https://pod.example/movies.\n"
        );
    }
}
