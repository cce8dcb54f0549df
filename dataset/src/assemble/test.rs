use crate::thing::BlankNodeObject;
use crate::*;
use solid_term::{BlankNode, DataFactory, Literal, NamedNode, Quad, Term, Variable};
use test_case::test_case;

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

const KNOWS: &str = "https://schema.org/knows";
const NAME: &str = "https://schema.org/name";

fn ex(suffix: &str) -> NamedNode {
    NamedNode::new(format!("https://pod.example/{suffix}"))
}

fn b(id: &str) -> BlankNode {
    BlankNode::new(id)
}

fn triple(
    s: impl Into<Term>,
    p: &str,
    o: impl Into<Term>,
) -> std::result::Result<Quad, solid_term::TermError> {
    Quad::new_triple(s, NamedNode::new(p), o)
}

fn blank_objects(dataset: &SolidDataset, subject: &str) -> Vec<BlankNodeObject> {
    dataset
        .graph(&GraphKey::Default)
        .and_then(|g| g.get(subject))
        .and_then(|t| t.objects(KNOWS))
        .map(|o| o.blank_nodes.clone())
        .unwrap_or_default()
}

#[test]
fn quads_are_routed_to_their_graph() -> TestResult {
    let quads = vec![
        triple(ex("a"), NAME, Literal::new_simple("a"))?,
        Quad::new(ex("b"), NamedNode::new(NAME), Literal::new_simple("b"), ex("g"))?,
    ];
    let dataset = assemble(quads, AssembleOptions::new())?;
    assert!(dataset.graph(&GraphKey::Default).ok_or("no default graph")?.contains_key("https://pod.example/a"));
    let named = dataset
        .graph(&GraphKey::Named("https://pod.example/g".into()))
        .ok_or("no named graph")?;
    assert!(named.contains_key("https://pod.example/b"));
    Ok(())
}

#[test]
fn language_tags_are_lowercased() -> TestResult {
    let dataset = assemble(
        vec![triple(ex("a"), NAME, Literal::new_lang("Nom", "FR-be"))?],
        AssembleOptions::new(),
    )?;
    let thing = dataset
        .get_thing("https://pod.example/a", &ThingQuery::new())?
        .ok_or("missing thing")?;
    assert_eq!(thing.get_string_with_locale(NAME, "fr-BE")?, Some("Nom".into()));
    assert!(thing.objects(NAME).ok_or("no values")?.lang_strings.contains_key("fr-be"));
    Ok(())
}

#[test]
fn chains_are_inlined() -> TestResult {
    let quads = vec![
        triple(ex("a"), KNOWS, b("x"))?,
        triple(b("x"), NAME, Literal::new_simple("x"))?,
        triple(b("x"), KNOWS, b("y"))?,
        triple(b("y"), NAME, Literal::new_simple("y"))?,
    ];
    let dataset = assemble(quads, AssembleOptions::new())?;
    let graph = dataset.graph(&GraphKey::Default).ok_or("no default graph")?;
    assert_eq!(graph.len(), 1);
    let [BlankNodeObject::Inline(x)] = &blank_objects(&dataset, "https://pod.example/a")[..] else {
        panic!("expected one inline blank node");
    };
    assert_eq!(x[NAME].literals.values().flatten().collect::<Vec<_>>(), ["x"]);
    assert!(matches!(&x[KNOWS].blank_nodes[..], [BlankNodeObject::Inline(_)]));
    Ok(())
}

#[test]
fn shared_blank_nodes_are_kept_as_references() -> TestResult {
    let quads = vec![
        triple(ex("a"), KNOWS, b("x"))?,
        triple(ex("b"), KNOWS, b("x"))?,
        triple(b("x"), NAME, Literal::new_simple("x"))?,
    ];
    let dataset = assemble(quads, AssembleOptions::new())?;
    assert_eq!(
        blank_objects(&dataset, "https://pod.example/a"),
        [BlankNodeObject::Reference("_:x".into())]
    );
    assert!(dataset.graph(&GraphKey::Default).ok_or("no default graph")?.contains_key("_:x"));
    Ok(())
}

#[test]
fn diamonds_keep_the_shared_node_as_reference() -> TestResult {
    let quads = vec![
        triple(ex("a"), KNOWS, b("l"))?,
        triple(ex("a"), KNOWS, b("r"))?,
        triple(b("l"), KNOWS, b("bottom"))?,
        triple(b("r"), KNOWS, b("bottom"))?,
        triple(b("bottom"), NAME, Literal::new_simple("bottom"))?,
    ];
    let dataset = assemble(quads, AssembleOptions::new())?;
    let graph = dataset.graph(&GraphKey::Default).ok_or("no default graph")?;
    assert!(graph.contains_key("_:bottom"));
    assert!(!graph.contains_key("_:l"));
    assert!(!graph.contains_key("_:r"));
    Ok(())
}

#[test]
fn cycles_are_kept_as_references() -> TestResult {
    let quads = vec![
        triple(ex("a"), KNOWS, b("x"))?,
        triple(b("x"), KNOWS, b("y"))?,
        triple(b("y"), KNOWS, b("x"))?,
    ];
    let dataset = assemble(quads, AssembleOptions::new())?;
    let graph = dataset.graph(&GraphKey::Default).ok_or("no default graph")?;
    assert!(graph.contains_key("_:x"));
    assert!(graph.contains_key("_:y"));
    Ok(())
}

#[test]
fn chain_detection_stops_above_threshold() -> TestResult {
    let quads = vec![
        triple(ex("a"), KNOWS, b("x"))?,
        triple(b("x"), KNOWS, b("y"))?,
        triple(b("y"), NAME, Literal::new_simple("y"))?,
    ];
    let options = AssembleOptions::new().with_chain_detection_threshold(1);
    let dataset = assemble(quads.clone(), options)?;
    assert_eq!(
        blank_objects(&dataset, "https://pod.example/a"),
        [BlankNodeObject::Reference("_:x".into())]
    );
    let dataset = assemble(quads, AssembleOptions::new().with_chain_detection_threshold(2))?;
    assert!(matches!(
        &blank_objects(&dataset, "https://pod.example/a")[..],
        [BlankNodeObject::Inline(_)]
    ));
    Ok(())
}

#[test]
fn duplicate_blank_quads_are_ignored() -> TestResult {
    let quad = triple(ex("a"), KNOWS, b("x"))?;
    let mut assembler = DatasetAssembler::new(AssembleOptions::new());
    assembler.push(quad.clone())?.push(quad)?;
    let dataset = assembler.finish()?;
    assert_eq!(blank_objects(&dataset, "https://pod.example/a").len(), 1);
    Ok(())
}

#[test]
fn variables_are_rejected() -> TestResult {
    let quad = triple(ex("a"), NAME, Variable::new("v"))?;
    assert!(matches!(
        assemble(vec![quad.clone()], AssembleOptions::new()),
        Err(AssembleError::UnsupportedObject(solid_term::TermKind::Variable))
    ));
    assert!(SolidDataset::new().add_quad(&quad).is_err());
    Ok(())
}

type Quads = std::result::Result<Vec<Quad>, solid_term::TermError>;

fn single_inline_node() -> Quads {
    Ok(vec![
        triple(ex("a"), NAME, Literal::new_simple("a"))?,
        triple(ex("a"), KNOWS, b("x"))?,
        triple(b("x"), NAME, Literal::new_simple("x"))?,
        triple(ex("a"), KNOWS, ex("b"))?,
    ])
}

fn labelled_node_beside_inline_node() -> Quads {
    Ok(vec![
        triple(ex("s1"), KNOWS, b("b1"))?,
        triple(ex("s2"), KNOWS, b("b1"))?,
        triple(b("b1"), NAME, Literal::new_simple("x"))?,
        triple(ex("s3"), KNOWS, b("c"))?,
        triple(b("c"), NAME, Literal::new_simple("y"))?,
    ])
}

fn nested_chain_beside_shared_nodes() -> Quads {
    Ok(vec![
        triple(ex("a"), KNOWS, b("x"))?,
        triple(b("x"), KNOWS, b("y"))?,
        triple(b("y"), NAME, Literal::new_simple("y"))?,
        triple(ex("c"), KNOWS, b("b2"))?,
        triple(ex("d"), KNOWS, b("b2"))?,
        triple(b("b2"), NAME, Literal::new_simple("z"))?,
        triple(b("b1"), NAME, Literal::new_simple("unreferenced"))?,
        triple(b("b3"), KNOWS, b("b3"))?,
    ])
}

#[test_case(single_inline_node ; "single inline node")]
#[test_case(labelled_node_beside_inline_node ; "labelled node beside inline node")]
#[test_case(nested_chain_beside_shared_nodes ; "nested chain beside shared nodes")]
fn flattening_then_assembling_preserves_the_graph(quads: fn() -> Quads) -> TestResult {
    let quads = quads()?;
    let dataset = assemble(quads.clone(), AssembleOptions::new())?;
    let flattened = dataset.to_quads(&DataFactory::new())?;
    assert_eq!(flattened.len(), quads.len());
    let again = assemble(flattened, AssembleOptions::new())?;
    assert_eq!(again, dataset);
    Ok(())
}

#[test]
fn inline_nodes_never_reuse_existing_labels() -> TestResult {
    let dataset = assemble(labelled_node_beside_inline_node()?, AssembleOptions::new())?;
    let flattened = dataset.to_quads(&DataFactory::new())?;
    let s3_object = flattened
        .iter()
        .find(|q| q.subject() == &Term::from(ex("s3")))
        .map(|q| q.object().clone())
        .ok_or("missing s3")?;
    assert_ne!(s3_object, Term::from(b("b1")));
    let b1_names = flattened
        .iter()
        .filter(|q| q.subject() == &Term::from(b("b1")))
        .count();
    assert_eq!(b1_names, 1);
    Ok(())
}

#[test]
fn add_quad_keeps_blank_nodes_as_references() -> TestResult {
    let dataset = SolidDataset::new()
        .add_quad(&triple(ex("a"), KNOWS, b("x"))?)?
        .add_quad(&triple(ex("a"), NAME, Literal::new_simple("a"))?)?;
    assert_eq!(
        blank_objects(&dataset, "https://pod.example/a"),
        [BlankNodeObject::Reference("_:x".into())]
    );
    assert!(dataset.change_log().is_empty());
    Ok(())
}
