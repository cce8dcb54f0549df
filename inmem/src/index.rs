//! An [`EntityIndex`] is a bidirectional association of [terms](Term) with short numeric [ids](`EntityId`).
use solid_term::Term;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Short numeric identifier of an entity in an [`EntityIndex`].
///
/// The id `0` is reserved and never assigned.
pub type EntityId = u32;

/// Interning table mapping terms to monotonically assigned ids.
///
/// Terms are compared structurally,
/// so two terms share an id only if they have the same kind and the same fields.
#[derive(Clone, Debug, Default)]
pub struct EntityIndex {
    t2i: HashMap<Term, EntityId>,
    i2t: Vec<Term>,
}

impl EntityIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interned entities.
    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    /// Whether no entity has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.i2t.is_empty()
    }

    /// Get the id of term `t`, if it exists.
    pub fn get_index(&self, t: &Term) -> Option<EntityId> {
        self.t2i.get(t).copied()
    }

    /// Get the id of term `t`, interning it if necessary.
    pub fn ensure_index(&mut self, t: &Term) -> EntityId {
        match self.t2i.entry(t.clone()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                self.i2t.push(e.key().clone());
                let i = self.i2t.len() as EntityId;
                e.insert(i);
                i
            }
        }
    }

    /// Get the term interned under `i`.
    ///
    /// # Precondition
    /// `i` must have been returned by [`get_index`](EntityIndex::get_index)
    /// or [`ensure_index`](EntityIndex::ensure_index),
    /// otherwise this method may panic.
    pub fn get_term(&self, i: EntityId) -> &Term {
        &self.i2t[i as usize - 1]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use solid_term::ns::xsd;
    use solid_term::{BlankNode, Literal, NamedNode, Variable};
    use test_case::test_case;

    #[test]
    fn entity_index() {
        let exa: Term = NamedNode::new("https://example.com/ns/a").into();
        let exb: Term = NamedNode::new("https://example.com/ns/b").into();
        let bn1: Term = BlankNode::new("bn1").into();

        let mut idx = EntityIndex::new();
        assert!(idx.is_empty());
        assert_eq!(idx.get_index(&exa), None);

        assert_eq!(idx.ensure_index(&exa), 1);
        assert_eq!(idx.ensure_index(&exb), 2);
        assert_eq!(idx.ensure_index(&bn1), 3);
        assert_eq!(idx.ensure_index(&exa), 1);
        assert_eq!(idx.len(), 3);

        assert_eq!(idx.get_index(&exb), Some(2));
        assert_eq!(idx.get_term(3), &bn1);
        assert_eq!(idx.get_term(1), &exa);
    }

    #[test_case(NamedNode::new("_:b").into(), BlankNode::new("b").into() ; "iri looking like a blank node")]
    #[test_case(NamedNode::new("?v").into(), Variable::new("v").into() ; "iri looking like a variable")]
    #[test_case(NamedNode::new("").into(), Term::DefaultGraph ; "empty iri and default graph")]
    #[test_case(NamedNode::new("\"x\"").into(), Literal::new_simple("x").into() ; "iri looking like a literal")]
    #[test_case(Literal::new_simple("x\"@en").into(), Literal::new_lang("x", "en").into() ; "lexical form looking like a language tag")]
    #[test_case(Literal::new_dt("1", NamedNode::new(xsd::integer)).into(), Literal::new_simple("1").into() ; "datatype")]
    fn distinct_terms_get_distinct_ids(t1: Term, t2: Term) {
        let mut idx = EntityIndex::new();
        assert_ne!(idx.ensure_index(&t1), idx.ensure_index(&t2));
        assert_eq!(idx.len(), 2);
    }
}
