//! In-memory indexed quad store.
//!
//! [`DatasetCore`] interns every subject, predicate and object into an [`EntityIndex`],
//! and maintains, for each graph, three nested indexes over the interned ids:
//! subject → predicate → object, predicate → object → subject,
//! and object → subject → predicate.
//! The indexes only record presence;
//! the quads themselves are kept in a side table keyed by their ids and graph.

use crate::index::{EntityId, EntityIndex};
use solid_term::{Quad, Term};
use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

type Index3 = BTreeMap<EntityId, BTreeMap<EntityId, BTreeSet<EntityId>>>;

/// The three index orderings of a graph,
/// and its side table mapping `[s, p, o]` ids back to the stored quad.
#[derive(Clone, Debug, Default)]
struct GraphIndexes {
    subjects: Index3,
    predicates: Index3,
    objects: Index3,
    quads: HashMap<[EntityId; 3], Quad>,
}

impl GraphIndexes {
    fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// The order in which an [`Index3`] stores the ids of a quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ordering {
    Spo,
    Pos,
    Osp,
}

impl Ordering {
    /// Reorder `[a, b, c]`, read from an index in this ordering, as `[s, p, o]`.
    fn to_spo(self, [a, b, c]: [EntityId; 3]) -> [EntityId; 3] {
        match self {
            Ordering::Spo => [a, b, c],
            Ordering::Pos => [c, a, b],
            Ordering::Osp => [b, c, a],
        }
    }
}

/// An indexed in-memory set of [quads](Quad).
///
/// Quads are distinguished by the structural equality of their components.
#[derive(Clone, Debug, Default)]
pub struct DatasetCore {
    entities: EntityIndex,
    graphs: BTreeMap<Term, GraphIndexes>,
    size: Cell<Option<usize>>,
}

impl DatasetCore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from fallible quads,
    /// failing on the first error without building a partial store.
    pub fn try_from_iter<I, E>(quads: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<Quad, E>>,
    {
        let mut store = DatasetCore::new();
        for quad in quads {
            store.add(quad?);
        }
        Ok(store)
    }

    /// Number of quads in this store.
    ///
    /// The count is cached until the next mutation.
    pub fn size(&self) -> usize {
        if let Some(size) = self.size.get() {
            return size;
        }
        let size = self
            .graphs
            .values()
            .flat_map(|g| g.subjects.values())
            .flat_map(|preds| preds.values())
            .map(BTreeSet::len)
            .sum();
        self.size.set(Some(size));
        size
    }

    /// Whether this store contains no quad.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Add `quad` to this store.
    ///
    /// Adding a quad that is already present leaves the indexes untouched
    /// but replaces the stored quad.
    pub fn add(&mut self, quad: Quad) -> &mut Self {
        let s = self.entities.ensure_index(quad.subject());
        let p = self
            .entities
            .ensure_index(&Term::NamedNode(quad.predicate().clone()));
        let o = self.entities.ensure_index(quad.object());
        let indexes = self.graphs.entry(quad.graph().clone()).or_default();
        insert_in_index(&mut indexes.subjects, s, p, o);
        insert_in_index(&mut indexes.predicates, p, o, s);
        insert_in_index(&mut indexes.objects, o, s, p);
        indexes.quads.insert([s, p, o], quad);
        self.size.set(None);
        self
    }

    /// Remove `quad` from this store, if present.
    pub fn delete(&mut self, quad: &Quad) -> &mut Self {
        let Some(([s, p, o], g)) = self.quad_ids(quad) else {
            return self;
        };
        let Some(indexes) = self.graphs.get_mut(g) else {
            return self;
        };
        if !contains_in_index(&indexes.objects, o, s, p) {
            return self;
        }
        remove_from_index(&mut indexes.subjects, s, p, o);
        remove_from_index(&mut indexes.predicates, p, o, s);
        remove_from_index(&mut indexes.objects, o, s, p);
        indexes.quads.remove(&[s, p, o]);
        if indexes.is_empty() {
            self.graphs.remove(g);
        }
        self.size.set(None);
        self
    }

    /// Whether `quad` is in this store.
    pub fn has(&self, quad: &Quad) -> bool {
        let Some(([s, p, o], g)) = self.quad_ids(quad) else {
            return false;
        };
        self.graphs
            .get(g)
            .is_some_and(|indexes| contains_in_index(&indexes.objects, o, s, p))
    }

    /// A new store containing the quads matching the given components,
    /// `None` acting as a wildcard.
    ///
    /// The index used is the one that puts the given components first,
    /// so that the cost depends on the number of matching quads
    /// rather than on the size of the store.
    pub fn match_quads(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        graph: Option<&Term>,
    ) -> DatasetCore {
        let mut result = DatasetCore::new();
        for quad in self.find(subject, predicate, object, graph) {
            result.add(quad.clone());
        }
        result
    }

    /// Iterate over the quads of this store,
    /// graph by graph, in subject index order.
    pub fn iter(&self) -> std::vec::IntoIter<&Quad> {
        self.find(None, None, None, None).into_iter()
    }

    /// Look up the ids of a quad, along with its graph, `None` if one of its terms is unknown.
    fn quad_ids<'q>(&self, quad: &'q Quad) -> Option<([EntityId; 3], &'q Term)> {
        let s = self.entities.get_index(quad.subject())?;
        let p = self
            .entities
            .get_index(&Term::NamedNode(quad.predicate().clone()))?;
        let o = self.entities.get_index(quad.object())?;
        Some(([s, p, o], quad.graph()))
    }

    fn find(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        graph: Option<&Term>,
    ) -> Vec<&Quad> {
        let mut ids = [None; 3];
        for (slot, term) in ids.iter_mut().zip([subject, predicate, object]) {
            if let Some(term) = term {
                match self.entities.get_index(term) {
                    Some(id) => *slot = Some(id),
                    None => return vec![],
                }
            }
        }
        let [s, p, o] = ids;
        let (ordering, keys) = match (s, p, o) {
            (Some(_), _, Some(_)) => (Ordering::Osp, [o, s, p]),
            (Some(_), _, None) => (Ordering::Spo, [s, p, None]),
            (None, Some(_), _) => (Ordering::Pos, [p, o, None]),
            (None, None, Some(_)) => (Ordering::Osp, [o, None, None]),
            (None, None, None) => (Ordering::Spo, [None, None, None]),
        };
        let graphs: Box<dyn Iterator<Item = (&Term, &GraphIndexes)>> = match graph {
            Some(g) => Box::new(self.graphs.get_key_value(g).into_iter()),
            None => Box::new(self.graphs.iter()),
        };
        let mut found = vec![];
        for (g, indexes) in graphs {
            log::trace!("matching in graph {g} using {ordering:?} index");
            let index = match ordering {
                Ordering::Spo => &indexes.subjects,
                Ordering::Pos => &indexes.predicates,
                Ordering::Osp => &indexes.objects,
            };
            find_in_index(index, keys, &mut |abc| {
                if let Some(quad) = indexes.quads.get(&ordering.to_spo(abc)) {
                    found.push(quad);
                }
            });
        }
        found
    }
}

impl<'a> IntoIterator for &'a DatasetCore {
    type Item = &'a Quad;
    type IntoIter = std::vec::IntoIter<&'a Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Quad> for DatasetCore {
    fn from_iter<I: IntoIterator<Item = Quad>>(quads: I) -> Self {
        let mut store = DatasetCore::new();
        store.extend(quads);
        store
    }
}

impl Extend<Quad> for DatasetCore {
    fn extend<I: IntoIterator<Item = Quad>>(&mut self, quads: I) {
        for quad in quads {
            self.add(quad);
        }
    }
}

fn insert_in_index(index: &mut Index3, a: EntityId, b: EntityId, c: EntityId) {
    index.entry(a).or_default().entry(b).or_default().insert(c);
}

fn contains_in_index(index: &Index3, a: EntityId, b: EntityId, c: EntityId) -> bool {
    index
        .get(&a)
        .and_then(|level1| level1.get(&b))
        .is_some_and(|level2| level2.contains(&c))
}

/// Remove `[a, b, c]` from `index`, pruning the levels it leaves empty.
fn remove_from_index(index: &mut Index3, a: EntityId, b: EntityId, c: EntityId) {
    let Some(level1) = index.get_mut(&a) else {
        return;
    };
    if let Some(level2) = level1.get_mut(&b) {
        level2.remove(&c);
        if level2.is_empty() {
            level1.remove(&b);
        }
    }
    if level1.is_empty() {
        index.remove(&a);
    }
}

/// Call `found` on every `[a, b, c]` of `index` matching `keys`, `None` being a wildcard.
fn find_in_index(
    index: &Index3,
    [k0, k1, k2]: [Option<EntityId>; 3],
    found: &mut impl FnMut([EntityId; 3]),
) {
    for (a, level1) in select(index, k0) {
        for (b, level2) in select(level1, k1) {
            match k2 {
                Some(c) => {
                    if level2.contains(&c) {
                        found([*a, *b, c]);
                    }
                }
                None => level2.iter().for_each(|c| found([*a, *b, *c])),
            }
        }
    }
}

/// The entries of `map` whose key is `key`, or all of them if `key` is `None`.
fn select<V>(
    map: &BTreeMap<EntityId, V>,
    key: Option<EntityId>,
) -> Box<dyn Iterator<Item = (&EntityId, &V)> + '_> {
    match key {
        Some(k) => Box::new(map.get_key_value(&k).into_iter()),
        None => Box::new(map.iter()),
    }
}
