//! The [`ChangeLog`] of a [`SolidDataset`](crate::SolidDataset):
//! the triples added and deleted since it was fetched.
use solid_term::Quad;

/// Pending additions and deletions.
///
/// A triple is never both added and deleted:
/// adding a triple whose deletion is pending cancels that deletion, and vice versa.
/// Quads involving a blank node are not tracked,
/// as they cannot be identified across requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeLog {
    additions: Vec<Quad>,
    deletions: Vec<Quad>,
}

impl ChangeLog {
    /// An empty change log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quads added since the dataset was fetched.
    pub fn additions(&self) -> &[Quad] {
        &self.additions
    }

    /// Quads deleted since the dataset was fetched.
    pub fn deletions(&self) -> &[Quad] {
        &self.deletions
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }

    /// Copy of this change log recording `quads` as added.
    pub fn with_additions(&self, quads: impl IntoIterator<Item = Quad>) -> ChangeLog {
        let mut log = self.clone();
        for quad in quads.into_iter().filter(|q| !q.has_blank_node()) {
            record(&mut log.additions, &mut log.deletions, quad);
        }
        log
    }

    /// Copy of this change log recording `quads` as deleted.
    pub fn with_deletions(&self, quads: impl IntoIterator<Item = Quad>) -> ChangeLog {
        let mut log = self.clone();
        for quad in quads.into_iter().filter(|q| !q.has_blank_node()) {
            record(&mut log.deletions, &mut log.additions, quad);
        }
        log
    }
}

/// Push `quad` to `changes` unless it cancels a pending change in `opposites`.
fn record(changes: &mut Vec<Quad>, opposites: &mut Vec<Quad>, quad: Quad) {
    let before = opposites.len();
    opposites.retain(|q| *q != quad);
    if opposites.len() == before && !changes.contains(&quad) {
        changes.push(quad);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use solid_term::{BlankNode, Literal, NamedNode};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn quad(o: &str) -> Result<Quad, solid_term::TermError> {
        Quad::new_triple(
            NamedNode::new("https://pod.example/movies#m1"),
            NamedNode::new("https://schema.org/name"),
            Literal::new_simple(o),
        )
    }

    #[test]
    fn addition_cancels_deletion() -> TestResult {
        let log = ChangeLog::new()
            .with_deletions([quad("Alien")?])
            .with_additions([quad("Alien")?]);
        assert!(log.is_empty());
        Ok(())
    }

    #[test]
    fn deletion_cancels_addition() -> TestResult {
        let log = ChangeLog::new()
            .with_additions([quad("Alien")?, quad("Aliens")?])
            .with_deletions([quad("Alien")?]);
        assert_eq!(log.additions(), &[quad("Aliens")?]);
        assert!(log.deletions().is_empty());
        Ok(())
    }

    #[test]
    fn changes_are_not_duplicated() -> TestResult {
        let log = ChangeLog::new().with_additions([quad("Alien")?, quad("Alien")?]);
        assert_eq!(log.additions().len(), 1);
        Ok(())
    }

    #[test]
    fn blank_nodes_are_not_tracked() -> TestResult {
        let q = Quad::new_triple(
            NamedNode::new("https://pod.example/movies#m1"),
            NamedNode::new("https://schema.org/review"),
            BlankNode::new("r"),
        )?;
        let log = ChangeLog::new().with_additions([q.clone()]).with_deletions([q]);
        assert!(log.is_empty());
        Ok(())
    }

    #[test]
    fn original_is_untouched() -> TestResult {
        let log = ChangeLog::new().with_additions([quad("Alien")?]);
        let _ = log.with_deletions([quad("Alien")?]);
        assert_eq!(log.additions().len(), 1);
        Ok(())
    }
}
