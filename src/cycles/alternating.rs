//! AB-cycles between two parent tours.

use std::collections::BTreeMap;

use crate::models::{Tour, NOT_SET};

use super::asymmetric::AsymmetricCycles;

/// Alternating cycles of two tours over the same ids.
///
/// Built from `ea`, the successor array of parent A, and `eb`, the
/// *predecessor* array of parent B. For each id `i` with `a = ea[i]` and
/// `b = eb[a]`, the walk `i → a` (an A edge) followed by `a ← b` (a B edge
/// walked backwards) links `i` to `b`. Ids where `b == i` share the edge with
/// both parents and are left out; the remaining links decompose into
/// AB-cycles, each alternating between A edges and B edges.
///
/// # Examples
///
/// ```
/// use u_tour::cycles::{AsymmetricAlternatingCycles, AsymmetricCycles};
///
/// // A: 0 → 1 → 2 → 3 → 0, B: 0 → 2 → 1 → 3 → 0
/// let ea = vec![1, 2, 3, 0];
/// let eb = vec![3, 2, 0, 1]; // predecessors under B
/// let mut ab = AsymmetricAlternatingCycles::new(&ea, &eb);
/// assert_eq!(ab.cycle_count(), 1);
///
/// // splicing the only AB-cycle turns A into B
/// let start = *ab.cycles().keys().next().unwrap();
/// let mut child = AsymmetricCycles::new(ea.clone());
/// ab.apply(start, &mut child);
/// assert_eq!(child.successors(), &[2, 3, 1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct AsymmetricAlternatingCycles {
    links: AsymmetricCycles,
    mid: Vec<usize>,
}

impl AsymmetricAlternatingCycles {
    /// Builds the structure from A's successors and B's predecessors.
    pub fn new(ea: &[usize], eb: &[usize]) -> Self {
        let len = ea.len().max(eb.len());
        let mut links = vec![NOT_SET; len];
        let mut mid = vec![NOT_SET; len];
        for (idx, &a) in ea.iter().enumerate() {
            if a == NOT_SET {
                continue;
            }
            let b = eb.get(a).copied().unwrap_or(NOT_SET);
            if b == NOT_SET || b == idx {
                continue;
            }
            links[idx] = b;
            mid[idx] = a;
        }
        Self {
            links: AsymmetricCycles::new(links),
            mid,
        }
    }

    /// Builds the structure from two tours of the same problem.
    pub fn from_tours(a: &Tour, b: &Tour) -> Self {
        Self::new(a.successors(), &b.predecessors())
    }

    /// Returns `true` if the A edge leaving `id` also belongs to B.
    pub fn is_common(&self, id: usize) -> bool {
        self.links.neighbor(id) == NOT_SET
    }

    /// The A successor of `id`, or [`NOT_SET`] for common edges.
    pub fn mid(&self, id: usize) -> usize {
        self.mid.get(id).copied().unwrap_or(NOT_SET)
    }

    /// AB-cycle start id to the number of A edges in it.
    pub fn cycles(&mut self) -> &BTreeMap<usize, usize> {
        self.links.cycles()
    }

    /// Number of AB-cycles.
    pub fn cycle_count(&mut self) -> usize {
        self.links.cycle_count()
    }

    /// Ids whose A edge belongs to the AB-cycle through `start`.
    pub fn members(&self, start: usize) -> Vec<usize> {
        self.links.members(start)
    }

    /// Replaces the A edges of one AB-cycle in `target` by its B edges.
    ///
    /// Every member `i` reaches `mid[i]` in A; afterwards its link partner
    /// reaches `mid[i]` instead, which is that partner's B successor.
    pub fn apply(&self, start: usize, target: &mut AsymmetricCycles) {
        for idx in self.members(start) {
            target.add_edge(self.links.neighbor(idx), self.mid[idx]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::WeightMatrix;
    use crate::models::Problem;

    fn tours(a: &[usize], b: &[usize]) -> (Tour, Tour) {
        let problem = Problem::closed(WeightMatrix::new(a.len()), 0).expect("valid");
        (
            Tour::from_sequence(&problem, a).expect("valid"),
            Tour::from_sequence(&problem, b).expect("valid"),
        )
    }

    #[test]
    fn test_identical_parents_have_no_cycles() {
        let (a, b) = tours(&[0, 1, 2, 3, 4], &[0, 1, 2, 3, 4]);
        let mut ab = AsymmetricAlternatingCycles::from_tours(&a, &b);
        assert_eq!(ab.cycle_count(), 0);
        assert!((0..5).all(|id| ab.is_common(id)));
    }

    #[test]
    fn test_common_edges_excluded() {
        // shared edges: 4 → 0 only
        let (a, b) = tours(&[0, 1, 2, 3, 4], &[0, 3, 2, 1, 4]);
        let ab = AsymmetricAlternatingCycles::from_tours(&a, &b);
        assert!(ab.is_common(4));
        assert!(!ab.is_common(0));
        assert_eq!(ab.mid(0), 1);
    }

    #[test]
    fn test_applying_every_cycle_yields_parent_b() {
        let (a, b) = tours(&[0, 1, 2, 3, 4, 5], &[0, 4, 2, 5, 1, 3]);
        let mut ab = AsymmetricAlternatingCycles::from_tours(&a, &b);
        let starts: Vec<usize> = ab.cycles().keys().copied().collect();
        assert!(!starts.is_empty());
        let mut child = AsymmetricCycles::from_tour(&a);
        for start in starts {
            ab.apply(start, &mut child);
        }
        assert_eq!(child.successors(), b.successors());
    }

    #[test]
    fn test_single_cycle_keeps_permutation() {
        let (a, b) = tours(&[0, 1, 2, 3, 4, 5], &[0, 4, 2, 5, 1, 3]);
        let mut ab = AsymmetricAlternatingCycles::from_tours(&a, &b);
        let starts: Vec<usize> = ab.cycles().keys().copied().collect();
        for start in starts {
            let mut child = AsymmetricCycles::from_tour(&a);
            ab.apply(start, &mut child);
            let mut indegree = vec![0; 6];
            for &to in child.successors() {
                indegree[to] += 1;
            }
            assert!(indegree.iter().all(|&d| d == 1));
        }
    }
}
