//! Cycle decomposition of a successor array.

use std::collections::BTreeMap;

use crate::models::{Tour, NOT_SET};

/// A successor array with a lazily computed cycle decomposition.
///
/// Entries equal to [`NOT_SET`] are ignored. The decomposition maps the
/// smallest id of every cycle to the cycle's length and is recomputed after
/// any [`add_edge`](Self::add_edge).
///
/// # Examples
///
/// ```
/// use u_tour::cycles::AsymmetricCycles;
///
/// // two sub-tours: 0 → 1 → 0 and 2 → 4 → 3 → 2
/// let mut cycles = AsymmetricCycles::new(vec![1, 0, 4, 2, 3]);
/// assert_eq!(cycles.cycle_count(), 2);
/// assert_eq!(cycles.cycles().get(&2), Some(&3));
///
/// cycles.add_edge(1, 2);
/// cycles.add_edge(3, 0);
/// assert_eq!(cycles.cycle_count(), 1);
/// ```
#[derive(Debug)]
pub struct AsymmetricCycles {
    next: Vec<usize>,
    cycles: Option<BTreeMap<usize, usize>>,
}

impl AsymmetricCycles {
    /// Wraps a successor array.
    pub fn new(next: Vec<usize>) -> Self {
        Self { next, cycles: None }
    }

    /// The edges of `tour`.
    pub fn from_tour(tour: &Tour) -> Self {
        Self::new(tour.successors().to_vec())
    }

    /// Length of the underlying array.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    /// Returns `true` if the underlying array is empty.
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Successor of `id`, or [`NOT_SET`].
    #[inline]
    pub fn neighbor(&self, id: usize) -> usize {
        self.next.get(id).copied().unwrap_or(NOT_SET)
    }

    /// The successor array.
    pub fn successors(&self) -> &[usize] {
        &self.next
    }

    /// Consumes the structure, returning the successor array.
    pub fn into_successors(self) -> Vec<usize> {
        self.next
    }

    /// Overwrites the successor of `from`.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        if let Some(slot) = self.next.get_mut(from) {
            *slot = to;
            self.cycles = None;
        }
    }

    /// Cycle start id (smallest member) to cycle length.
    ///
    /// Walks that hit [`NOT_SET`], run into an earlier walk, or exceed the
    /// array length are not cycles and are left out.
    pub fn cycles(&mut self) -> &BTreeMap<usize, usize> {
        let next = &self.next;
        self.cycles.get_or_insert_with(|| decompose(next))
    }

    /// Number of cycles.
    pub fn cycle_count(&mut self) -> usize {
        self.cycles().len()
    }

    /// Ids of the cycle through `start`, in successor order.
    ///
    /// Empty if `start` is not on a cycle.
    pub fn members(&self, start: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = start;
        loop {
            if cur == NOT_SET || out.len() > self.next.len() {
                return Vec::new();
            }
            out.push(cur);
            cur = self.neighbor(cur);
            if cur == start {
                return out;
            }
        }
    }
}

impl Clone for AsymmetricCycles {
    fn clone(&self) -> Self {
        Self::new(self.next.clone())
    }
}

fn decompose(next: &[usize]) -> BTreeMap<usize, usize> {
    let bound = next.len();
    let mut visited = vec![false; bound];
    let mut cycles = BTreeMap::new();
    for start in 0..bound {
        if visited[start] || next[start] == NOT_SET {
            continue;
        }
        let mut cur = start;
        let mut len = 0;
        loop {
            visited[cur] = true;
            cur = next[cur];
            len += 1;
            if cur == start {
                cycles.insert(start, len);
                break;
            }
            if cur >= bound || visited[cur] || len > bound {
                break;
            }
        }
    }
    cycles
}
