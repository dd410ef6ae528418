//! Mutable tour representation.
//!
//! A [`Tour`] is an arena of plain integer ids: a successor array plus a
//! position index (`order` and `pos`) that answer "where is id" and "which id
//! is at position k" in O(1). Every structural edit keeps both views in sync
//! and touches only the positions between the edit points.

use super::problem::{Problem, NOT_SET};

/// Neighbor identities around a successful [`Tour::shift_after`].
///
/// `old_before → customer → old_after` became `old_before → old_after`, and
/// `new_before → new_after` became `new_before → customer → new_after`.
/// Any of the `*_after` fields may be [`NOT_SET`] at the open end of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    /// The relocated visit.
    pub customer: usize,
    /// Predecessor before the move.
    pub old_before: usize,
    /// Successor before the move.
    pub old_after: usize,
    /// Predecessor after the move.
    pub new_before: usize,
    /// Successor after the move.
    pub new_after: usize,
}

/// An ordered visiting sequence with a fixed first visit and an optional
/// fixed or closing last visit.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::models::{Problem, Tour};
///
/// let problem = Problem::closed(WeightMatrix::new(4), 0).unwrap();
/// let mut tour = Tour::from_sequence(&problem, &[0, 2, 1, 3]).unwrap();
/// assert_eq!(tour.neighbor(3), 0); // closed: wraps to first
///
/// let shift = tour.shift_after(1, 0).unwrap();
/// assert_eq!((shift.old_before, shift.old_after, shift.new_after), (2, 3, 2));
/// assert_eq!(tour.ids(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    first: usize,
    last: Option<usize>,
    next: Vec<usize>,
    order: Vec<usize>,
    pos: Vec<usize>,
    indexed: bool,
}

impl Tour {
    /// Creates the tour `first, movable ids ascending, fixed last`.
    pub fn new(problem: &Problem) -> Self {
        let mut ids = Vec::with_capacity(problem.count());
        ids.push(problem.first());
        ids.extend(problem.movable_ids());
        if let Some(last) = problem.fixed_last() {
            ids.push(last);
        }
        Self::from_valid_sequence(problem, ids)
    }

    /// Builds a tour from an explicit visiting order.
    ///
    /// Returns `None` unless `ids` starts at `first`, ends at a fixed last
    /// (when the problem has one) and lists every participating id exactly
    /// once. Closed tours do not repeat `first` at the end.
    pub fn from_sequence(problem: &Problem, ids: &[usize]) -> Option<Self> {
        if ids.len() != problem.count() || ids.first() != Some(&problem.first()) {
            return None;
        }
        if let Some(last) = problem.fixed_last() {
            if ids.last() != Some(&last) {
                return None;
            }
        }
        let mut seen = vec![false; problem.size()];
        for &id in ids {
            if !problem.contains(id) || seen[id] {
                return None;
            }
            seen[id] = true;
        }
        Some(Self::from_valid_sequence(problem, ids.to_vec()))
    }

    /// Builds a tour by walking the successor array `next` from `first`.
    ///
    /// Returns `None` if the walk does not produce a valid tour of the
    /// problem (wrong length, foreign ids, sub-cycles).
    pub fn from_successors(problem: &Problem, next: &[usize]) -> Option<Self> {
        let first = problem.first();
        let mut ids = Vec::with_capacity(problem.count());
        let mut cur = first;
        loop {
            ids.push(cur);
            if ids.len() > problem.count() {
                return None;
            }
            cur = *next.get(cur)?;
            if cur == NOT_SET || cur == first {
                break;
            }
        }
        Self::from_sequence(problem, &ids)
    }

    fn from_valid_sequence(problem: &Problem, order: Vec<usize>) -> Self {
        let size = problem.size();
        let mut tour = Self {
            first: problem.first(),
            last: problem.last(),
            next: vec![NOT_SET; size],
            order,
            pos: vec![NOT_SET; size],
            indexed: true,
        };
        for (k, &id) in tour.order.iter().enumerate() {
            tour.pos[id] = k;
        }
        if !tour.order.is_empty() {
            tour.relink(0, tour.order.len() - 1);
        }
        tour
    }

    /// The mandatory first visit.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Endpoint configuration: `None` (open), `Some(first)` (closed) or the
    /// fixed last id.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Returns `true` if the final visit wraps back to `first`.
    pub fn is_closed(&self) -> bool {
        self.last == Some(self.first)
    }

    fn fixed_last(&self) -> Option<usize> {
        self.last.filter(|&last| last != self.first)
    }

    /// Number of visits.
    pub fn count(&self) -> usize {
        self.order.len()
    }

    /// Size of the id space (matrix size of the problem).
    pub fn capacity(&self) -> usize {
        self.next.len()
    }

    /// The visit at the final position.
    pub fn tail(&self) -> usize {
        self.order.last().copied().unwrap_or(NOT_SET)
    }

    /// Visits in order, starting at `first`.
    pub fn ids(&self) -> &[usize] {
        &self.order
    }

    /// Successor array indexed by id; [`NOT_SET`] marks "no successor".
    pub fn successors(&self) -> &[usize] {
        &self.next
    }

    /// Predecessor array indexed by id; [`NOT_SET`] marks "no predecessor".
    pub fn predecessors(&self) -> Vec<usize> {
        let mut prev = vec![NOT_SET; self.capacity()];
        for (from, to) in self.pairs() {
            prev[to] = from;
        }
        prev
    }

    /// Successor of `id`, or [`NOT_SET`].
    pub fn neighbor(&self, id: usize) -> usize {
        self.next.get(id).copied().unwrap_or(NOT_SET)
    }

    /// Predecessor of `id`, or [`NOT_SET`].
    pub fn predecessor(&self, id: usize) -> usize {
        match self.position(id) {
            Some(0) if self.is_closed() && self.count() > 1 => self.tail(),
            Some(0) | None => NOT_SET,
            Some(k) => self.order[k - 1],
        }
    }

    /// Position of `id` (0 for `first`).
    pub fn position(&self, id: usize) -> Option<usize> {
        debug_assert!(self.indexed, "position index is stale");
        self.pos.get(id).copied().filter(|&p| p != NOT_SET)
    }

    /// Id at position `k`.
    pub fn at(&self, k: usize) -> Option<usize> {
        self.order.get(k).copied()
    }

    /// Returns `true` if `id` is part of the tour.
    pub fn contains(&self, id: usize) -> bool {
        self.pos.get(id).is_some_and(|&p| p != NOT_SET)
    }

    /// Returns `true` if the tour travels directly from `from` to `to`.
    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        to != NOT_SET && self.neighbor(from) == to
    }

    fn successor_at(&self, k: usize) -> usize {
        if k + 1 < self.order.len() {
            self.order[k + 1]
        } else if self.is_closed() {
            self.first
        } else {
            NOT_SET
        }
    }

    /// Rewrites `next` and `pos` for positions `lo..=hi`.
    fn relink(&mut self, lo: usize, hi: usize) {
        for k in lo..=hi {
            let id = self.order[k];
            self.pos[id] = k;
            self.next[id] = self.successor_at(k);
        }
    }

    fn reindex_from(&mut self, lo: usize) {
        for k in lo..self.order.len() {
            self.pos[self.order[k]] = k;
        }
    }

    /// Splices `to` immediately after `from`.
    ///
    /// Fails if `from == to`, `to` is already present, `from` is absent, or
    /// `from` is a fixed last visit.
    ///
    /// Costs O(count - position of `from`): every later position is
    /// renumbered.
    pub fn insert_after(&mut self, from: usize, to: usize) -> bool {
        if !self.indexed
            || from == to
            || to >= self.capacity()
            || self.contains(to)
            || Some(from) == self.fixed_last()
        {
            return false;
        }
        let Some(pf) = self.position(from) else {
            return false;
        };
        self.order.insert(pf + 1, to);
        self.reindex_from(pf + 1);
        self.relink(pf, pf + 1);
        true
    }

    /// Removes `customer`, returning its former `(before, after)` neighbors.
    ///
    /// Fails for `first`, a fixed last visit, or an absent id.
    ///
    /// Costs O(count - position of `customer`), like
    /// [`insert_after`](Self::insert_after).
    pub fn remove(&mut self, customer: usize) -> Option<(usize, usize)> {
        if !self.indexed || customer == self.first || Some(customer) == self.fixed_last() {
            return None;
        }
        let pc = self.position(customer)?;
        let before = self.order[pc - 1];
        let after = self.successor_at(pc);
        self.order.remove(pc);
        self.pos[customer] = NOT_SET;
        self.next[customer] = NOT_SET;
        self.reindex_from(pc);
        self.relink(pc - 1, pc - 1);
        Some((before, after))
    }

    /// Computes the neighbor identities of `shift_after(customer, before)`
    /// without performing it.
    pub fn preview_shift(&self, customer: usize, before: usize) -> Option<Shift> {
        if !self.indexed
            || customer == before
            || customer == self.first
            || Some(customer) == self.fixed_last()
            || Some(before) == self.fixed_last()
        {
            return None;
        }
        let pc = self.position(customer)?;
        self.position(before)?;
        let old_before = self.order[pc - 1];
        if old_before == before {
            return None;
        }
        Some(Shift {
            customer,
            old_before,
            old_after: self.successor_at(pc),
            new_before: before,
            new_after: self.next[before],
        })
    }

    /// Moves `customer` to sit immediately after `before`.
    ///
    /// Returns `None` (and leaves the tour untouched) when the move is
    /// invalid or would change nothing: `customer == before`, either id is
    /// absent, `customer` is `first` or a fixed last, `before` is a fixed
    /// last, or `customer` already follows `before`.
    pub fn shift_after(&mut self, customer: usize, before: usize) -> Option<Shift> {
        let shift = self.preview_shift(customer, before)?;
        let pc = self.pos[customer];
        let pb = self.pos[before];
        let (lo, hi) = if pb < pc {
            self.order[pb + 1..=pc].rotate_right(1);
            (pb + 1, pc)
        } else {
            self.order[pc..=pb].rotate_left(1);
            (pc, pb)
        };
        self.relink(lo - 1, hi);
        Some(shift)
    }

    /// Reverses the visits at positions `from_pos..=to_pos`.
    ///
    /// Fails if the range touches `first` or a fixed last visit.
    pub fn reverse(&mut self, from_pos: usize, to_pos: usize) -> bool {
        let limit = if self.fixed_last().is_some() {
            self.count().saturating_sub(1)
        } else {
            self.count()
        };
        if !self.indexed || from_pos == 0 || from_pos >= to_pos || to_pos >= limit {
            return false;
        }
        self.order[from_pos..=to_pos].reverse();
        self.relink(from_pos - 1, to_pos);
        true
    }

    /// Redirects `from`'s successor to `to` without touching anything else.
    ///
    /// This is a raw edit used to rebuild a tour edge by edge. It leaves the
    /// position index stale; call [`rebuild_index`](Self::rebuild_index) once
    /// the successor array describes a tour again.
    pub fn replace_edge_from(&mut self, from: usize, to: usize) {
        if let Some(slot) = self.next.get_mut(from) {
            *slot = to;
            self.indexed = false;
        }
    }

    /// Re-derives the position index from the successor array.
    ///
    /// Returns `false` if the successor array does not describe a tour over
    /// the same visits with the same endpoints; the tour then stays stale.
    pub fn rebuild_index(&mut self) -> bool {
        let count = self.order.len();
        let mut walk = Vec::with_capacity(count);
        let mut cur = self.first;
        loop {
            if walk.len() >= count || !self.pos.get(cur).is_some_and(|&p| p != NOT_SET) {
                return false;
            }
            walk.push(cur);
            cur = self.next[cur];
            if cur == NOT_SET || cur == self.first {
                break;
            }
        }
        let wrapped = cur == self.first;
        if walk.len() != count || wrapped != (self.is_closed() && count > 0) {
            return false;
        }
        if let Some(last) = self.fixed_last() {
            if walk.last() != Some(&last) {
                return false;
            }
        }
        self.order = walk;
        self.reindex_from(0);
        self.indexed = true;
        true
    }

    /// Returns `true` if the position index is in sync with the successor
    /// array.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Consecutive `(from, to)` edges, including `tail → first` when closed.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs { tour: self, k: 0 }
    }

    /// Consecutive `(prev, cur, next)` triples, wrapping when closed.
    pub fn triples(&self) -> Triples<'_> {
        let (start, end) = if self.is_closed() {
            if self.count() >= 3 {
                (0, self.count())
            } else {
                (0, 0)
            }
        } else {
            (1, self.count().saturating_sub(1))
        };
        Triples {
            tour: self,
            k: start,
            end,
        }
    }

    /// The closed-equivalent shape of this tour (see
    /// [`Problem::closed_equivalent`]).
    pub fn to_closed(&self, closed: &Problem) -> Option<Tour> {
        let ids: Vec<usize> = self
            .order
            .iter()
            .copied()
            .filter(|&id| closed.contains(id))
            .collect();
        Tour::from_sequence(closed, &ids)
    }

    /// Converts a tour of `original.closed_equivalent()` back into a tour of
    /// `original`, re-appending a fixed last visit.
    pub fn from_closed(original: &Problem, closed_tour: &Tour) -> Option<Tour> {
        let mut ids = closed_tour.ids().to_vec();
        if let Some(last) = original.fixed_last() {
            ids.push(last);
        }
        Tour::from_sequence(original, &ids)
    }

    /// Checks that successor array and position index agree.
    pub fn is_consistent(&self) -> bool {
        if !self.indexed {
            return false;
        }
        let mut seen = vec![false; self.capacity()];
        for (k, &id) in self.order.iter().enumerate() {
            if id >= self.capacity() || seen[id] || self.pos[id] != k {
                return false;
            }
            seen[id] = true;
            if self.next[id] != self.successor_at(k) {
                return false;
            }
        }
        let stray = (0..self.capacity())
            .any(|id| !seen[id] && (self.pos[id] != NOT_SET || self.next[id] != NOT_SET));
        !stray && self.order.first() == Some(&self.first)
    }
}

/// Iterator over consecutive edges of a [`Tour`].
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    tour: &'a Tour,
    k: usize,
}

impl Iterator for Pairs<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        let count = self.tour.count();
        if count < 2 || self.k >= count {
            return None;
        }
        let from = self.tour.order[self.k];
        let to = self.tour.successor_at(self.k);
        self.k += 1;
        if to == NOT_SET {
            return None;
        }
        Some((from, to))
    }
}

/// Iterator over consecutive triples of a [`Tour`].
#[derive(Debug, Clone)]
pub struct Triples<'a> {
    tour: &'a Tour,
    k: usize,
    end: usize,
}

impl Iterator for Triples<'_> {
    type Item = (usize, usize, usize);

    fn next(&mut self) -> Option<(usize, usize, usize)> {
        if self.k >= self.end {
            return None;
        }
        let order = &self.tour.order;
        let n = order.len();
        let k = self.k;
        self.k += 1;
        Some((order[(k + n - 1) % n], order[k], order[(k + 1) % n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::WeightMatrix;
    use proptest::prelude::*;

    fn closed(n: usize) -> Problem {
        Problem::closed(WeightMatrix::new(n), 0).expect("valid")
    }

    fn open(n: usize) -> Problem {
        Problem::open(WeightMatrix::new(n), 0).expect("valid")
    }

    fn fixed(n: usize) -> Problem {
        Problem::fixed(WeightMatrix::new(n), 0, n - 1).expect("valid")
    }

    #[test]
    fn test_new_orders_ids() {
        let tour = Tour::new(&fixed(5));
        assert_eq!(tour.ids(), &[0, 1, 2, 3, 4]);
        assert_eq!(tour.last(), Some(4));
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_from_sequence_rejects_bad_input() {
        let p = closed(4);
        assert!(Tour::from_sequence(&p, &[1, 0, 2, 3]).is_none());
        assert!(Tour::from_sequence(&p, &[0, 1, 1, 3]).is_none());
        assert!(Tour::from_sequence(&p, &[0, 1, 2]).is_none());
        assert!(Tour::from_sequence(&p, &[0, 1, 2, 9]).is_none());
        let f = fixed(4);
        assert!(Tour::from_sequence(&f, &[0, 3, 1, 2]).is_none());
        assert!(Tour::from_sequence(&f, &[0, 2, 1, 3]).is_some());
    }

    #[test]
    fn test_neighbors_closed_and_open() {
        let c = Tour::from_sequence(&closed(3), &[0, 2, 1]).expect("valid");
        assert_eq!(c.neighbor(1), 0);
        assert_eq!(c.predecessor(0), 1);
        assert!(c.contains_edge(1, 0));

        let o = Tour::from_sequence(&open(3), &[0, 2, 1]).expect("valid");
        assert_eq!(o.neighbor(1), NOT_SET);
        assert_eq!(o.predecessor(0), NOT_SET);
        assert!(!o.contains_edge(1, 0));
        assert_eq!(o.neighbor(42), NOT_SET);
    }

    #[test]
    fn test_pairs_wrap_only_when_closed() {
        let c = Tour::new(&closed(3));
        assert_eq!(c.pairs().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 0)]);
        let o = Tour::new(&open(3));
        assert_eq!(o.pairs().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
        // restartable
        assert_eq!(o.pairs().count(), o.pairs().count());
        let single = Tour::new(&closed(1));
        assert_eq!(single.pairs().count(), 0);
    }

    #[test]
    fn test_triples() {
        let c = Tour::new(&closed(3));
        assert_eq!(
            c.triples().collect::<Vec<_>>(),
            vec![(2, 0, 1), (0, 1, 2), (1, 2, 0)]
        );
        let o = Tour::new(&open(4));
        assert_eq!(o.triples().collect::<Vec<_>>(), vec![(0, 1, 2), (1, 2, 3)]);
        assert_eq!(Tour::new(&closed(2)).triples().count(), 0);
    }

    #[test]
    fn test_shift_after_forward_and_back() {
        let mut tour = Tour::new(&closed(5));
        let shift = tour.shift_after(1, 3).expect("valid move");
        assert_eq!(tour.ids(), &[0, 2, 3, 1, 4]);
        assert_eq!(shift.old_before, 0);
        assert_eq!(shift.old_after, 2);
        assert_eq!(shift.new_before, 3);
        assert_eq!(shift.new_after, 4);
        assert!(tour.is_consistent());

        tour.shift_after(1, shift.old_before).expect("valid move");
        assert_eq!(tour.ids(), &[0, 1, 2, 3, 4]);
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_shift_after_tail_wraps() {
        let mut tour = Tour::new(&closed(4));
        let shift = tour.shift_after(3, 0).expect("valid move");
        assert_eq!(shift.old_after, 0);
        assert_eq!(shift.new_after, 1);
        assert_eq!(tour.ids(), &[0, 3, 1, 2]);
        assert_eq!(tour.neighbor(2), 0);
    }

    #[test]
    fn test_shift_after_rejects_invalid() {
        let mut tour = Tour::new(&fixed(5));
        assert!(tour.shift_after(2, 2).is_none());
        assert!(tour.shift_after(0, 2).is_none());
        assert!(tour.shift_after(4, 1).is_none());
        assert!(tour.shift_after(2, 4).is_none());
        assert!(tour.shift_after(2, 1).is_none()); // already there
        assert!(tour.shift_after(2, 17).is_none());
        assert_eq!(tour.ids(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_shift_after_open_tail() {
        let mut tour = Tour::new(&open(4));
        let shift = tour.shift_after(1, 3).expect("valid move");
        assert_eq!(shift.new_after, NOT_SET);
        assert_eq!(tour.ids(), &[0, 2, 3, 1]);
        assert_eq!(tour.neighbor(1), NOT_SET);
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_remove_and_insert() {
        let mut tour = Tour::new(&closed(4));
        assert!(tour.remove(0).is_none());
        assert_eq!(tour.remove(2), Some((1, 3)));
        assert_eq!(tour.count(), 3);
        assert!(!tour.contains(2));
        assert!(tour.is_consistent());
        assert!(!tour.insert_after(1, 1));
        assert!(!tour.insert_after(2, 1));
        assert!(tour.insert_after(3, 2));
        assert_eq!(tour.ids(), &[0, 1, 3, 2]);
        assert_eq!(tour.neighbor(2), 0);
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_remove_fixed_last_fails() {
        let mut tour = Tour::new(&fixed(4));
        assert!(tour.remove(3).is_none());
        assert_eq!(tour.remove(2), Some((1, 3)));
        assert!(!tour.insert_after(3, 2));
    }

    #[test]
    fn test_reverse() {
        let mut tour = Tour::new(&fixed(6));
        assert!(tour.reverse(1, 3));
        assert_eq!(tour.ids(), &[0, 3, 2, 1, 4, 5]);
        assert!(!tour.reverse(0, 2));
        assert!(!tour.reverse(2, 5));
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_replace_edge_and_rebuild() {
        let mut tour = Tour::new(&closed(5));
        // reverse 1..=3 edge by edge: 0->3->2->1->4
        tour.replace_edge_from(0, 3);
        tour.replace_edge_from(3, 2);
        tour.replace_edge_from(2, 1);
        tour.replace_edge_from(1, 4);
        assert!(!tour.is_indexed());
        assert!(tour.rebuild_index());
        assert_eq!(tour.ids(), &[0, 3, 2, 1, 4]);
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_rebuild_rejects_subcycle() {
        let mut tour = Tour::new(&closed(4));
        tour.replace_edge_from(1, 0);
        assert!(!tour.rebuild_index());
    }

    #[test]
    fn test_from_successors() {
        let p = closed(4);
        let tour = Tour::from_successors(&p, &[2, 0, 3, 1]).expect("valid");
        assert_eq!(tour.ids(), &[0, 2, 3, 1]);
        assert!(Tour::from_successors(&p, &[1, 0, 3, 2]).is_none());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Tour::new(&closed(4));
        let mut copy = original.clone();
        copy.shift_after(1, 3);
        assert_eq!(original.ids(), &[0, 1, 2, 3]);
        assert_ne!(original.ids(), copy.ids());
    }

    #[test]
    fn test_closed_round_trip_fixed() {
        let p = fixed(5);
        let closed_p = p.closed_equivalent();
        let tour = Tour::from_sequence(&p, &[0, 2, 1, 3, 4]).expect("valid");
        let c = tour.to_closed(&closed_p).expect("valid");
        assert_eq!(c.ids(), &[0, 2, 1, 3]);
        let back = Tour::from_closed(&p, &c).expect("valid");
        assert_eq!(back.ids(), tour.ids());
    }

    #[derive(Debug, Clone)]
    enum Edit {
        Shift(usize, usize),
        Remove(usize),
        Insert(usize, usize),
        Reverse(usize, usize),
    }

    fn edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (0..8usize, 0..8usize).prop_map(|(a, b)| Edit::Shift(a, b)),
            (0..8usize).prop_map(Edit::Remove),
            (0..8usize, 0..8usize).prop_map(|(a, b)| Edit::Insert(a, b)),
            (0..8usize, 0..8usize).prop_map(|(a, b)| Edit::Reverse(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn prop_edits_keep_invariants(edits in prop::collection::vec(edit(), 0..40), shape in 0..3u8) {
            let problem = match shape {
                0 => closed(8),
                1 => open(8),
                _ => fixed(8),
            };
            let mut tour = Tour::new(&problem);
            let mut removed: Vec<usize> = Vec::new();
            for e in edits {
                match e {
                    Edit::Shift(c, b) => {
                        let before = tour.pairs().collect::<Vec<_>>();
                        if let Some(shift) = tour.shift_after(c, b) {
                            // moving back restores the structure
                            let mut probe = tour.clone();
                            if probe.shift_after(c, shift.old_before).is_some() {
                                prop_assert_eq!(probe.pairs().collect::<Vec<_>>(), before);
                            }
                        }
                    }
                    Edit::Remove(c) => {
                        if tour.remove(c).is_some() {
                            removed.push(c);
                        }
                    }
                    Edit::Insert(from, idx) => {
                        if !removed.is_empty() {
                            let id = removed[idx % removed.len()];
                            if tour.insert_after(from, id) {
                                removed.retain(|&r| r != id);
                            }
                        }
                    }
                    Edit::Reverse(a, b) => {
                        tour.reverse(a, b);
                    }
                }
                prop_assert!(tour.is_consistent());
                prop_assert_eq!(tour.first(), 0);
                prop_assert_eq!(tour.count() + removed.len(), 8);
                if shape == 2 {
                    prop_assert_eq!(tour.tail(), 7);
                }
            }
        }
    }
}
