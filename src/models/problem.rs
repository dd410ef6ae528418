//! Immutable problem definition.

use std::sync::Arc;

use crate::distance::WeightMatrix;
use crate::error::ProblemError;

use super::{TimeWindow, TurnPenalties};

/// Sentinel id meaning "no visit" (for example the successor of the final
/// visit of an open tour).
pub const NOT_SET: usize = usize::MAX;

/// A single-vehicle tour problem over a weight matrix.
///
/// The endpoint configuration decides the tour shape:
///
/// | `last()`           | shape                                   |
/// |--------------------|-----------------------------------------|
/// | `None`             | open: ends wherever the search likes    |
/// | `Some(first)`      | closed: returns to `first`              |
/// | `Some(x)`, x≠first | fixed: always ends at `x`               |
///
/// Bulk data sits behind [`Arc`], so cloning a problem is cheap and clones can
/// be handed to worker threads. A `Problem` is never mutated after
/// construction; [`closed_equivalent`](Problem::closed_equivalent) produces a
/// new value.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::models::Problem;
///
/// let wm = WeightMatrix::from_fn(4, |a, b| if a == b { 0.0 } else { 1.0 });
/// let problem = Problem::fixed(wm, 0, 3).unwrap();
/// assert_eq!(problem.count(), 4);
/// assert_eq!(problem.fixed_last(), Some(3));
/// assert!(!problem.is_closed());
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    weights: Arc<WeightMatrix>,
    first: usize,
    last: Option<usize>,
    scope: Option<Arc<Vec<bool>>>,
    count: usize,
    time_windows: Option<Arc<Vec<Option<TimeWindow>>>>,
    turn_penalties: Option<Arc<TurnPenalties>>,
    weight_cap: Option<f64>,
}

impl Problem {
    /// Creates a closed problem: the tour returns to `first`.
    pub fn closed(weights: WeightMatrix, first: usize) -> Result<Self, ProblemError> {
        Self::build(weights, first, Some(first))
    }

    /// Creates an open problem: the tour ends at whichever visit comes last.
    pub fn open(weights: WeightMatrix, first: usize) -> Result<Self, ProblemError> {
        Self::build(weights, first, None)
    }

    /// Creates a problem whose tour must end at `last`.
    ///
    /// `last == first` yields a closed problem.
    pub fn fixed(weights: WeightMatrix, first: usize, last: usize) -> Result<Self, ProblemError> {
        Self::build(weights, first, Some(last))
    }

    fn build(weights: WeightMatrix, first: usize, last: Option<usize>) -> Result<Self, ProblemError> {
        let size = weights.size();
        if size == 0 {
            return Err(ProblemError::EmptyMatrix);
        }
        if let Some((from, to)) = weights.find_nan() {
            return Err(ProblemError::NanWeight { from, to });
        }
        if first >= size {
            return Err(ProblemError::FirstOutOfRange { first, size });
        }
        if let Some(last) = last {
            if last >= size {
                return Err(ProblemError::LastOutOfRange { last, size });
            }
        }
        Ok(Self {
            weights: Arc::new(weights),
            first,
            last,
            scope: None,
            count: size,
            time_windows: None,
            turn_penalties: None,
            weight_cap: None,
        })
    }

    /// Restricts the problem to the given visit ids.
    ///
    /// The set must contain `first` and, for fixed problems, `last`.
    /// Duplicates are ignored.
    pub fn with_visits(
        mut self,
        visits: impl IntoIterator<Item = usize>,
    ) -> Result<Self, ProblemError> {
        let size = self.size();
        let mut mask = vec![false; size];
        for id in visits {
            if id >= size {
                return Err(ProblemError::VisitOutOfRange { id, size });
            }
            mask[id] = true;
        }
        if !mask[self.first] {
            return Err(ProblemError::MissingEndpoint { id: self.first });
        }
        if let Some(last) = self.last {
            if !mask[last] {
                return Err(ProblemError::MissingEndpoint { id: last });
            }
        }
        self.count = mask.iter().filter(|&&m| m).count();
        self.scope = Some(Arc::new(mask));
        Ok(self)
    }

    /// Attaches one optional time window per matrix row.
    pub fn with_time_windows(
        mut self,
        windows: Vec<Option<TimeWindow>>,
    ) -> Result<Self, ProblemError> {
        if windows.len() != self.size() {
            return Err(ProblemError::TimeWindowCount {
                expected: self.size(),
                actual: windows.len(),
            });
        }
        self.time_windows = Some(Arc::new(windows));
        Ok(self)
    }

    /// Attaches a turn-penalty table.
    pub fn with_turn_penalties(mut self, turns: TurnPenalties) -> Result<Self, ProblemError> {
        if let Some(id) = turns.max_id() {
            if id >= self.size() {
                return Err(ProblemError::VisitOutOfRange {
                    id,
                    size: self.size(),
                });
            }
        }
        self.turn_penalties = Some(Arc::new(turns));
        Ok(self)
    }

    /// Sets a hard cap on total tour weight.
    ///
    /// Only objectives that honor caps (see
    /// [`CappedWeight`](crate::evaluation::CappedWeight)) look at it.
    pub fn with_weight_cap(mut self, cap: f64) -> Result<Self, ProblemError> {
        if cap.is_nan() || cap < 0.0 {
            return Err(ProblemError::InvalidWeightCap { cap });
        }
        self.weight_cap = Some(cap);
        Ok(self)
    }

    /// Number of rows in the weight matrix (the id space).
    pub fn size(&self) -> usize {
        self.weights.size()
    }

    /// Number of visits a tour must contain.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mandatory start visit.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Endpoint configuration, see the type-level table.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Returns `true` if tours return to `first`.
    pub fn is_closed(&self) -> bool {
        self.last == Some(self.first)
    }

    /// Returns `true` if tours have no fixed end.
    pub fn is_open(&self) -> bool {
        self.last.is_none()
    }

    /// The fixed final visit, when it differs from `first`.
    pub fn fixed_last(&self) -> Option<usize> {
        self.last.filter(|&last| last != self.first)
    }

    /// Weight of the edge `from → to`; zero when either end is [`NOT_SET`].
    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        if from == NOT_SET || to == NOT_SET {
            return 0.0;
        }
        self.weights.get(from, to)
    }

    /// The underlying matrix.
    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Returns `true` if `id` takes part in this problem.
    pub fn contains(&self, id: usize) -> bool {
        if id >= self.size() {
            return false;
        }
        match &self.scope {
            Some(mask) => mask[id],
            None => true,
        }
    }

    /// All participating ids in ascending order.
    pub fn visit_ids(&self) -> Vec<usize> {
        (0..self.size()).filter(|&id| self.contains(id)).collect()
    }

    /// Participating ids that may be relocated: everything except `first`
    /// and a fixed last.
    pub fn movable_ids(&self) -> Vec<usize> {
        let fixed = self.fixed_last();
        (0..self.size())
            .filter(|&id| self.contains(id) && id != self.first && Some(id) != fixed)
            .collect()
    }

    /// Time window of `id`, if any.
    pub fn time_window(&self, id: usize) -> Option<&TimeWindow> {
        self.time_windows
            .as_ref()
            .and_then(|windows| windows.get(id))
            .and_then(|w| w.as_ref())
    }

    /// Returns `true` if at least one visit has a time window.
    pub fn has_time_windows(&self) -> bool {
        self.time_windows
            .as_ref()
            .is_some_and(|windows| windows.iter().any(|w| w.is_some()))
    }

    /// Penalty for the turn `prev → cur → next`; zero without a table.
    pub fn turn_penalty(&self, prev: usize, cur: usize, next: usize) -> f64 {
        self.turn_penalties
            .as_ref()
            .map_or(0.0, |turns| turns.get(prev, cur, next))
    }

    /// Returns `true` if a turn-penalty table is attached.
    pub fn has_turn_penalties(&self) -> bool {
        self.turn_penalties.is_some()
    }

    /// Hard cap on total weight, if any.
    pub fn weight_cap(&self) -> Option<f64> {
        self.weight_cap
    }

    /// Returns a closed problem whose cycles correspond one-to-one to this
    /// problem's tours.
    ///
    /// - closed: an identical copy.
    /// - open: every weight into `first` becomes zero, so the closing edge
    ///   is free.
    /// - fixed last `L`: `L` leaves the visit scope and every weight into
    ///   `first` becomes the original weight into `L`. The closing edge
    ///   `x → first` then stands for the final leg `x → L`.
    ///
    /// Tours move between the two shapes with
    /// [`Tour::to_closed`](super::Tour::to_closed) and
    /// [`Tour::from_closed`](super::Tour::from_closed).
    pub fn closed_equivalent(&self) -> Problem {
        if self.is_closed() {
            return self.clone();
        }
        let first = self.first;
        let mut closed = self.clone();
        closed.last = Some(first);
        match self.fixed_last() {
            None => {
                closed.weights = Arc::new(self.weights.with_column(first, |_| 0.0));
            }
            Some(last) => {
                let weights = &self.weights;
                closed.weights =
                    Arc::new(weights.with_column(first, |from| weights.get(from, last)));
                let mut mask: Vec<bool> = (0..self.size()).map(|id| self.contains(id)).collect();
                mask[last] = false;
                closed.count = self.count - 1;
                closed.scope = Some(Arc::new(mask));
            }
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> WeightMatrix {
        WeightMatrix::from_fn(n, |a, b| (a as f64 - b as f64).abs())
    }

    #[test]
    fn test_shapes() {
        let closed = Problem::closed(grid(3), 0).expect("valid");
        assert!(closed.is_closed());
        assert_eq!(closed.last(), Some(0));
        assert_eq!(closed.fixed_last(), None);

        let open = Problem::open(grid(3), 1).expect("valid");
        assert!(open.is_open());
        assert_eq!(open.first(), 1);

        let same = Problem::fixed(grid(3), 2, 2).expect("valid");
        assert!(same.is_closed());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Problem::closed(WeightMatrix::new(0), 0).unwrap_err(),
            ProblemError::EmptyMatrix
        );
        assert_eq!(
            Problem::closed(grid(3), 3).unwrap_err(),
            ProblemError::FirstOutOfRange { first: 3, size: 3 }
        );
        assert_eq!(
            Problem::fixed(grid(3), 0, 5).unwrap_err(),
            ProblemError::LastOutOfRange { last: 5, size: 3 }
        );
        let mut wm = grid(3);
        wm.set(1, 2, f64::NAN);
        assert_eq!(
            Problem::closed(wm, 0).unwrap_err(),
            ProblemError::NanWeight { from: 1, to: 2 }
        );
    }

    #[test]
    fn test_visit_scope() {
        let problem = Problem::fixed(grid(6), 0, 5)
            .and_then(|p| p.with_visits([0, 2, 3, 5]))
            .expect("valid");
        assert_eq!(problem.count(), 4);
        assert!(problem.contains(2));
        assert!(!problem.contains(1));
        assert!(!problem.contains(99));
        assert_eq!(problem.visit_ids(), vec![0, 2, 3, 5]);
        assert_eq!(problem.movable_ids(), vec![2, 3]);
    }

    #[test]
    fn test_visit_scope_missing_endpoint() {
        let err = Problem::fixed(grid(4), 0, 3)
            .and_then(|p| p.with_visits([0, 1, 2]))
            .unwrap_err();
        assert_eq!(err, ProblemError::MissingEndpoint { id: 3 });
        let err = Problem::closed(grid(4), 0)
            .and_then(|p| p.with_visits([1, 7]))
            .unwrap_err();
        assert_eq!(err, ProblemError::VisitOutOfRange { id: 7, size: 4 });
    }

    #[test]
    fn test_time_windows() {
        let tw = TimeWindow::new(0.0, 5.0).expect("valid");
        let problem = Problem::closed(grid(3), 0)
            .and_then(|p| p.with_time_windows(vec![None, Some(tw), None]))
            .expect("valid");
        assert!(problem.has_time_windows());
        assert_eq!(problem.time_window(1), Some(&tw));
        assert!(problem.time_window(0).is_none());

        let err = Problem::closed(grid(3), 0)
            .and_then(|p| p.with_time_windows(vec![None]))
            .unwrap_err();
        assert_eq!(
            err,
            ProblemError::TimeWindowCount {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_turn_penalties() {
        let mut turns = TurnPenalties::new();
        turns.set(0, 1, 2, 7.0);
        let problem = Problem::closed(grid(3), 0)
            .and_then(|p| p.with_turn_penalties(turns))
            .expect("valid");
        assert!(problem.has_turn_penalties());
        assert_eq!(problem.turn_penalty(0, 1, 2), 7.0);
        assert_eq!(problem.turn_penalty(2, 1, 0), 0.0);

        let mut bad = TurnPenalties::new();
        bad.set(0, 1, 9, 1.0);
        assert!(Problem::closed(grid(3), 0)
            .and_then(|p| p.with_turn_penalties(bad))
            .is_err());
    }

    #[test]
    fn test_weight_cap() {
        let problem = Problem::closed(grid(3), 0)
            .and_then(|p| p.with_weight_cap(10.0))
            .expect("valid");
        assert_eq!(problem.weight_cap(), Some(10.0));
        assert!(Problem::closed(grid(3), 0)
            .and_then(|p| p.with_weight_cap(-1.0))
            .is_err());
    }

    #[test]
    fn test_weight_not_set() {
        let problem = Problem::closed(grid(3), 0).expect("valid");
        assert_eq!(problem.weight(0, 2), 2.0);
        assert_eq!(problem.weight(NOT_SET, 2), 0.0);
        assert_eq!(problem.weight(1, NOT_SET), 0.0);
    }

    #[test]
    fn test_closed_equivalent_open() {
        let problem = Problem::open(grid(4), 0).expect("valid");
        let closed = problem.closed_equivalent();
        assert!(closed.is_closed());
        assert_eq!(closed.count(), 4);
        assert_eq!(closed.weight(3, 0), 0.0);
        assert_eq!(closed.weight(0, 3), 3.0);
        // original untouched
        assert_eq!(problem.weight(3, 0), 3.0);
    }

    #[test]
    fn test_closed_equivalent_fixed() {
        let problem = Problem::fixed(grid(4), 0, 2).expect("valid");
        let closed = problem.closed_equivalent();
        assert!(closed.is_closed());
        assert_eq!(closed.count(), 3);
        assert!(!closed.contains(2));
        // x -> first now costs x -> 2
        assert_eq!(closed.weight(3, 0), 1.0);
        assert_eq!(closed.weight(1, 0), 1.0);
    }
}
