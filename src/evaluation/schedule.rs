//! Arrival-time simulation along a visiting order.

use crate::models::{Problem, Tour};

/// Timing of a visiting order: arrival and deadline violation per position.
///
/// Travel time equals edge weight. The tour leaves `first` at time 0, or at
/// the minimum of `first`'s window. Arriving early at a visit waits until its
/// window opens; arriving late adds `arrival - max` to the violation. The
/// closing edge of a closed tour adds weight but is not checked against
/// `first`'s window.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::evaluation::Schedule;
/// use u_tour::models::{Problem, TimeWindow};
///
/// let wm = WeightMatrix::from_fn(3, |a, b| if a == b { 0.0 } else { 5.0 });
/// let windows = vec![None, TimeWindow::new(10.0, 20.0), TimeWindow::new(0.0, 12.0)];
/// let problem = Problem::open(wm, 0).unwrap().with_time_windows(windows).unwrap();
///
/// let schedule = Schedule::simulate(&problem, &[0, 1, 2], false);
/// assert_eq!(schedule.arrivals(), &[0.0, 5.0, 15.0]); // waits at 1 until 10
/// assert_eq!(schedule.total_violation(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    arrivals: Vec<f64>,
    violations: Vec<f64>,
    total_weight: f64,
    total_violation: f64,
}

impl Schedule {
    /// Simulates `ids` in order; `closed` adds the edge back to `ids[0]`.
    pub fn simulate(problem: &Problem, ids: &[usize], closed: bool) -> Self {
        let mut arrivals = Vec::with_capacity(ids.len());
        let mut violations = Vec::with_capacity(ids.len());
        let mut total_weight = 0.0;
        let mut total_violation = 0.0;
        let mut time = 0.0;
        let mut prev = None;

        for &id in ids {
            if let Some(p) = prev {
                let w = problem.weight(p, id);
                total_weight += w;
                time += w;
            }
            arrivals.push(time);
            let (violation, start) = match problem.time_window(id) {
                Some(tw) => (tw.violation(time), tw.service_start(time)),
                None => (0.0, time),
            };
            violations.push(violation);
            total_violation += violation;
            time = start;
            prev = Some(id);
        }

        if closed && ids.len() > 1 {
            total_weight += problem.weight(ids[ids.len() - 1], ids[0]);
        }

        Self {
            arrivals,
            violations,
            total_weight,
            total_violation,
        }
    }

    /// Simulates a tour.
    pub fn of(problem: &Problem, tour: &Tour) -> Self {
        Self::simulate(problem, tour.ids(), tour.is_closed())
    }

    /// Arrival time per position.
    pub fn arrivals(&self) -> &[f64] {
        &self.arrivals
    }

    /// Deadline violation per position.
    pub fn violations(&self) -> &[f64] {
        &self.violations
    }

    /// Returns `true` if the visit at position `k` arrives after its deadline.
    pub fn is_violated(&self, k: usize) -> bool {
        self.violations.get(k).is_some_and(|&v| v > 0.0)
    }

    /// Sum of edge weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Sum of deadline violations.
    pub fn total_violation(&self) -> f64 {
        self.total_violation
    }

    /// Returns `true` if no visit is late.
    pub fn is_feasible(&self) -> bool {
        self.total_violation <= 0.0
    }
}

/// Total deadline violation of `ids` without allocating.
pub fn total_violation(problem: &Problem, ids: &[usize]) -> f64 {
    let mut time = 0.0;
    let mut total = 0.0;
    let mut prev = None;
    for &id in ids {
        if let Some(p) = prev {
            time += problem.weight(p, id);
        }
        if let Some(tw) = problem.time_window(id) {
            total += tw.violation(time);
            time = tw.service_start(time);
        }
        prev = Some(id);
    }
    total
}
