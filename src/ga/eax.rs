//! Edge-assembly crossover (EAX).
//!
//! # Algorithm
//!
//! 1. Take the edges `E_a` of parent A and the predecessor map `E_b` of
//!    parent B.
//! 2. Decompose their disagreement into AB-cycles.
//! 3. For each offspring attempt, pick AB-cycles (one at random, or each with
//!    probability 0.75) and replace their A edges by their B edges in a copy
//!    of `E_a`. The result is a set of disjoint sub-tours.
//! 4. Repeatedly merge the smallest sub-tour into another one: remove one
//!    edge `u → u'` of the small sub-tour and one edge `v → v'` outside it,
//!    add `u → v'` and `v → u'`, choosing the pair with the lowest added
//!    weight. Candidate `v` come from nearest-neighbor lists, or from every
//!    node outside the sub-tour when the lists are disabled.
//! 5. Keep the lightest offspring that is a complete tour and no heavier
//!    than the heavier parent; otherwise return parent A.
//!
//! Open and fixed-endpoint problems are solved on their closed equivalent
//! and converted back.
//!
//! # Complexity
//!
//! O(max_offspring × (n + c × s × k)) where c = sub-tours per attempt,
//! s = size of the smallest sub-tour and k = candidate list size.
//!
//! # Reference
//!
//! Nagata, Y. & Kobayashi, S. (2013). "A Powerful Genetic Algorithm Using
//! Edge Assembly Crossover for the Traveling Salesman Problem",
//! *INFORMS Journal on Computing* 25(2), 346-363.

use log::warn;
use rand::Rng;

use super::config::{EaxConfig, EaxStrategy, MULTIPLE_RANDOM_PROBABILITY};
use crate::cycles::{AsymmetricAlternatingCycles, AsymmetricCycles};
use crate::evaluation::tour_weight;
use crate::models::{Problem, Tour, NOT_SET};

/// Source edges scanned exhaustively when no candidate-list merge exists.
const EXHAUSTIVE_SOURCE_LIMIT: usize = 10;

/// Edge-assembly crossover bound to one problem.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::ga::{EaxConfig, EaxCrossover};
/// use u_tour::models::{Problem, Tour};
/// use u_tour::random::create_rng;
///
/// let wm = WeightMatrix::from_fn(5, |a, b| if (a + 1) % 5 == b { 1.0 } else { 10.0 });
/// let problem = Problem::closed(wm, 0).unwrap();
/// let a = Tour::from_sequence(&problem, &[0, 1, 3, 2, 4]).unwrap();
/// let b = Tour::from_sequence(&problem, &[0, 2, 1, 4, 3]).unwrap();
///
/// let eax = EaxCrossover::new(&problem, EaxConfig::default());
/// let child = eax.cross(&a, &b, &mut create_rng(7));
/// assert_eq!(child.count(), 5);
/// assert!(child.is_consistent());
/// ```
#[derive(Debug, Clone)]
pub struct EaxCrossover {
    problem: Problem,
    closed: Problem,
    config: EaxConfig,
    neighbors: Option<Vec<Vec<usize>>>,
}

impl EaxCrossover {
    /// Prepares the crossover, including candidate lists.
    pub fn new(problem: &Problem, config: EaxConfig) -> Self {
        if !problem.is_closed() {
            let shape = if problem.is_open() { "open" } else { "fixed-endpoint" };
            warn!("EAX on an {shape} problem runs on its closed equivalent, which is slower");
        }
        let closed = problem.closed_equivalent();
        let neighbors = config.nearest_neighbors.map(|k| {
            let visits = closed.visit_ids();
            (0..closed.size())
                .map(|id| {
                    if closed.contains(id) {
                        closed.weights().nearest_neighbors(id, &visits, k)
                    } else {
                        Vec::new()
                    }
                })
                .collect()
        });
        Self {
            problem: problem.clone(),
            closed,
            config,
            neighbors,
        }
    }

    /// The problem offspring belong to.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The crossover settings.
    pub fn config(&self) -> &EaxConfig {
        &self.config
    }

    /// Produces one offspring of `a` and `b`.
    ///
    /// # Panics
    /// Panics if the parents disagree on their endpoints or do not belong
    /// to this crossover's problem.
    pub fn cross<R: Rng>(&self, a: &Tour, b: &Tour, rng: &mut R) -> Tour {
        if a.first() != b.first() || a.last() != b.last() {
            panic!(
                "EAX parents disagree on endpoints: first {} vs {}, last {:?} vs {:?}",
                a.first(),
                b.first(),
                a.last(),
                b.last()
            );
        }
        let closed_a = self.to_closed(a, "A");
        let closed_b = self.to_closed(b, "B");

        let ea = closed_a.successors();
        let mut ab = AsymmetricAlternatingCycles::new(ea, &closed_b.predecessors());
        let starts: Vec<usize> = ab.cycles().keys().copied().collect();
        let limit = tour_weight(&self.closed, &closed_a).max(tour_weight(&self.closed, &closed_b));

        let mut best: Option<(Tour, f64)> = None;
        if !starts.is_empty() {
            for _ in 0..self.config.max_offspring {
                let selected = self.select(&starts, rng);
                if selected.is_empty() {
                    continue;
                }
                let mut child = AsymmetricCycles::new(ea.to_vec());
                for &start in &selected {
                    ab.apply(start, &mut child);
                }
                self.merge_subtours(&mut child);
                let Some(tour) = Tour::from_successors(&self.closed, child.successors()) else {
                    continue;
                };
                let weight = tour_weight(&self.closed, &tour);
                if weight > limit {
                    continue;
                }
                match &best {
                    Some((_, w)) if weight >= *w => {}
                    _ => best = Some((tour, weight)),
                }
            }
        }

        let offspring = best.map_or(closed_a, |(tour, _)| tour);
        Tour::from_closed(&self.problem, &offspring).unwrap_or_else(|| a.clone())
    }

    fn to_closed(&self, tour: &Tour, label: &str) -> Tour {
        tour.to_closed(&self.closed).unwrap_or_else(|| {
            panic!(
                "EAX parent {label} (first {}, {} visits) is not a tour of a problem with first {} and {} visits",
                tour.first(),
                tour.count(),
                self.problem.first(),
                self.problem.count()
            )
        })
    }

    fn select<R: Rng>(&self, starts: &[usize], rng: &mut R) -> Vec<usize> {
        match self.config.strategy {
            EaxStrategy::SingleRandom => vec![starts[rng.random_range(0..starts.len())]],
            EaxStrategy::MultipleRandom => starts
                .iter()
                .copied()
                .filter(|_| rng.random_bool(MULTIPLE_RANDOM_PROBABILITY))
                .collect(),
        }
    }

    /// Merges sub-tours until one tour remains or no merge is possible.
    fn merge_subtours(&self, child: &mut AsymmetricCycles) {
        let size = child.len();
        loop {
            let cycles = child.cycles();
            if cycles.len() <= 1 {
                return;
            }
            let Some(start) = cycles
                .iter()
                .min_by_key(|&(&start, &len)| (len, start))
                .map(|(&start, _)| start)
            else {
                return;
            };

            let members = child.members(start);
            let mut inside = vec![false; size];
            for &m in &members {
                inside[m] = true;
            }
            let mut prev = vec![NOT_SET; size];
            for (from, &to) in child.successors().iter().enumerate() {
                if to != NOT_SET {
                    prev[to] = from;
                }
            }

            let Some((u, v)) = self.best_merge(child, &members, &inside, &prev) else {
                return;
            };
            let u_next = child.neighbor(u);
            let v_next = child.neighbor(v);
            child.add_edge(u, v_next);
            child.add_edge(v, u_next);
        }
    }

    /// Cheapest `(u, v)` with `u` inside the small sub-tour, `v` outside.
    fn best_merge(
        &self,
        child: &AsymmetricCycles,
        members: &[usize],
        inside: &[bool],
        prev: &[usize],
    ) -> Option<(usize, usize)> {
        let mut best = None;
        match &self.neighbors {
            Some(lists) => {
                for &u in members {
                    for &c in &lists[u] {
                        self.consider(child, inside, &mut best, u, c);
                        self.consider(child, inside, &mut best, u, prev[c]);
                    }
                }
                if best.is_none() {
                    for &u in members.iter().take(EXHAUSTIVE_SOURCE_LIMIT) {
                        for v in 0..child.len() {
                            self.consider(child, inside, &mut best, u, v);
                        }
                    }
                }
            }
            None => {
                for &u in members {
                    for v in 0..child.len() {
                        self.consider(child, inside, &mut best, u, v);
                    }
                }
            }
        }
        best.map(|(_, u, v)| (u, v))
    }

    fn consider(
        &self,
        child: &AsymmetricCycles,
        inside: &[bool],
        best: &mut Option<(f64, usize, usize)>,
        u: usize,
        v: usize,
    ) {
        if v == NOT_SET || inside[v] {
            return;
        }
        let u_next = child.neighbor(u);
        let v_next = child.neighbor(v);
        if v_next == NOT_SET {
            return;
        }
        let w = |from, to| self.closed.weight(from, to);
        let cost = w(u, v_next) + w(v, u_next) - w(u, u_next) - w(v, v_next);
        match best {
            Some((c, _, _)) if cost >= *c => {}
            _ => *best = Some((cost, u, v)),
        }
    }
}
