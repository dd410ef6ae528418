//! GA evolutionary loop execution.
//!
//! [`GaStrategy`] orchestrates the complete evolutionary process:
//! initialization → tournament pool → EAX offspring → mutation →
//! optional local search → repeat.

use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

use super::config::GaConfig;
use super::eax::EaxCrossover;
use super::mutation::mutate;
use super::selection::tournament;
use crate::constructive::{enumerate, Generator};
use crate::error::ConfigError;
use crate::evaluation::Objective;
use crate::local_search::{improve, Operator};
use crate::models::{Candidate, Problem, Tour};
use crate::random::{create_rng, split_seeds};
use crate::solver::{Listener, Solver, StopFlag};

/// Problems with fewer visits are solved exactly instead.
pub const MIN_HEURISTIC_SIZE: usize = 5;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaReport {
    /// The best candidate found during the entire run.
    pub champion: Candidate,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run ended because the champion stopped improving.
    pub stagnated: bool,

    /// Whether the run was stopped through its [`StopFlag`].
    pub stopped: bool,

    /// Champion fitness after initialization and after every generation.
    pub history: Vec<f64>,
}

#[derive(Debug, Clone)]
struct Member {
    tour: Tour,
    fitness: f64,
}

/// Generational genetic search with edge-assembly crossover.
///
/// # Examples
///
/// ```
/// use u_tour::constructive::NearestNeighborGenerator;
/// use u_tour::distance::WeightMatrix;
/// use u_tour::evaluation::MinWeight;
/// use u_tour::ga::{GaConfig, GaStrategy};
/// use u_tour::models::Problem;
///
/// let wm = WeightMatrix::from_fn(10, |a, b| (a as f64 - b as f64).abs());
/// let problem = Problem::closed(wm, 0).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(16)
///     .with_max_generations(30)
///     .with_seed(42);
///
/// let ga = GaStrategy::new(
///     config,
///     Box::new(NearestNeighborGenerator::default()),
///     Box::new(MinWeight),
/// )
/// .unwrap();
/// let report = ga.run(&problem);
/// assert!(report.champion.fitness() <= report.history[0]);
/// assert!(report.champion.tour().is_consistent());
/// ```
pub struct GaStrategy {
    config: GaConfig,
    generator: Box<dyn Generator>,
    objective: Box<dyn Objective>,
    operators: Vec<Box<dyn Operator>>,
    stop: StopFlag,
    listener: Option<Listener>,
}

impl GaStrategy {
    /// Creates a strategy after validating `config`.
    pub fn new(
        config: GaConfig,
        generator: Box<dyn Generator>,
        objective: Box<dyn Objective>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            objective,
            operators: Vec::new(),
            stop: StopFlag::new(),
            listener: None,
        })
    }

    /// Sets the local-search operators used by the improvement step.
    pub fn with_operators(mut self, operators: Vec<Box<dyn Operator>>) -> Self {
        self.operators = operators;
        self
    }

    /// Shares a cancellation flag with the caller.
    pub fn with_stop_flag(mut self, stop: StopFlag) -> Self {
        self.stop = stop;
        self
    }

    /// Registers a callback for every new champion.
    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The cancellation flag polled by [`run`](Self::run).
    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    /// Runs the search.
    pub fn run(&self, problem: &Problem) -> GaReport {
        let config = &self.config;
        let objective = self.objective.as_ref();
        info!(
            "ga start: {} visits, population {}, max generations {}",
            problem.count(),
            config.population_size,
            config.max_generations
        );

        if problem.count() < MIN_HEURISTIC_SIZE {
            if let Some(champion) = enumerate(problem, objective) {
                info!(
                    "ga: {} visits solved exactly, fitness {}",
                    problem.count(),
                    champion.fitness()
                );
                if let Some(listener) = &self.listener {
                    listener(&champion);
                }
                return GaReport {
                    history: vec![champion.fitness()],
                    champion,
                    generations: 0,
                    stagnated: false,
                    stopped: false,
                };
            }
        }

        let mut rng = create_rng(config.seed.unwrap_or_else(rand::random));
        let eax = EaxCrossover::new(problem, config.eax.clone());
        let n = config.population_size;
        let elite = config.elite_count();
        let tournament_size = config.tournament_size();
        let p = config.tournament_probability;

        // 1. Initial population
        let seeds = split_seeds(&mut rng, n);
        // a stopped run fills the remaining slots with the identity tour
        let spawn = |&seed: &u64| {
            let tour = if self.stop.is_stopped() {
                Tour::new(problem)
            } else {
                self.generator.generate(problem, &mut create_rng(seed))
            };
            let fitness = objective.calculate(problem, &tour);
            Member { tour, fitness }
        };
        let mut population: Vec<Member> = if config.parallel {
            seeds.par_iter().map(spawn).collect()
        } else {
            seeds.iter().map(spawn).collect()
        };
        sort(&mut population);

        let mut champion = population[0].clone();
        self.notify(problem, &champion);
        let mut history = vec![champion.fitness];
        let mut generation = 0;
        let mut stagnation = 0;
        let mut stopped = false;

        // 2. Evolutionary loop
        while stagnation < config.stagnation_limit && generation < config.max_generations {
            if self.stop.is_stopped() {
                stopped = true;
                break;
            }
            generation += 1;

            // Crossover pool
            let fitness: Vec<f64> = population.iter().map(|m| m.fitness).collect();
            let pool: Vec<Tour> = (0..config.pool_size())
                .map(|_| {
                    let idx = tournament(&fitness, tournament_size, p, &mut rng);
                    population[idx].tour.clone()
                })
                .collect();

            // Offspring and mutation for every non-elite slot
            let seeds = split_seeds(&mut rng, n - elite);
            let breed = |(slot, &seed): (&mut Member, &u64)| {
                if self.stop.is_stopped() {
                    return;
                }
                let mut slot_rng = create_rng(seed);
                let i = slot_rng.random_range(0..pool.len());
                let mut j = slot_rng.random_range(0..pool.len() - 1);
                if j >= i {
                    j += 1;
                }
                let mut tour = eax.cross(&pool[i], &pool[j], &mut slot_rng);
                if slot_rng.random::<f64>() < config.mutation {
                    mutate(&mut tour, &mut slot_rng);
                }
                let fitness = objective.calculate(problem, &tour);
                *slot = Member { tour, fitness };
            };
            if config.parallel {
                population[elite..]
                    .par_iter_mut()
                    .zip(seeds.par_iter())
                    .for_each(breed);
            } else {
                population[elite..]
                    .iter_mut()
                    .zip(seeds.iter())
                    .for_each(breed);
            }

            // Optional local search on a tournament sample
            if let Some(count) = config.improvement_count() {
                if !self.operators.is_empty() && !self.stop.is_stopped() {
                    self.improve_sample(problem, &mut population, count, elite, &mut rng);
                }
            }

            sort(&mut population);
            if population[0].fitness < champion.fitness {
                champion = population[0].clone();
                stagnation = 0;
                self.notify(problem, &champion);
            } else {
                stagnation += 1;
            }
            history.push(champion.fitness);
            debug!(
                "generation {generation}: best {}, champion {}, stagnation {stagnation}",
                population[0].fitness, champion.fitness
            );
        }

        let stagnated = !stopped && stagnation >= config.stagnation_limit;
        info!(
            "ga finished after {generation} generations: fitness {}, stagnated {stagnated}, stopped {stopped}",
            champion.fitness
        );
        GaReport {
            champion: Candidate::new(problem.clone(), champion.tour, champion.fitness),
            generations: generation,
            stagnated,
            stopped,
            history,
        }
    }

    /// Polishes tournament-selected members. Elite members are only replaced
    /// by a result that beats the population's best.
    fn improve_sample(
        &self,
        problem: &Problem,
        population: &mut [Member],
        count: usize,
        elite: usize,
        rng: &mut impl Rng,
    ) {
        let config = &self.config;
        let objective = self.objective.as_ref();
        let fitness: Vec<f64> = population.iter().map(|m| m.fitness).collect();
        let best = fitness.iter().copied().fold(f64::INFINITY, f64::min);

        let mut picks: Vec<usize> = (0..count)
            .map(|_| {
                tournament(
                    &fitness,
                    config.tournament_size(),
                    config.tournament_probability,
                    &mut *rng,
                )
            })
            .collect();
        picks.sort_unstable();
        picks.dedup();

        let members: &[Member] = population;
        let polish = |&idx: &usize| {
            let mut tour = members[idx].tour.clone();
            improve(problem, objective, &mut tour, &self.operators);
            let fitness = objective.calculate(problem, &tour);
            (idx, Member { tour, fitness })
        };
        let improved: Vec<(usize, Member)> = if config.parallel {
            picks.par_iter().map(polish).collect()
        } else {
            picks.iter().map(polish).collect()
        };

        for (idx, member) in improved {
            if idx < elite && member.fitness >= best {
                continue;
            }
            population[idx] = member;
        }
    }

    fn notify(&self, problem: &Problem, member: &Member) {
        debug!("new champion: fitness {}", member.fitness);
        if let Some(listener) = &self.listener {
            let candidate = Candidate::new(problem.clone(), member.tour.clone(), member.fitness);
            listener(&candidate);
        }
    }
}

impl Solver for GaStrategy {
    fn name(&self) -> &str {
        "ga"
    }

    fn search(&self, problem: &Problem) -> Candidate {
        self.run(problem).champion
    }
}

/// Ascending by fitness; stable, so older members win ties.
fn sort(population: &mut [Member]) {
    population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
}
