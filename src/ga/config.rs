//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop;
//! [`EaxConfig`] those of the crossover.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which AB-cycles an EAX offspring receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EaxStrategy {
    /// Exactly one AB-cycle, chosen uniformly.
    #[default]
    SingleRandom,
    /// Every AB-cycle independently with probability
    /// [`MULTIPLE_RANDOM_PROBABILITY`].
    MultipleRandom,
}

/// Per-cycle selection probability of [`EaxStrategy::MultipleRandom`].
pub const MULTIPLE_RANDOM_PROBABILITY: f64 = 0.75;

/// Configuration of the edge-assembly crossover.
///
/// # Defaults
///
/// ```
/// use u_tour::ga::{EaxConfig, EaxStrategy};
///
/// let config = EaxConfig::default();
/// assert_eq!(config.max_offspring, 30);
/// assert_eq!(config.strategy, EaxStrategy::SingleRandom);
/// assert_eq!(config.nearest_neighbors, Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EaxConfig {
    /// Offspring attempts per crossover.
    pub max_offspring: usize,

    /// AB-cycle selection strategy.
    pub strategy: EaxStrategy,

    /// Size of the candidate lists used when reconnecting sub-tours.
    ///
    /// `None` scans every node outside the sub-tour being merged.
    pub nearest_neighbors: Option<usize>,
}

impl Default for EaxConfig {
    fn default() -> Self {
        Self {
            max_offspring: 30,
            strategy: EaxStrategy::SingleRandom,
            nearest_neighbors: Some(10),
        }
    }
}

impl EaxConfig {
    /// Sets the number of offspring attempts.
    pub fn with_max_offspring(mut self, n: usize) -> Self {
        self.max_offspring = n;
        self
    }

    /// Sets the AB-cycle selection strategy.
    pub fn with_strategy(mut self, strategy: EaxStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the candidate list size (`None` for exhaustive reconnection).
    pub fn with_nearest_neighbors(mut self, k: Option<usize>) -> Self {
        self.nearest_neighbors = k.map(|k| k.max(1));
        self
    }
}

/// Configuration for the genetic search.
///
/// Ratios are fractions of the population size and are clamped into
/// `[0, 1]` by the builder methods.
///
/// # Defaults
///
/// ```
/// use u_tour::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.elite_count(), 5);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tour::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_elitism(0.2)
///     .with_mutation(0.3)
///     .with_improvement(Some(0.1))
///     .with_seed(42);
/// assert_eq!(config.elite_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Generations without a new champion before stopping.
    pub stagnation_limit: usize,

    /// Fraction of the population kept unchanged (best first).
    pub elitism: f64,

    /// Size of the crossover pool as a fraction of the population.
    pub crossover: f64,

    /// Probability that a non-elite slot is mutated after crossover.
    pub mutation: f64,

    /// Fraction of the population polished by local search each generation.
    ///
    /// `None` disables the improvement step.
    pub improvement: Option<f64>,

    /// Fraction of the population drawn into each tournament.
    pub tournament_sample: f64,

    /// Probability of accepting the current tournament entrant.
    pub tournament_probability: f64,

    /// Whether to process population slots in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Crossover settings.
    pub eax: EaxConfig,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 500,
            stagnation_limit: 50,
            elitism: 0.1,
            crossover: 0.5,
            mutation: 0.1,
            improvement: None,
            tournament_sample: 0.1,
            tournament_probability: 0.75,
            parallel: true,
            seed: None,
            eax: EaxConfig::default(),
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the elite fraction.
    pub fn with_elitism(mut self, ratio: f64) -> Self {
        self.elitism = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover pool fraction.
    pub fn with_crossover(mut self, ratio: f64) -> Self {
        self.crossover = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation(mut self, rate: f64) -> Self {
        self.mutation = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the improvement fraction (`None` disables it).
    pub fn with_improvement(mut self, ratio: Option<f64>) -> Self {
        self.improvement = ratio.map(|r| r.clamp(0.0, 1.0));
        self
    }

    /// Sets the tournament sample fraction.
    pub fn with_tournament_sample(mut self, ratio: f64) -> Self {
        self.tournament_sample = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament acceptance probability.
    pub fn with_tournament_probability(mut self, p: f64) -> Self {
        self.tournament_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the crossover configuration.
    pub fn with_eax(mut self, eax: EaxConfig) -> Self {
        self.eax = eax;
        self
    }

    /// Number of elite slots.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elitism).floor() as usize
    }

    /// Number of individuals in the crossover pool (at least 2).
    pub fn pool_size(&self) -> usize {
        ((self.population_size as f64 * self.crossover).round() as usize).max(2)
    }

    /// Number of individuals per tournament (at least 1).
    pub fn tournament_size(&self) -> usize {
        ((self.population_size as f64 * self.tournament_sample).round() as usize)
            .clamp(1, self.population_size.max(1))
    }

    /// Number of individuals polished per generation, if enabled.
    pub fn improvement_count(&self) -> Option<usize> {
        self.improvement
            .map(|r| ((self.population_size as f64 * r).round() as usize).max(1))
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        let elite = self.elite_count();
        if elite >= self.population_size {
            return Err(ConfigError::EliteCoversPopulation {
                elite,
                population: self.population_size,
            });
        }
        let p = self.tournament_probability;
        if !(p > 0.0 && p <= 1.0) {
            return Err(ConfigError::TournamentProbability(p));
        }
        if self.eax.max_offspring == 0 {
            return Err(ConfigError::NoOffspring);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_clamp() {
        let config = GaConfig::default()
            .with_elitism(1.5)
            .with_mutation(-0.2)
            .with_improvement(Some(3.0));
        assert_eq!(config.elitism, 1.0);
        assert_eq!(config.mutation, 0.0);
        assert_eq!(config.improvement, Some(1.0));
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(
            GaConfig::default().with_population_size(1).validate(),
            Err(ConfigError::PopulationTooSmall(1))
        );
        assert_eq!(
            GaConfig::default()
                .with_population_size(10)
                .with_elitism(1.0)
                .validate(),
            Err(ConfigError::EliteCoversPopulation {
                elite: 10,
                population: 10
            })
        );
        assert_eq!(
            GaConfig::default().with_tournament_probability(0.0).validate(),
            Err(ConfigError::TournamentProbability(0.0))
        );
        assert_eq!(
            GaConfig::default()
                .with_eax(EaxConfig::default().with_max_offspring(0))
                .validate(),
            Err(ConfigError::NoOffspring)
        );
    }

    #[test]
    fn test_derived_sizes() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_crossover(0.05)
            .with_tournament_sample(0.0);
        assert_eq!(config.pool_size(), 2);
        assert_eq!(config.tournament_size(), 1);
        assert_eq!(config.improvement_count(), None);
        assert_eq!(config.with_improvement(Some(0.01)).improvement_count(), Some(1));
    }

    #[test]
    fn test_eax_neighbors_at_least_one() {
        let eax = EaxConfig::default().with_nearest_neighbors(Some(0));
        assert_eq!(eax.nearest_neighbors, Some(1));
        let eax = eax.with_strategy(EaxStrategy::MultipleRandom);
        assert_eq!(eax.strategy, EaxStrategy::MultipleRandom);
    }
}
