//! Genetic search over fixed-length action sequences
//!
//! Candidates are scored by the sequence runner, so the optimizer can only
//! discover what the engine's rules already imply. Seeded for reproducibility;
//! fitness is evaluated in parallel.

use crate::actions::catalog::ActionId;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::entity::subject::Subject;
use crate::entity::traits::Traits;
use crate::simulation::engine::Session;
use crate::simulation::runner::{run_actions_from, RunReport};
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub population: usize,
    pub generations: usize,
    /// Actions per candidate sequence
    pub sequence_length: usize,
    /// Candidates drawn per tournament
    pub tournament_size: usize,
    /// Probability that two parents are recombined rather than copied
    pub crossover_rate: f64,
    /// Per-action probability of replacement by a random action
    pub mutation_rate: f64,
    /// Best candidates copied unchanged into the next generation
    pub elitism: usize,
    /// Generations without improvement before stopping early
    pub patience: usize,
    /// Simulated hours each candidate may run for
    pub max_hours: f32,
    pub seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population: 60,
            generations: 80,
            sequence_length: 24,
            tournament_size: 3,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elitism: 2,
            patience: 15,
            max_hours: 24.0,
            seed: 42,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population < 2 {
            return Err(SimError::Config("optimizer population must be at least 2".into()));
        }
        if self.sequence_length < 2 {
            return Err(SimError::Config(
                "optimizer sequence_length must be at least 2".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(SimError::Config("optimizer tournament_size must be positive".into()));
        }
        if self.elitism >= self.population {
            return Err(SimError::Config(format!(
                "optimizer elitism ({}) must be below population ({})",
                self.elitism, self.population
            )));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SimError::Config(format!(
                    "optimizer {} ({}) must be within [0, 1]",
                    name, rate
                )));
            }
        }
        if self.max_hours <= 0.0 {
            return Err(SimError::Config("optimizer max_hours must be positive".into()));
        }
        Ok(())
    }
}

/// One scored sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub actions: Vec<ActionId>,
    pub fitness: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub best: Candidate,
    pub generations_run: usize,
    /// Best fitness after each generation
    pub best_by_generation: Vec<f32>,
    /// Full run of the best sequence
    pub report: RunReport,
}

pub struct SequenceOptimizer {
    config: OptimizerConfig,
    simulation: SimulationConfig,
    /// Every candidate is played by a subject created from these
    traits: Traits,
    rng: ChaCha8Rng,
}

impl SequenceOptimizer {
    pub fn new(config: OptimizerConfig, simulation: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            simulation,
            traits: Traits::default(),
            rng,
        })
    }

    /// Optimize for a subject with these traits
    pub fn with_traits(mut self, traits: Traits) -> Result<Self> {
        traits.validate()?;
        self.traits = traits;
        Ok(self)
    }

    fn play(&self, actions: &[ActionId]) -> RunReport {
        let subject = Subject::with_traits(self.traits.clone(), &self.simulation.traits);
        let session = Session::from_subject(subject, self.simulation.clone());
        run_actions_from(session, actions, self.config.max_hours)
    }

    /// Run the search to completion
    pub fn run(&mut self) -> OptimizationResult {
        let mut population: Vec<Vec<ActionId>> = (0..self.config.population)
            .map(|_| self.random_sequence())
            .collect();

        let mut best: Option<Candidate> = None;
        let mut best_by_generation = Vec::with_capacity(self.config.generations);
        let mut stale = 0;

        for generation in 0..self.config.generations {
            let scored = self.evaluate(population);
            let leader = &scored[0];

            let improved = best
                .as_ref()
                .map_or(true, |b| leader.fitness > b.fitness);
            if improved {
                best = Some(leader.clone());
                stale = 0;
            } else {
                stale += 1;
            }
            let best_fitness = best.as_ref().map_or(0.0, |b| b.fitness);
            best_by_generation.push(best_fitness);

            tracing::info!(
                "generation {}: best {:.1}, leader {:.1}",
                generation,
                best_fitness,
                leader.fitness
            );

            if stale >= self.config.patience {
                tracing::info!("no improvement for {} generations, stopping", stale);
                break;
            }

            population = self.next_generation(&scored);
        }

        let best = best.unwrap_or_else(|| Candidate {
            actions: Vec::new(),
            fitness: 0.0,
        });
        let report = self.play(&best.actions);

        OptimizationResult {
            generations_run: best_by_generation.len(),
            best,
            best_by_generation,
            report,
        }
    }

    /// Score every sequence, best first
    fn evaluate(&self, population: Vec<Vec<ActionId>>) -> Vec<Candidate> {
        let mut scored: Vec<Candidate> = population
            .into_par_iter()
            .map(|actions| {
                let fitness = self.play(&actions).fitness();
                Candidate { actions, fitness }
            })
            .collect();

        // Stable sort keeps ties in population order, so runs are reproducible
        scored.sort_by_key(|c| std::cmp::Reverse(OrderedFloat(c.fitness)));
        scored
    }

    fn next_generation(&mut self, scored: &[Candidate]) -> Vec<Vec<ActionId>> {
        let mut next: Vec<Vec<ActionId>> = scored
            .iter()
            .take(self.config.elitism)
            .map(|c| c.actions.clone())
            .collect();

        while next.len() < self.config.population {
            let first = self.tournament(scored);
            let second = self.tournament(scored);

            let mut child = if self.rng.gen_bool(self.config.crossover_rate) {
                self.crossover(&first.actions, &second.actions)
            } else {
                first.actions.clone()
            };
            self.mutate(&mut child);
            next.push(child);
        }

        next
    }

    fn tournament<'a>(&mut self, scored: &'a [Candidate]) -> &'a Candidate {
        let mut winner = &scored[self.rng.gen_range(0..scored.len())];
        for _ in 1..self.config.tournament_size {
            let challenger = &scored[self.rng.gen_range(0..scored.len())];
            if challenger.fitness > winner.fitness {
                winner = challenger;
            }
        }
        winner
    }

    /// Two-point crossover: the middle segment comes from the second parent
    fn crossover(&mut self, first: &[ActionId], second: &[ActionId]) -> Vec<ActionId> {
        let len = first.len().min(second.len());
        let mut a = self.rng.gen_range(0..len);
        let mut b = self.rng.gen_range(0..len);
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }

        let mut child = first.to_vec();
        child[a..=b].copy_from_slice(&second[a..=b]);
        child
    }

    fn mutate(&mut self, sequence: &mut [ActionId]) {
        for gene in sequence.iter_mut() {
            if self.rng.gen_bool(self.config.mutation_rate) {
                *gene = self.random_action();
            }
        }
    }

    fn random_action(&mut self) -> ActionId {
        ActionId::ALL[self.rng.gen_range(0..ActionId::COUNT)]
    }

    fn random_sequence(&mut self) -> Vec<ActionId> {
        (0..self.config.sequence_length)
            .map(|_| self.random_action())
            .collect()
    }
}
