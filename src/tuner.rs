use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Deserialize;

use crate::classify::ALL_PARTIAL_HANDS;
use crate::clock::Clock;
use crate::error::SquaresResult;
use crate::rollout::rollout;
use crate::scoring::PointSystem;
use crate::state::{PlayState, NUM_CELLS};
use crate::table::{HeuristicTable, NUM_PHASES, TUNABLE_HANDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Genetic,
    StochasticRuler,
}

/// Offline calibration parameters, loadable from JSON via `--config`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    pub strategy: Strategy,
    /// Genetic population size.
    pub pop_size: usize,
    /// Fraction of the population carried unchanged into the next
    /// generation.
    pub elite_fraction: f64,
    /// Fraction of the initial population that are exact clones of the
    /// seeded table; the rest are randomized perturbations of it.
    pub seed_clone_fraction: f64,
    /// Point mutations applied to each non-elite child.
    pub num_mutations: usize,
    pub crossover: bool,
    pub mutation: bool,
    /// Full simulated games averaged into one fitness evaluation.
    pub eval_games: usize,
}

impl Default for TunerConfig {
    fn default() -> Self {
        TunerConfig {
            strategy: Strategy::Genetic,
            pop_size: 20,
            elite_fraction: 0.05,
            seed_clone_fraction: 0.5,
            num_mutations: 2,
            crossover: true,
            mutation: true,
            eval_games: 10,
        }
    }
}

/// A candidate table paired with its most recent fitness evaluation.
pub struct Member {
    pub table: HeuristicTable,
    pub fitness: f64,
}

/// Fitness of a candidate table: mean terminal score over `games` full
/// simulated games. Each game is one whole-game greedy rollout, so the true
/// point system is consulted exactly once per game, at the filled grid.
fn evaluate<R: Rng>(
    table: &HeuristicTable,
    points: &PointSystem,
    games: usize,
    rng: &mut R,
) -> SquaresResult<f64> {
    let mut state = PlayState::new();
    let mut total: i64 = 0;
    for _ in 0..games {
        state.reset();
        total += i64::from(rollout(&mut state, table, points, NUM_CELLS, rng)?);
    }
    Ok(total as f64 / games.max(1) as f64)
}

/// Calibrate a heuristic table against a point system, starting from the
/// seeded table and burning wall clock until `deadline_millis` on the given
/// clock.
pub fn tune<C: Clock, R: Rng>(
    config: &TunerConfig,
    seed_table: &HeuristicTable,
    points: &PointSystem,
    deadline_millis: u64,
    clock: &C,
    rng: &mut R,
) -> SquaresResult<HeuristicTable> {
    match config.strategy {
        Strategy::Genetic => tune_genetic(config, seed_table, points, deadline_millis, clock, rng),
        Strategy::StochasticRuler => {
            tune_stochastic_ruler(config, seed_table, points, deadline_millis, clock, rng)
        }
    }
}

fn sort_by_fitness(members: &mut [Member]) {
    // descending; exact fitness ties keep arbitrary order
    members.sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap_or(Ordering::Equal));
}

/// Breed the successor population from a fitness-sorted one. The top
/// `elite_fraction` tables are carried over byte for byte, untouched by
/// crossover and mutation; the remaining slots are bred from a rank-biased
/// shrinking parent pool in which the i-th child cannot draw parents from
/// the lowest i members.
pub fn next_generation<R: Rng>(
    config: &TunerConfig,
    members: &[Member],
    rng: &mut R,
) -> Vec<HeuristicTable> {
    let pop_size = members.len();
    let elite = ((pop_size as f64 * config.elite_fraction) as usize).max(1);

    let mut next: Vec<HeuristicTable> = members[..elite].iter().map(|m| m.table.clone()).collect();
    for i in elite..pop_size {
        let pool = (pop_size - i).max(1);
        let mut child = if config.crossover {
            let p1 = rng.gen_range(0..pool);
            let p2 = rng.gen_range(0..pool);
            members[p1].table.crossover(&members[p2].table, rng)
        } else {
            members[(i - elite).min(pool - 1)].table.clone()
        };
        if config.mutation {
            child.mutate(config.num_mutations, rng);
        }
        next.push(child);
    }
    next
}

fn tune_genetic<C: Clock, R: Rng>(
    config: &TunerConfig,
    seed_table: &HeuristicTable,
    points: &PointSystem,
    deadline_millis: u64,
    clock: &C,
    rng: &mut R,
) -> SquaresResult<HeuristicTable> {
    let pop_size = config.pop_size.max(2);
    let clone_count = (pop_size as f64 * config.seed_clone_fraction) as usize;

    let mut population: Vec<HeuristicTable> = (0..pop_size)
        .map(|i| {
            if i < clone_count {
                seed_table.clone()
            } else {
                seed_table.randomized(rng)
            }
        })
        .collect();

    loop {
        // Independent members evaluate in parallel, each on a private state
        // and an RNG seeded from the sequential stream.
        let member_seeds: Vec<u64> = (0..population.len()).map(|_| rng.gen()).collect();
        let mut members: Vec<Member> = population
            .into_par_iter()
            .zip(member_seeds)
            .map(|(table, seed)| {
                let mut member_rng = SmallRng::seed_from_u64(seed);
                let fitness = evaluate(&table, points, config.eval_games, &mut member_rng)?;
                Ok(Member { table, fitness })
            })
            .collect::<SquaresResult<Vec<Member>>>()?;
        sort_by_fitness(&mut members);

        if clock.now_millis() >= deadline_millis {
            return Ok(members.swap_remove(0).table);
        }

        population = next_generation(config, &members, rng);
    }
}

fn tune_stochastic_ruler<C: Clock, R: Rng>(
    config: &TunerConfig,
    seed_table: &HeuristicTable,
    points: &PointSystem,
    deadline_millis: u64,
    clock: &C,
    rng: &mut R,
) -> SquaresResult<HeuristicTable> {
    let start = clock.now_millis();
    let horizon = deadline_millis.saturating_sub(start).max(1);

    let mut current = seed_table.clone();
    let mut best = seed_table.clone();
    let mut best_value = evaluate(&current, points, config.eval_games, rng)?;
    let mut worst_value = best_value;

    let mut current_m: usize = 1;
    let mut iter: u64 = 0;
    let mut next_checkpoint: u64 = 16;

    while clock.now_millis() < deadline_millis {
        iter += 1;
        if iter >= next_checkpoint {
            // geometrically spaced trial-count increases
            current_m += 1;
            next_checkpoint *= 2;
        }
        let frac =
            (clock.now_millis().saturating_sub(start) as f64 / horizon as f64).clamp(0.0, 1.0);

        // Neighbor proposal: perturbation probability decays with elapsed
        // time while the offset interval widens with it.
        let mut neighbor = current.clone();
        for idx in TUNABLE_HANDS {
            let hand = ALL_PARTIAL_HANDS[idx];
            for phase in 0..NUM_PHASES {
                if rng.gen::<f64>() < 1.0 - frac / 2.0 {
                    let turn = phase * 10;
                    let interval = (frac * 20.0) as i32 + 2;
                    let offset = rng.gen_range(0..interval) - interval / 2;
                    neighbor.put(turn, hand, neighbor.get(turn, hand) + offset);
                }
            }
        }

        // The ruler: a uniform threshold between the worst and best mean
        // evaluations seen so far.
        let theta = if best_value > worst_value {
            rng.gen_range(worst_value..best_value)
        } else {
            best_value
        };

        // The neighbor must beat the threshold on every one of current_m
        // trials; the first failure rejects it outright.
        let mut trial_total = 0.0;
        let mut trials = 0;
        let mut accepted = true;
        for _ in 0..current_m {
            let value = evaluate(&neighbor, points, config.eval_games, rng)?;
            worst_value = worst_value.min(value);
            trial_total += value;
            trials += 1;
            if value <= theta {
                accepted = false;
                break;
            }
        }
        if !accepted {
            continue;
        }
        let neighbor_mean = trial_total / trials as f64;
        current = neighbor.clone();

        // Replace the incumbent best only if the neighbor survives a
        // higher-trial-count re-check of the incumbent.
        let recheck_trials = current_m + 1;
        let mut best_total = 0.0;
        for _ in 0..recheck_trials {
            let value = evaluate(&best, points, config.eval_games, rng)?;
            worst_value = worst_value.min(value);
            best_total += value;
        }
        if neighbor_mean > best_total / recheck_trials as f64 {
            best = neighbor;
            best_value = neighbor_mean;
        }
    }
    Ok(best)
}
