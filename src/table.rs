use std::fmt;
use std::ops::Range;

use rand::Rng;

use crate::classify::{PartialHand, ALL_PARTIAL_HANDS, NUM_PARTIAL_HANDS};
use crate::error::SquaresResult;
use crate::scoring::PointSystem;

pub const NUM_PHASES: usize = 3;
pub const VALUE_MIN: i32 = -128;
pub const VALUE_MAX: i32 = 127;

/// Ordinals of the categories a tuner may touch: everything below a full
/// 5-card hand. The ten 5-card values are fixed by the scoring system.
pub const TUNABLE_HANDS: Range<usize> = 10..NUM_PARTIAL_HANDS;

/// Coarse turn grouping: turns 0-9, 10-19 and 20-24 share one value per
/// category.
pub fn phase_of_turn(turn: usize) -> usize {
    (turn / 10).min(NUM_PHASES - 1)
}

fn clamp_value(v: i32) -> i32 {
    v.clamp(VALUE_MIN, VALUE_MAX)
}

/// Per-phase expected-value estimate for each of the 40 partial-hand
/// categories. Flat arrays keyed by (phase, category ordinal) keep lookups
/// out of hashing territory in the innermost simulation loop.
///
/// A table only exists seeded: `seed` is the sole constructor, so every
/// category has a defined value in every phase before any evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicTable {
    values: [[i32; NUM_PARTIAL_HANDS]; NUM_PHASES],
}

/// The 5-card categories a partial hand can still turn into with one more
/// card, as consumed by the optimistic seeding recursion. Level-4 entries
/// point at 5-card categories, level-3 at level-4, and so on downward.
fn successors(hand: PartialHand) -> &'static [PartialHand] {
    use PartialHand::*;
    match hand {
        HighCard4 => &[HighCard5, OnePair5],
        OnePair4 => &[OnePair5, TwoPair5, ThreeOfAKind5],
        TwoPair4 => &[FullHouse5, TwoPair5],
        ThreeOfAKind4 => &[ThreeOfAKind5, FourOfAKind5, FullHouse5],
        Straight4 => &[Straight5, HighCard5, OnePair5],
        Flush4 => &[Flush5, HighCard5, OnePair5],
        FourOfAKind4 => &[FourOfAKind5],
        StraightFlush4 => &[Flush5, StraightFlush5, Straight5, HighCard5, OnePair5],
        RoyalFlush4 => &[Flush5, StraightFlush5, RoyalFlush5, Straight5, HighCard5, OnePair5],
        HighCard3 => &[HighCard4, OnePair4],
        OnePair3 => &[ThreeOfAKind4, OnePair4, TwoPair4],
        ThreeOfAKind3 => &[ThreeOfAKind4, FourOfAKind4],
        Straight3 => &[Straight4, HighCard4, OnePair4],
        Flush3 => &[Flush4, HighCard4, OnePair4],
        StraightFlush3 => &[Straight4, Flush4, HighCard4, OnePair4, StraightFlush4],
        RoyalFlush3 => &[RoyalFlush4, Straight4, Flush4, HighCard4, OnePair4, StraightFlush4],
        HighCard2 => &[HighCard3, OnePair3],
        OnePair2 => &[ThreeOfAKind3, OnePair3],
        Straight2 => &[Straight3, HighCard3, OnePair3],
        Flush2 => &[Flush3, HighCard3, OnePair3],
        StraightFlush2 => &[Straight3, Flush3, HighCard3, OnePair3, StraightFlush3],
        RoyalFlush2 => &[RoyalFlush3, Straight3, Flush3, HighCard3, OnePair3, StraightFlush3],
        OneCard => &[RoyalFlush2, Straight2, Flush2, HighCard2, OnePair2, StraightFlush2],
        _ => &[],
    }
}

/// Inside-straight variants are one gap-filling draw away from the same
/// completed hand as their plain counterpart, so they inherit its value.
fn inherits_from(hand: PartialHand) -> Option<PartialHand> {
    use PartialHand::*;
    match hand {
        InsideStraight4 => Some(Straight4),
        InsideStraightFlush4 => Some(StraightFlush4),
        InsideStraight3 => Some(Straight3),
        InsideStraightFlush3 => Some(StraightFlush3),
        InsideStraight2 => Some(Straight2),
        InsideStraightFlush2 => Some(StraightFlush2),
        ZeroCards => Some(OneCard),
        _ => None,
    }
}

impl HeuristicTable {
    /// Build the initial table from a point system: 5-card categories take
    /// their point values verbatim; each partial category takes the maximum
    /// value among the categories it can still become, an optimistic upper
    /// bound on its potential. Phases 1 and 2 start as copies of phase 0 and
    /// diverge only under tuning.
    pub fn seed(points: &PointSystem) -> SquaresResult<HeuristicTable> {
        let mut phase0 = [0i32; NUM_PARTIAL_HANDS];
        for hand in &ALL_PARTIAL_HANDS[..10] {
            phase0[hand.index()] = clamp_value(points.hand_score(*hand)?);
        }
        // Ordinals ascend from 5-card to 0-card level, and every successor
        // or inherited category has a smaller ordinal, so one forward pass
        // suffices.
        for hand in &ALL_PARTIAL_HANDS[10..] {
            phase0[hand.index()] = match inherits_from(*hand) {
                Some(src) => phase0[src.index()],
                None => successors(*hand)
                    .iter()
                    .map(|s| phase0[s.index()])
                    .max()
                    .unwrap_or(0),
            };
        }
        Ok(HeuristicTable {
            values: [phase0; NUM_PHASES],
        })
    }

    pub fn get(&self, turn: usize, hand: PartialHand) -> i32 {
        self.values[phase_of_turn(turn)][hand.index()]
    }

    /// Set the value for the phase containing `turn`, clamped to
    /// `[VALUE_MIN, VALUE_MAX]`.
    pub fn put(&mut self, turn: usize, hand: PartialHand, value: i32) {
        self.values[phase_of_turn(turn)][hand.index()] = clamp_value(value);
    }

    /// A perturbed clone used to diversify the initial tuner population:
    /// each tunable category gets one random offset in [-10, 10], applied
    /// identically across all three phases.
    pub fn randomized<R: Rng>(&self, rng: &mut R) -> HeuristicTable {
        let mut result = self.clone();
        for idx in TUNABLE_HANDS {
            let offset = rng.gen_range(-10..=10);
            for phase in 0..NUM_PHASES {
                result.values[phase][idx] = clamp_value(self.values[phase][idx] + offset);
            }
        }
        result
    }

    /// Uniform crossover: each tunable category independently comes from
    /// `self` or `other` with equal probability, the choice applied across
    /// all three phases at once.
    pub fn crossover<R: Rng>(&self, other: &HeuristicTable, rng: &mut R) -> HeuristicTable {
        let mut child = self.clone();
        for idx in TUNABLE_HANDS {
            if rng.gen_bool(0.5) {
                for phase in 0..NUM_PHASES {
                    child.values[phase][idx] = other.values[phase][idx];
                }
            }
        }
        child
    }

    /// Apply `count` independent point mutations: a random tunable category
    /// in a random phase shifts by a random amount in [-2, 2].
    pub fn mutate<R: Rng>(&mut self, count: usize, rng: &mut R) {
        for _ in 0..count {
            let idx = rng.gen_range(TUNABLE_HANDS);
            let hand = ALL_PARTIAL_HANDS[idx];
            let turn = rng.gen_range(0..25);
            let delta = rng.gen_range(-2..=2);
            let current = self.get(turn, hand);
            self.put(turn, hand, current + delta);
        }
    }

    /// True if no value in any phase leaves the clamp range. Every mutating
    /// path clamps, so this holds by construction.
    pub fn in_bounds(&self) -> bool {
        self.values
            .iter()
            .flatten()
            .all(|&v| (VALUE_MIN..=VALUE_MAX).contains(&v))
    }
}

impl fmt::Display for HeuristicTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (phase, row) in self.values.iter().enumerate() {
            writeln!(f, "phase {} (turns {}):", phase, match phase {
                0 => "0-9",
                1 => "10-19",
                _ => "20-24",
            })?;
            for (idx, value) in row.iter().enumerate() {
                writeln!(f, "  {:>24}: {:>4}", ALL_PARTIAL_HANDS[idx], value)?;
            }
        }
        Ok(())
    }
}
