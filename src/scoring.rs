use std::fmt;

use crate::cards::Card;
use crate::classify::{classify, PartialHand};
use crate::error::{SquaresError, SquaresResult};

pub const NUM_HAND_RANKS: usize = 10;

/// Point values for the ten canonical 5-card hand ranks, indexed by the
/// 5-card `PartialHand` ordinal (high card = 0 .. royal flush = 9).
///
/// This is the scoring collaborator the agent core consumes: it is read
/// during heuristic seeding, once per simulated game during tuning, and at
/// the terminal state of a rollout when the grid is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSystem {
    scores: [i32; NUM_HAND_RANKS],
}

impl PointSystem {
    /// American point system.
    pub fn american() -> PointSystem {
        PointSystem {
            scores: [0, 2, 5, 10, 15, 20, 25, 50, 75, 100],
        }
    }

    /// English point system, weighted by hand rarity in a single deal.
    pub fn english() -> PointSystem {
        PointSystem {
            scores: [0, 1, 3, 6, 12, 5, 10, 16, 30, 30],
        }
    }

    pub fn custom(scores: [i32; NUM_HAND_RANKS]) -> PointSystem {
        PointSystem { scores }
    }

    /// Score of one of the ten full-hand categories. Errors on a sub-5-card
    /// category, which has no point value of its own.
    pub fn hand_score(&self, hand: PartialHand) -> SquaresResult<i32> {
        let idx = hand.index();
        if idx >= NUM_HAND_RANKS {
            return Err(SquaresError::InvalidValue(format!(
                "no point value for partial hand '{}'",
                hand
            )));
        }
        Ok(self.scores[idx])
    }

    /// Score of a completed 5-card line.
    pub fn score_line(&self, line: &[Option<Card>; 5]) -> SquaresResult<i32> {
        let filled = line.iter().flatten().count();
        if filled != 5 {
            return Err(SquaresError::GridNotFull(filled));
        }
        self.hand_score(classify(line)?)
    }

    /// Score of a fully filled 5x5 grid: the sum of its 5 row and 5 column
    /// hand scores.
    pub fn score_grid(&self, grid: &[Option<Card>; 25]) -> SquaresResult<i32> {
        let filled = grid.iter().flatten().count();
        if filled != 25 {
            return Err(SquaresError::GridNotFull(filled));
        }
        let mut total = 0;
        for i in 0..5 {
            let mut row = [None; 5];
            let mut col = [None; 5];
            for j in 0..5 {
                row[j] = grid[i * 5 + j];
                col[j] = grid[j * 5 + i];
            }
            total += self.score_line(&row)?;
            total += self.score_line(&col)?;
        }
        Ok(total)
    }
}

impl fmt::Display for PointSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, score) in self.scores.iter().enumerate() {
            writeln!(f, "{:>16}: {}", crate::classify::ALL_PARTIAL_HANDS[i], score)?;
        }
        Ok(())
    }
}
