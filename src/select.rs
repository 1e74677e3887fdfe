use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::Card;
use crate::clock::Clock;
use crate::error::{SquaresError, SquaresResult};
use crate::rollout::rollout;
use crate::scoring::PointSystem;
use crate::state::{PlayState, NUM_CELLS};
use crate::table::HeuristicTable;

/// Choose and commit a placement for the dealt card.
///
/// The remaining time budget is split evenly across the remaining real
/// turns, then evenly again across the legal cells of this turn. Each cell
/// gets that micro-budget's worth of greedy rollouts; the cell with the
/// highest mean simulated score wins, ties broken uniformly at random. A
/// cell whose micro-budget expires before a single rollout completes gets a
/// mean of negative infinity, so it can only win when every cell starved.
/// The chosen move is applied for real and not undone.
pub fn select_move<C: Clock, R: Rng>(
    state: &mut PlayState,
    card: Card,
    table: &HeuristicTable,
    points: &PointSystem,
    millis_remaining: u64,
    depth: usize,
    clock: &C,
    rng: &mut R,
) -> SquaresResult<usize> {
    let remaining = NUM_CELLS - state.played();
    if remaining == 0 {
        return Err(SquaresError::GridFull);
    }
    if remaining == 1 {
        // forced last play
        let cell = state.legal_cells()[0];
        state.apply_move(card, cell)?;
        return Ok(cell);
    }

    let millis_per_play = millis_remaining / remaining as u64;
    let millis_per_move = millis_per_play / remaining as u64;

    let legal: Vec<usize> = state.legal_cells().to_vec();
    let mut max_average = f64::NEG_INFINITY;
    let mut best_cells: Vec<usize> = Vec::with_capacity(legal.len());
    for cell in legal {
        state.apply_move(card, cell)?;
        let deadline = clock.now_millis() + millis_per_move;
        let mut score_total: i64 = 0;
        let mut sim_count: u64 = 0;
        while clock.now_millis() < deadline {
            score_total += i64::from(rollout(state, table, points, depth, rng)?);
            sim_count += 1;
        }
        state.undo_move()?;

        let average = if sim_count == 0 {
            f64::NEG_INFINITY
        } else {
            score_total as f64 / sim_count as f64
        };
        if average >= max_average {
            if average > max_average {
                best_cells.clear();
                max_average = average;
            }
            best_cells.push(cell);
        }
    }

    let chosen = *best_cells.choose(rng).ok_or(SquaresError::NoLegalCell)?;
    state.apply_move(card, chosen)?;
    Ok(chosen)
}
