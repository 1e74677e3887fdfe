use rand::seq::SliceRandom;
use rand::Rng;

use crate::classify::classify;
use crate::error::{SquaresError, SquaresResult};
use crate::scoring::PointSystem;
use crate::state::{PlayState, GRID_SIZE, NUM_CELLS};
use crate::table::HeuristicTable;

/// Heuristic value of the current grid: the sum over all 10 lines of the
/// table value for that line's partial-hand category at the current phase.
/// Once the grid is full no placement decision remains, so the true point
/// system takes over from the heuristic.
pub fn eval_grid(
    state: &PlayState,
    table: &HeuristicTable,
    points: &PointSystem,
) -> SquaresResult<i32> {
    if state.is_full() {
        return points.score_grid(state.grid());
    }
    let turn = state.played().saturating_sub(1);
    let mut total = 0;
    for i in 0..GRID_SIZE {
        total += table.get(turn, classify(&state.row_line(i))?);
        total += table.get(turn, classify(&state.col_line(i))?);
    }
    Ok(total)
}

/// One greedy Monte-Carlo simulation: draw `depth` random undealt cards, at
/// each step placing the draw in the empty cell that maximizes the immediate
/// heuristic score (ties broken uniformly at random), and return the final
/// greedy maximum. Every simulated move is undone before returning, so the
/// state is restored bit for bit.
pub fn rollout<R: Rng>(
    state: &mut PlayState,
    table: &HeuristicTable,
    points: &PointSystem,
    depth: usize,
    rng: &mut R,
) -> SquaresResult<i32> {
    let depth = depth.min(NUM_CELLS - state.played());
    if depth == 0 {
        return eval_grid(state, table, points);
    }

    let mut max_score = i32::MIN;
    let mut best_cells: Vec<usize> = Vec::with_capacity(NUM_CELLS);
    for _ in 0..depth {
        let card = state.draw_undealt(rng);
        let legal: Vec<usize> = state.legal_cells().to_vec();
        max_score = i32::MIN;
        best_cells.clear();
        for cell in legal {
            state.apply_move(card, cell)?;
            let score = eval_grid(state, table, points)?;
            state.undo_move()?;
            if score >= max_score {
                if score > max_score {
                    best_cells.clear();
                    max_score = score;
                }
                best_cells.push(cell);
            }
        }
        let chosen = *best_cells.choose(rng).ok_or(SquaresError::NoLegalCell)?;
        state.apply_move(card, chosen)?;
    }

    for _ in 0..depth {
        state.undo_move()?;
    }
    Ok(max_score)
}
