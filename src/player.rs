use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::cards::Card;
use crate::clock::Clock;
use crate::error::SquaresResult;
use crate::scoring::PointSystem;
use crate::select::select_move;
use crate::state::{PlayState, GRID_SIZE, NUM_CELLS};
use crate::table::HeuristicTable;
use crate::tuner::{tune, TunerConfig};

pub const DEFAULT_DEPTH_LIMIT: usize = 2;

/// A complete Poker Squares agent: a seeded (optionally calibrated)
/// heuristic table, a backtrackable state, and the time-budgeted move
/// selector, bound to one point system for its lifetime.
pub struct Player {
    state: PlayState,
    table: HeuristicTable,
    points: PointSystem,
    depth_limit: usize,
    rng: SmallRng,
}

impl Player {
    pub fn new(points: PointSystem, depth_limit: usize) -> SquaresResult<Player> {
        Ok(Player {
            state: PlayState::new(),
            table: HeuristicTable::seed(&points)?,
            points,
            depth_limit,
            rng: SmallRng::from_entropy(),
        })
    }

    /// Deterministic construction for tests and reproducible runs.
    pub fn with_seed(points: PointSystem, depth_limit: usize, seed: u64) -> SquaresResult<Player> {
        Ok(Player {
            state: PlayState::new(),
            table: HeuristicTable::seed(&points)?,
            points,
            depth_limit,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Spend `budget_millis` tuning the heuristic table before play.
    pub fn calibrate<C: Clock>(
        &mut self,
        config: &TunerConfig,
        budget_millis: u64,
        clock: &C,
    ) -> SquaresResult<()> {
        let deadline = clock.now_millis() + budget_millis;
        self.table = tune(
            config,
            &self.table,
            &self.points,
            deadline,
            clock,
            &mut self.rng,
        )?;
        Ok(())
    }

    pub fn start_game(&mut self) {
        self.state.reset();
    }

    /// Place the dealt card, spending a slice of the remaining game budget,
    /// and return the chosen (row, col).
    pub fn play<C: Clock>(
        &mut self,
        card: Card,
        millis_remaining: u64,
        clock: &C,
    ) -> SquaresResult<(usize, usize)> {
        let cell = select_move(
            &mut self.state,
            card,
            &self.table,
            &self.points,
            millis_remaining,
            self.depth_limit,
            clock,
            &mut self.rng,
        )?;
        Ok((cell / GRID_SIZE, cell % GRID_SIZE))
    }

    pub fn cards_played(&self) -> usize {
        self.state.played()
    }

    pub fn game_over(&self) -> bool {
        self.state.played() == NUM_CELLS
    }

    pub fn grid(&self) -> &[Option<Card>; NUM_CELLS] {
        self.state.grid()
    }

    pub fn table(&self) -> &HeuristicTable {
        &self.table
    }

    pub fn final_score(&self) -> SquaresResult<i32> {
        self.points.score_grid(self.state.grid())
    }
}
