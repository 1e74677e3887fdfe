use rand::Rng;

use crate::cards::{full_deck, Card, NUM_CARDS};
use crate::error::{SquaresError, SquaresResult};

pub const GRID_SIZE: usize = 5;
pub const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Backtrackable game state: the 5x5 grid plus two permutations.
///
/// `order` is a permutation of the 25 cell indices (row-major): slots
/// `[0, played)` record the chronological move history, slots
/// `[played, NUM_CELLS)` hold the currently empty cells. `deal_order` is a
/// permutation of the 52 cards: slots `[0, played)` are the cards dealt so
/// far, the suffix is the undealt remainder, sampled directly by rollout
/// simulations. Each permutation carries a reverse index so that move
/// application and undo never scan.
#[derive(Debug, Clone)]
pub struct PlayState {
    grid: [Option<Card>; NUM_CELLS],
    order: [usize; NUM_CELLS],
    slot_of_cell: [usize; NUM_CELLS],
    deal_order: [Card; NUM_CARDS],
    slot_of_card: [usize; NUM_CARDS],
    /// For move i, the slots its card and cell occupied before being
    /// swapped to the played prefixes; lets undo restore both permutations
    /// exactly.
    prior_card_slot: [usize; NUM_CELLS],
    prior_cell_slot: [usize; NUM_CELLS],
    played: usize,
}

// Undo history past `played` is scratch space; equality covers only the
// observable state.
impl PartialEq for PlayState {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
            && self.order == other.order
            && self.slot_of_cell == other.slot_of_cell
            && self.deal_order == other.deal_order
            && self.slot_of_card == other.slot_of_card
            && self.played == other.played
    }
}

impl Eq for PlayState {}

impl Default for PlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayState {
    pub fn new() -> PlayState {
        let deal_order = full_deck();
        let mut slot_of_card = [0usize; NUM_CARDS];
        for (slot, card) in deal_order.iter().enumerate() {
            slot_of_card[card.deck_index()] = slot;
        }
        let mut order = [0usize; NUM_CELLS];
        let mut slot_of_cell = [0usize; NUM_CELLS];
        for i in 0..NUM_CELLS {
            order[i] = i;
            slot_of_cell[i] = i;
        }
        PlayState {
            grid: [None; NUM_CELLS],
            order,
            slot_of_cell,
            deal_order,
            slot_of_card,
            prior_card_slot: [0; NUM_CELLS],
            prior_cell_slot: [0; NUM_CELLS],
            played: 0,
        }
    }

    /// Clear the grid for a fresh game. The deal order is left as whatever
    /// permutation the previous game produced; any permutation of 52 cards
    /// is a valid starting point since real deals are swapped into place as
    /// they arrive.
    pub fn reset(&mut self) {
        self.grid = [None; NUM_CELLS];
        for i in 0..NUM_CELLS {
            self.order[i] = i;
            self.slot_of_cell[i] = i;
        }
        self.played = 0;
    }

    pub fn played(&self) -> usize {
        self.played
    }

    pub fn is_full(&self) -> bool {
        self.played == NUM_CELLS
    }

    pub fn grid(&self) -> &[Option<Card>; NUM_CELLS] {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Card> {
        self.grid[row * GRID_SIZE + col]
    }

    /// Row-major indices of the currently empty cells, in arbitrary order.
    pub fn legal_cells(&self) -> &[usize] {
        &self.order[self.played..]
    }

    /// Sample one card uniformly from the undealt suffix of the deal order.
    pub fn draw_undealt<R: Rng>(&self, rng: &mut R) -> Card {
        self.deal_order[rng.gen_range(self.played..NUM_CARDS)]
    }

    pub fn row_line(&self, row: usize) -> [Option<Card>; GRID_SIZE] {
        let mut line = [None; GRID_SIZE];
        for (col, slot) in line.iter_mut().enumerate() {
            *slot = self.grid[row * GRID_SIZE + col];
        }
        line
    }

    pub fn col_line(&self, col: usize) -> [Option<Card>; GRID_SIZE] {
        let mut line = [None; GRID_SIZE];
        for (row, slot) in line.iter_mut().enumerate() {
            *slot = self.grid[row * GRID_SIZE + col];
        }
        line
    }

    /// Place `card` into the empty cell `cell`, recording it as the next
    /// move and swapping the card to the dealt prefix of the deal order.
    pub fn apply_move(&mut self, card: Card, cell: usize) -> SquaresResult<()> {
        if cell >= NUM_CELLS {
            return Err(SquaresError::CellOutOfRange(cell));
        }
        if self.played == NUM_CELLS {
            return Err(SquaresError::GridFull);
        }
        if self.grid[cell].is_some() {
            return Err(SquaresError::CellOccupied(cell));
        }
        let card_slot = self.slot_of_card[card.deck_index()];
        if card_slot < self.played {
            return Err(SquaresError::CardAlreadyDealt(card.to_string()));
        }
        self.prior_card_slot[self.played] = card_slot;
        self.swap_deal_slots(card_slot, self.played);
        let cell_slot = self.slot_of_cell[cell];
        self.prior_cell_slot[self.played] = cell_slot;
        self.swap_order_slots(cell_slot, self.played);
        self.grid[cell] = Some(card);
        self.played += 1;
        Ok(())
    }

    /// Remove the most recent move, returning the card and the cell it
    /// vacated. Both permutations are restored to their pre-move
    /// configuration, so apply followed by undo is a strict identity.
    pub fn undo_move(&mut self) -> SquaresResult<(Card, usize)> {
        if self.played == 0 {
            return Err(SquaresError::NothingToUndo);
        }
        self.played -= 1;
        self.swap_deal_slots(self.prior_card_slot[self.played], self.played);
        let cell = self.order[self.played];
        self.swap_order_slots(self.prior_cell_slot[self.played], self.played);
        let card = self.grid[cell]
            .take()
            .ok_or_else(|| SquaresError::InvalidValue(format!("undo found cell {} empty", cell)))?;
        Ok((card, cell))
    }

    fn swap_deal_slots(&mut self, a: usize, b: usize) {
        self.deal_order.swap(a, b);
        self.slot_of_card[self.deal_order[a].deck_index()] = a;
        self.slot_of_card[self.deal_order[b].deck_index()] = b;
    }

    fn swap_order_slots(&mut self, a: usize, b: usize) {
        self.order.swap(a, b);
        self.slot_of_cell[self.order[a]] = a;
        self.slot_of_cell[self.order[b]] = b;
    }
}
