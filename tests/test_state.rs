use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use squares_cli::cards::{full_deck, shuffled_deck};
use squares_cli::state::{PlayState, NUM_CELLS};

#[test]
fn test_new_state_is_empty() {
    let state = PlayState::new();
    assert_eq!(state.played(), 0);
    assert!(!state.is_full());
    assert_eq!(state.legal_cells().len(), NUM_CELLS);
    assert!(state.grid().iter().all(|c| c.is_none()));
}

#[test]
fn test_apply_move_places_card() {
    let mut state = PlayState::new();
    let card = full_deck()[17];
    state.apply_move(card, 12).unwrap();
    assert_eq!(state.played(), 1);
    assert_eq!(state.grid()[12], Some(card));
    assert_eq!(state.cell(2, 2), Some(card));
    assert!(!state.legal_cells().contains(&12));
}

#[test]
fn test_occupied_cell_rejected() {
    let mut state = PlayState::new();
    let deck = full_deck();
    state.apply_move(deck[0], 3).unwrap();
    let err = state.apply_move(deck[1], 3);
    assert!(err.is_err());
    assert_eq!(state.played(), 1);
}

#[test]
fn test_reused_card_rejected() {
    let mut state = PlayState::new();
    let card = full_deck()[0];
    state.apply_move(card, 3).unwrap();
    assert!(state.apply_move(card, 4).is_err());
}

#[test]
fn test_out_of_range_cell_rejected() {
    let mut state = PlayState::new();
    assert!(state.apply_move(full_deck()[0], 25).is_err());
}

#[test]
fn test_undo_on_empty_game_rejected() {
    let mut state = PlayState::new();
    assert!(state.undo_move().is_err());
}

#[test]
fn test_apply_undo_is_identity() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut state = PlayState::new();
    for _ in 0..10_000 {
        // random prefix of real moves, then one probe move undone
        let card = state.draw_undealt(&mut rng);
        let cell = *state.legal_cells().choose(&mut rng).unwrap();
        let before = state.clone();
        state.apply_move(card, cell).unwrap();
        let (undone_card, undone_cell) = state.undo_move().unwrap();
        assert_eq!(undone_card, card);
        assert_eq!(undone_cell, cell);
        assert_eq!(state, before);

        // occasionally walk the real game forward or reset
        if state.played() < 20 && rng.gen_bool(0.3) {
            let c = state.draw_undealt(&mut rng);
            let pos = *state.legal_cells().choose(&mut rng).unwrap();
            state.apply_move(c, pos).unwrap();
        } else if rng.gen_bool(0.05) {
            state.reset();
        }
    }
}

#[test]
fn test_deep_apply_undo_sequence_restores() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = PlayState::new();
    let before = state.clone();
    let mut trail = Vec::new();
    for _ in 0..NUM_CELLS {
        let card = state.draw_undealt(&mut rng);
        let cell = *state.legal_cells().choose(&mut rng).unwrap();
        state.apply_move(card, cell).unwrap();
        trail.push((card, cell));
    }
    assert!(state.is_full());
    for expected in trail.iter().rev() {
        let got = state.undo_move().unwrap();
        assert_eq!(got, *expected);
    }
    assert_eq!(state, before);
}

#[test]
fn test_full_grid_rejects_more_moves() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut state = PlayState::new();
    let deck = shuffled_deck(&mut rng);
    for (cell, card) in deck.iter().take(NUM_CELLS).enumerate() {
        state.apply_move(*card, cell).unwrap();
    }
    assert!(state.is_full());
    assert!(state.legal_cells().is_empty());
    assert!(state.apply_move(deck[30], 0).is_err());
}

#[test]
fn test_draw_undealt_never_returns_played_card() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut state = PlayState::new();
    let mut played = std::collections::HashSet::new();
    for cell in 0..15 {
        let card = state.draw_undealt(&mut rng);
        state.apply_move(card, cell).unwrap();
        played.insert(card);
    }
    for _ in 0..1000 {
        assert!(!played.contains(&state.draw_undealt(&mut rng)));
    }
}

#[test]
fn test_lines_read_back_grid() {
    let mut state = PlayState::new();
    let deck = full_deck();
    state.apply_move(deck[0], 0).unwrap(); // row 0, col 0
    state.apply_move(deck[1], 4).unwrap(); // row 0, col 4
    state.apply_move(deck[2], 20).unwrap(); // row 4, col 0
    let row0 = state.row_line(0);
    assert_eq!(row0[0], Some(deck[0]));
    assert_eq!(row0[4], Some(deck[1]));
    let col0 = state.col_line(0);
    assert_eq!(col0[0], Some(deck[0]));
    assert_eq!(col0[4], Some(deck[2]));
}

#[test]
fn test_reset_clears_game() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut state = PlayState::new();
    for cell in 0..10 {
        let card = state.draw_undealt(&mut rng);
        state.apply_move(card, cell).unwrap();
    }
    state.reset();
    assert_eq!(state.played(), 0);
    assert!(state.grid().iter().all(|c| c.is_none()));
    assert_eq!(state.legal_cells().len(), NUM_CELLS);
}
