use squares_cli::cards::{parse_card, parse_line, Card};
use squares_cli::classify::PartialHand;
use squares_cli::scoring::PointSystem;

fn full_grid_from(notations: [&str; 25]) -> [Option<Card>; 25] {
    let mut grid = [None; 25];
    for (i, n) in notations.iter().enumerate() {
        grid[i] = Some(parse_card(n).unwrap());
    }
    grid
}

#[test]
fn test_american_values() {
    let points = PointSystem::american();
    assert_eq!(points.hand_score(PartialHand::HighCard5).unwrap(), 0);
    assert_eq!(points.hand_score(PartialHand::OnePair5).unwrap(), 2);
    assert_eq!(points.hand_score(PartialHand::RoyalFlush5).unwrap(), 100);
}

#[test]
fn test_english_flush_below_straight() {
    let points = PointSystem::english();
    assert!(
        points.hand_score(PartialHand::Flush5).unwrap()
            < points.hand_score(PartialHand::Straight5).unwrap()
    );
}

#[test]
fn test_no_score_for_partial_category() {
    let points = PointSystem::american();
    assert!(points.hand_score(PartialHand::OnePair4).is_err());
    assert!(points.hand_score(PartialHand::ZeroCards).is_err());
}

#[test]
fn test_score_line() {
    let points = PointSystem::american();
    let line = parse_line("9s 9d 9h Tc Ts").unwrap();
    assert_eq!(points.score_line(&line).unwrap(), 25); // full house
}

#[test]
fn test_score_line_rejects_partial() {
    let points = PointSystem::american();
    let line = parse_line("9s 9d -- -- --").unwrap();
    assert!(points.score_line(&line).is_err());
}

#[test]
fn test_score_grid_sums_rows_and_columns() {
    // Rows: four three-of-a-kinds and a club flush. Columns: three one-pair
    // hands, four sevens, and an offsuit 8-to-queen straight.
    let grid = full_grid_from([
        "2s", "2h", "2d", "7s", "8d", //
        "3s", "3h", "3d", "7h", "9c", //
        "4s", "4h", "4d", "7d", "Tc", //
        "5s", "5h", "5d", "7c", "Jc", //
        "2c", "3c", "4c", "5c", "Qc", //
    ]);
    let points = PointSystem::american();
    let expected = 4 * 10 + 20 + 3 * 2 + 50 + 15;
    assert_eq!(points.score_grid(&grid).unwrap(), expected);
}

#[test]
fn test_score_grid_rejects_partial_grid() {
    let points = PointSystem::american();
    let mut grid = [None; 25];
    grid[0] = Some(parse_card("As").unwrap());
    assert!(points.score_grid(&grid).is_err());
}
